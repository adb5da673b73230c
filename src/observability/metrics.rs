//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by route, status
//! - `gateway_request_duration_seconds` (histogram): inbound latency by route
//! - `gateway_backend_attempts_total` (counter): outbound attempts by
//!   operation, role, outcome
//!
//! Recording is a no-op until a recorder is installed, so library users and
//! tests pay nothing when metrics are disabled.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::resilience::AttemptRole;

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed inbound request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("gateway_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one outbound backend attempt.
pub fn record_attempt(operation: &'static str, role: AttemptRole, outcome: &'static str) {
    metrics::counter!(
        "gateway_backend_attempts_total",
        "operation" => operation,
        "role" => role.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}
