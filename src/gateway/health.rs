//! Backend health probing.
//!
//! # Responsibilities
//! - Probe `GET {base}/health` on each candidate in order
//! - Reject payloads missing any of the four required typed fields
//! - Report which backend answered, or a synthesized 503

use axum::http::{header::ACCEPT, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::gateway::error::AttemptError;
use crate::gateway::target::BackendTarget;
use crate::gateway::Gateway;
use crate::observability::{logging::truncate_for_log, metrics};
use crate::resilience::{first_success, with_deadline, AttemptRole};

const UNAVAILABLE_MESSAGE: &str = "Failed to fetch health from any backend server.";
const UNAVAILABLE_DETAILS: &str =
    "No backend server is currently available or responding correctly to health checks.";

/// Health payload reported by an analysis backend.
///
/// The four named fields are required; anything else the backend sends is
/// kept in `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendHealth {
    pub ai_tasks_processing: u64,
    pub ai_tasks_queued: u64,
    pub ai_tasks_worker_capacity: u64,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BackendHealth {
    /// Decode and validate a raw health body.
    pub fn parse(body: &[u8]) -> Result<Self, AttemptError> {
        serde_json::from_slice(body).map_err(|e| AttemptError::Malformed(e.to_string()))
    }
}

/// Successful probe: the backend's payload plus the origin that answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    #[serde(flatten)]
    pub health: BackendHealth,
    pub selected_backend: BackendTarget,
    #[serde(skip)]
    pub status: StatusCode,
}

impl HealthReport {
    pub fn new(mut health: BackendHealth, origin: BackendTarget, status: StatusCode) -> Self {
        health.extra.remove("selected_backend");
        Self {
            health,
            selected_backend: origin,
            status,
        }
    }
}

/// Synthesized result when no backend produced a valid health payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthUnavailable {
    pub message: String,
    pub details: String,
    pub status_code: u16,
    pub selected_backend: BackendTarget,
}

impl HealthUnavailable {
    pub fn new(attempted: BackendTarget) -> Self {
        Self {
            message: UNAVAILABLE_MESSAGE.to_string(),
            details: UNAVAILABLE_DETAILS.to_string(),
            status_code: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            selected_backend: attempted,
        }
    }
}

impl Gateway {
    /// Probe candidates in order and return the first valid health payload.
    pub async fn probe_health(&self) -> Result<HealthReport, HealthUnavailable> {
        let order = self.targets.ordered(None);

        match first_success(&order, |role, target| self.probe_one(role, target)).await {
            Ok(served) => {
                tracing::info!(
                    backend = %served.value.selected_backend,
                    attempt = served.index + 1,
                    "Selected backend for health"
                );
                Ok(served.value)
            }
            Err(exhausted) => {
                tracing::error!(
                    attempts = exhausted.attempts,
                    "All backend health checks failed or returned invalid data"
                );
                Err(HealthUnavailable::new(self.primary().clone()))
            }
        }
    }

    async fn probe_one(
        &self,
        role: AttemptRole,
        target: BackendTarget,
    ) -> Result<HealthReport, AttemptError> {
        let url = target.endpoint("health");
        let result = with_deadline(&url, self.health_timeout, self.fetch_health(&url)).await;

        match result {
            Ok((status, health)) => {
                metrics::record_attempt("health", role, "success");
                Ok(HealthReport::new(health, target, status))
            }
            Err(e) => {
                match &e {
                    AttemptError::Status { status, body } => tracing::warn!(
                        url = %url,
                        status = %status,
                        body = %truncate_for_log(body),
                        "Health check returned non-success status"
                    ),
                    AttemptError::Malformed(reason) => tracing::warn!(
                        url = %url,
                        reason = %reason,
                        "Health check returned malformed data"
                    ),
                    AttemptError::Transport(err) => tracing::warn!(
                        url = %url,
                        error = %err,
                        "Health check failed"
                    ),
                    // Already logged when the deadline fired.
                    AttemptError::Deadline(_) => {}
                }
                metrics::record_attempt("health", role, e.kind());
                Err(e)
            }
        }
    }

    async fn fetch_health(&self, url: &str) -> Result<(StatusCode, BackendHealth), AttemptError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::Status { status, body });
        }

        let body = response.bytes().await?;
        let health = BackendHealth::parse(&body).map_err(|e| {
            tracing::debug!(url = %url, body = %truncate_for_log(&String::from_utf8_lossy(&body)), "Rejected health payload");
            e
        })?;
        Ok((status, health))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_payload_keeps_extra_fields() {
        let body = json!({
            "ai_tasks_processing": 2,
            "ai_tasks_queued": 0,
            "ai_tasks_worker_capacity": 5,
            "status": "ok",
            "version": "1.4.0"
        });
        let health = BackendHealth::parse(body.to_string().as_bytes()).unwrap();
        assert_eq!(health.ai_tasks_worker_capacity, 5);
        assert_eq!(health.extra.get("version"), Some(&json!("1.4.0")));
    }

    #[test]
    fn test_parse_rejects_missing_or_mistyped_fields() {
        let cases = [
            json!({"ai_tasks_processing": 2, "ai_tasks_queued": 0, "status": "ok"}),
            json!({"ai_tasks_processing": "2", "ai_tasks_queued": 0, "ai_tasks_worker_capacity": 5, "status": "ok"}),
            json!({"ai_tasks_processing": 2, "ai_tasks_queued": 0, "ai_tasks_worker_capacity": 5, "status": 1}),
            json!({"ai_tasks_processing": 2, "ai_tasks_queued": null, "ai_tasks_worker_capacity": 5, "status": "ok"}),
        ];
        for case in cases {
            let result = BackendHealth::parse(case.to_string().as_bytes());
            assert!(
                matches!(result, Err(AttemptError::Malformed(_))),
                "expected rejection for {}",
                case
            );
        }
        assert!(BackendHealth::parse(b"<html>oops</html>").is_err());
    }

    #[test]
    fn test_report_serialization() {
        let health = BackendHealth::parse(
            br#"{"ai_tasks_processing":2,"ai_tasks_queued":0,"ai_tasks_worker_capacity":5,"status":"ok","selected_backend":"spoofed"}"#,
        )
        .unwrap();
        let report = HealthReport::new(health, BackendTarget::new("http://a:8000"), StatusCode::OK);

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "ai_tasks_processing": 2,
                "ai_tasks_queued": 0,
                "ai_tasks_worker_capacity": 5,
                "status": "ok",
                "selected_backend": "http://a:8000"
            })
        );
    }

    #[test]
    fn test_unavailable_body() {
        let body = serde_json::to_value(HealthUnavailable::new(BackendTarget::new("http://a"))).unwrap();
        assert_eq!(body["status_code"], 503);
        assert_eq!(body["selected_backend"], "http://a");
        assert_eq!(body["message"], UNAVAILABLE_MESSAGE);
    }
}
