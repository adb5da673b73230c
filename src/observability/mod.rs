//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every backend attempt logs origin URL, status and a bounded body excerpt
//! - Request ID (x-request-id) is attached to each inbound request span

pub mod logging;
pub mod metrics;
