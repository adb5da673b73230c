//! Backend gateway subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → health.rs (probe candidates in order, validate payload)
//!     → HealthReport + selected_backend, or HealthUnavailable (503)
//!
//! POST /upload
//!     → upload.rs (check API key, order by preferred URL)
//!     → multipart POST {base}/analyze/ per candidate
//!     → UploadSuccess (verbatim payload), or the most recent UploadFailure
//! ```
//!
//! # Design Decisions
//! - Candidates are an ordered list, not a fixed primary/secondary pair
//! - Configuration is captured at construction; no per-call env reads
//! - No state is shared between requests beyond the pooled HTTP client

pub mod error;
pub mod health;
pub mod target;
pub mod upload;

use std::time::Duration;

use crate::config::GatewayConfig;

pub use error::{AttemptError, GatewayError, UploadError, UploadFailure};
pub use health::{BackendHealth, HealthReport, HealthUnavailable};
pub use target::{BackendTarget, BackendTargets};
pub use upload::{UploadFile, UploadSuccess};

/// Single stable entry point hiding the backend replicas from callers.
#[derive(Clone)]
pub struct Gateway {
    client: reqwest::Client,
    targets: BackendTargets,
    primary: BackendTarget,
    api_key: Option<String>,
    health_timeout: Duration,
    upload_timeout: Duration,
}

impl Gateway {
    /// Create a gateway from a validated configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let targets = BackendTargets::from_urls(config.backends.urls.iter().cloned());
        let primary = targets.primary().cloned().ok_or(GatewayError::NoBackends)?;

        // Backends are internal services; ambient proxy variables are ignored.
        let client = reqwest::Client::builder()
            .user_agent(concat!("chat-insights-gateway/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()?;

        tracing::info!(
            backends = ?targets.iter().map(BackendTarget::as_str).collect::<Vec<_>>(),
            api_key_configured = config.backends.api_key.is_some(),
            "Gateway initialized"
        );

        Ok(Self {
            client,
            targets,
            primary,
            api_key: config.backends.api_key.clone(),
            health_timeout: config.timeouts.health_probe(),
            upload_timeout: config.timeouts.upload(),
        })
    }

    pub fn targets(&self) -> &BackendTargets {
        &self.targets
    }

    /// First configured backend; reported as the attempted origin on total failure.
    pub fn primary(&self) -> &BackendTarget {
        &self.primary
    }
}
