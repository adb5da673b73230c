//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the backend gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Candidate analysis backends and their credentials.
    pub backends: BackendsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Backend used for any slot that is not configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Analysis backend configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendsConfig {
    /// Base URLs in precedence order. The first entry is the primary.
    pub urls: Vec<String>,

    /// Key sent as `X-API-Key` on uploads. Never serialized back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            urls: vec![DEFAULT_BACKEND_URL.to_string(), DEFAULT_BACKEND_URL.to_string()],
            api_key: None,
        }
    }
}

impl std::fmt::Debug for BackendsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendsConfig")
            .field("urls", &self.urls)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Timeout configuration for outbound attempts and inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for a single `GET /health` probe, in milliseconds.
    pub health_probe_ms: u64,

    /// Deadline for a single `POST /analyze/` attempt, in milliseconds.
    pub upload_ms: u64,

    /// Total time allowed for an inbound request, in seconds.
    pub request_secs: u64,
}

impl TimeoutConfig {
    pub fn health_probe(&self) -> Duration {
        Duration::from_millis(self.health_probe_ms)
    }

    pub fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }

    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            health_probe_ms: 3_000,
            upload_ms: 20_000,
            request_secs: 60,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
