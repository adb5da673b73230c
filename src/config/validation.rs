//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate backend URLs and value ranges (timeouts > 0, addresses parse)
//! - Check the inbound request timeout can cover every upload attempt
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one backend URL must be configured")]
    NoBackends,

    #[error("backend URL '{url}' is invalid: {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("timeout '{0}' must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("request timeout of {request_secs}s cannot cover {attempts} upload attempt(s) of {upload_ms}ms")]
    RequestTimeoutTooShort {
        request_secs: u64,
        upload_ms: u64,
        attempts: usize,
    },

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.backends.urls.is_empty() {
        errors.push(ValidationError::NoBackends);
    }

    for raw in &config.backends.urls {
        match Url::parse(raw) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::InvalidBackendUrl {
                url: raw.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidBackendUrl {
                url: raw.clone(),
                reason: e.to_string(),
            }),
        }
    }

    let timeouts = &config.timeouts;
    if timeouts.health_probe_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("health_probe_ms"));
    }
    if timeouts.upload_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("upload_ms"));
    }
    if timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    let attempts = config.backends.urls.iter().collect::<HashSet<_>>().len();
    if timeouts.request_secs > 0
        && timeouts.request().as_millis() < u128::from(timeouts.upload_ms) * attempts as u128
    {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: timeouts.request_secs,
            upload_ms: timeouts.upload_ms,
            attempts,
        });
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.backends.urls = vec!["not a url".into(), "ftp://files.local".into()];
        config.timeouts.health_probe_ms = 0;
        config.listener.bind_address = "localhost".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4, "got {:?}", errors);
        assert!(errors.contains(&ValidationError::ZeroTimeout("health_probe_ms")));
        assert!(matches!(errors[1], ValidationError::InvalidBackendUrl { ref reason, .. } if reason.contains("ftp")));
    }

    #[test]
    fn test_empty_backend_list() {
        let mut config = GatewayConfig::default();
        config.backends.urls.clear();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoBackends]);
    }

    #[test]
    fn test_request_timeout_must_cover_distinct_backends() {
        let mut config = GatewayConfig::default();
        config.backends.urls = vec!["http://a:8000".into(), "http://b:8000".into()];
        config.timeouts.upload_ms = 20_000;
        config.timeouts.request_secs = 30;

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::RequestTimeoutTooShort { attempts: 2, .. }
        ));

        // Identical URLs collapse into a single attempt.
        config.backends.urls = vec!["http://a:8000".into(), "http://a:8000".into()];
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nope".into();
        assert_eq!(validate_config(&config), Ok(()));

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
