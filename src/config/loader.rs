//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{GatewayConfig, DEFAULT_BACKEND_URL};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the primary backend URL.
pub const ENV_BACKEND_URL_1: &str = "BACKEND_URL_1";
/// Environment variable holding the secondary backend URL.
pub const ENV_BACKEND_URL_2: &str = "BACKEND_URL_2";
/// Environment variable holding the upload API key.
pub const ENV_API_KEY: &str = "VAL_API_KEY";
pub const ENV_BIND_ADDRESS: &str = "GATEWAY_BIND_ADDRESS";
pub const ENV_LOG_LEVEL: &str = "GATEWAY_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment-sourced values onto `config`.
///
/// `lookup` abstracts the environment so callers (and tests) can supply their
/// own source. Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    for (slot, key) in [ENV_BACKEND_URL_1, ENV_BACKEND_URL_2].into_iter().enumerate() {
        if let Some(url) = get(key) {
            let urls = &mut config.backends.urls;
            // Slots are positional: an unset earlier slot gets the default URL.
            while urls.len() < slot {
                urls.push(DEFAULT_BACKEND_URL.to_string());
            }
            if slot < urls.len() {
                urls[slot] = url;
            } else {
                urls.push(url);
            }
        }
    }

    if let Some(key) = get(ENV_API_KEY) {
        config.backends.api_key = Some(key);
    }
    if let Some(addr) = get(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_backend_slots() {
        let mut config = GatewayConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_BACKEND_URL_1, "http://primary:8000"),
                (ENV_BACKEND_URL_2, "http://secondary:8000"),
                (ENV_API_KEY, "k"),
            ]),
        );

        assert_eq!(
            config.backends.urls,
            vec!["http://primary:8000".to_string(), "http://secondary:8000".to_string()]
        );
        assert_eq!(config.backends.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = GatewayConfig::default();
        apply_env_overrides(&mut config, env(&[(ENV_API_KEY, "  "), (ENV_BACKEND_URL_1, "")]));

        assert!(config.backends.api_key.is_none());
        assert_eq!(config.backends.urls[0], "http://localhost:8000");
    }

    #[test]
    fn test_env_appends_when_file_lists_fewer_urls() {
        let mut config = GatewayConfig::default();
        config.backends.urls = vec!["http://only:8000".into()];
        apply_env_overrides(&mut config, env(&[(ENV_BACKEND_URL_2, "http://extra:8000")]));

        assert_eq!(config.backends.urls.len(), 2);
        assert_eq!(config.backends.urls[1], "http://extra:8000");
    }

    #[test]
    fn test_second_slot_keeps_its_position_when_file_lists_none() {
        let mut config = GatewayConfig::default();
        config.backends.urls.clear();
        apply_env_overrides(&mut config, env(&[(ENV_BACKEND_URL_2, "http://secondary:8000")]));

        assert_eq!(
            config.backends.urls,
            vec![DEFAULT_BACKEND_URL.to_string(), "http://secondary:8000".to_string()]
        );
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("gateway-{}.toml", uuid::Uuid::new_v4()));
        fs::write(
            &path,
            r#"
            [listener]
            bind_address = "127.0.0.1:4000"

            [backends]
            urls = ["http://a:8000", "http://b:8000"]
            "#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_file_reports_parse_error() {
        let path = std::env::temp_dir().join(format!("gateway-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[backends\nurls = 3").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::NoBackends,
            ValidationError::ZeroTimeout("upload_ms"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: at least one backend URL must be configured, timeout 'upload_ms' must be greater than zero"
        );
    }
}
