//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use url::Url;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
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

/// Environment variables that override file configuration.
pub const ENV_PORT: &str = "PORT";
pub const ENV_ENVIRONMENT: &str = "APP_ENV";
pub const ENV_PUBLIC_URL: &str = "PUBLIC_URL";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Parse a TOML configuration document without validating it.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using the given lookup.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(port) = get(ENV_PORT) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            var: ENV_PORT,
            value: port.clone(),
        })?;
    }
    if let Some(env) = get(ENV_ENVIRONMENT) {
        config.service.environment = env;
    }
    if let Some(raw) = get(ENV_PUBLIC_URL) {
        let url = Url::parse(&raw).map_err(|_| ConfigError::InvalidEnv {
            var: ENV_PUBLIC_URL,
            value: raw.clone(),
        })?;
        config.service.public_url = Some(url);
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }

    Ok(())
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
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [listener]
            port = 8080

            [service]
            environment = "staging"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.service.environment, "staging");
        assert_eq!(config.service.name, "order-hook");
        assert_eq!(config.cors.allowed_origins.len(), 3);
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = ServiceConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("PORT", "9000"),
                ("APP_ENV", "production"),
                ("PUBLIC_URL", "https://orders.example.com/"),
            ]),
        )
        .unwrap();

        assert_eq!(config.listener.port, 9000);
        assert!(config.service.is_production());
        assert_eq!(config.base_url(), "https://orders.example.com");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = ServiceConfig::default();
        apply_env_overrides(&mut config, env(&[("PORT", ""), ("APP_ENV", " ")])).unwrap();

        assert_eq!(config.listener.port, 3001);
        assert_eq!(config.service.environment, "development");
        assert_eq!(config.base_url(), "http://localhost:3001");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = ServiceConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "PORT", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("order-hook-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[timeouts]\nrequest_secs = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
