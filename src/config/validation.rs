//! Configuration validation.
//!
//! Serde handles syntactic checks; this module checks value ranges and
//! formats. Validation is a pure function that reports every problem found,
//! not just the first.

use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("service.name must not be empty")]
    EmptyServiceName,
    #[error("service.environment must not be empty")]
    EmptyEnvironment,
    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
    #[error("invalid metrics address: {0}")]
    InvalidMetricsAddress(String),
    #[error("credential variable name for {0} must not be empty")]
    EmptyCredentialVar(&'static str),
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service.name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }
    if config.service.environment.trim().is_empty() {
        errors.push(ValidationError::EmptyEnvironment);
    }

    for origin in &config.cors.allowed_origins {
        let parsed = url::Url::parse(origin).ok();
        let well_formed = parsed.is_some_and(|u| u.has_host())
            && HeaderValue::from_str(origin).is_ok()
            && !origin.ends_with('/');
        if !well_formed {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let creds = &config.credentials;
    for (field, value) in [
        ("client_id", &creds.client_id_var),
        ("client_secret", &creds.client_secret_var),
        ("webhook_id", &creds.webhook_id_var),
        ("mode", &creds.mode_var),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyCredentialVar(field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
