//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the order webhook service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Service identity and environment label.
    pub service: ServiceInfoConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Webhook ingestion settings.
    pub webhook: WebhookConfig,

    /// Names of the credential environment variables reported by
    /// `/api/verify-credentials`.
    pub credentials: CredentialsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    /// Base URL printed in startup logs.
    ///
    /// Production prints the public URL; every other environment prints the
    /// local address.
    pub fn base_url(&self) -> String {
        if self.service.is_production() {
            if let Some(url) = &self.service.public_url {
                return url.as_str().trim_end_matches('/').to_string();
            }
        }
        format!("http://localhost:{}", self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Overridden by the `PORT` environment variable.
    pub port: u16,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// Service identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceInfoConfig {
    /// Name reported by the health endpoint.
    pub name: String,

    /// Environment label ("development", "production", ...). Display only.
    pub environment: String,

    /// Public base URL used in production startup logs.
    pub public_url: Option<Url>,
}

impl ServiceInfoConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl Default for ServiceInfoConfig {
    fn default() -> Self {
        Self {
            name: "order-hook".to_string(),
            environment: "development".to_string(),
            public_url: None,
        }
    }
}

/// Cross-origin resource sharing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API.
    pub allowed_origins: Vec<String>,

    /// Allow credentialed requests (cookies, authorization headers).
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "https://shop.example.com".to_string(),
                "https://admin.example.com".to_string(),
                "http://localhost:3000".to_string(),
            ],
            allow_credentials: true,
        }
    }
}

/// Webhook ingestion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Run the signature check before processing events.
    ///
    /// WARNING: the only verifier shipped is permissive and accepts every
    /// event. Do not rely on this for authenticity.
    pub verify_signatures: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            verify_signatures: true,
        }
    }
}

/// Environment variable names holding the payment processor credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub client_id_var: String,
    pub client_secret_var: String,
    pub webhook_id_var: String,
    pub mode_var: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            client_id_var: "PAYPAL_CLIENT_ID".to_string(),
            client_secret_var: "PAYPAL_CLIENT_SECRET".to_string(),
            webhook_id_var: "PAYPAL_WEBHOOK_ID".to_string(),
            mode_var: "PAYPAL_MODE".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format: "pretty" or "json".
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
