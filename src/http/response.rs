//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Errors carry no detail to the client: 404 and 500 each have one fixed body
//! - Internal causes are logged where they occur, not here

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const ORDER_NOT_FOUND: &str = "Order not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("order not found")]
    NotFound,
    #[error("internal error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, ORDER_NOT_FOUND),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR),
        };
        (
            status,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// GET /api/health
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub environment: String,
    pub total_orders: usize,
    pub version: String,
}

/// GET /api/verify-credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsResponse {
    pub status: String,
    pub environment: String,
    pub credentials: CredentialSets,
    pub all_configured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialSets {
    pub paypal: PaypalCredentials,
}

/// Presence flags only. Values are never returned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaypalCredentials {
    pub client_id: bool,
    pub client_secret: bool,
    pub webhook_id: bool,
    pub mode: bool,
}

impl PaypalCredentials {
    pub fn all_set(&self) -> bool {
        self.client_id && self.client_secret && self.webhook_id && self.mode
    }
}

/// GET /
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDirectory {
    pub service: String,
    pub description: String,
    pub version: String,
    pub environment: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub description: String,
}

impl EndpointInfo {
    pub fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            description: description.to_string(),
        }
    }
}
