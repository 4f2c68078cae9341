//! Route handlers.
//!
//! Only `paypal_webhook` writes to the store; every other handler is read-only.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::http::response::{
    ApiError, CredentialSets, CredentialsResponse, EndpointInfo, HealthResponse,
    PaypalCredentials, ServiceDirectory,
};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::orders::OrderRecord;
use crate::webhook::processor::now_rfc3339;
use crate::webhook::{process_webhook, WebhookAck};

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// POST /api/webhook/paypal
///
/// The body is taken as raw bytes so that undecodable payloads reach the
/// processor and come back as a 500 rather than an extractor rejection.
pub async fn paypal_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    if state.config.webhook.verify_signatures {
        let check = state.verifier.verify(&headers, &body);
        tracing::debug!(valid = check.valid, "webhook signature check");
    }

    match process_webhook(&body, state.store.as_ref()) {
        Ok(ack) => Ok(Json(ack)),
        Err(e) => {
            tracing::error!(error = %e, body_len = body.len(), "Failed to process webhook");
            metrics::record_webhook_failure();
            Err(ApiError::Internal)
        }
    }
}

/// GET /api/orders/{order_id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderRecord>, ApiError> {
    match state.store.get(&order_id) {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => {
            tracing::debug!(order_id = %order_id, "Order not found");
            Err(ApiError::NotFound)
        }
        Err(e) => {
            tracing::error!(order_id = %order_id, error = %e, "Order lookup failed");
            Err(ApiError::Internal)
        }
    }
}

/// GET /api/orders
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderRecord>>, ApiError> {
    state.store.list().map(Json).map_err(|e| {
        tracing::error!(error = %e, "Order listing failed");
        ApiError::Internal
    })
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let total_orders = state.store.count().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Order count unavailable");
        0
    });

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service.name.clone(),
        timestamp: now_rfc3339(),
        environment: state.config.service.environment.clone(),
        total_orders,
        version: SERVICE_VERSION.to_string(),
    })
}

/// GET /api/verify-credentials
pub async fn verify_credentials(State(state): State<AppState>) -> Json<CredentialsResponse> {
    let vars = &state.config.credentials;
    let paypal = PaypalCredentials {
        client_id: env_is_set(&vars.client_id_var),
        client_secret: env_is_set(&vars.client_secret_var),
        webhook_id: env_is_set(&vars.webhook_id_var),
        mode: env_is_set(&vars.mode_var),
    };

    Json(CredentialsResponse {
        status: "ok".to_string(),
        environment: state.config.service.environment.clone(),
        all_configured: paypal.all_set(),
        credentials: CredentialSets { paypal },
    })
}

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<ServiceDirectory> {
    Json(ServiceDirectory {
        service: state.config.service.name.clone(),
        description: "Receives PayPal payment webhooks and serves the latest known status of each order"
            .to_string(),
        version: SERVICE_VERSION.to_string(),
        environment: state.config.service.environment.clone(),
        endpoints: vec![
            EndpointInfo::new("POST", "/api/webhook/paypal", "Ingest one PayPal webhook event"),
            EndpointInfo::new("GET", "/api/orders/{orderId}", "Fetch one order"),
            EndpointInfo::new("GET", "/api/orders", "List all orders"),
            EndpointInfo::new("GET", "/api/health", "Liveness probe"),
            EndpointInfo::new("GET", "/api/verify-credentials", "Report which PayPal credentials are set"),
        ],
    })
}

fn env_is_set(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| !v.trim().is_empty())
}
