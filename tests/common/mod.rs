//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use order_hook::http::build_router;
use order_hook::orders::StoreError;
use order_hook::{AppState, HttpServer, OrderRecord, OrderStore, ServiceConfig, Shutdown};

/// Fresh state with an empty in-memory store.
pub fn make_state() -> AppState {
    AppState::new(ServiceConfig::default())
}

/// Store whose backend is always down.
pub struct FailingOrderStore;

impl OrderStore for FailingOrderStore {
    fn upsert(&self, _record: OrderRecord) -> Result<Option<OrderRecord>, StoreError> {
        Err(StoreError::Unavailable("backend offline".into()))
    }

    fn get(&self, _id: &str) -> Result<Option<OrderRecord>, StoreError> {
        Err(StoreError::Unavailable("backend offline".into()))
    }

    fn list(&self) -> Result<Vec<OrderRecord>, StoreError> {
        Err(StoreError::Unavailable("backend offline".into()))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("backend offline".into()))
    }
}

pub fn failing_state() -> AppState {
    AppState::with_store(ServiceConfig::default(), Arc::new(FailingOrderStore))
}

/// Drive the router with a single request and return (status, body).
pub async fn call(state: &AppState, req: Request<Body>) -> (StatusCode, Bytes) {
    call_router(build_router(state.clone()), req).await
}

pub async fn call_router(router: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = router.oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_webhook(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/webhook/paypal")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn parse_json(b: Bytes) -> Value {
    serde_json::from_slice(&b).expect("body is not valid JSON")
}

/// Send one webhook event and return (status, json body).
pub async fn ingest(state: &AppState, event: &Value) -> (StatusCode, Value) {
    let (status, body) = call(state, post_webhook(event.to_string())).await;
    (status, parse_json(body))
}

/// Event whose only identifier is `resource.id`.
pub fn event_with_resource_id(event_type: &str, id: &str) -> Value {
    serde_json::json!({
        "id": format!("WH-{id}"),
        "event_type": event_type,
        "create_time": "2024-05-01T10:00:00Z",
        "resource": {
            "id": id,
            "amount": {"value": "10.00", "currency_code": "USD"}
        }
    })
}

/// Start the full server (middleware included) on an ephemeral port.
pub async fn start_server(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.listener();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
