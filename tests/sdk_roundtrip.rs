//! End-to-end tests over TCP with the full middleware stack, using the SDK
//! client the way a frontend or the processor would.

use std::collections::HashSet;

use serde_json::json;

use order_hook::ServiceConfig;
use order_sdk::{ClientError, OrderClient};

mod common;

#[tokio::test]
async fn test_webhook_then_query_through_sdk() {
    let (addr, shutdown) = common::start_server(ServiceConfig::default()).await;
    let client = OrderClient::new(&format!("http://{}", addr));

    assert!(client.get_order("ORDER-E2E").await.unwrap().is_none());

    let ack = client
        .send_webhook(&json!({
            "id": "WH-E2E",
            "event_type": "PAYMENT.CAPTURE.COMPLETED",
            "resource": {
                "id": "CAP-E2E",
                "amount": {"value": "42.00", "currency_code": "USD"},
                "supplementary_data": {"related_ids": {"order_id": "ORDER-E2E"}}
            }
        }))
        .await
        .unwrap();
    assert_eq!(ack.order_id, "ORDER-E2E");
    assert_eq!(ack.processed_status, "COMPLETED");

    let order = client.get_order("ORDER-E2E").await.unwrap().unwrap();
    assert_eq!(order.status, "COMPLETED");
    assert_eq!(order.related_order_id.as_deref(), Some("ORDER-E2E"));

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.total_orders, 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_webhook_surfaces_as_server_error() {
    let (addr, shutdown) = common::start_server(ServiceConfig::default()).await;
    let client = OrderClient::new(&format!("http://{}", addr));

    let err = client
        .send_webhook(&json!({"event_type": "PAYMENT.CAPTURE.COMPLETED"}))
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, r#"{"error":"Internal server error"}"#);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(client.list_orders().await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_webhooks_are_all_stored() {
    let (addr, shutdown) = common::start_server(ServiceConfig::default()).await;
    let base = format!("http://{}", addr);

    let mut handles = Vec::new();
    for i in 0..20 {
        let client = OrderClient::new(&base);
        handles.push(tokio::spawn(async move {
            client
                .send_webhook(&common::event_with_resource_id(
                    "CHECKOUT.ORDER.APPROVED",
                    &format!("BURST-{i}"),
                ))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let client = OrderClient::new(&base);
    let ids: HashSet<String> = client
        .list_orders()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    let expected: HashSet<String> = (0..20).map(|i| format!("BURST-{i}")).collect();
    assert_eq!(ids, expected);

    shutdown.trigger();
}

#[tokio::test]
async fn test_middleware_sets_request_id_and_cors() {
    let (addr, shutdown) = common::start_server(ServiceConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{}/api/health", addr))
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(res.headers()["access-control-allow-credentials"], "true");

    let res = client
        .get(format!("http://{}/api/health", addr))
        .header("origin", "https://evil.example.org")
        .header("x-request-id", "caller-supplied")
        .send()
        .await
        .unwrap();
    assert!(!res.headers().contains_key("access-control-allow-origin"));
    assert_eq!(res.headers()["x-request-id"], "caller-supplied");

    shutdown.trigger();
}
