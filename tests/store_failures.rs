//! Routes backed by a store that fails every call.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use axum::http::StatusCode;
use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
use serde_json::json;

mod common;
use common::*;

/// Counts every counter increment by metric name.
#[derive(Clone, Default)]
struct CountingRecorder {
    counters: Arc<Mutex<HashMap<String, Arc<AtomicU64>>>>,
}

impl CountingRecorder {
    fn value(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .unwrap()
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

impl Recorder for CountingRecorder {
    fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

    fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
        let counter = self
            .counters
            .lock()
            .unwrap()
            .entry(key.name().to_string())
            .or_default()
            .clone();
        Counter::from_arc(counter)
    }

    fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
        Histogram::noop()
    }
}

fn recorder() -> &'static CountingRecorder {
    static RECORDER: OnceLock<CountingRecorder> = OnceLock::new();
    RECORDER.get_or_init(|| {
        let recorder = CountingRecorder::default();
        metrics::set_global_recorder(recorder.clone()).expect("recorder already installed");
        recorder
    })
}

#[tokio::test]
async fn test_webhook_store_failure_is_generic_500() {
    let recorder = recorder();
    let before = recorder.value("orders_webhook_failures_total");
    let state = failing_state();

    let (status, body) = ingest(
        &state,
        &event_with_resource_id("PAYMENT.CAPTURE.COMPLETED", "ORDER-DOWN"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));
    assert!(!body.to_string().contains("offline"));

    assert!(recorder.value("orders_webhook_failures_total") > before);
}

#[tokio::test]
async fn test_order_lookup_store_failure_is_500_not_404() {
    let state = failing_state();

    let (status, body) = call(&state, get("/api/orders/ORDER-DOWN")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(parse_json(body), json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn test_order_list_store_failure_is_500() {
    let state = failing_state();

    let (status, body) = call(&state, get("/api/orders")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(parse_json(body), json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn test_health_stays_up_with_zero_orders() {
    let state = failing_state();

    let (status, body) = call(&state, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);

    let health = parse_json(body);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["totalOrders"], 0);
}
