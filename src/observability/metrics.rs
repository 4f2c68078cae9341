//! Metrics collection and exposition.
//!
//! # Metrics
//! - `orders_webhooks_total` (counter): processed webhooks by event type, status
//! - `orders_webhook_failures_total` (counter): webhooks answered with 500
//! - `orders_stored` (gauge): records currently in the order table

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::orders::OrderStatus;
use crate::webhook::normalize::KNOWN_EVENT_TYPES;

/// Start the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_webhook(event_type: &str, status: OrderStatus) {
    let event_label = KNOWN_EVENT_TYPES
        .iter()
        .find(|(known, _)| *known == event_type)
        .map(|(known, _)| *known)
        .unwrap_or("other");

    counter!(
        "orders_webhooks_total",
        "event_type" => event_label,
        "status" => status.as_str()
    )
    .increment(1);
}

pub fn record_webhook_failure() {
    counter!("orders_webhook_failures_total").increment(1);
}

pub fn record_order_count(count: usize) {
    gauge!("orders_stored").set(count as f64);
}
