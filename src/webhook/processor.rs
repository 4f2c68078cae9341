use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::observability::metrics;
use crate::orders::{OrderRecord, OrderStatus, OrderStore};
use crate::webhook::event::WebhookEvent;
use crate::webhook::extract::{
    first_capture_id, first_purchase_unit, related_order_id, resolve_order_id, IdSource,
};
use crate::webhook::normalize::normalize_status;
use crate::webhook::WebhookError;

/// Acknowledgement returned to the processor after an event is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
    pub status: String,
    pub order_id: String,
    pub event_type: String,
    pub processed_status: OrderStatus,
    pub timestamp: String,
}

/// Build the order snapshot carried by an event, along with the rule that
/// picked its id.
///
/// Pure apart from reading the clock.
pub fn build_record(event: &WebhookEvent) -> (OrderRecord, IdSource) {
    let resource = &event.resource;
    let resolved = resolve_order_id(resource);
    let purchase_unit = first_purchase_unit(resource);

    let amount = resource
        .get("amount")
        .or_else(|| purchase_unit.and_then(|pu| pu.get("amount")))
        .cloned();
    let timestamp = resource
        .get("create_time")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .or_else(|| event.create_time.clone());

    let record = OrderRecord {
        id: resolved.id,
        status: normalize_status(&event.event_type),
        event_type: event.event_type.clone(),
        amount,
        timestamp,
        payer: resource.get("payer").cloned(),
        items: purchase_unit.and_then(|pu| pu.get("items")).cloned(),
        capture_id: first_capture_id(resource),
        related_order_id: related_order_id(resource),
        webhook_id: event.id.clone(),
        updated_at: now_rfc3339(),
    };
    (record, resolved.source)
}

/// Decode, normalize and store one webhook delivery.
///
/// The record is built completely before the store is written, so a failure
/// leaves the table untouched.
pub fn process_webhook(body: &[u8], store: &dyn OrderStore) -> Result<WebhookAck, WebhookError> {
    let event = WebhookEvent::from_slice(body)?;
    let (record, id_source) = build_record(&event);

    let ack = WebhookAck {
        status: "success".to_string(),
        order_id: record.id.clone(),
        event_type: record.event_type.clone(),
        processed_status: record.status,
        timestamp: record.updated_at.clone(),
    };

    let replaced = store.upsert(record)?;

    info!(
        order_id = %ack.order_id,
        id_source = id_source.as_str(),
        event_type = %ack.event_type,
        status = %ack.processed_status,
        webhook_id = event.id.as_deref().unwrap_or("-"),
        replaced = replaced.is_some(),
        "Order updated from webhook"
    );
    metrics::record_webhook(&ack.event_type, ack.processed_status);

    Ok(ack)
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
