//! Order identifier resolution.
//!
//! The processor does not use one identifier consistently across event
//! types, so the id is resolved in priority order:
//!
//! 1. `resource.supplementary_data.related_ids.order_id`
//! 2. `resource.purchase_units[0].payments.captures[0].id`
//! 3. `resource.id`
//! 4. `unknown_<epoch millis>`
//!
//! Each identifier may arrive as a non-empty string or as a number.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};

use crate::webhook::event::scalar_to_string;

pub const UNKNOWN_ID_PREFIX: &str = "unknown_";

/// Which rule produced the resolved id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    RelatedOrder,
    Capture,
    Resource,
    Synthesized,
}

impl IdSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdSource::RelatedOrder => "related_order",
            IdSource::Capture => "capture",
            IdSource::Resource => "resource",
            IdSource::Synthesized => "synthesized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
    pub id: String,
    pub source: IdSource,
}

pub fn related_order_id(resource: &Map<String, Value>) -> Option<String> {
    resource
        .get("supplementary_data")?
        .get("related_ids")?
        .get("order_id")
        .and_then(scalar_to_string)
}

pub fn first_capture_id(resource: &Map<String, Value>) -> Option<String> {
    first_purchase_unit(resource)?
        .get("payments")?
        .get("captures")?
        .get(0)?
        .get("id")
        .and_then(scalar_to_string)
}

pub fn first_purchase_unit(resource: &Map<String, Value>) -> Option<&Value> {
    resource.get("purchase_units")?.get(0)
}

/// Resolve the storage key for an event resource.
pub fn resolve_order_id(resource: &Map<String, Value>) -> ResolvedId {
    if let Some(id) = related_order_id(resource) {
        return ResolvedId {
            id,
            source: IdSource::RelatedOrder,
        };
    }
    if let Some(id) = first_capture_id(resource) {
        return ResolvedId {
            id,
            source: IdSource::Capture,
        };
    }
    if let Some(id) = resource.get("id").and_then(scalar_to_string) {
        return ResolvedId {
            id,
            source: IdSource::Resource,
        };
    }

    // Millisecond resolution: two unmatched events in the same millisecond
    // share an id and the second overwrites the first.
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    ResolvedId {
        id: format!("{UNKNOWN_ID_PREFIX}{millis}"),
        source: IdSource::Synthesized,
    }
}
