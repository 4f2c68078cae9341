//! PayPal webhook envelope.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::webhook::WebhookError;

/// One event notification as delivered by the payment processor.
///
/// Only `resource` is strict: it must be a JSON object. Envelope scalars are
/// read leniently, so a null or oddly typed field never rejects an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Empty when absent or not a string; normalizes to `UNKNOWN`.
    #[serde(default, deserialize_with = "lenient_event_type")]
    pub event_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub create_time: Option<String>,
    pub resource: Map<String, Value>,
}

impl WebhookEvent {
    /// Decode a raw request body.
    ///
    /// Fails when the body is not JSON, when `resource` is missing, or when
    /// `resource` is not an object.
    pub fn from_slice(body: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(body).map_err(WebhookError::MalformedPayload)
    }
}

/// Strings pass through, numbers are rendered, anything else is dropped.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

fn lenient_event_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_minimal_envelope() {
        let event = WebhookEvent::from_slice(br#"{"resource": {"id": "X"}}"#).unwrap();
        assert_eq!(event.event_type, "");
        assert_eq!(event.resource["id"], "X");
    }

    #[test]
    fn test_envelope_scalars_are_lenient() {
        let event = WebhookEvent::from_slice(
            br#"{"id": 12345, "event_type": null, "create_time": false,
                 "summary": 7, "resource_type": [], "resource": {}}"#,
        )
        .unwrap();
        assert_eq!(event.id.as_deref(), Some("12345"));
        assert_eq!(event.event_type, "");
        assert!(event.create_time.is_none());

        let event = WebhookEvent::from_slice(br#"{"event_type": 3, "resource": {}}"#).unwrap();
        assert_eq!(event.event_type, "");
    }

    #[test]
    fn test_rejects_bad_shapes() {
        for body in [
            &br#"{"event_type": "PAYMENT.CAPTURE.COMPLETED"}"#[..],
            br#"{"event_type": "X", "resource": null}"#,
            br#"{"event_type": "X", "resource": "abc"}"#,
            br#"not json"#,
            b"",
        ] {
            assert!(WebhookEvent::from_slice(body).is_err());
        }
    }
}
