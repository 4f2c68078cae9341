//! Webhook ingestion subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/webhook/paypal (raw bytes)
//!     → signature.rs (permissive check, logs header presence)
//!     → event.rs (decode envelope)
//!     → extract.rs (resolve order id)
//!     → normalize.rs (event type → status)
//!     → processor.rs (build record, upsert into OrderStore)
//! ```
//!
//! # Design Decisions
//! - The body is read as bytes, so decode failures surface as 500, never 4xx
//! - A record is stored only after it is fully built
//! - The store is last-write-wins per resolved id

pub mod event;
pub mod extract;
pub mod normalize;
pub mod processor;
pub mod signature;

pub use event::WebhookEvent;
pub use processor::{process_webhook, WebhookAck};
pub use signature::{PermissiveVerifier, SignatureCheck, SignatureVerifier};

use crate::orders::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("malformed webhook payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}
