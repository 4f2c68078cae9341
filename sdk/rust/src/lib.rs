//! Typed client for the order-hook HTTP API.

pub mod client;

pub use client::{ClientError, Health, Order, OrderClient, WebhookAck};
