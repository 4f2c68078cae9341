//! PayPal webhook receiver and order-status lookup service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod orders;
pub mod webhook;

pub use config::schema::ServiceConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use orders::{InMemoryOrderStore, OrderRecord, OrderStatus, OrderStore};
