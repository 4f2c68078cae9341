//! Order records and their storage.

pub mod store;
pub mod types;

pub use store::{InMemoryOrderStore, OrderStore, StoreError};
pub use types::{OrderRecord, OrderStatus};
