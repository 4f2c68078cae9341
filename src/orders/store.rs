//! Order storage.

use std::sync::Arc;

use dashmap::DashMap;

use crate::observability::metrics;
use crate::orders::types::OrderRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("order store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value storage for order records.
///
/// Handlers only see this trait, so a persistent backend can replace the
/// in-memory map without touching request handling.
pub trait OrderStore: Send + Sync {
    /// Insert or fully replace the record under `record.id`.
    ///
    /// Returns the record that was replaced, if any.
    fn upsert(&self, record: OrderRecord) -> Result<Option<OrderRecord>, StoreError>;

    fn get(&self, id: &str) -> Result<Option<OrderRecord>, StoreError>;

    /// Every stored record, in no particular order.
    fn list(&self) -> Result<Vec<OrderRecord>, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;
}

/// Process-lifetime order table. Last write wins.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    inner: Arc<DashMap<String, OrderRecord>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn upsert(&self, record: OrderRecord) -> Result<Option<OrderRecord>, StoreError> {
        let previous = self.inner.insert(record.id.clone(), record);
        metrics::record_order_count(self.inner.len());
        Ok(previous)
    }

    fn get(&self, id: &str) -> Result<Option<OrderRecord>, StoreError> {
        Ok(self.inner.get(id).map(|r| r.value().clone()))
    }

    fn list(&self) -> Result<Vec<OrderRecord>, StoreError> {
        Ok(self.inner.iter().map(|r| r.value().clone()).collect())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.len())
    }
}
