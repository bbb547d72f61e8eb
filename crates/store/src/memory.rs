//! In-memory record store
//!
//! Keeps every stored record in a process-local vector. This is the store
//! used by the pipeline's own tests and by local development setups that
//! don't want a database running.

use async_trait::async_trait;
use parking_lot::Mutex;

use trail_record::Record;

use crate::error::StoreError;
use crate::store::RecordStore;

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

/// Record store backed by process memory
///
/// Stored records are appended in arrival order. Share the store between
/// the writer and a test harness by wrapping it in `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Stored records in arrival order
    records: Mutex<Vec<Record>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, in arrival order
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Discard every stored record
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn store_batch(&self, records: Vec<Record>) -> Result<(), StoreError> {
        self.records.lock().extend(records);
        Ok(())
    }
}
