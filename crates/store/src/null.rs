//! Null store - discards all records
//!
//! Accepts every batch, counts it, and drops the data. Useful for measuring
//! pure pipeline throughput without storage overhead, and for wiring up a
//! writer in configurations where persistence is intentionally disabled.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use trail_record::Record;

use crate::error::StoreError;
use crate::store::RecordStore;

#[cfg(test)]
#[path = "null_test.rs"]
mod null_test;

/// Record store that discards every batch
#[derive(Debug, Default)]
pub struct NullStore {
    /// Total batches accepted
    batches: AtomicU64,

    /// Total records accepted (sum of batch sizes)
    records: AtomicU64,
}

impl NullStore {
    /// Create a null store with zeroed counters
    pub const fn new() -> Self {
        Self {
            batches: AtomicU64::new(0),
            records: AtomicU64::new(0),
        }
    }

    /// Batches accepted so far
    #[inline]
    pub fn batches(&self) -> u64 {
        self.batches.load(Ordering::Relaxed)
    }

    /// Records accepted so far
    #[inline]
    pub fn records(&self) -> u64 {
        self.records.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RecordStore for NullStore {
    async fn store_batch(&self, records: Vec<Record>) -> Result<(), StoreError> {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.records.fetch_add(records.len() as u64, Ordering::Relaxed);
        Ok(())
    }
}
