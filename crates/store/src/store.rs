//! Record store contract
//!
//! The single capability the batching pipeline depends on. Implementations
//! own their connection handling, retry policy, and encoding; the pipeline
//! only ever observes the outcome of a whole batch.

use async_trait::async_trait;

use trail_record::Record;

use crate::error::StoreError;

/// Durable destination for batches of audit records
///
/// The batch contract is atomic from the caller's perspective: either every
/// record in the call is persisted or the whole call fails. Partial success
/// is not representable and must not be assumed by callers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists the batch.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the batch was not persisted. The error
    /// applies to every record in the call.
    async fn store_batch(&self, records: Vec<Record>) -> Result<(), StoreError>;
}
