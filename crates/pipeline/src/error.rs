//! Pipeline error types
//!
//! Errors surfaced to producers and to the shutdown caller. [`WriteError`]
//! is cloneable so a single flush outcome can be handed to every producer
//! whose records were in the batch.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use trail_store::StoreError;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, WriteError>;

/// Errors returned by the batch writer
#[derive(Debug, Clone, Error)]
pub enum WriteError {
    /// Writer is shut down or shutting down; the submission was not accepted
    #[error("audit writer unavailable")]
    Unavailable,

    /// The producer's cancellation fired while waiting for the flush;
    /// the submission stays queued and will still be processed
    #[error("submission cancelled while awaiting flush")]
    Cancelled,

    /// The store failed the batch; every caller in the batch sees the
    /// same value
    #[error("store rejected batch: {0}")]
    Storage(Arc<StoreError>),

    /// One store call exceeded the isolated storage timeout
    #[error("store call timed out after {elapsed:?}")]
    StorageTimeout {
        /// Configured bound the call exceeded
        elapsed: Duration,
    },

    /// `close` was called more than once
    #[error("audit writer already closed")]
    AlreadyClosed,

    /// Shutdown deadline elapsed before drain and final flush completed;
    /// some records may not have been flushed
    #[error("close deadline elapsed before drain completed")]
    CloseTimeout,
}

impl WriteError {
    /// Wrap a store failure for distribution to waiting producers
    pub(crate) fn storage(err: StoreError) -> Self {
        Self::Storage(Arc::new(err))
    }
}

/// Errors from building a writer
#[derive(Debug, Error)]
pub enum BuildError {
    /// No record store was configured
    #[error("record store is not configured")]
    MissingStore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(WriteError::Unavailable.to_string(), "audit writer unavailable");
        assert_eq!(
            WriteError::AlreadyClosed.to_string(),
            "audit writer already closed"
        );

        let err = WriteError::storage(StoreError::write("disk full"));
        assert_eq!(err.to_string(), "store rejected batch: write failed: disk full");

        let err = WriteError::StorageTimeout {
            elapsed: Duration::from_secs(5),
        };
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_storage_error_clones_share_value() {
        let err = WriteError::storage(StoreError::write("disk full"));
        let clone = err.clone();

        assert_eq!(err.to_string(), clone.to_string());
    }

    #[test]
    fn test_build_error_display() {
        assert_eq!(
            BuildError::MissingStore.to_string(),
            "record store is not configured"
        );
    }
}
