//! Writer configuration
//!
//! Tuning knobs for the batch writer, fixed at construction. Zero values
//! are treated as unset and replaced with the documented defaults; explicit
//! non-zero values are never overridden.

use std::time::Duration;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Default capacity of the submission queue before the direct-write
/// fallback engages
pub const DEFAULT_BUFFER_SIZE: usize = 1000;

/// Default record count that forces an early flush
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default maximum wait before a partial batch is flushed
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_millis(100);

/// Default bound on a single store call
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for [`BatchWriter`](crate::BatchWriter)
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Queued submissions held before the direct-write fallback engages
    pub buffer_size: usize,

    /// Records per batch before a forced flush
    pub batch_size: usize,

    /// Maximum wait before flushing a partial batch
    pub batch_timeout: Duration,

    /// Maximum duration of one store call
    pub storage_timeout: Duration,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }
}

impl WriterConfig {
    /// Set the submission queue capacity
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the record count that forces an early flush
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set the maximum wait before a partial batch is flushed
    #[must_use]
    pub fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = timeout;
        self
    }

    /// Set the bound on a single store call
    #[must_use]
    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Replace unset (zero) values with the defaults
    ///
    /// Applied once when the writer is built, so a caller-provided zero is
    /// indistinguishable from leaving the field untouched.
    pub(crate) fn normalized(mut self) -> Self {
        if self.buffer_size == 0 {
            self.buffer_size = DEFAULT_BUFFER_SIZE;
        }
        if self.batch_size == 0 {
            self.batch_size = DEFAULT_BATCH_SIZE;
        }
        if self.batch_timeout.is_zero() {
            self.batch_timeout = DEFAULT_BATCH_TIMEOUT;
        }
        if self.storage_timeout.is_zero() {
            self.storage_timeout = DEFAULT_STORAGE_TIMEOUT;
        }
        self
    }
}
