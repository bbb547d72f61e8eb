//! Writer metrics
//!
//! Counters updated by the producer API and the accumulator task. Shared
//! between the writer and its background task via `Arc`; read with
//! [`WriterMetrics::snapshot`].

use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

/// Metrics for one batch writer
#[derive(Debug, Default)]
pub struct WriterMetrics {
    /// Records accepted through either path
    records_submitted: AtomicU64,

    /// Submissions placed on the queue
    submissions_enqueued: AtomicU64,

    /// Submissions rejected because the writer was shut down
    submissions_rejected: AtomicU64,

    /// Direct store writes taken because the queue was full
    fallback_writes: AtomicU64,

    /// Batches flushed successfully
    batches_flushed: AtomicU64,

    /// Records flushed successfully (sum of batch sizes)
    records_flushed: AtomicU64,

    /// Flushes that failed or timed out
    flush_errors: AtomicU64,
}

impl WriterMetrics {
    /// Create a zeroed metrics instance
    pub const fn new() -> Self {
        Self {
            records_submitted: AtomicU64::new(0),
            submissions_enqueued: AtomicU64::new(0),
            submissions_rejected: AtomicU64::new(0),
            fallback_writes: AtomicU64::new(0),
            batches_flushed: AtomicU64::new(0),
            records_flushed: AtomicU64::new(0),
            flush_errors: AtomicU64::new(0),
        }
    }

    /// Record a submission placed on the queue
    #[inline]
    pub(crate) fn submission_enqueued(&self, records: u64) {
        self.submissions_enqueued.fetch_add(1, Ordering::Relaxed);
        self.records_submitted.fetch_add(records, Ordering::Relaxed);
    }

    /// Record a direct write taken because the queue was full
    #[inline]
    pub(crate) fn fallback_write(&self, records: u64) {
        self.fallback_writes.fetch_add(1, Ordering::Relaxed);
        self.records_submitted.fetch_add(records, Ordering::Relaxed);
    }

    /// Record a submission rejected at intake
    #[inline]
    pub(crate) fn submission_rejected(&self) {
        self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful flush
    #[inline]
    pub(crate) fn batch_flushed(&self, records: u64) {
        self.batches_flushed.fetch_add(1, Ordering::Relaxed);
        self.records_flushed.fetch_add(records, Ordering::Relaxed);
    }

    /// Record a failed or timed-out flush
    #[inline]
    pub(crate) fn flush_failed(&self) {
        self.flush_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time snapshot of all counters
    pub fn snapshot(&self) -> WriterMetricsSnapshot {
        WriterMetricsSnapshot {
            records_submitted: self.records_submitted.load(Ordering::Relaxed),
            submissions_enqueued: self.submissions_enqueued.load(Ordering::Relaxed),
            submissions_rejected: self.submissions_rejected.load(Ordering::Relaxed),
            fallback_writes: self.fallback_writes.load(Ordering::Relaxed),
            batches_flushed: self.batches_flushed.load(Ordering::Relaxed),
            records_flushed: self.records_flushed.load(Ordering::Relaxed),
            flush_errors: self.flush_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of writer metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterMetricsSnapshot {
    /// Records accepted through either path
    pub records_submitted: u64,
    /// Submissions placed on the queue
    pub submissions_enqueued: u64,
    /// Submissions rejected because the writer was shut down
    pub submissions_rejected: u64,
    /// Direct store writes taken because the queue was full
    pub fallback_writes: u64,
    /// Batches flushed successfully
    pub batches_flushed: u64,
    /// Records flushed successfully
    pub records_flushed: u64,
    /// Flushes that failed or timed out
    pub flush_errors: u64,
}
