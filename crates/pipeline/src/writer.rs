//! Batch writer - buffered, batched persistence of audit records
//!
//! Producers hand records to [`BatchWriter::submit`]; a single background
//! accumulator task drains the submission queue, collects records into an
//! in-progress batch, and flushes to the store when the batch fills or the
//! batch timer elapses. Each producer is answered with the outcome of the
//! flush that carried its records.
//!
//! # Design
//!
//! - The in-progress batch and its pending result slots are owned by the
//!   accumulator task alone; producers only ever touch the queue
//! - A full queue never blocks a producer: the producer writes its own
//!   records directly through the store instead
//! - Store calls run under the configured storage timeout, independent of
//!   any producer's deadline
//! - [`BatchWriter::close`] stops intake, drains the queue, performs one
//!   final flush, and bounds the whole sequence with a caller deadline

use std::mem;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use trail_record::Record;
use trail_store::RecordStore;

use crate::config::WriterConfig;
use crate::error::{BuildError, WriteError};
use crate::metrics::WriterMetrics;

#[cfg(test)]
#[path = "writer_test.rs"]
mod writer_test;

/// One unit of work travelling from a producer to the accumulator
struct Submission {
    /// Records to persist, in submission order
    records: Vec<Record>,

    /// Single-use result slot, written exactly once after the flush
    done: oneshot::Sender<Result<(), WriteError>>,
}

/// Outcome of attempting to place a submission on the queue
enum Enqueue {
    /// Submission queued; the caller waits on the result slot
    Queued(oneshot::Receiver<Result<(), WriteError>>),

    /// Queue full; the caller writes its own records directly
    Saturated(Vec<Record>),

    /// Nothing to persist
    Empty,
}

/// Builder for [`BatchWriter`]
///
/// A store is required; every configuration value is optional and falls
/// back to the documented defaults.
#[derive(Default)]
pub struct BatchWriterBuilder {
    /// Destination for flushed batches
    store: Option<Arc<dyn RecordStore>>,

    /// Writer configuration, normalized at build time
    config: WriterConfig,
}

impl BatchWriterBuilder {
    /// Set the record store batches are flushed to
    #[must_use]
    pub fn store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the writer configuration
    #[must_use]
    pub fn config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the writer and spawn its accumulator task
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingStore`] when no store was configured.
    pub fn build(self) -> Result<BatchWriter, BuildError> {
        let store = self.store.ok_or(BuildError::MissingStore)?;
        Ok(BatchWriter::new(store, self.config))
    }
}

/// Buffered batch writer for audit records
///
/// Cheap to share behind an `Arc`; every method takes `&self`. The writer
/// owns one background accumulator task for its whole lifetime. Dropping
/// the writer without calling [`close`](Self::close) closes the queue, and
/// the accumulator drains and flushes whatever it still holds on its way
/// out.
pub struct BatchWriter {
    /// Submission queue; capacity is the configured buffer size
    queue: mpsc::Sender<Submission>,

    /// Store used for direct writes on the fallback path
    store: Arc<dyn RecordStore>,

    /// Normalized configuration
    config: WriterConfig,

    /// Shutdown signal shared with the accumulator
    shutdown: CancellationToken,

    /// Accumulator join handle, taken by the first `close` call
    worker: Mutex<Option<JoinHandle<()>>>,

    /// Counters shared with the accumulator
    metrics: Arc<WriterMetrics>,
}

impl BatchWriter {
    /// Returns a builder for the writer
    #[must_use]
    pub fn builder() -> BatchWriterBuilder {
        BatchWriterBuilder::default()
    }

    /// Create a writer and spawn its accumulator task
    ///
    /// Zero configuration values are replaced with the defaults. Must be
    /// called within a tokio runtime.
    pub fn new(store: Arc<dyn RecordStore>, config: WriterConfig) -> Self {
        let config = config.normalized();
        let (queue, rx) = mpsc::channel(config.buffer_size);
        let shutdown = CancellationToken::new();
        let metrics = Arc::new(WriterMetrics::new());

        let accumulator = Accumulator {
            rx,
            store: Arc::clone(&store),
            config: config.clone(),
            shutdown: shutdown.clone(),
            metrics: Arc::clone(&metrics),
            batch: Vec::with_capacity(config.batch_size),
            pending: Vec::new(),
        };
        let worker = tokio::spawn(accumulator.run());

        Self {
            queue,
            store,
            config,
            shutdown,
            worker: Mutex::new(Some(worker)),
            metrics,
        }
    }

    /// Submit records for batched persistence
    ///
    /// Returns once the flush carrying these records completes, with that
    /// flush's exact outcome. When the queue is full the records are
    /// written directly through the store instead, bypassing batching and
    /// ordering. An empty submission returns `Ok` without touching the
    /// queue.
    ///
    /// # Errors
    ///
    /// [`WriteError::Unavailable`] when the writer is shut down;
    /// [`WriteError::Storage`] or [`WriteError::StorageTimeout`] when the
    /// store failed the batch.
    pub async fn submit(&self, records: Vec<Record>) -> Result<(), WriteError> {
        match self.try_enqueue(records)? {
            Enqueue::Empty => Ok(()),
            Enqueue::Queued(slot) => resolve_slot(slot.await),
            Enqueue::Saturated(records) => self.store_direct(records).await,
        }
    }

    /// Submit records, bounding the wait with the caller's cancellation
    ///
    /// Identical to [`submit`](Self::submit) except that the wait for the
    /// flush outcome races `cancel`. Losing the race returns
    /// [`WriteError::Cancelled`] immediately; the submission stays queued
    /// and its records are still flushed, the caller just never learns the
    /// outcome. Cancellation during a fallback write abandons the in-flight
    /// store call.
    pub async fn submit_with_cancel(
        &self,
        cancel: &CancellationToken,
        records: Vec<Record>,
    ) -> Result<(), WriteError> {
        match self.try_enqueue(records)? {
            Enqueue::Empty => Ok(()),
            Enqueue::Queued(mut slot) => tokio::select! {
                outcome = &mut slot => resolve_slot(outcome),
                _ = cancel.cancelled() => Err(WriteError::Cancelled),
            },
            Enqueue::Saturated(records) => tokio::select! {
                result = self.store_direct(records) => result,
                _ = cancel.cancelled() => Err(WriteError::Cancelled),
            },
        }
    }

    /// Shut the writer down, draining and flushing everything accepted
    ///
    /// Raises the shutdown signal, then waits up to `timeout` for the
    /// accumulator to drain the queue and perform its final flush. On
    /// success every record accepted before this call has been flushed or
    /// explicitly failed to its producer.
    ///
    /// # Errors
    ///
    /// [`WriteError::AlreadyClosed`] when `close` was already called;
    /// [`WriteError::CloseTimeout`] when the deadline elapsed first, in
    /// which case some records may not have been flushed (the drain keeps
    /// running detached).
    pub async fn close(&self, timeout: Duration) -> Result<(), WriteError> {
        let worker = self
            .worker
            .lock()
            .take()
            .ok_or(WriteError::AlreadyClosed)?;

        tracing::info!("closing audit batch writer");
        self.shutdown.cancel();

        match tokio::time::timeout(timeout, worker).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(join_err)) => {
                tracing::error!(error = %join_err, "accumulator task failed during close");
                Err(WriteError::Unavailable)
            }
            Err(_) => Err(WriteError::CloseTimeout),
        }
    }

    /// Check if shutdown has been initiated
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Get the writer's metrics
    #[inline]
    pub fn metrics(&self) -> &WriterMetrics {
        &self.metrics
    }

    /// Get the normalized configuration
    #[inline]
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Place a submission on the queue without waiting
    fn try_enqueue(&self, records: Vec<Record>) -> Result<Enqueue, WriteError> {
        if records.is_empty() {
            return Ok(Enqueue::Empty);
        }
        if self.shutdown.is_cancelled() {
            self.metrics.submission_rejected();
            return Err(WriteError::Unavailable);
        }

        let count = records.len() as u64;
        let (done, slot) = oneshot::channel();
        match self.queue.try_send(Submission { records, done }) {
            Ok(()) => {
                self.metrics.submission_enqueued(count);
                Ok(Enqueue::Queued(slot))
            }
            Err(TrySendError::Full(submission)) => Ok(Enqueue::Saturated(submission.records)),
            Err(TrySendError::Closed(_)) => {
                self.metrics.submission_rejected();
                Err(WriteError::Unavailable)
            }
        }
    }

    /// Write the caller's own records straight through the store
    ///
    /// The load-shedding valve: adds latency for this caller but never
    /// drops a record. Bounded by the same storage timeout as a flush.
    async fn store_direct(&self, records: Vec<Record>) -> Result<(), WriteError> {
        self.metrics.fallback_write(records.len() as u64);
        tracing::debug!(
            records = records.len(),
            "submission queue full, writing directly"
        );
        store_with_timeout(&*self.store, self.config.storage_timeout, records).await
    }
}

/// Map a result-slot read to the producer-visible outcome
///
/// A dropped slot means the accumulator exited without flushing this
/// submission, which only happens during the shutdown race.
fn resolve_slot(
    outcome: Result<Result<(), WriteError>, oneshot::error::RecvError>,
) -> Result<(), WriteError> {
    match outcome {
        Ok(result) => result,
        Err(_) => Err(WriteError::Unavailable),
    }
}

/// Call the store under the isolated storage timeout
async fn store_with_timeout(
    store: &dyn RecordStore,
    timeout: Duration,
    records: Vec<Record>,
) -> Result<(), WriteError> {
    match tokio::time::timeout(timeout, store.store_batch(records)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(WriteError::storage(err)),
        Err(_) => Err(WriteError::StorageTimeout { elapsed: timeout }),
    }
}

/// Single-consumer accumulator task
///
/// Exclusively owns the in-progress batch and its pending result slots;
/// nothing else ever reads or mutates them.
struct Accumulator {
    /// Submission queue receiver
    rx: mpsc::Receiver<Submission>,

    /// Destination for flushed batches
    store: Arc<dyn RecordStore>,

    /// Normalized configuration
    config: WriterConfig,

    /// Shutdown signal from the writer
    shutdown: CancellationToken,

    /// Counters shared with the writer
    metrics: Arc<WriterMetrics>,

    /// Records collected since the last flush
    batch: Vec<Record>,

    /// Result slots for every submission contributing to `batch`
    pending: Vec<oneshot::Sender<Result<(), WriteError>>>,
}

impl Accumulator {
    /// Run the accumulator until shutdown, then drain and flush
    async fn run(mut self) {
        // interval() yields its first tick immediately; start one period out
        // so the timer only ever fires after a full batch-timeout window.
        let mut interval = tokio::time::interval_at(
            tokio::time::Instant::now() + self.config.batch_timeout,
            self.config.batch_timeout,
        );

        tracing::info!(
            buffer_size = self.config.buffer_size,
            batch_size = self.config.batch_size,
            batch_timeout_ms = self.config.batch_timeout.as_millis() as u64,
            "audit batch writer started"
        );

        loop {
            tokio::select! {
                submission = self.rx.recv() => match submission {
                    Some(submission) => {
                        self.absorb(submission);
                        if self.batch.len() >= self.config.batch_size {
                            self.flush().await;
                        }
                    }
                    // Every producer handle is gone; nothing further can
                    // arrive, so finish exactly like a shutdown.
                    None => break,
                },
                _ = interval.tick() => {
                    if !self.batch.is_empty() {
                        self.flush().await;
                    }
                }
                _ = self.shutdown.cancelled() => break,
            }
        }

        self.drain().await;
    }

    /// Append a submission's records and result slot to the in-progress batch
    fn absorb(&mut self, submission: Submission) {
        self.batch.extend(submission.records);
        self.pending.push(submission.done);
    }

    /// Pull every submission still queued, then perform the final flush
    async fn drain(&mut self) {
        let mut drained = 0usize;
        while let Ok(submission) = self.rx.try_recv() {
            drained += 1;
            self.absorb(submission);
        }
        if drained > 0 {
            tracing::debug!(submissions = drained, "drained submission queue");
        }

        self.flush().await;
        tracing::info!("audit batch writer stopped");
    }

    /// Flush the in-progress batch and settle every pending result slot
    ///
    /// No-op when the batch is empty. The store call runs under the
    /// storage timeout, never under any producer's deadline.
    async fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }

        let records = mem::replace(&mut self.batch, Vec::with_capacity(self.config.batch_size));
        let pending = mem::take(&mut self.pending);
        let count = records.len();

        let outcome =
            store_with_timeout(&*self.store, self.config.storage_timeout, records).await;

        match &outcome {
            Ok(()) => {
                self.metrics.batch_flushed(count as u64);
                tracing::debug!(records = count, "flushed batch");
            }
            Err(err) => {
                self.metrics.flush_failed();
                tracing::warn!(error = %err, records = count, "batch flush failed");
            }
        }

        // A producer that stopped waiting dropped its receiver; the send
        // fails without blocking and the slot is skipped.
        for slot in pending {
            let _ = slot.send(outcome.clone());
        }
    }
}
