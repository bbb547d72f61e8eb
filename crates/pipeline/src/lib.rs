//! Trail pipeline - asynchronous batch accumulation for audit records
//!
//! The batch writer buffers records submitted by many concurrent producers,
//! batches them in a single background task, and flushes each batch to a
//! [`RecordStore`] without blocking producers on slow storage.
//!
//! # Architecture
//!
//! ```text
//! [Producers]                [Accumulator task]              [Store]
//!    submit ──┐
//!    submit ──┼──> mpsc queue ──> in-progress batch ──flush──> store_batch
//!    submit ──┘                   (size or timer)
//!        └───── queue full: direct store_batch ───────────────────^
//! ```
//!
//! # Key Design
//!
//! - **Single consumer**: one accumulator task exclusively owns the
//!   in-progress batch; no locking on the batch itself
//! - **Result slots**: each submission carries a oneshot channel; the flush
//!   outcome is written to every slot in the batch, identically
//! - **Backpressure fallback**: when the queue is full the producer writes
//!   its own records straight through the store, so nothing is dropped
//! - **Isolated flush deadline**: store calls run under the configured
//!   storage timeout, never under any producer's deadline
//! - **Drain on close**: shutdown stops intake, pulls everything still
//!   queued, and performs one final flush before the writer exits
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use trail_pipeline::{BatchWriter, Record, WriterConfig};
//! use trail_store::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let writer = BatchWriter::builder()
//!     .store(Arc::clone(&store))
//!     .config(WriterConfig::default().with_batch_size(50))
//!     .build()?;
//!
//! writer.submit(vec![Record::new("alice", "login", "session")]).await?;
//! writer.close(Duration::from_secs(5)).await?;
//! ```

mod config;
mod error;
mod metrics;
mod writer;

pub use config::{
    DEFAULT_BATCH_SIZE, DEFAULT_BATCH_TIMEOUT, DEFAULT_BUFFER_SIZE, DEFAULT_STORAGE_TIMEOUT,
    WriterConfig,
};
pub use error::{BuildError, Result, WriteError};
pub use metrics::{WriterMetrics, WriterMetricsSnapshot};
pub use writer::{BatchWriter, BatchWriterBuilder};

// Re-export key types from dependencies for convenience
pub use trail_record::Record;
pub use trail_store::{RecordStore, StoreError};
