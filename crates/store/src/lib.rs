//! Trail store - durable destinations for audit records
//!
//! This crate defines the contract the batching pipeline writes through:
//! [`RecordStore`], an atomic batch-persistence capability. Two reference
//! implementations ship with it:
//!
//! - [`MemoryStore`] - keeps records in memory; the store of choice for
//!   tests and local development
//! - [`NullStore`] - discards records while counting them; useful for
//!   benchmarking the pipeline without storage overhead
//!
//! Production deployments implement [`RecordStore`] over their database or
//! log service and hand it to the writer.

mod error;
mod memory;
mod null;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use null::NullStore;
pub use store::RecordStore;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
