//! Trail record types
//!
//! This crate provides the foundational type that flows through the trail
//! pipeline: [`Record`], one immutable audit event. Records are constructed
//! by the application layer and handed to the batch writer for persistence;
//! everything downstream treats them as opaque, already-enriched values.

mod record;

pub use record::Record;
