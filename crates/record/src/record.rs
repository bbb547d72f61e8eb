//! Record - the audit event that flows through trail
//!
//! A `Record` captures one action taken by one actor against one entity,
//! with free-form metadata attached. Identifiers and timestamps are assigned
//! at construction time; the batching pipeline never mutates a record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One immutable audit event
///
/// Records serialize to JSON for storage backends that want a document
/// representation. The `metadata` map is omitted from the serialized form
/// when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, assigned at construction
    pub id: Uuid,

    /// When the recorded action happened (UTC)
    pub timestamp: DateTime<Utc>,

    /// Who performed the action
    pub actor: String,

    /// What was done
    pub action: String,

    /// What the action was performed on
    pub entity: String,

    /// Free-form contextual metadata
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Record {
    /// Create a record with a fresh id and the current UTC timestamp
    pub fn new(
        actor: impl Into<String>,
        action: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor: actor.into(),
            action: action.into(),
            entity: entity.into(),
            metadata: Map::new(),
        }
    }

    /// Attach a metadata entry, replacing any previous value for the key
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if the record carries any metadata
    #[inline]
    pub fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }
}
