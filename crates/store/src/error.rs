//! Store error types
//!
//! Errors reported by [`RecordStore`](crate::RecordStore) implementations.
//! The batch contract is all-or-nothing, so one error value describes the
//! fate of every record in the failing call.

use thiserror::Error;

/// Errors emitted by record stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store is unreachable or refused the connection
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Store rejected or failed the batch write
    #[error("write failed: {0}")]
    Write(String),

    /// Records could not be serialized for the backend
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from a file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a write error
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::unavailable("connection refused");
        assert_eq!(err.to_string(), "store unavailable: connection refused");

        let err = StoreError::write("disk full");
        assert_eq!(err.to_string(), "write failed: disk full");

        let err = StoreError::serialization("bad utf-8");
        assert_eq!(err.to_string(), "serialization error: bad utf-8");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StoreError = io_err.into();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
