//! Storage error types for the RocksDB backend.
//!
//! Errors carry the physical store they came from so a failure in one of
//! the six databases can be traced without a debugger attached.

use thiserror::Error;

use crate::serialization::SerializationError;

/// Convenience alias for backend results.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// One of the six physical stores failed to open.
    #[error("failed to open store at '{path}': {message}")]
    OpenFailed { path: String, message: String },

    /// A staged batch failed to commit to one store. Fatal: stores earlier
    /// in the commit order may already hold this batch, so the six stores
    /// can disagree until the operation is retried to completion.
    #[error("commit to '{store}' failed: {message}")]
    CommitFailed {
        store: &'static str,
        message: String,
    },

    /// A point read or scan step failed.
    #[error("read from '{store}' failed: {message}")]
    ReadFailed {
        store: &'static str,
        message: String,
    },

    /// Flushing a store's memtable to disk failed. Fatal.
    #[error("flush of '{store}' failed: {message}")]
    FlushFailed {
        store: &'static str,
        message: String,
    },

    /// A stored value failed to decode. Fatal: this layer is the only
    /// writer, so undecodable bytes mean the store itself is damaged.
    #[error("corrupted value in '{store}': {message}")]
    Corrupted {
        store: &'static str,
        message: String,
    },

    /// Encoding a value for storage failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    /// True for errors after which the store's internal consistency is no
    /// longer guaranteed. Callers should stop issuing writes and surface
    /// the failure instead of retrying around it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StorageError::CommitFailed { .. }
                | StorageError::FlushFailed { .. }
                | StorageError::Corrupted { .. }
        )
    }
}

impl From<SerializationError> for StorageError {
    fn from(e: SerializationError) -> Self {
        StorageError::Serialization(e.to_string())
    }
}
