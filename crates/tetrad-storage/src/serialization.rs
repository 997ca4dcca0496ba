//! Binary serialization for stored values.
//!
//! Statements and namespaces are stored as bincode bytes. Both are plain
//! owned-string types with a fixed field layout, which is exactly the shape
//! bincode handles best. Index keys never go through this module; they are
//! built from canonical term bytes in [`crate::keys`].

use thiserror::Error;

use tetrad_core::{Namespace, Statement};

/// Errors from encoding or decoding stored values.
///
/// bincode's error type does not implement Clone, so the underlying message
/// is carried as a String.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Encoding a value to bytes failed.
    #[error("serialization failed: {0}")]
    SerializeFailed(String),

    /// Decoding stored bytes failed. Usually means the bytes on disk are
    /// not a value this version of the store wrote.
    #[error("deserialization failed: {0}")]
    DeserializeFailed(String),
}

/// Serialize a statement to bincode bytes.
pub fn serialize_statement(statement: &Statement) -> Result<Vec<u8>, SerializationError> {
    bincode::serialize(statement).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserialize bincode bytes back into a statement.
pub fn deserialize_statement(bytes: &[u8]) -> Result<Statement, SerializationError> {
    bincode::deserialize(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serialize a namespace to bincode bytes.
pub fn serialize_namespace(namespace: &Namespace) -> Result<Vec<u8>, SerializationError> {
    bincode::serialize(namespace).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserialize bincode bytes back into a namespace.
pub fn deserialize_namespace(bytes: &[u8]) -> Result<Namespace, SerializationError> {
    bincode::deserialize(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
