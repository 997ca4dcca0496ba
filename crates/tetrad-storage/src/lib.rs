//! Tetrad storage layer.
//!
//! Persists RDF statements into four redundant, differently-ordered RocksDB
//! indexes (SPOC, CSPO, OPSC, PCOS) plus two namespace stores, so that a
//! lookup by any combination of statement fields can be served by a range
//! scan over one well-chosen index.
//!
//! # Architecture
//! - `keys`: fixed-width term digests, 64-byte index keys, key comparator
//! - `pattern`: pattern-to-index planner and scan bounds
//! - `stores`: physical store layout and RocksDB options
//! - `serialization`: bincode encoding of stored values
//! - `rocksdb_backend`: the `QuadStore` itself and its operations
//!
//! Writes stage into per-store batches and commit in a fixed store order;
//! there is no atomicity across the six stores. Reads re-verify every scan
//! hit against the real term values, so digest collisions and fields beyond
//! the scanned key prefix never surface to callers.

pub mod keys;
pub mod pattern;
pub mod rocksdb_backend;
pub mod serialization;
pub mod stores;

pub use keys::{Digest, IndexKey, IndexOrder, StatementDigests, DIGEST_LEN, KEY_LEN};
pub use pattern::PatternQuery;
pub use rocksdb_backend::{
    QuadStore, StatementScan, StorageError, StorageResult, StoreConfig, UpdateOp, UpdateStats,
};
pub use serialization::{
    deserialize_namespace, deserialize_statement, serialize_namespace, serialize_statement,
    SerializationError,
};

// Re-export model types for storage consumers.
pub use tetrad_core::{Literal, Namespace, NamespacePattern, Statement, StatementPattern, Term};
