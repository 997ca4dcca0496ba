//! RocksDB storage backend for the quad store.
//!
//! Persists one statement set into four redundantly ordered RocksDB
//! databases plus two namespace maps, all derived from a single base path.
//!
//! # Physical Stores
//! Six directories per logical store, named `<base>_<suffix>`:
//! - `spoc`, `cspo`, `opsc`, `pcos` - quad indexes, one full copy each
//! - `ns_prefix`, `ns_url` - namespace lookups by prefix and by URI
//!
//! # Module Structure
//! - `config`: Configuration options (StoreConfig)
//! - `error`: Error types (StorageError)
//! - `core`: Main QuadStore struct with open/flush/health
//! - `quad_ops`: Statement add/scan/remove
//! - `namespace_ops`: Namespace add/get/remove
//! - `update`: Mixed batched updates across statements and namespaces

mod config;
mod core;
mod error;
mod namespace_ops;
mod quad_ops;
mod update;

#[cfg(test)]
mod tests_quads;

// Re-export configuration
pub use config::{StoreConfig, DEFAULT_BLOCK_CACHE_SIZE, DEFAULT_MAX_OPEN_FILES};

// Re-export error types
pub use error::{StorageError, StorageResult};

// Re-export main struct and operation types
pub use core::QuadStore;
pub use quad_ops::StatementScan;
pub use update::{UpdateOp, UpdateStats};
