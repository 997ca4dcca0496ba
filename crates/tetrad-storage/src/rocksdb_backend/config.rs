//! Configuration options for the RocksDB backend.

/// Default block cache size: 256MB, shared across the four quad stores.
pub const DEFAULT_BLOCK_CACHE_SIZE: usize = 256 * 1024 * 1024;

/// Default maximum open files per physical store.
pub const DEFAULT_MAX_OPEN_FILES: i32 = 1000;

/// Tuning knobs applied when opening the six physical stores.
///
/// # Defaults
/// - `block_cache_size`: 256MB (268,435,456 bytes)
/// - `max_open_files`: 1000
/// - `create_if_missing`: true
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Block cache size in bytes, shared by the quad index stores.
    pub block_cache_size: usize,

    /// Maximum open files per physical store. Six stores are opened per
    /// logical store, so the process-wide total is six times this.
    pub max_open_files: i32,

    /// Create store directories that do not exist yet.
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            block_cache_size: DEFAULT_BLOCK_CACHE_SIZE,
            max_open_files: DEFAULT_MAX_OPEN_FILES,
            create_if_missing: true,
        }
    }
}
