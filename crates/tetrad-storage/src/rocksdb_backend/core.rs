//! Core QuadStore struct and store lifecycle operations.
//!
//! A `QuadStore` owns six RocksDB databases derived from one base path:
//!
//! ```text
//! QuadStore ("/data/graph")
//! ├── /data/graph_spoc       subject, predicate, object, context
//! ├── /data/graph_cspo       context, subject, predicate, object
//! ├── /data/graph_opsc       object, predicate, subject, context
//! ├── /data/graph_pcos       predicate, context, object, subject
//! ├── /data/graph_ns_prefix  namespace by prefix
//! ├── /data/graph_ns_url     namespace by URI
//! └── Cache (LRU block cache shared by the four quad stores)
//! ```
//!
//! Every statement is written to all four quad stores under a differently
//! ordered key, so any pattern shape has one index it can scan with a
//! contiguous key prefix.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rocksdb::{Cache, Options, DB};
use tracing::{debug, info};

use crate::keys::IndexOrder;
use crate::stores::{namespace_store_options, quad_store_options, store_path, store_suffixes};

use super::config::StoreConfig;
use super::error::{StorageError, StorageResult};

// Never written; a point read on it exercises each store's read path.
const HEALTH_CHECK_KEY: &[u8] = b"tetrad.health";

/// RocksDB-backed persistent quad store.
///
/// # Thread Safety
///
/// RocksDB's `DB` type is internally thread-safe for concurrent reads and
/// writes, and all methods here take `&self`, so a `QuadStore` can be shared
/// across threads via `Arc<QuadStore>`. Writers synchronize per store inside
/// the engine; this layer adds no locking of its own. Concurrent updates
/// interleave at store granularity, which readers must tolerate anyway since
/// the six stores never commit atomically.
///
/// # Example
///
/// ```rust
/// use tetrad_storage::QuadStore;
/// use tempfile::TempDir;
///
/// let tmp = TempDir::new().unwrap();
/// let store = QuadStore::open(tmp.path().join("graph")).unwrap();
///
/// store.health_check().unwrap();
/// store.flush().unwrap();
/// ```
pub struct QuadStore {
    pub(super) spoc: DB,
    pub(super) cspo: DB,
    pub(super) opsc: DB,
    pub(super) pcos: DB,
    pub(super) ns_prefix: DB,
    pub(super) ns_uri: DB,

    /// Shared LRU block cache. Kept alive for the lifetime of the four quad
    /// stores that reference it.
    #[allow(dead_code)]
    cache: Cache,

    /// Base path the six store directories are derived from.
    path: PathBuf,
}

impl QuadStore {
    /// Opens the six physical stores under `path` with default configuration.
    ///
    /// `path` itself is not a directory that gets created; it is the stem
    /// the six store directories are derived from. Missing stores are
    /// created, existing ones are reopened.
    ///
    /// # Errors
    ///
    /// * `StorageError::OpenFailed` - a store directory is invalid, locked
    ///   by another process, or cannot be created
    ///
    /// # Example
    ///
    /// ```rust
    /// use tetrad_storage::QuadStore;
    /// use tempfile::TempDir;
    ///
    /// let tmp = TempDir::new().unwrap();
    /// let store = QuadStore::open(tmp.path().join("graph")).unwrap();
    /// assert!(store.path().ends_with("graph"));
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::open_with_config(path, StoreConfig::default())
    }

    /// Opens the six physical stores with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tetrad_storage::{QuadStore, StoreConfig};
    /// use tempfile::TempDir;
    ///
    /// let tmp = TempDir::new().unwrap();
    /// let config = StoreConfig {
    ///     block_cache_size: 64 * 1024 * 1024,
    ///     max_open_files: 200,
    ///     create_if_missing: true,
    /// };
    ///
    /// let store = QuadStore::open_with_config(tmp.path().join("graph"), config).unwrap();
    /// store.health_check().unwrap();
    /// ```
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: StoreConfig) -> StorageResult<Self> {
        let base = path.as_ref().to_path_buf();
        let started = Instant::now();

        let cache = Cache::new_lru_cache(config.block_cache_size);
        let quad_opts = quad_store_options(&config, &cache);
        let ns_opts = namespace_store_options(&config);

        debug!(
            base = %base.display(),
            cache_bytes = config.block_cache_size,
            "opening quad store"
        );

        let store = Self {
            spoc: open_store(&base, store_suffixes::SPOC, &quad_opts)?,
            cspo: open_store(&base, store_suffixes::CSPO, &quad_opts)?,
            opsc: open_store(&base, store_suffixes::OPSC, &quad_opts)?,
            pcos: open_store(&base, store_suffixes::PCOS, &quad_opts)?,
            ns_prefix: open_store(&base, store_suffixes::NS_PREFIX, &ns_opts)?,
            ns_uri: open_store(&base, store_suffixes::NS_URL, &ns_opts)?,
            cache,
            path: base,
        };

        info!(
            base = %store.path.display(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "quad store open"
        );
        Ok(store)
    }

    /// Base path this store was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks that all six physical stores answer a point read.
    ///
    /// Lightweight; scans no data.
    pub fn health_check(&self) -> StorageResult<()> {
        for (suffix, db) in self.all_stores() {
            db.get(HEALTH_CHECK_KEY)
                .map_err(|e| StorageError::ReadFailed {
                    store: suffix,
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Flushes all six stores' memtables to disk.
    ///
    /// Useful before shutdown; the engine flushes on its own otherwise.
    pub fn flush(&self) -> StorageResult<()> {
        for (suffix, db) in self.all_stores() {
            db.flush().map_err(|e| StorageError::FlushFailed {
                store: suffix,
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// The quad store holding the given index layout.
    pub(super) fn quad_db(&self, order: IndexOrder) -> &DB {
        match order {
            IndexOrder::Spoc => &self.spoc,
            IndexOrder::Cspo => &self.cspo,
            IndexOrder::Opsc => &self.opsc,
            IndexOrder::Pcos => &self.pcos,
        }
    }

    pub(super) fn ns_prefix_db(&self) -> &DB {
        &self.ns_prefix
    }

    pub(super) fn ns_uri_db(&self) -> &DB {
        &self.ns_uri
    }

    /// All six stores, the quad stores first in [`IndexOrder::COMMIT_ORDER`],
    /// then the two namespace maps.
    fn all_stores(&self) -> impl Iterator<Item = (&'static str, &DB)> + '_ {
        IndexOrder::COMMIT_ORDER
            .into_iter()
            .map(|order| (order.suffix(), self.quad_db(order)))
            .chain([
                (store_suffixes::NS_PREFIX, &self.ns_prefix),
                (store_suffixes::NS_URL, &self.ns_uri),
            ])
    }
}

fn open_store(base: &Path, suffix: &str, opts: &Options) -> StorageResult<DB> {
    let dir = store_path(base, suffix);
    DB::open(opts, &dir).map_err(|e| StorageError::OpenFailed {
        path: dir.display().to_string(),
        message: e.to_string(),
    })
}

// The six DBs close when QuadStore is dropped (RocksDB's Drop impl).
