//! Namespace add, get, and remove operations.
//!
//! Each namespace is stored twice: once in the prefix store keyed by its
//! prefix and once in the URI store keyed by its URI, both holding the full
//! serialized pair. The two maps are written independently and commit after
//! the quad stores, prefix store first.

use std::time::Instant;

use rocksdb::{IteratorMode, WriteBatch, DB};
use tracing::info;

use tetrad_core::{Namespace, NamespacePattern};

use crate::serialization::{deserialize_namespace, serialize_namespace};
use crate::stores::store_suffixes;

use super::core::QuadStore;
use super::error::{StorageError, StorageResult};
use super::quad_ops::write_store;

/// Staged namespace writes, one batch per namespace store.
#[derive(Default)]
pub(super) struct NamespaceBatch {
    prefix: WriteBatch,
    uri: WriteBatch,
}

impl NamespaceBatch {
    pub(super) fn new() -> Self {
        Self::default()
    }
}

/// Stages one namespace into both maps under its two keys.
pub(super) fn stage_add_namespace(
    namespace: &Namespace,
    batch: &mut NamespaceBatch,
) -> StorageResult<()> {
    let value = serialize_namespace(namespace)?;
    batch.prefix.put(namespace.prefix.as_bytes(), &value);
    batch.uri.put(namespace.uri.as_bytes(), &value);
    Ok(())
}

/// Stages a delete of every committed namespace the `pattern` finds from
/// both maps. Returns the number of namespaces staged.
pub(super) fn stage_remove_namespaces(
    store: &QuadStore,
    pattern: &NamespacePattern,
    batch: &mut NamespaceBatch,
) -> StorageResult<u64> {
    let mut removed = 0u64;
    store.get_namespaces(pattern, |namespace| {
        batch.prefix.delete(namespace.prefix.as_bytes());
        batch.uri.delete(namespace.uri.as_bytes());
        removed += 1;
    })?;
    Ok(removed)
}

/// Commits both namespace batches, prefix store first. Like the quad
/// stores, the two writes are independent.
pub(super) fn commit_namespace_batch(
    store: &QuadStore,
    batch: NamespaceBatch,
) -> StorageResult<()> {
    let NamespaceBatch { prefix, uri } = batch;
    write_store(store.ns_prefix_db(), store_suffixes::NS_PREFIX, prefix)?;
    write_store(store.ns_uri_db(), store_suffixes::NS_URL, uri)?;
    Ok(())
}

impl QuadStore {
    /// Adds namespaces to both maps.
    ///
    /// Re-adding a prefix with a different URI overwrites the prefix entry
    /// but leaves the previous URI entry in place until something
    /// overwrites or removes it; the two maps are independent.
    pub fn add_namespaces<I>(&self, namespaces: I) -> StorageResult<u64>
    where
        I: IntoIterator<Item = Namespace>,
    {
        let started = Instant::now();
        let mut batch = NamespaceBatch::new();
        let mut added = 0u64;
        for namespace in namespaces {
            stage_add_namespace(&namespace, &mut batch)?;
            added += 1;
        }
        commit_namespace_batch(self, batch)?;

        info!(
            added,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "namespaces added"
        );
        Ok(added)
    }

    /// Calls `visit` for every stored namespace the `pattern` finds.
    ///
    /// A set prefix is a point read on the prefix map; otherwise a set URI
    /// is a point read on the URI map; otherwise the whole prefix store is
    /// walked. A point hit is visited exactly as stored: with both fields
    /// set, the prefix decides the lookup and the URI field plays no part.
    /// A key with no mapping is not an error: `visit` is simply never
    /// called.
    pub fn get_namespaces<F>(&self, pattern: &NamespacePattern, mut visit: F) -> StorageResult<()>
    where
        F: FnMut(Namespace),
    {
        if let Some(prefix) = &pattern.prefix {
            let found = lookup_namespace(self.ns_prefix_db(), store_suffixes::NS_PREFIX, prefix)?;
            if let Some(namespace) = found {
                visit(namespace);
            }
            return Ok(());
        }

        if let Some(uri) = &pattern.uri {
            let found = lookup_namespace(self.ns_uri_db(), store_suffixes::NS_URL, uri)?;
            if let Some(namespace) = found {
                visit(namespace);
            }
            return Ok(());
        }

        // Unconstrained: the prefix store holds one entry per live prefix.
        for entry in self.ns_prefix_db().iterator(IteratorMode::Start) {
            let (_key, value) = entry.map_err(|e| StorageError::ReadFailed {
                store: store_suffixes::NS_PREFIX,
                message: e.to_string(),
            })?;
            let namespace =
                deserialize_namespace(&value).map_err(|e| StorageError::Corrupted {
                    store: store_suffixes::NS_PREFIX,
                    message: e.to_string(),
                })?;
            visit(namespace);
        }
        Ok(())
    }

    /// Removes every stored namespace the `pattern` finds from both maps.
    /// Returns how many namespaces were removed. Deletion uses the keys of
    /// the found namespace, so both map entries go even when the pattern
    /// named only one of them.
    pub fn remove_namespaces(&self, pattern: &NamespacePattern) -> StorageResult<u64> {
        let started = Instant::now();
        let mut batch = NamespaceBatch::new();
        let removed = stage_remove_namespaces(self, pattern, &mut batch)?;
        commit_namespace_batch(self, batch)?;

        info!(
            removed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "namespaces removed"
        );
        Ok(removed)
    }
}

fn lookup_namespace(db: &DB, store: &'static str, key: &str) -> StorageResult<Option<Namespace>> {
    let bytes = db
        .get(key.as_bytes())
        .map_err(|e| StorageError::ReadFailed {
            store,
            message: e.to_string(),
        })?;
    match bytes {
        Some(bytes) => {
            let namespace =
                deserialize_namespace(&bytes).map_err(|e| StorageError::Corrupted {
                    store,
                    message: e.to_string(),
                })?;
            Ok(Some(namespace))
        }
        None => Ok(None),
    }
}
