//! Statement add, scan, and remove operations.
//!
//! Writes are staged into per-store batches and committed one store at a
//! time in the fixed order PCOS, OPSC, CSPO, SPOC. Reads plan a key range
//! on one index, walk it lazily, and re-verify every hit against the real
//! term values. Digests only narrow the scan; they never decide a match.

use std::time::Instant;

use rocksdb::{DBIteratorWithThreadMode, Direction, IteratorMode, WriteBatch, DB};
use tracing::{debug, info};

use tetrad_core::{Statement, StatementPattern};

use crate::keys::{IndexKey, IndexOrder, StatementDigests};
use crate::pattern::PatternQuery;
use crate::serialization::{deserialize_statement, serialize_statement};

use super::core::QuadStore;
use super::error::{StorageError, StorageResult};

/// Staged statement writes, one batch per quad store.
///
/// Owned by a single operation from staging through commit. Staging does no
/// engine I/O; the store sees nothing until [`commit_quad_batch`].
#[derive(Default)]
pub(super) struct QuadBatch {
    spoc: WriteBatch,
    cspo: WriteBatch,
    opsc: WriteBatch,
    pcos: WriteBatch,
}

impl QuadBatch {
    pub(super) fn new() -> Self {
        Self::default()
    }

    fn batch_mut(&mut self, order: IndexOrder) -> &mut WriteBatch {
        match order {
            IndexOrder::Spoc => &mut self.spoc,
            IndexOrder::Cspo => &mut self.cspo,
            IndexOrder::Opsc => &mut self.opsc,
            IndexOrder::Pcos => &mut self.pcos,
        }
    }
}

/// Stages one statement into all four batches: the same serialized value
/// under four differently ordered keys. Re-adding an existing statement
/// stages a plain overwrite of the same keys.
pub(super) fn stage_add_statement(
    statement: &Statement,
    batch: &mut QuadBatch,
) -> StorageResult<()> {
    let value = serialize_statement(statement)?;
    let digests = StatementDigests::of(statement);
    for order in IndexOrder::ALL {
        batch.batch_mut(order).put(digests.key(order), &value);
    }
    Ok(())
}

/// Scans committed statements matching `pattern` and stages a delete of
/// each from all four stores. Returns the number of statements staged.
///
/// Only committed state is visible to the scan. Deletes staged in the same
/// batch as pending adds do not see those adds.
pub(super) fn stage_remove_statements(
    store: &QuadStore,
    pattern: &StatementPattern,
    batch: &mut QuadBatch,
) -> StorageResult<u64> {
    let mut removed = 0u64;
    for statement in store.scan(pattern) {
        let digests = StatementDigests::of(&statement?);
        for order in IndexOrder::ALL {
            batch.batch_mut(order).delete(digests.key(order));
        }
        removed += 1;
    }
    Ok(removed)
}

/// Commits the four batches one store at a time, walking
/// [`IndexOrder::COMMIT_ORDER`].
///
/// Each write is durable on its own; nothing spans the four stores. A
/// failure leaves stores earlier in the order already committed, which is
/// why commit errors are fatal rather than retried here.
pub(super) fn commit_quad_batch(store: &QuadStore, mut batch: QuadBatch) -> StorageResult<()> {
    for order in IndexOrder::COMMIT_ORDER {
        let staged = std::mem::take(batch.batch_mut(order));
        write_store(store.quad_db(order), order.suffix(), staged)?;
    }
    Ok(())
}

/// Writes one staged batch to one store. Empty batches are skipped.
pub(super) fn write_store(db: &DB, store: &'static str, batch: WriteBatch) -> StorageResult<()> {
    if batch.is_empty() {
        return Ok(());
    }
    db.write(batch).map_err(|e| StorageError::CommitFailed {
        store,
        message: e.to_string(),
    })
}

/// Lazy scan over one quad store's key range.
///
/// Yields statements in key order as the underlying iterator advances;
/// nothing is read ahead of the caller. The range is a closed interval, so
/// an entry equal to the upper bound is still yielded. Every entry is
/// re-verified against the pattern by full term equality before it is
/// returned; digest collisions therefore cost a wasted read, never a wrong
/// result.
///
/// The first error ends the scan permanently.
pub struct StatementScan<'a> {
    inner: DBIteratorWithThreadMode<'a, DB>,
    max_key: IndexKey,
    pattern: StatementPattern,
    store: &'static str,
    done: bool,
}

impl Iterator for StatementScan<'_> {
    type Item = StorageResult<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let entry = match self.inner.next() {
                Some(entry) => entry,
                None => break,
            };
            let (key, value) = match entry {
                Ok(pair) => pair,
                Err(e) => {
                    self.done = true;
                    return Some(Err(StorageError::ReadFailed {
                        store: self.store,
                        message: e.to_string(),
                    }));
                }
            };
            if key.as_ref() > self.max_key.as_slice() {
                break;
            }
            let statement = match deserialize_statement(&value) {
                Ok(statement) => statement,
                Err(e) => {
                    self.done = true;
                    return Some(Err(StorageError::Corrupted {
                        store: self.store,
                        message: e.to_string(),
                    }));
                }
            };
            if self.pattern.matches(&statement) {
                return Some(Ok(statement));
            }
        }
        self.done = true;
        None
    }
}

impl QuadStore {
    /// Adds statements to all four quad indexes.
    ///
    /// Statements are staged into four batches and committed per store in
    /// the fixed order PCOS, OPSC, CSPO, SPOC. Adding a statement that is
    /// already stored overwrites it in place; the count returned is the
    /// number of statements staged, not the number newly created.
    ///
    /// # Errors
    ///
    /// * `StorageError::Serialization` - a statement failed to encode;
    ///   nothing was written
    /// * `StorageError::CommitFailed` - a store rejected its batch; stores
    ///   earlier in the commit order already hold theirs
    pub fn add_statements<I>(&self, statements: I) -> StorageResult<u64>
    where
        I: IntoIterator<Item = Statement>,
    {
        let started = Instant::now();
        let mut batch = QuadBatch::new();
        let mut added = 0u64;
        for statement in statements {
            stage_add_statement(&statement, &mut batch)?;
            added += 1;
        }
        commit_quad_batch(self, batch)?;

        info!(
            added,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "statements added"
        );
        Ok(added)
    }

    /// Calls `visit` for every stored statement matching `pattern`.
    ///
    /// Wildcard fields match anything; a pattern context of the default
    /// graph sentinel matches only statements stored without an explicit
    /// context. No matches is not an error: `visit` is simply never called.
    pub fn get_statements<F>(&self, pattern: &StatementPattern, mut visit: F) -> StorageResult<()>
    where
        F: FnMut(Statement),
    {
        for statement in self.scan(pattern) {
            visit(statement?);
        }
        Ok(())
    }

    /// Lazily scans statements matching `pattern` on the index the planner
    /// selects for it.
    pub fn scan(&self, pattern: &StatementPattern) -> StatementScan<'_> {
        self.scan_planned(PatternQuery::new(pattern), pattern)
    }

    /// Lazily scans statements matching `pattern` on a caller-chosen index.
    ///
    /// Overriding the planner changes which store is walked and how much of
    /// it, never which statements come back: results are always re-verified
    /// against the full pattern.
    pub fn scan_index(&self, pattern: &StatementPattern, order: IndexOrder) -> StatementScan<'_> {
        self.scan_planned(PatternQuery::with_order(pattern, order), pattern)
    }

    fn scan_planned(&self, query: PatternQuery, pattern: &StatementPattern) -> StatementScan<'_> {
        let order = query.order();
        let min_key = query.min_key();

        debug!(index = order.suffix(), "planned statement scan");

        let inner = self
            .quad_db(order)
            .iterator(IteratorMode::From(&min_key, Direction::Forward));
        StatementScan {
            inner,
            max_key: query.max_key(),
            pattern: pattern.clone(),
            store: order.suffix(),
            done: false,
        }
    }

    /// Removes every stored statement matching `pattern` from all four quad
    /// indexes. Returns how many statements were removed.
    ///
    /// Removing with a pattern nothing matches succeeds with a count of 0.
    pub fn remove_statements(&self, pattern: &StatementPattern) -> StorageResult<u64> {
        let started = Instant::now();
        let mut batch = QuadBatch::new();
        let removed = stage_remove_statements(self, pattern, &mut batch)?;
        commit_quad_batch(self, batch)?;

        info!(
            removed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "statements removed"
        );
        Ok(removed)
    }
}
