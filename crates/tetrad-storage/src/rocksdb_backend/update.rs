//! Mixed batched updates across statements and namespaces.

use std::time::Instant;

use tracing::info;

use tetrad_core::{Namespace, NamespacePattern, Statement, StatementPattern};

use super::core::QuadStore;
use super::error::StorageResult;
use super::namespace_ops::{
    commit_namespace_batch, stage_add_namespace, stage_remove_namespaces, NamespaceBatch,
};
use super::quad_ops::{
    commit_quad_batch, stage_add_statement, stage_remove_statements, QuadBatch,
};

/// One operation in a batched update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOp {
    /// Add a single statement.
    AddStatement(Statement),
    /// Remove all committed statements matching the pattern.
    RemoveStatements(StatementPattern),
    /// Add a single namespace.
    AddNamespace(Namespace),
    /// Remove every committed namespace the pattern finds.
    RemoveNamespaces(NamespacePattern),
}

/// Counts from one batched update.
///
/// Adds count the operations staged; removes count the committed entries
/// the remove patterns matched at staging time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    pub added_statements: u64,
    pub removed_statements: u64,
    pub added_namespaces: u64,
    pub removed_namespaces: u64,
}

impl QuadStore {
    /// Applies a sequence of operations as one staged update.
    ///
    /// Every operation stages first; the six batches then commit in the
    /// fixed order PCOS, OPSC, CSPO, SPOC, prefix, URI. Removes scan
    /// committed state only, so operations inside one update never see each
    /// other: adding and removing the same statement in a single update
    /// counts the remove as 0 and leaves the statement stored.
    ///
    /// # Errors
    ///
    /// Staging errors surface before anything is written. A commit error is
    /// fatal and can leave stores earlier in the commit order holding the
    /// update while later ones do not.
    pub fn update<I>(&self, ops: I) -> StorageResult<UpdateStats>
    where
        I: IntoIterator<Item = UpdateOp>,
    {
        let started = Instant::now();
        let mut quads = QuadBatch::new();
        let mut namespaces = NamespaceBatch::new();
        let mut stats = UpdateStats::default();

        for op in ops {
            match op {
                UpdateOp::AddStatement(statement) => {
                    stage_add_statement(&statement, &mut quads)?;
                    stats.added_statements += 1;
                }
                UpdateOp::RemoveStatements(pattern) => {
                    stats.removed_statements +=
                        stage_remove_statements(self, &pattern, &mut quads)?;
                }
                UpdateOp::AddNamespace(namespace) => {
                    stage_add_namespace(&namespace, &mut namespaces)?;
                    stats.added_namespaces += 1;
                }
                UpdateOp::RemoveNamespaces(pattern) => {
                    stats.removed_namespaces +=
                        stage_remove_namespaces(self, &pattern, &mut namespaces)?;
                }
            }
        }

        commit_quad_batch(self, quads)?;
        commit_namespace_batch(self, namespaces)?;

        info!(
            added_statements = stats.added_statements,
            removed_statements = stats.removed_statements,
            added_namespaces = stats.added_namespaces,
            removed_namespaces = stats.removed_namespaces,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "update applied"
        );
        Ok(stats)
    }
}
