//! Scan planning: picking an index layout for a statement pattern and
//! deriving the key range it has to cover.
//!
//! The planner only decides how much of the keyspace a scan walks. It never
//! decides what matches: every entry inside the range is still checked
//! against the full pattern, so a forced or badly chosen layout costs time,
//! not correctness.

use tetrad_core::{StatementPattern, Term};

use crate::keys::{compute_key, IndexKey, IndexOrder, KEY_LEN};

/// A statement pattern resolved against one index layout.
///
/// Holds the canonical bytes of each bound field so the scan bounds can be
/// recomputed without touching the original terms again.
#[derive(Debug, Clone)]
pub struct PatternQuery {
    subject: Option<Vec<u8>>,
    predicate: Option<Vec<u8>>,
    object: Option<Vec<u8>>,
    context: Option<Vec<u8>>,
    order: IndexOrder,
}

impl PatternQuery {
    /// Plans the pattern onto the layout the heuristic selects.
    pub fn new(pattern: &StatementPattern) -> Self {
        Self::with_order(pattern, select_order(pattern))
    }

    /// Plans the pattern onto a caller-chosen layout. Useful when the caller
    /// knows the data distribution better than the heuristic does.
    pub fn with_order(pattern: &StatementPattern, order: IndexOrder) -> Self {
        Self {
            subject: pattern.subject.as_ref().map(Term::canonical_bytes),
            predicate: pattern.predicate.as_ref().map(Term::canonical_bytes),
            object: pattern.object.as_ref().map(Term::canonical_bytes),
            context: pattern.context.as_ref().map(Term::canonical_bytes),
            order,
        }
    }

    /// The layout this query scans.
    #[inline]
    pub fn order(&self) -> IndexOrder {
        self.order
    }

    /// Smallest key the scan may visit.
    pub fn min_key(&self) -> IndexKey {
        let mut key = [0x00u8; KEY_LEN];
        self.write_bounds(&mut key);
        key
    }

    /// Largest key the scan may visit. The range is closed: a key equal to
    /// this bound is still part of the scan. A fully bound pattern collapses
    /// the range to that single key.
    pub fn max_key(&self) -> IndexKey {
        let mut key = [0xFFu8; KEY_LEN];
        self.write_bounds(&mut key);
        key
    }

    fn write_bounds(&self, key: &mut IndexKey) {
        let fields = self
            .order
            .permute(&self.subject, &self.predicate, &self.object, &self.context)
            .map(|field| field.as_deref());
        compute_key(fields, key);
    }
}

/// Layout choice by bound fields:
///
/// | bound                 | layout |
/// |-----------------------|--------|
/// | subject and context   | CSPO   |
/// | subject               | SPOC   |
/// | object, no subject    | OPSC   |
/// | predicate only        | PCOS   |
/// | nothing               | SPOC   |
///
/// A bound context without a bound subject falls through to the rows below
/// it, down to an SPOC full scan when nothing else is bound.
fn select_order(pattern: &StatementPattern) -> IndexOrder {
    if pattern.subject.is_some() {
        if pattern.context.is_some() {
            IndexOrder::Cspo
        } else {
            IndexOrder::Spoc
        }
    } else if pattern.object.is_some() {
        IndexOrder::Opsc
    } else if pattern.predicate.is_some() {
        IndexOrder::Pcos
    } else {
        IndexOrder::Spoc
    }
}
