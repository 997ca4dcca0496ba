//! Fixed-width index keys and the digests they are built from.
//!
//! Every statement field is hashed into a 16-byte digest of its canonical
//! encoding; an index key is four digests concatenated in the index's field
//! order. Digests are surrogate sort keys: they order keys byte-wise, not
//! by the terms' natural order. That is sufficient because a scan only
//! needs equal terms to land on equal key prefixes, and every hit is
//! re-verified against the real term values afterwards.

use std::cmp::Ordering;

use tetrad_core::{Statement, Term};
use xxhash_rust::xxh3::xxh3_128_with_seed;

use crate::stores::store_suffixes;

/// Width of one term digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Width of a full index key: four digests.
pub const KEY_LEN: usize = 4 * DIGEST_LEN;

// Fixed for the life of a store: changing the seed orphans every key ever
// written with it.
const DIGEST_SEED: u64 = 13;

/// One term digest.
pub type Digest = [u8; DIGEST_LEN];

/// One full index key.
pub type IndexKey = [u8; KEY_LEN];

/// Digest of a term's canonical bytes. Pure and stateless.
#[inline]
pub fn term_digest(canonical: &[u8]) -> Digest {
    xxh3_128_with_seed(canonical, DIGEST_SEED).to_be_bytes()
}

/// Digest of a single term.
#[inline]
pub fn digest_of(term: &Term) -> Digest {
    term_digest(&term.canonical_bytes())
}

/// The four physical index layouts, named by the order in which a
/// statement's fields appear in the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexOrder {
    /// subject, predicate, object, context
    Spoc,
    /// context, subject, predicate, object
    Cspo,
    /// object, predicate, subject, context
    Opsc,
    /// predicate, context, object, subject
    Pcos,
}

impl IndexOrder {
    /// Every layout, in declaration order.
    pub const ALL: [IndexOrder; 4] = [
        IndexOrder::Spoc,
        IndexOrder::Cspo,
        IndexOrder::Opsc,
        IndexOrder::Pcos,
    ];

    /// The order in which the four quad stores always commit: PCOS, OPSC,
    /// CSPO, SPOC. A crash mid-sequence therefore leaves stale data only in
    /// stores later in this list, starting from the least selective index.
    pub const COMMIT_ORDER: [IndexOrder; 4] = [
        IndexOrder::Pcos,
        IndexOrder::Opsc,
        IndexOrder::Cspo,
        IndexOrder::Spoc,
    ];

    /// Store suffix for this layout.
    pub fn suffix(self) -> &'static str {
        match self {
            IndexOrder::Spoc => store_suffixes::SPOC,
            IndexOrder::Cspo => store_suffixes::CSPO,
            IndexOrder::Opsc => store_suffixes::OPSC,
            IndexOrder::Pcos => store_suffixes::PCOS,
        }
    }

    /// Reorders subject, predicate, object, context into this layout's key
    /// field order.
    #[inline]
    pub fn permute<'a, T>(
        self,
        subject: &'a T,
        predicate: &'a T,
        object: &'a T,
        context: &'a T,
    ) -> [&'a T; 4] {
        match self {
            IndexOrder::Spoc => [subject, predicate, object, context],
            IndexOrder::Cspo => [context, subject, predicate, object],
            IndexOrder::Opsc => [object, predicate, subject, context],
            IndexOrder::Pcos => [predicate, context, object, subject],
        }
    }
}

/// Per-field digests of one statement, computed once and laid out into any
/// of the four key orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementDigests {
    subject: Digest,
    predicate: Digest,
    object: Digest,
    context: Digest,
}

impl StatementDigests {
    pub fn of(statement: &Statement) -> Self {
        Self {
            subject: digest_of(&statement.subject),
            predicate: digest_of(&statement.predicate),
            object: digest_of(&statement.object),
            context: digest_of(&statement.context),
        }
    }

    /// The statement's key in the given index layout.
    pub fn key(&self, order: IndexOrder) -> IndexKey {
        let fields = order.permute(&self.subject, &self.predicate, &self.object, &self.context);
        let mut key = [0u8; KEY_LEN];
        for (slot, digest) in fields.into_iter().enumerate() {
            key[slot * DIGEST_LEN..(slot + 1) * DIGEST_LEN].copy_from_slice(digest);
        }
        key
    }
}

/// Writes the digests of `fields` into `key` slot by slot, stopping at the
/// first unset field and leaving the remaining bytes untouched.
///
/// Callers pre-fill `key` with 0x00 to form a scan lower bound or 0xFF to
/// form an upper bound; the untouched tail then spans the full byte range
/// of every field past the first unset one. Set fields after that point
/// never reach the key; the post-scan filter matches them instead.
pub fn compute_key(fields: [Option<&[u8]>; 4], key: &mut IndexKey) {
    for (slot, field) in fields.into_iter().enumerate() {
        match field {
            Some(canonical) => {
                key[slot * DIGEST_LEN..(slot + 1) * DIGEST_LEN]
                    .copy_from_slice(&term_digest(canonical));
            }
            None => break,
        }
    }
}

/// Byte-wise unsigned lexicographic comparison; the first differing byte
/// decides. Installed as the comparator on all four quad stores so engine
/// ordering matches the key layout.
pub fn compare_keys(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}
