//! Tetrad RDF data model.
//!
//! Value types shared by every tetrad crate: RDF terms, statements
//! (quads), the patterns that match them, and namespace mappings, together
//! with the canonical byte encoding the storage layer digests into index
//! keys.
//!
//! # Architecture
//! - `types::term`: `Term` and `Literal`, plus the canonical encoding
//! - `types::statement`: `Statement` and `StatementPattern`
//! - `types::namespace`: `Namespace` and `NamespacePattern`
//!
//! Terms are opaque here: no IRI syntax or datatype validation happens in
//! this layer, and term equality is always value equality.

pub mod types;

pub use types::{Literal, Namespace, NamespacePattern, Statement, StatementPattern, Term};
