//! Value types of the RDF data model.

pub mod namespace;
pub mod statement;
pub mod term;

pub use namespace::{Namespace, NamespacePattern};
pub use statement::{Statement, StatementPattern};
pub use term::{Literal, Term};
