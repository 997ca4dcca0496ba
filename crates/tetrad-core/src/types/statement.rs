//! Statements (quads) and the patterns that match them.

use serde::{Deserialize, Serialize};

use super::term::Term;

/// One RDF statement: subject, predicate, object, and the context (named
/// graph) it belongs to.
///
/// # Example
/// ```rust
/// use tetrad_core::{Statement, Term};
///
/// let stmt = Statement::new(
///     Term::iri("http://example.org/alice"),
///     Term::iri("http://example.org/knows"),
///     Term::iri("http://example.org/bob"),
/// );
/// assert!(stmt.context.is_default_graph());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub context: Term,
}

impl Statement {
    /// Statement in the default context.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            context: Term::DefaultGraph,
        }
    }

    /// Statement in an explicit context.
    pub fn with_context(subject: Term, predicate: Term, object: Term, context: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            context,
        }
    }
}

/// A statement with zero or more fields left unset.
///
/// Unset fields are wildcards: a fully unset pattern matches every stored
/// statement. Patterns drive both queries and removals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPattern {
    pub subject: Option<Term>,
    pub predicate: Option<Term>,
    pub object: Option<Term>,
    pub context: Option<Term>,
}

impl StatementPattern {
    /// Pattern with every field unset; matches everything.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: Term) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_predicate(mut self, predicate: Term) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn with_object(mut self, object: Term) -> Self {
        self.object = Some(object);
        self
    }

    pub fn with_context(mut self, context: Term) -> Self {
        self.context = Some(context);
        self
    }

    /// True when no field is set.
    pub fn is_unconstrained(&self) -> bool {
        self.subject.is_none()
            && self.predicate.is_none()
            && self.object.is_none()
            && self.context.is_none()
    }

    /// True when all four fields are set, i.e. the pattern can match at
    /// most one distinct statement.
    pub fn is_fully_specified(&self) -> bool {
        self.subject.is_some()
            && self.predicate.is_some()
            && self.object.is_some()
            && self.context.is_some()
    }

    /// Whether `statement` satisfies every field this pattern sets.
    ///
    /// Comparison is full term equality on the actual values; digests play
    /// no part. This is the residual filter applied to every index scan
    /// hit, so hash collisions and fields outside the scanned key prefix
    /// can never leak a wrong statement to the caller.
    pub fn matches(&self, statement: &Statement) -> bool {
        if let Some(context) = &self.context {
            if *context != statement.context {
                return false;
            }
        }
        if let Some(subject) = &self.subject {
            if *subject != statement.subject {
                return false;
            }
        }
        if let Some(predicate) = &self.predicate {
            if *predicate != statement.predicate {
                return false;
            }
        }
        if let Some(object) = &self.object {
            if *object != statement.object {
                return false;
            }
        }
        true
    }
}

impl From<Statement> for StatementPattern {
    /// The fully-specified pattern matching exactly this statement.
    fn from(statement: Statement) -> Self {
        Self {
            subject: Some(statement.subject),
            predicate: Some(statement.predicate),
            object: Some(statement.object),
            context: Some(statement.context),
        }
    }
}

impl From<&Statement> for StatementPattern {
    fn from(statement: &Statement) -> Self {
        statement.clone().into()
    }
}
