//! RDF terms and the canonical byte encoding used for index digests.

use serde::{Deserialize, Serialize};

// Tag bytes of the canonical encoding. Each term kind gets its own tag so
// equal strings in different kinds (IRI vs blank node label) can never
// encode to the same bytes.
const TAG_DEFAULT_GRAPH: u8 = 0x00;
const TAG_IRI: u8 = 0x01;
const TAG_BLANK_NODE: u8 = 0x02;
const TAG_LITERAL: u8 = 0x03;

/// An RDF literal: a lexical value plus an optional datatype IRI and an
/// optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form of the literal.
    pub value: String,

    /// Datatype IRI, if the literal is typed.
    pub datatype: Option<String>,

    /// Language tag, if the literal is language-tagged.
    pub language: Option<String>,
}

/// A single RDF term.
///
/// Terms are opaque values: this layer performs no IRI syntax or datatype
/// validation, and equality is plain value equality, never digest equality.
/// `DefaultGraph` is the sentinel for the unnamed context; it is only
/// meaningful in the context position of a statement.
///
/// # Example
/// ```rust
/// use tetrad_core::Term;
///
/// let alice = Term::iri("http://example.org/alice");
/// let name = Term::lang_literal("Alice", "en");
/// assert_ne!(alice, name);
/// assert!(!alice.is_default_graph());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// The unnamed default context.
    DefaultGraph,
    /// A named resource.
    Iri(String),
    /// An anonymous resource, identified by a store-local label.
    BlankNode(String),
    /// A literal value.
    Literal(Literal),
}

impl Term {
    /// Named resource term.
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    /// Blank node term with the given label.
    pub fn blank_node(label: impl Into<String>) -> Self {
        Term::BlankNode(label.into())
    }

    /// Plain literal term (no datatype, no language tag).
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: None,
        })
    }

    /// Literal term with a datatype IRI.
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        })
    }

    /// Literal term with a language tag.
    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        })
    }

    /// True for the default-context sentinel.
    #[inline]
    pub fn is_default_graph(&self) -> bool {
        matches!(self, Term::DefaultGraph)
    }

    /// Canonical byte encoding of this term.
    ///
    /// Deterministic and injective: equal terms always produce equal bytes,
    /// and distinct terms never share an encoding (the leading tag keeps the
    /// kinds apart, length prefixes keep literal fields apart). The storage
    /// layer hashes these bytes into fixed-width index digests, so the
    /// encoding must never change once data has been written.
    ///
    /// # Example
    /// ```rust
    /// use tetrad_core::Term;
    ///
    /// let a = Term::iri("http://example.org/a").canonical_bytes();
    /// let b = Term::blank_node("http://example.org/a").canonical_bytes();
    /// assert_ne!(a, b);
    /// ```
    pub fn canonical_bytes(&self) -> Vec<u8> {
        match self {
            Term::DefaultGraph => vec![TAG_DEFAULT_GRAPH],
            Term::Iri(iri) => tagged_text(TAG_IRI, iri),
            Term::BlankNode(label) => tagged_text(TAG_BLANK_NODE, label),
            Term::Literal(literal) => {
                let mut out = Vec::with_capacity(
                    16 + literal.value.len()
                        + literal.datatype.as_ref().map_or(0, String::len)
                        + literal.language.as_ref().map_or(0, String::len),
                );
                out.push(TAG_LITERAL);
                push_len_prefixed(&mut out, &literal.value);
                push_optional(&mut out, literal.datatype.as_deref());
                push_optional(&mut out, literal.language.as_deref());
                out
            }
        }
    }
}

fn tagged_text(tag: u8, text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + text.len());
    out.push(tag);
    out.extend_from_slice(text.as_bytes());
    out
}

fn push_len_prefixed(out: &mut Vec<u8>, text: &str) {
    out.extend_from_slice(&(text.len() as u32).to_be_bytes());
    out.extend_from_slice(text.as_bytes());
}

fn push_optional(out: &mut Vec<u8>, field: Option<&str>) {
    match field {
        Some(text) => {
            out.push(1);
            push_len_prefixed(out, text);
        }
        None => out.push(0),
    }
}
