//! Prefix-to-URI namespace mappings.

use serde::{Deserialize, Serialize};

/// A namespace mapping between a short prefix and a URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    pub prefix: String,
    pub uri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// Lookup pattern over namespaces: set a prefix, a URI, both, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespacePattern {
    pub prefix: Option<String>,
    pub uri: Option<String>,
}

impl NamespacePattern {
    /// Pattern matching every namespace.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn by_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            uri: None,
        }
    }

    pub fn by_uri(uri: impl Into<String>) -> Self {
        Self {
            prefix: None,
            uri: Some(uri.into()),
        }
    }

    /// Whether `namespace` satisfies every field this pattern sets.
    pub fn matches(&self, namespace: &Namespace) -> bool {
        if let Some(prefix) = &self.prefix {
            if *prefix != namespace.prefix {
                return false;
            }
        }
        if let Some(uri) = &self.uri {
            if *uri != namespace.uri {
                return false;
            }
        }
        true
    }
}
