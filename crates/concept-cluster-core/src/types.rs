//! Shared data model for the clustering pipeline.
//!
//! The two identifier newtypes are deliberately thin wrappers over `String`:
//! concept identifiers are opaque, externally assigned keys (e.g.
//! `"dog.n.01"` in WordNet naming), and words are normalized tokens that are
//! never mutated after ingestion. Both are hashable, ordered, and
//! serde-transparent so report types serialize as plain strings.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque stable identifier for a node in the lexical hierarchy.
///
/// The string form (name + part of speech + sense number, e.g. `"cat.n.01"`)
/// is assigned by the lexicon and never interpreted by the clustering core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(String);

impl ConceptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConceptId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ConceptId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A normalized vocabulary token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    pub fn new(word: impl Into<String>) -> Self {
        Self(word.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Word {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Word {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A set of words, used for the vocabulary and the three outcome buckets
/// (not-found, excluded-by-depth, excluded-by-size).
pub type WordSet = HashSet<Word>;
