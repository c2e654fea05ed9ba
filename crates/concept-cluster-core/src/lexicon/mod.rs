//! The lexical knowledge-base boundary.
//!
//! The clustering core never owns the concept hierarchy; it consumes it
//! through the narrow read-only [`LexicalGraph`] trait. Implementations are
//! expected to be deterministic for a fixed data release but may lazily
//! materialize data on first use (the in-memory implementation caches
//! concept depths on demand).
//!
//! A query that cannot be answered is a [`LexiconError`], not an empty
//! result: `senses_of` returning an empty vector means the word genuinely
//! has no senses, while `parents_of` on an identifier the lexicon has never
//! seen is a backend failure the caller must be able to observe.

mod memory;

pub use memory::InMemoryLexicon;

use thiserror::Error;

use crate::types::{ConceptId, Word};

/// Errors raised by a lexical graph backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    /// A concept identifier was queried that the lexicon does not contain.
    #[error("unknown concept: {0}")]
    UnknownConcept(ConceptId),

    /// A lexicon source line could not be parsed.
    #[error("malformed lexicon entry at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The backing store failed to answer.
    #[error("lexicon backend failure: {0}")]
    Backend(String),
}

/// Read-only access to a hierarchical lexical knowledge base.
///
/// Concepts form a directed acyclic graph: each concept links to zero or
/// more direct generalizations (hypernyms). Implementations must be `Sync`
/// so the per-word closure phase can query them from worker threads.
pub trait LexicalGraph: Sync {
    /// Concepts that carry a sense of `word`. Empty when the word is not
    /// part of the lexicon's vocabulary; that is an answer, not an error.
    fn senses_of(&self, word: &Word) -> Result<Vec<ConceptId>, LexiconError>;

    /// Direct generalizations of `concept`. Empty for root concepts.
    fn parents_of(&self, concept: &ConceptId) -> Result<Vec<ConceptId>, LexiconError>;

    /// Minimum number of generalization edges from a root to `concept`.
    fn depth(&self, concept: &ConceptId) -> Result<usize, LexiconError>;

    /// Human-readable lemma names for `concept`, in backend order.
    fn names_of(&self, concept: &ConceptId) -> Result<Vec<String>, LexiconError>;
}
