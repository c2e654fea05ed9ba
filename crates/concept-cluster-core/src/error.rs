//! Error types for the clustering core.
//!
//! Library code never panics on fallible paths: every operation that can
//! fail returns [`Result`] and callers propagate with `?`. Lookup failures
//! against the lexicon keep their own type ([`LexiconError`]) so the caller
//! can tell a backend failure apart from a legitimate "no senses" answer.

use thiserror::Error;

use crate::lexicon::LexiconError;

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Top-level error for the clustering pipeline.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// Invalid configuration, rejected before any clustering runs.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The lexical graph could not answer a query.
    ///
    /// Distinct from a word having no senses, which is a valid answer and
    /// routes the word to the not-found bucket instead.
    #[error("lexicon lookup failed: {0}")]
    Lexicon(#[from] LexiconError),

    /// The pipeline's own outcome audit failed; indicates a defect, not a
    /// bad input.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}
