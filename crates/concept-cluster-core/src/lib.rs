//! Hypernym-closure word clustering over a lexical concept hierarchy.
//!
//! This crate groups an arbitrary vocabulary of words into overlapping
//! clusters, where each cluster is identified by one concept (synset) of a
//! lexical knowledge base. A word belongs to a cluster when at least one of
//! its senses specializes the cluster's concept, directly or transitively.
//!
//! # Architecture
//!
//! - **types**: ConceptId / Word newtypes and the Cluster data model
//! - **error**: ClusterError and the crate Result alias
//! - **lexicon**: LexicalGraph trait (the knowledge-base boundary) plus an
//!   in-memory implementation with a text loader
//! - **membership**: the bidirectional cluster <-> word index with
//!   invariant-preserving mutation
//! - **closure**: per-word hypernym-closure traversal and table construction
//! - **filter**: size-window cluster filtering with index repair
//! - **ranking**: human-readable labeling and deterministic ranking
//! - **pipeline**: stage orchestration and the final report
//!
//! # Pipeline
//!
//! Data flows strictly forward: vocabulary -> closure engine -> size filter
//! -> ranking & labeling. Each stage takes ownership of the structures the
//! previous stage produced; only the size filter mutates them.
//!
//! # Example
//!
//! ```
//! use concept_cluster_core::lexicon::InMemoryLexicon;
//! use concept_cluster_core::pipeline::{self, ClusterConfig};
//! use concept_cluster_core::types::Word;
//!
//! let mut lexicon = InMemoryLexicon::new();
//! lexicon.add_concept("animal.n.01", &[], &["animal"]);
//! lexicon.add_concept("dog.n.01", &["animal.n.01"], &["dog"]);
//!
//! let vocabulary = [Word::from("dog")].into_iter().collect();
//! let report = pipeline::run(&lexicon, vocabulary, &ClusterConfig::default()).unwrap();
//! assert_eq!(report.entries.len(), 2);
//! ```

pub mod closure;
pub mod error;
pub mod filter;
pub mod lexicon;
pub mod membership;
pub mod pipeline;
pub mod ranking;
pub mod types;

// Re-exports for convenience
pub use closure::{cluster_words, ClosureOutput};
pub use error::{ClusterError, Result};
pub use filter::{filter_by_size, SizeWindow};
pub use lexicon::{LexicalGraph, LexiconError};
pub use membership::MembershipIndex;
pub use pipeline::{ClusterConfig, ClusterReport};
pub use types::{ConceptId, Word};
