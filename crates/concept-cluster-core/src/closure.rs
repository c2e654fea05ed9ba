//! Closure engine: per-word hypernym traversal and table construction.
//!
//! For each word the engine collects its senses plus every transitive
//! generalization, filters the set by minimum depth, and folds the surviving
//! concepts into the shared [`MembershipIndex`]. The hierarchy is a DAG with
//! multiple inheritance, so each per-word traversal carries its own visited
//! set; the set is scoped to the word, never shared across words.
//!
//! The per-word phase reads only from the lexicon and writes only to a local
//! contribution value, which makes it embarrassingly parallel: contributions
//! are computed on the rayon pool and merged into the shared tables by a
//! single sequential fold. Resulting table content is therefore independent
//! of word-processing order.

use std::collections::{HashSet, VecDeque};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::lexicon::{LexicalGraph, LexiconError};
use crate::membership::MembershipIndex;
use crate::types::{ConceptId, Word, WordSet};

/// What the traversal decided for one word.
///
/// Exactly one variant per input word; the merge step routes each variant to
/// its bucket, which is what makes the outcome partition auditable.
#[derive(Debug)]
enum WordContribution {
    /// The word has at least one depth-eligible concept.
    Clustered(Word, HashSet<ConceptId>),
    /// The lexicon has no senses for the word.
    NotFound(Word),
    /// Senses exist but every concept in the closure is too shallow.
    ExcludedByDepth(Word),
    /// The lexicon failed mid-query; the word is reported, not dropped.
    Failed(Word, LexiconError),
}

/// Output of the closure engine.
#[derive(Debug, Default)]
pub struct ClosureOutput {
    /// Bidirectional cluster <-> word tables.
    pub index: MembershipIndex,
    /// Words with zero senses in the lexicon.
    pub not_found: WordSet,
    /// Words whose entire closure fell below the depth threshold.
    pub excluded_by_depth: WordSet,
    /// Words abandoned because a lexicon query failed, with the cause.
    pub failures: Vec<(Word, LexiconError)>,
}

/// Cluster a vocabulary against the lexical hierarchy.
///
/// Every concept at depth >= `min_depth` that is a sense of the word or a
/// transitive generalization of one becomes a cluster containing the word.
/// `min_depth = 0` accepts every concept, effectively disabling the filter.
///
/// A lexicon failure aborts only the word being processed; remaining words
/// continue and the failure is collected in [`ClosureOutput::failures`].
pub fn cluster_words<L: LexicalGraph>(
    lexicon: &L,
    words: &WordSet,
    min_depth: usize,
) -> ClosureOutput {
    let contributions: Vec<WordContribution> = words
        .par_iter()
        .map(|word| word_contribution(lexicon, word, min_depth))
        .collect();

    let mut output = ClosureOutput::default();
    for contribution in contributions {
        match contribution {
            WordContribution::Clustered(word, concepts) => {
                for concept in concepts {
                    output.index.insert(word.clone(), concept);
                }
            }
            WordContribution::NotFound(word) => {
                output.not_found.insert(word);
            }
            WordContribution::ExcludedByDepth(word) => {
                output.excluded_by_depth.insert(word);
            }
            WordContribution::Failed(word, error) => {
                warn!(word = %word, error = %error, "lexicon lookup failed, word skipped");
                output.failures.push((word, error));
            }
        }
    }
    debug!(
        clusters = output.index.cluster_count(),
        clustered_words = output.index.word_count(),
        not_found = output.not_found.len(),
        excluded_by_depth = output.excluded_by_depth.len(),
        failures = output.failures.len(),
        "closure phase complete"
    );
    output
}

/// Compute one word's eligible-concept set without touching shared state.
fn word_contribution<L: LexicalGraph>(
    lexicon: &L,
    word: &Word,
    min_depth: usize,
) -> WordContribution {
    match eligible_concepts(lexicon, word, min_depth) {
        Ok(None) => WordContribution::NotFound(word.clone()),
        Ok(Some(eligible)) if eligible.is_empty() => WordContribution::ExcludedByDepth(word.clone()),
        Ok(Some(eligible)) => WordContribution::Clustered(word.clone(), eligible),
        Err(error) => WordContribution::Failed(word.clone(), error),
    }
}

/// `None` when the word has no senses; otherwise the depth-filtered closure.
fn eligible_concepts<L: LexicalGraph>(
    lexicon: &L,
    word: &Word,
    min_depth: usize,
) -> Result<Option<HashSet<ConceptId>>, LexiconError> {
    let senses = lexicon.senses_of(word)?;
    if senses.is_empty() {
        return Ok(None);
    }

    // BFS from every sense over the generalization edges. One visited set
    // per word bounds the work on diamond-shaped hierarchies and stops an
    // ancestor reached along several paths from being expanded twice.
    let mut visited: HashSet<ConceptId> = HashSet::new();
    let mut frontier: VecDeque<ConceptId> = VecDeque::new();
    for sense in senses {
        if visited.insert(sense.clone()) {
            frontier.push_back(sense);
        }
    }
    while let Some(concept) = frontier.pop_front() {
        for parent in lexicon.parents_of(&concept)? {
            if visited.insert(parent.clone()) {
                frontier.push_back(parent);
            }
        }
    }

    // Depth filtering applies to the senses themselves, not only ancestors:
    // a word's own sense can be discarded for being too shallow.
    let mut eligible = HashSet::with_capacity(visited.len());
    for concept in visited {
        if lexicon.depth(&concept)? >= min_depth {
            eligible.insert(concept);
        }
    }
    Ok(Some(eligible))
}
