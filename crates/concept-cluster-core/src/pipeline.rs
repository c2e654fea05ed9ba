//! Stage orchestration: vocabulary -> closure -> size filter -> ranking.
//!
//! Ownership of the tables moves strictly forward; no stage reads a
//! structure it has already handed to the next one. The pipeline also
//! audits the outcome partition: every input word must end up in exactly
//! one of {clustered, not-found, excluded-by-depth, excluded-by-size},
//! with lookup failures collected separately so nothing is lost silently.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::closure::cluster_words;
use crate::error::{ClusterError, Result};
use crate::filter::{filter_by_size, SizeWindow};
use crate::lexicon::{LexicalGraph, LexiconError};
use crate::ranking::{label_clusters, rank, LabeledCluster};
use crate::types::{Word, WordSet};

/// Pipeline parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Minimum allowed concept depth for cluster eligibility. Zero accepts
    /// every concept.
    pub min_depth: usize,
    /// Inclusive cluster-size window applied after clustering.
    pub size: SizeWindow,
}

impl ClusterConfig {
    /// Reject configurations before any clustering work starts.
    pub fn validate(&self) -> Result<()> {
        self.size.validate()
    }
}

/// Pipeline summary counters, mirroring the per-run totals of the report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    pub words: usize,
    pub clusters: usize,
    pub clustered_words: usize,
    pub not_found: usize,
    pub excluded_by_depth: usize,
    pub excluded_by_size: usize,
    pub lookup_failures: usize,
}

/// Final ranked, labeled clustering result.
#[derive(Debug, Serialize)]
pub struct ClusterReport {
    /// Clusters in descending member-count order.
    pub entries: Vec<LabeledCluster>,
    /// Words with zero senses in the lexicon.
    pub not_found: WordSet,
    /// Words whose entire closure fell below the depth threshold.
    pub excluded_by_depth: WordSet,
    /// Words that lost every membership to the size filter.
    pub excluded_by_size: WordSet,
    /// Words abandoned because the lexicon failed mid-query.
    #[serde(serialize_with = "serialize_failures")]
    pub failures: Vec<(Word, LexiconError)>,
    pub summary: Summary,
}

fn serialize_failures<S>(
    failures: &[(Word, LexiconError)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(
        failures
            .iter()
            .map(|(word, error)| (word.clone(), error.to_string())),
    )
}

/// Run the full clustering pipeline over a vocabulary.
pub fn run<L: LexicalGraph>(
    lexicon: &L,
    vocabulary: WordSet,
    config: &ClusterConfig,
) -> Result<ClusterReport> {
    config.validate()?;
    info!(
        words = vocabulary.len(),
        min_depth = config.min_depth,
        min_size = config.size.min,
        max_size = ?config.size.max,
        "clustering started"
    );

    let closure = cluster_words(lexicon, &vocabulary, config.min_depth);
    let filtered = filter_by_size(closure.index, config.size);
    let entries = rank(label_clusters(lexicon, &filtered.index)?);

    let report = ClusterReport {
        summary: Summary {
            words: vocabulary.len(),
            clusters: entries.len(),
            clustered_words: filtered.index.word_count(),
            not_found: closure.not_found.len(),
            excluded_by_depth: closure.excluded_by_depth.len(),
            excluded_by_size: filtered.excluded_by_size.len(),
            lookup_failures: closure.failures.len(),
        },
        entries,
        not_found: closure.not_found,
        excluded_by_depth: closure.excluded_by_depth,
        excluded_by_size: filtered.excluded_by_size,
        failures: closure.failures,
    };
    verify_partition(&vocabulary, &report)?;
    info!(
        clusters = report.summary.clusters,
        clustered_words = report.summary.clustered_words,
        "clustering finished"
    );
    Ok(report)
}

/// Audit that the four outcomes partition the vocabulary.
///
/// Words the lexicon failed on are accounted for by the failure list; every
/// other word must land in exactly one bucket. A violation here is a defect
/// in the pipeline itself, so it surfaces as an error rather than a log
/// line.
fn verify_partition(vocabulary: &WordSet, report: &ClusterReport) -> Result<()> {
    let clustered: WordSet = report
        .entries
        .iter()
        .flat_map(|cluster| cluster.members.iter().cloned())
        .collect();
    for word in vocabulary {
        let buckets = [
            clustered.contains(word),
            report.not_found.contains(word),
            report.excluded_by_depth.contains(word),
            report.excluded_by_size.contains(word),
            report.failures.iter().any(|(w, _)| w == word),
        ];
        let hits = buckets.iter().filter(|&&b| b).count();
        if hits != 1 {
            return Err(ClusterError::Internal(format!(
                "outcome partition violated: word {word} landed in {hits} buckets"
            )));
        }
    }
    Ok(())
}
