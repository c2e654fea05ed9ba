//! Bidirectional cluster <-> word index.
//!
//! The cluster table (concept -> member words) and the word index
//! (word -> concepts) mirror each other: `c` is in the word index entry for
//! `w` exactly when `w` is a member of cluster `c`. Keeping two maps
//! consistent by convention is the classic way to lose the invariant, so
//! both live inside one structure and every mutation goes through an
//! operation that updates both sides.
//!
//! Invariant violations found while repairing (a cluster member missing
//! from the word index) are logged as integrity warnings and skipped; they
//! are recoverable, not fatal.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::types::{ConceptId, Word};

/// Owned bidirectional index between clusters and their member words.
///
/// A cluster exists only while it has at least one member, and a word index
/// entry exists only while the word has at least one membership; empty
/// entries are removed, never stored.
#[derive(Debug, Default, Clone)]
pub struct MembershipIndex {
    clusters: HashMap<ConceptId, HashSet<Word>>,
    words: HashMap<Word, HashSet<ConceptId>>,
}

impl MembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `word` belongs to the cluster identified by `concept`,
    /// creating the cluster on first insertion. Updates both sides.
    pub fn insert(&mut self, word: Word, concept: ConceptId) {
        self.clusters
            .entry(concept.clone())
            .or_default()
            .insert(word.clone());
        self.words.entry(word).or_default().insert(concept);
    }

    /// Drop the cluster for `concept` entirely, detaching every member.
    ///
    /// Returns the words whose last membership vanished with this cluster
    /// (their word index entries are deleted). Members that are missing
    /// from the word index indicate an inconsistent input; each one emits
    /// an integrity warning and is skipped rather than failing the drop.
    pub fn remove_cluster(&mut self, concept: &ConceptId) -> Vec<Word> {
        let Some(members) = self.clusters.remove(concept) else {
            return Vec::new();
        };
        let mut orphaned = Vec::new();
        for word in members {
            match self.words.get_mut(&word) {
                Some(concepts) => {
                    concepts.remove(concept);
                    if concepts.is_empty() {
                        self.words.remove(&word);
                        orphaned.push(word);
                    }
                }
                None => {
                    warn!(
                        word = %word,
                        cluster = %concept,
                        "integrity warning: cluster member missing from word index, skipping repair"
                    );
                }
            }
        }
        orphaned
    }

    /// Number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Number of words with at least one membership.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Iterate over clusters and their member sets.
    pub fn clusters(&self) -> impl Iterator<Item = (&ConceptId, &HashSet<Word>)> {
        self.clusters.iter()
    }

    /// Member set of one cluster, if it exists.
    pub fn members(&self, concept: &ConceptId) -> Option<&HashSet<Word>> {
        self.clusters.get(concept)
    }

    /// Concepts the word belongs to, if any.
    pub fn clusters_of(&self, word: &Word) -> Option<&HashSet<ConceptId>> {
        self.words.get(word)
    }

    /// Cluster identifiers whose member count falls outside `keep`.
    pub fn clusters_failing<F>(&self, keep: F) -> Vec<ConceptId>
    where
        F: Fn(usize) -> bool,
    {
        self.clusters
            .iter()
            .filter(|(_, members)| !keep(members.len()))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Full bidirectional audit. Returns every violation as a description;
    /// an empty vector means the invariant holds.
    pub fn check_consistency(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for (concept, members) in &self.clusters {
            if members.is_empty() {
                violations.push(format!("cluster {concept} has no members"));
            }
            for word in members {
                if !self
                    .words
                    .get(word)
                    .is_some_and(|concepts| concepts.contains(concept))
                {
                    violations.push(format!(
                        "word {word} is a member of {concept} but the word index disagrees"
                    ));
                }
            }
        }
        for (word, concepts) in &self.words {
            if concepts.is_empty() {
                violations.push(format!("word {word} has an empty membership entry"));
            }
            for concept in concepts {
                if !self
                    .clusters
                    .get(concept)
                    .is_some_and(|members| members.contains(word))
                {
                    violations.push(format!(
                        "word index maps {word} to {concept} but the cluster disagrees"
                    ));
                }
            }
        }
        violations
    }

    /// Test-only back door used to fabricate inconsistent inputs.
    #[cfg(test)]
    pub(crate) fn insert_cluster_side_only(&mut self, word: Word, concept: ConceptId) {
        self.clusters.entry(concept).or_default().insert(word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(pairs: &[(&str, &str)]) -> MembershipIndex {
        let mut index = MembershipIndex::new();
        for (word, concept) in pairs {
            index.insert(Word::from(*word), ConceptId::from(*concept));
        }
        index
    }

    #[test]
    fn insert_updates_both_sides() {
        let index = index_with(&[("dog", "animal.n.01"), ("cat", "animal.n.01")]);
        assert_eq!(index.cluster_count(), 1);
        assert_eq!(index.word_count(), 2);
        assert!(index
            .members(&ConceptId::from("animal.n.01"))
            .unwrap()
            .contains(&Word::from("dog")));
        assert!(index
            .clusters_of(&Word::from("cat"))
            .unwrap()
            .contains(&ConceptId::from("animal.n.01")));
        assert!(index.check_consistency().is_empty());
    }

    #[test]
    fn insert_is_idempotent() {
        let index = index_with(&[("dog", "animal.n.01"), ("dog", "animal.n.01")]);
        assert_eq!(index.members(&ConceptId::from("animal.n.01")).unwrap().len(), 1);
    }

    #[test]
    fn remove_cluster_repairs_word_index_and_reports_orphans() {
        let mut index = index_with(&[
            ("dog", "animal.n.01"),
            ("dog", "pet.n.01"),
            ("cat", "animal.n.01"),
        ]);
        // cat loses its only membership, dog keeps pet.n.01.
        let orphaned = index.remove_cluster(&ConceptId::from("animal.n.01"));
        assert_eq!(orphaned, vec![Word::from("cat")]);
        assert_eq!(index.cluster_count(), 1);
        assert!(index.clusters_of(&Word::from("cat")).is_none());
        assert_eq!(index.clusters_of(&Word::from("dog")).unwrap().len(), 1);
        assert!(index.check_consistency().is_empty());
    }

    #[test]
    fn remove_missing_cluster_is_a_no_op() {
        let mut index = index_with(&[("dog", "animal.n.01")]);
        assert!(index.remove_cluster(&ConceptId::from("plant.n.01")).is_empty());
        assert_eq!(index.cluster_count(), 1);
    }

    #[test]
    fn inconsistent_member_is_skipped_not_fatal() {
        let mut index = index_with(&[("dog", "animal.n.01")]);
        // cat appears in the cluster but not in the word index.
        index.insert_cluster_side_only(Word::from("cat"), ConceptId::from("animal.n.01"));
        assert!(!index.check_consistency().is_empty());

        let orphaned = index.remove_cluster(&ConceptId::from("animal.n.01"));
        // dog was legitimately orphaned; cat was skipped.
        assert_eq!(orphaned, vec![Word::from("dog")]);
        assert!(index.check_consistency().is_empty());
    }

    #[test]
    fn consistency_audit_spots_both_directions() {
        let mut index = index_with(&[("dog", "animal.n.01")]);
        index.insert_cluster_side_only(Word::from("cat"), ConceptId::from("animal.n.01"));
        let violations = index.check_consistency();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("cat"));
    }
}
