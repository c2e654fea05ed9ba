//! Size-window cluster filtering.
//!
//! Clusters whose member count falls outside an inclusive `[min, max]`
//! window are dropped entirely. Dropping a cluster detaches every member
//! through [`MembershipIndex::remove_cluster`], which is the step that
//! actively re-establishes the bidirectional invariant; words left with no
//! membership at all are reported as excluded-by-size.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClusterError, Result};
use crate::membership::MembershipIndex;
use crate::types::WordSet;

/// Inclusive cluster-size window. `max = None` means unbounded above.
///
/// The two bounds are independent values: setting one never changes the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeWindow {
    /// Smallest member count a cluster may have.
    pub min: usize,
    /// Largest member count a cluster may have, if bounded.
    pub max: Option<usize>,
}

impl Default for SizeWindow {
    fn default() -> Self {
        Self { min: 0, max: None }
    }
}

impl SizeWindow {
    /// Window accepting every cluster size.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Reject windows that can never accept any cluster.
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max {
            if self.min > max {
                return Err(ClusterError::Config(format!(
                    "min_cluster_size {} exceeds max_cluster_size {max}",
                    self.min
                )));
            }
        }
        Ok(())
    }

    /// Whether a cluster of `len` members is kept.
    #[inline]
    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && self.max.map_or(true, |max| len <= max)
    }
}

/// Output of the size filter.
#[derive(Debug)]
pub struct SizeFilterOutput {
    /// Surviving clusters with a repaired word index.
    pub index: MembershipIndex,
    /// Words that had at least one membership before filtering and none after.
    pub excluded_by_size: WordSet,
}

/// Drop every cluster whose size falls outside `window`.
///
/// Takes ownership of the index: the filter is the only stage allowed to
/// mutate the tables, and it may shrink them but never grow them. Applying
/// the same window twice yields the same result as applying it once
/// (surviving clusters keep all their members, so they keep their size).
pub fn filter_by_size(mut index: MembershipIndex, window: SizeWindow) -> SizeFilterOutput {
    let doomed = index.clusters_failing(|len| window.contains(len));
    let mut excluded_by_size = WordSet::new();
    for concept in &doomed {
        excluded_by_size.extend(index.remove_cluster(concept));
    }
    debug!(
        dropped = doomed.len(),
        kept = index.cluster_count(),
        excluded_words = excluded_by_size.len(),
        "size filter complete"
    );
    SizeFilterOutput {
        index,
        excluded_by_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConceptId, Word};

    fn index_with(pairs: &[(&str, &str)]) -> MembershipIndex {
        let mut index = MembershipIndex::new();
        for (word, concept) in pairs {
            index.insert(Word::from(*word), ConceptId::from(*concept));
        }
        index
    }

    fn window(min: usize, max: Option<usize>) -> SizeWindow {
        SizeWindow { min, max }
    }

    #[test]
    fn validate_rejects_inverted_window() {
        assert!(window(3, Some(2)).validate().is_err());
        assert!(window(2, Some(2)).validate().is_ok());
        assert!(window(100, None).validate().is_ok());
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let w = window(2, Some(3));
        assert!(!w.contains(1));
        assert!(w.contains(2));
        assert!(w.contains(3));
        assert!(!w.contains(4));
    }

    #[test]
    fn unbounded_window_keeps_everything() {
        let index = index_with(&[("dog", "animal.n.01"), ("cat", "animal.n.01")]);
        let out = filter_by_size(index, SizeWindow::unbounded());
        assert_eq!(out.index.cluster_count(), 1);
        assert!(out.excluded_by_size.is_empty());
    }

    #[test]
    fn dropped_cluster_detaches_members_and_reports_orphans() {
        let index = index_with(&[
            ("dog", "pair.n.01"),
            ("cat", "pair.n.01"),
            ("dog", "solo.n.01"),
        ]);
        // Keep only clusters of exactly two members.
        let out = filter_by_size(index, window(2, Some(2)));
        assert_eq!(out.index.cluster_count(), 1);
        assert!(out.index.members(&ConceptId::from("pair.n.01")).is_some());
        // dog survives through pair.n.01; cat survives too; nobody orphaned.
        assert!(out.excluded_by_size.is_empty());
        assert!(out.index.check_consistency().is_empty());
    }

    #[test]
    fn word_losing_every_membership_is_excluded_by_size() {
        let index = index_with(&[
            ("dog", "pair.n.01"),
            ("cat", "pair.n.01"),
            ("ant", "solo.n.01"),
        ]);
        let out = filter_by_size(index, window(2, None));
        assert_eq!(out.excluded_by_size, [Word::from("ant")].into_iter().collect());
        assert!(out.index.clusters_of(&Word::from("ant")).is_none());
    }

    #[test]
    fn filtering_is_idempotent() {
        let index = index_with(&[
            ("dog", "pair.n.01"),
            ("cat", "pair.n.01"),
            ("ant", "solo.n.01"),
            ("bee", "trio.n.01"),
            ("fly", "trio.n.01"),
            ("gnu", "trio.n.01"),
        ]);
        let w = window(2, Some(2));
        let once = filter_by_size(index, w);
        let twice = filter_by_size(once.index.clone(), w);
        assert_eq!(once.index.cluster_count(), twice.index.cluster_count());
        for (concept, members) in once.index.clusters() {
            assert_eq!(twice.index.members(concept), Some(members));
        }
        // A second pass finds nothing left to exclude.
        assert!(twice.excluded_by_size.is_empty());
    }
}
