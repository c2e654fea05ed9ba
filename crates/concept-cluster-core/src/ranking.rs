//! Human-readable labeling and deterministic ranking.
//!
//! Internal concept identifiers are opaque; the report shows each cluster
//! under a label built from the concept's depth and its lemma names:
//!
//! ```text
//! [synset depth = 2] domestic_dog, dog
//! ```
//!
//! Names are sorted before joining so the label does not depend on the
//! order the lexicon returns them in. Ranking sorts by descending member
//! count with ties broken by ascending label, so two runs over the same
//! tables always produce the same sequence, whatever the physical
//! iteration order of the underlying maps.

use std::fmt::Write as _;

use serde::Serialize;

use crate::error::Result;
use crate::lexicon::LexicalGraph;
use crate::membership::MembershipIndex;
use crate::types::{ConceptId, Word};

/// One cluster with its display label and sorted member list.
///
/// Two distinct concepts can produce identical label text when their name
/// sets collide at the same depth; they stay separate entries rather than
/// being merged, so `concept` remains the unambiguous identity.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledCluster {
    /// The concept identifying the cluster.
    pub concept: ConceptId,
    /// Display label: depth prefix plus sorted lemma names.
    pub label: String,
    /// Members, sorted for reproducible rendering.
    pub members: Vec<Word>,
}

impl LabeledCluster {
    /// Number of member words.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Build the display label for one concept.
pub fn label_for<L: LexicalGraph>(lexicon: &L, concept: &ConceptId) -> Result<String> {
    let depth = lexicon.depth(concept)?;
    let mut names = lexicon.names_of(concept)?;
    names.sort();
    Ok(format!("[synset depth = {depth}] {}", names.join(", ")))
}

/// Label every cluster in the index.
///
/// Propagates a lexicon failure immediately: by this stage every concept in
/// the tables was already answered by the lexicon once, so a miss here is a
/// backend defect, not a per-word condition to collect.
pub fn label_clusters<L: LexicalGraph>(
    lexicon: &L,
    index: &MembershipIndex,
) -> Result<Vec<LabeledCluster>> {
    let mut labeled = Vec::with_capacity(index.cluster_count());
    for (concept, members) in index.clusters() {
        let mut members: Vec<Word> = members.iter().cloned().collect();
        members.sort();
        labeled.push(LabeledCluster {
            concept: concept.clone(),
            label: label_for(lexicon, concept)?,
            members,
        });
    }
    Ok(labeled)
}

/// Order clusters by descending member count, ties by ascending label.
pub fn rank(mut labeled: Vec<LabeledCluster>) -> Vec<LabeledCluster> {
    labeled.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.concept.cmp(&b.concept))
    });
    labeled
}

/// Render the ranked report in its line-oriented text form.
///
/// One entry per cluster: 1-based ordinal, label, member count, then the
/// member set on an indented line.
pub fn render_ranking(ranked: &[LabeledCluster]) -> String {
    let mut out = String::new();
    for (position, cluster) in ranked.iter().enumerate() {
        let members: Vec<&str> = cluster.members.iter().map(Word::as_str).collect();
        let _ = writeln!(
            out,
            "{})  {}: {} elements\n\t{{'{}'}}\n",
            position + 1,
            cluster.label,
            cluster.len(),
            members.join("', '")
        );
    }
    out
}
