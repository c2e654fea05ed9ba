//! End-to-end property checks for the clustering pipeline.
//!
//! These run the real pipeline over a small animal taxonomy and verify:
//! 1. The four outcomes partition the input vocabulary
//! 2. Bidirectional consistency after the closure and filter stages
//! 3. Depth monotonicity (raising min_depth never adds membership)
//! 4. Size-window idempotence
//! 5. Ranking determinism under shuffled member iteration order

use std::collections::HashSet;

use concept_cluster_core::closure::cluster_words;
use concept_cluster_core::filter::{filter_by_size, SizeWindow};
use concept_cluster_core::lexicon::InMemoryLexicon;
use concept_cluster_core::pipeline::{self, ClusterConfig};
use concept_cluster_core::ranking::{label_clusters, rank};
use concept_cluster_core::types::{ConceptId, Word, WordSet};

/// Taxonomy fixture with a diamond (dog and cat reach animal through both
/// pet and carnivore) and a deliberately shallow isolated branch.
fn animal_lexicon() -> InMemoryLexicon {
    let mut lex = InMemoryLexicon::new();
    lex.add_concept("entity.n.01", &[], &["entity"]);
    lex.add_concept("animal.n.01", &["entity.n.01"], &["animal"]);
    lex.add_concept("pet.n.01", &["animal.n.01"], &["pet"]);
    lex.add_concept("carnivore.n.01", &["animal.n.01"], &["carnivore"]);
    lex.add_concept("dog.n.01", &["pet.n.01", "carnivore.n.01"], &["dog"]);
    lex.add_concept("cat.n.01", &["pet.n.01", "carnivore.n.01"], &["cat"]);
    lex.add_concept("rock.n.01", &["entity.n.01"], &["rock"]);
    lex
}

fn vocabulary(words: &[&str]) -> WordSet {
    words.iter().map(|w| Word::from(*w)).collect()
}

fn total_membership(report: &pipeline::ClusterReport) -> usize {
    report.entries.iter().map(|c| c.len()).sum()
}

#[test]
fn outcomes_partition_the_vocabulary() {
    let lex = animal_lexicon();
    let vocab = vocabulary(&["dog", "cat", "rock", "animal", "xyzzy123", "qwerty456"]);
    for (min_depth, min_size, max_size) in [
        (0, 0, None),
        (2, 0, None),
        (0, 2, Some(2)),
        (3, 1, Some(1)),
    ] {
        let config = ClusterConfig {
            min_depth,
            size: SizeWindow {
                min: min_size,
                max: max_size,
            },
        };
        let report = pipeline::run(&lex, vocab.clone(), &config).unwrap();

        let clustered: WordSet = report
            .entries
            .iter()
            .flat_map(|c| c.members.iter().cloned())
            .collect();
        let mut union: WordSet = clustered.clone();
        union.extend(report.not_found.iter().cloned());
        union.extend(report.excluded_by_depth.iter().cloned());
        union.extend(report.excluded_by_size.iter().cloned());
        assert_eq!(union, vocab, "union must equal the input vocabulary");

        // Pairwise disjoint.
        let buckets = [
            &clustered,
            &report.not_found,
            &report.excluded_by_depth,
            &report.excluded_by_size,
        ];
        for (i, a) in buckets.iter().enumerate() {
            for b in &buckets[i + 1..] {
                assert!(
                    a.is_disjoint(b),
                    "outcome buckets overlap for min_depth={min_depth}"
                );
            }
        }
    }
}

#[test]
fn bidirectional_consistency_after_each_stage() {
    let lex = animal_lexicon();
    let vocab = vocabulary(&["dog", "cat", "rock", "pet"]);

    let closure = cluster_words(&lex, &vocab, 0);
    assert!(closure.index.check_consistency().is_empty());

    let filtered = filter_by_size(
        closure.index,
        SizeWindow {
            min: 2,
            max: Some(3),
        },
    );
    assert!(filtered.index.check_consistency().is_empty());
}

#[test]
fn raising_min_depth_never_increases_membership() {
    let lex = animal_lexicon();
    let vocab = vocabulary(&["dog", "cat", "rock", "animal", "pet"]);
    let mut previous = usize::MAX;
    for min_depth in 0..6 {
        let config = ClusterConfig {
            min_depth,
            size: SizeWindow::unbounded(),
        };
        let report = pipeline::run(&lex, vocab.clone(), &config).unwrap();
        let total = total_membership(&report);
        assert!(
            total <= previous,
            "membership grew from {previous} to {total} at min_depth={min_depth}"
        );
        previous = total;
    }
}

#[test]
fn size_filter_is_idempotent() {
    let lex = animal_lexicon();
    let vocab = vocabulary(&["dog", "cat", "rock", "pet", "carnivore"]);
    let window = SizeWindow {
        min: 2,
        max: Some(4),
    };

    let closure = cluster_words(&lex, &vocab, 0);
    let once = filter_by_size(closure.index, window);
    let twice = filter_by_size(once.index.clone(), window);

    assert_eq!(once.index.cluster_count(), twice.index.cluster_count());
    for (concept, members) in once.index.clusters() {
        assert_eq!(twice.index.members(concept), Some(members));
    }
    assert!(twice.excluded_by_size.is_empty());
}

#[test]
fn ranking_is_deterministic_under_reinsertion_order() {
    let lex = animal_lexicon();
    let vocab = vocabulary(&["dog", "cat", "pet", "carnivore", "rock"]);

    // Build the same logical tables twice from different processing orders
    // (insertion order changes the maps' physical iteration order).
    let forward = cluster_words(&lex, &vocab, 0).index;
    let reverse = {
        let mut index = concept_cluster_core::MembershipIndex::new();
        let mut pairs: Vec<(Word, ConceptId)> = forward
            .clusters()
            .flat_map(|(c, ws)| ws.iter().map(|w| (w.clone(), c.clone())))
            .collect();
        pairs.sort();
        pairs.reverse();
        for (word, concept) in pairs {
            index.insert(word, concept);
        }
        index
    };

    let first = rank(label_clusters(&lex, &forward).unwrap());
    let second = rank(label_clusters(&lex, &reverse).unwrap());
    let sequence = |ranked: &[concept_cluster_core::ranking::LabeledCluster]| -> Vec<(String, usize)> {
        ranked.iter().map(|c| (c.label.clone(), c.len())).collect()
    };
    assert_eq!(sequence(&first), sequence(&second));
}

#[test]
fn dog_and_cat_share_an_ancestor_cluster() {
    let lex = animal_lexicon();
    let report = pipeline::run(
        &lex,
        vocabulary(&["dog", "cat", "xyzzy123"]),
        &ClusterConfig::default(),
    )
    .unwrap();

    assert_eq!(report.not_found, vocabulary(&["xyzzy123"]));
    // Both words acquire multiple memberships.
    for word in ["dog", "cat"] {
        let memberships: usize = report
            .entries
            .iter()
            .filter(|c| c.members.contains(&Word::from(word)))
            .count();
        assert!(memberships > 1, "{word} should be in several clusters");
    }
    // The carnivore cluster contains both.
    let carnivore = report
        .entries
        .iter()
        .find(|c| c.concept == ConceptId::from("carnivore.n.01"))
        .expect("carnivore cluster present");
    let members: HashSet<&str> = carnivore.members.iter().map(Word::as_str).collect();
    assert_eq!(members, HashSet::from(["dog", "cat"]));
}

#[test]
fn exact_size_window_keeps_only_pairs() {
    let lex = animal_lexicon();
    let config = ClusterConfig {
        min_depth: 0,
        size: SizeWindow {
            min: 2,
            max: Some(2),
        },
    };
    let report = pipeline::run(
        &lex,
        vocabulary(&["dog", "cat", "xyzzy123"]),
        &config,
    )
    .unwrap();

    assert!(report.entries.iter().all(|c| c.len() == 2));
    // dog and cat co-occur everywhere above their own senses, so they keep
    // memberships; their singleton sense clusters are dropped.
    for word in ["dog", "cat"] {
        assert!(report
            .entries
            .iter()
            .any(|c| c.members.contains(&Word::from(word))));
    }
    assert!(report.excluded_by_size.is_empty());
    assert_eq!(report.not_found, vocabulary(&["xyzzy123"]));
}

#[test]
fn min_depth_above_senses_routes_to_excluded_by_depth() {
    let lex = animal_lexicon();
    // rock.n.01 sits at depth 1 and its closure tops out at entity (0).
    let config = ClusterConfig {
        min_depth: 2,
        size: SizeWindow::unbounded(),
    };
    let report = pipeline::run(&lex, vocabulary(&["rock"]), &config).unwrap();
    assert_eq!(report.excluded_by_depth, vocabulary(&["rock"]));
    assert!(report.not_found.is_empty());
}
