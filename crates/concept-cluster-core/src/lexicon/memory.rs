//! In-memory lexical graph backed by three tables.
//!
//! Concepts are registered with their direct hypernyms and lemma names; the
//! word -> senses table is derived from the lemma names, so `senses_of`
//! answers exactly the concepts whose lemma list contains the word.
//!
//! # Text format
//!
//! [`InMemoryLexicon::from_reader`] loads one concept per line:
//!
//! ```text
//! # concept_id <TAB> parent,parent,... <TAB> lemma,lemma,...
//! entity.n.01 <TAB>  <TAB> entity
//! dog.n.01    <TAB> canine.n.02,domestic_animal.n.01 <TAB> dog, domestic_dog
//! ```
//!
//! Blank lines and `#` comments are skipped. The parent field may be empty
//! (root concept). Parents may reference concepts defined on later lines.
//!
//! Depths are lazily materialized: the first `depth` query for a concept
//! runs an upward BFS to the nearest root and caches the result behind an
//! `RwLock`, so a shared reference stays usable from rayon workers.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io::BufRead;

use parking_lot::RwLock;
use tracing::debug;

use super::{LexicalGraph, LexiconError};
use crate::types::{ConceptId, Word};

#[derive(Debug, Default)]
struct ConceptEntry {
    parents: Vec<ConceptId>,
    lemmas: Vec<String>,
}

/// A concept hierarchy held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryLexicon {
    concepts: HashMap<ConceptId, ConceptEntry>,
    senses: HashMap<Word, Vec<ConceptId>>,
    depth_cache: RwLock<HashMap<ConceptId, usize>>,
}

impl InMemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concept with its direct hypernyms and lemma names.
    ///
    /// Each lemma also becomes a sense entry for the corresponding word.
    /// Re-registering an identifier replaces the previous entry.
    pub fn add_concept(&mut self, id: &str, parents: &[&str], lemmas: &[&str]) {
        let id = ConceptId::from(id);
        for lemma in lemmas {
            let senses = self.senses.entry(Word::from(*lemma)).or_default();
            if !senses.contains(&id) {
                senses.push(id.clone());
            }
        }
        self.concepts.insert(
            id,
            ConceptEntry {
                parents: parents.iter().map(|p| ConceptId::from(*p)).collect(),
                lemmas: lemmas.iter().map(|l| (*l).to_owned()).collect(),
            },
        );
        // Registered edges may shorten paths to a root.
        self.depth_cache.write().clear();
    }

    /// Load a lexicon from tab-separated text (see module docs for the format).
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LexiconError> {
        let mut lexicon = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|e| LexiconError::Backend(e.to_string()))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut fields = trimmed.split('\t');
            let id = fields.next().map(str::trim).filter(|f| !f.is_empty()).ok_or(
                LexiconError::Parse {
                    line: line_no,
                    message: "missing concept identifier".into(),
                },
            )?;
            let parents = fields.next().ok_or(LexiconError::Parse {
                line: line_no,
                message: "missing parent field".into(),
            })?;
            let lemmas = fields.next().ok_or(LexiconError::Parse {
                line: line_no,
                message: "missing lemma field".into(),
            })?;
            let parents: Vec<&str> = split_list(parents);
            let lemmas: Vec<&str> = split_list(lemmas);
            if lemmas.is_empty() {
                return Err(LexiconError::Parse {
                    line: line_no,
                    message: format!("concept {id} has no lemma names"),
                });
            }
            lexicon.add_concept(id, &parents, &lemmas);
        }
        debug!(
            concepts = lexicon.concepts.len(),
            words = lexicon.senses.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Number of registered concepts.
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    fn entry(&self, concept: &ConceptId) -> Result<&ConceptEntry, LexiconError> {
        self.concepts
            .get(concept)
            .ok_or_else(|| LexiconError::UnknownConcept(concept.clone()))
    }

    /// Upward BFS to the nearest root (a concept with no parents).
    ///
    /// Parents pointing at unregistered identifiers are a backend defect and
    /// surface as `UnknownConcept` rather than being skipped silently.
    fn compute_depth(&self, concept: &ConceptId) -> Result<usize, LexiconError> {
        let mut visited: HashSet<&ConceptId> = HashSet::new();
        let mut frontier: VecDeque<(&ConceptId, usize)> = VecDeque::new();
        let start = self
            .concepts
            .get_key_value(concept)
            .ok_or_else(|| LexiconError::UnknownConcept(concept.clone()))?
            .0;
        visited.insert(start);
        frontier.push_back((start, 0));
        while let Some((current, dist)) = frontier.pop_front() {
            let entry = self.entry(current)?;
            if entry.parents.is_empty() {
                return Ok(dist);
            }
            for parent in &entry.parents {
                let parent = self
                    .concepts
                    .get_key_value(parent)
                    .ok_or_else(|| LexiconError::UnknownConcept(parent.clone()))?
                    .0;
                if visited.insert(parent) {
                    frontier.push_back((parent, dist + 1));
                }
            }
        }
        // Every upward path cycled back without reaching a root; the graph
        // is supposed to be acyclic, so report it instead of looping.
        Err(LexiconError::Backend(format!(
            "no root reachable from {concept}; hierarchy contains a cycle"
        )))
    }
}

fn split_list(field: &str) -> Vec<&str> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

impl LexicalGraph for InMemoryLexicon {
    fn senses_of(&self, word: &Word) -> Result<Vec<ConceptId>, LexiconError> {
        Ok(self.senses.get(word).cloned().unwrap_or_default())
    }

    fn parents_of(&self, concept: &ConceptId) -> Result<Vec<ConceptId>, LexiconError> {
        Ok(self.entry(concept)?.parents.clone())
    }

    fn depth(&self, concept: &ConceptId) -> Result<usize, LexiconError> {
        if let Some(depth) = self.depth_cache.read().get(concept) {
            return Ok(*depth);
        }
        let depth = self.compute_depth(concept)?;
        self.depth_cache.write().insert(concept.clone(), depth);
        Ok(depth)
    }

    fn names_of(&self, concept: &ConceptId) -> Result<Vec<String>, LexiconError> {
        Ok(self.entry(concept)?.lemmas.clone())
    }
}
