// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ontology match ranking
//!
//! Raw label-search rows are grouped per entity, scored against the
//! searched term variants, and reduced to one best row per entity.

use crate::traits::OntologyMatch;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Penalty applied to rows reached through a linked entity
pub const LINKED_PENALTY: f64 = 0.7;

/// A row returned by the ontology before ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Search word that surfaced the row
    pub term: String,
    pub entity: String,
    pub entity_label: String,
    pub preflabel: String,
    pub entity_class: String,
    /// First-degree entity this row was linked from, if any
    pub linked_from: Option<String>,
}

/// Everything known about one entity across all of its rows
#[derive(Debug, Clone, PartialEq)]
pub struct EntityEvidence {
    pub entity: String,
    /// Distinct search words that surfaced the entity
    pub matched_words: BTreeSet<String>,
}

/// Scores how completely an entity covers a set of synonymous variants
pub trait MatchScorer: Send + Sync {
    /// Score in [0, 1]; 1.0 means an exact match
    fn score(&self, variants: &[String], evidence: &EntityEvidence) -> f64;
}

/// Word-coverage scorer.
///
/// Counts the matched search words against the number of words in the
/// entity id, with a 0.2 penalty per missing variant word (as a fraction of
/// the variant) and a 0.1 floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScorer;

impl DefaultScorer {
    const MISSING_WORD_PENALTY: f64 = 0.2;
    const FLOOR: f64 = 0.1;
}

/// Decoded entity id, e.g. `air@medium_temperature`
pub fn entity_label(uri: &str) -> String {
    uri.rsplit_once('#')
        .map(|(_, fragment)| fragment)
        .unwrap_or(uri)
        .replace("%40", "@")
        .replace("%7E", "~")
        .replace("%28", "(")
        .replace("%29", ")")
}

/// Number of words making up an entity id, discounting context markers
fn id_word_count(label: &str) -> i64 {
    let at_medium = label.matches("@medium").count() as i64;
    let at = label.matches('@').count() as i64 - at_medium;
    let adp = label.matches("_of_").count() as i64;

    let parts = label
        .replace(['@', '~'], "_")
        .replace("-or-", "_")
        .replace("-and-", "_")
        .replace("-per-", "_")
        .replace("-to-", "_")
        .split('_')
        .count() as i64;

    (parts - 2 * at - at_medium - adp).max(1)
}

impl MatchScorer for DefaultScorer {
    fn score(&self, variants: &[String], evidence: &EntityEvidence) -> f64 {
        let len_id = id_word_count(&entity_label(&evidence.entity));

        let mut max_term_len = 0i64;
        let mut term_penalty = f64::MAX;
        for variant in variants {
            let words: Vec<&str> = variant.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }
            let missing = words
                .iter()
                .filter(|w| !evidence.matched_words.contains(**w))
                .count();
            max_term_len = max_term_len.max(words.len() as i64);
            term_penalty = term_penalty.min(missing as f64 / words.len() as f64);
        }
        if max_term_len == 0 {
            return Self::FLOOR;
        }

        let occurrences = (evidence.matched_words.len() as i64)
            .min(max_term_len)
            .min(len_id);
        let rank = (occurrences as f64 - term_penalty * Self::MISSING_WORD_PENALTY) / len_id as f64;
        rank.clamp(Self::FLOOR, 1.0)
    }
}

/// Score candidates, penalize linked rows, sort best first and keep the
/// best row per entity.
pub fn rank(variants: &[String], candidates: Vec<Candidate>, scorer: &dyn MatchScorer) -> Vec<OntologyMatch> {
    let mut evidence: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for c in &candidates {
        evidence.entry(c.entity.as_str()).or_default().insert(c.term.clone());
    }

    let scores: BTreeMap<&str, f64> = evidence
        .into_iter()
        .map(|(entity, matched_words)| {
            let e = EntityEvidence {
                entity: entity.to_string(),
                matched_words,
            };
            (entity, scorer.score(variants, &e))
        })
        .collect();

    let mut ranked: Vec<(OntologyMatch, String)> = candidates
        .iter()
        .map(|c| {
            let mut score = scores.get(c.entity.as_str()).copied().unwrap_or(0.0);
            if c.linked_from.is_some() {
                score *= LINKED_PENALTY;
            }
            let row = OntologyMatch {
                term: c.term.clone(),
                entity: c.entity.clone(),
                entity_label: c.entity_label.clone(),
                preflabel: c.preflabel.clone(),
                entity_class: c.entity_class.clone(),
                score,
            };
            (row, c.linked_from.clone().unwrap_or_default())
        })
        .collect();

    ranked.sort_by(|(a, a_link), (b, b_link)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.entity_label.cmp(&b.entity_label))
            .then_with(|| a_link.cmp(b_link))
    });

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .map(|(row, _)| row)
        .filter(|row| seen.insert(row.entity.clone()))
        .collect()
}
