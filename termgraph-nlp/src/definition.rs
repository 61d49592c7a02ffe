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

//! Definition sentence detection
//!
//! A sentence defines a term when a defining verb (be, describe, define,
//! refer) has the term as its nominal subject and also governs an object
//! or oblique, or is the copula of a nominal predicate:
//!
//! ```text
//!   Evapotranspiration is the sum of evaporation and transpiration.
//!   nsubj ────────────► cop ◄──── root (NOUN)
//! ```

use crate::word::{Sentence, Word};
use std::collections::BTreeSet;

const DEFINING_LEMMAS: [&str; 4] = ["be", "describe", "define", "refer"];

/// Whether `sentence` is a definition of `term` (case-insensitive)
pub fn is_definition_of(sentence: &Sentence, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() || !sentence.text.to_lowercase().contains(&term) {
        return false;
    }

    let words = &sentence.words;
    words
        .iter()
        .filter(|w| w.is_verb() && DEFINING_LEMMAS.contains(&w.lemma.to_lowercase().as_str()))
        .any(|verb| {
            let subjects = subjects_of(words, verb);
            !subjects.is_empty()
                && has_complement(words, verb)
                && subjects.iter().any(|&id| subject_phrase(words, id) == term)
        })
}

fn is_object_like(word: &Word) -> bool {
    match word.base_deprel() {
        "obj" => true,
        "root" => word.is_nominal(),
        _ => false,
    }
}

fn word_by_id(words: &[Word], id: usize) -> Option<&Word> {
    words.iter().find(|w| w.id == id)
}

/// Nominal subjects attached to `verb` directly, or to the nominal
/// predicate it is the copula of, extended with their conjuncts.
fn subjects_of(words: &[Word], verb: &Word) -> BTreeSet<usize> {
    let predicate = word_by_id(words, verb.head).filter(|head| is_object_like(head));

    let mut subjects: BTreeSet<usize> = words
        .iter()
        .filter(|w| w.base_deprel() == "nsubj")
        .filter(|w| w.head == verb.id || predicate.map_or(false, |p| w.head == p.id))
        .map(|w| w.id)
        .collect();

    // conj chains point back to the first conjunct
    loop {
        let before = subjects.len();
        for w in words {
            if w.base_deprel() == "conj" && subjects.contains(&w.head) {
                subjects.insert(w.id);
            }
        }
        if subjects.len() == before {
            break;
        }
    }

    subjects
}

fn has_complement(words: &[Word], verb: &Word) -> bool {
    let copular = word_by_id(words, verb.head).map_or(false, is_object_like);
    copular
        || words
            .iter()
            .any(|w| w.head == verb.id && matches!(w.base_deprel(), "obj" | "obl"))
}

/// The subject word together with its compound and adjectival modifiers,
/// lower-cased, in sentence order.
fn subject_phrase(words: &[Word], head_id: usize) -> String {
    let mut ids = BTreeSet::new();
    let mut stack = vec![head_id];
    while let Some(id) = stack.pop() {
        if !ids.insert(id) {
            continue;
        }
        for w in words {
            if w.head == id && matches!(w.base_deprel(), "compound" | "amod") {
                stack.push(w.id);
            }
        }
    }

    ids.iter()
        .filter_map(|&id| word_by_id(words, id))
        .map(|w| w.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copular_sentence() -> Sentence {
        // Soil moisture is the water content of soil .
        Sentence::new(
            "Soil moisture is the water content of soil.",
            vec![
                Word::tagged(1, "Soil", "soil", "NOUN").with_xpos("NN").with_dep(2, "compound"),
                Word::tagged(2, "moisture", "moisture", "NOUN").with_xpos("NN").with_dep(6, "nsubj"),
                Word::tagged(3, "is", "be", "AUX").with_xpos("VBZ").with_dep(6, "cop"),
                Word::tagged(4, "the", "the", "DET").with_xpos("DT").with_dep(6, "det"),
                Word::tagged(5, "water", "water", "NOUN").with_xpos("NN").with_dep(6, "compound"),
                Word::tagged(6, "content", "content", "NOUN").with_xpos("NN").with_dep(0, "root"),
                Word::tagged(7, "of", "of", "ADP").with_xpos("IN").with_dep(8, "case"),
                Word::tagged(8, "soil", "soil", "NOUN").with_xpos("NN").with_dep(6, "nmod"),
                Word::tagged(9, ".", ".", "PUNCT").with_xpos(".").with_dep(6, "punct"),
            ],
        )
    }

    #[test]
    fn test_copular_definition() {
        let sentence = copular_sentence();
        assert!(is_definition_of(&sentence, "soil moisture"));
        assert!(is_definition_of(&sentence, "Soil Moisture"));
        // Bare head noun is not the full subject
        assert!(!is_definition_of(&sentence, "moisture"));
        assert!(!is_definition_of(&sentence, "water content"));
    }

    #[test]
    fn test_passive_define_with_oblique() {
        // Drought is defined as a period of low rainfall .
        let sentence = Sentence::new(
            "Drought is defined as a period of low rainfall.",
            vec![
                Word::tagged(1, "Drought", "drought", "NOUN").with_xpos("NN").with_dep(3, "nsubj:pass"),
                Word::tagged(2, "is", "be", "AUX").with_xpos("VBZ").with_dep(3, "aux:pass"),
                Word::tagged(3, "defined", "define", "VERB").with_xpos("VBN").with_dep(0, "root"),
                Word::tagged(4, "as", "as", "ADP").with_xpos("IN").with_dep(6, "case"),
                Word::tagged(5, "a", "a", "DET").with_xpos("DT").with_dep(6, "det"),
                Word::tagged(6, "period", "period", "NOUN").with_xpos("NN").with_dep(3, "obl"),
                Word::tagged(7, "of", "of", "ADP").with_xpos("IN").with_dep(9, "case"),
                Word::tagged(8, "low", "low", "ADJ").with_xpos("JJ").with_dep(9, "amod"),
                Word::tagged(9, "rainfall", "rainfall", "NOUN").with_xpos("NN").with_dep(6, "nmod"),
            ],
        );
        assert!(is_definition_of(&sentence, "drought"));
    }

    #[test]
    fn test_verb_without_complement_rejected() {
        // Rain exists .
        let sentence = Sentence::new(
            "Rain is.",
            vec![
                Word::tagged(1, "Rain", "rain", "NOUN").with_xpos("NN").with_dep(2, "nsubj"),
                Word::tagged(2, "is", "be", "VERB").with_xpos("VBZ").with_dep(0, "root"),
            ],
        );
        assert!(!is_definition_of(&sentence, "rain"));
    }

    #[test]
    fn test_conjoined_subjects() {
        // Rain and snow are forms of precipitation .
        let sentence = Sentence::new(
            "Rain and snow are forms of precipitation.",
            vec![
                Word::tagged(1, "Rain", "rain", "NOUN").with_xpos("NN").with_dep(5, "nsubj"),
                Word::tagged(2, "and", "and", "CCONJ").with_xpos("CC").with_dep(3, "cc"),
                Word::tagged(3, "snow", "snow", "NOUN").with_xpos("NN").with_dep(1, "conj"),
                Word::tagged(4, "are", "be", "AUX").with_xpos("VBP").with_dep(5, "cop"),
                Word::tagged(5, "forms", "form", "NOUN").with_xpos("NNS").with_dep(0, "root"),
                Word::tagged(6, "of", "of", "ADP").with_xpos("IN").with_dep(7, "case"),
                Word::tagged(7, "precipitation", "precipitation", "NOUN").with_xpos("NN").with_dep(5, "nmod"),
            ],
        );
        assert!(is_definition_of(&sentence, "rain"));
        assert!(is_definition_of(&sentence, "snow"));
        assert!(!is_definition_of(&sentence, "precipitation"));
    }

    #[test]
    fn test_term_absent_from_text() {
        assert!(!is_definition_of(&copular_sentence(), "drought"));
    }
}
