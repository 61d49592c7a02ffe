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

//! Parsed documents: paragraphs of segmented sentences.
//!
//! Used for definition mining on encyclopedia pages and dictionary
//! definitions, and for counting term variants across a whole page.

use crate::decomposer::decompose;
use crate::definition::is_definition_of;
use crate::segmenter::{NounGroup, NounGroupSegmenter};
use crate::word::Sentence;
use std::collections::HashMap;
use termgraph_core::{PartOfSpeech, Shape};

/// A sentence with its noun groups
#[derive(Debug, Clone)]
pub struct ParsedSentence {
    pub sentence: Sentence,
    pub noun_groups: Vec<NounGroup>,
}

impl ParsedSentence {
    pub fn new(sentence: Sentence) -> Self {
        let noun_groups = NounGroupSegmenter::new().segment(&sentence.words);
        Self {
            sentence,
            noun_groups,
        }
    }
}

/// Coarse grouping used when counting page noun groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Nouns only
    Simple,
    /// Nouns with leading adjectives
    Adjectival,
    /// Groups joined by adpositions
    Multiple,
}

impl GroupKind {
    fn of(pos_sequence: &[PartOfSpeech]) -> Self {
        if pos_sequence.contains(&PartOfSpeech::Adposition) {
            GroupKind::Multiple
        } else if pos_sequence.contains(&PartOfSpeech::Adjective) {
            GroupKind::Adjectival
        } else {
            GroupKind::Simple
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounGroupCount {
    pub text: String,
    pub count: usize,
    pub kind: GroupKind,
}

/// Page noun groups that vary a given term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVariants {
    /// Term qualified from the front ("volumetric soil moisture")
    pub modified: Vec<String>,
    /// Term qualified from behind or through adpositions ("moisture content")
    pub aspects: Vec<String>,
}

/// A document as paragraphs of parsed sentences
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub paragraphs: Vec<Vec<ParsedSentence>>,
}

impl ParsedDocument {
    pub fn new(paragraphs: Vec<Vec<Sentence>>) -> Self {
        let paragraphs = paragraphs
            .into_iter()
            .map(|sentences| sentences.into_iter().map(ParsedSentence::new).collect())
            .filter(|p: &Vec<ParsedSentence>| !p.is_empty())
            .collect();
        Self { paragraphs }
    }

    pub fn sentence_count(&self) -> usize {
        self.paragraphs.iter().map(Vec::len).sum()
    }

    /// `(paragraph, sentence)` of the first sentence defining `term`
    pub fn find_definition(&self, term: &str) -> Option<(usize, usize)> {
        self.paragraphs.iter().enumerate().find_map(|(p, sentences)| {
            sentences
                .iter()
                .position(|s| is_definition_of(&s.sentence, term))
                .map(|s| (p, s))
        })
    }

    pub fn sentence(&self, paragraph: usize, sentence: usize) -> Option<&ParsedSentence> {
        self.paragraphs.get(paragraph)?.get(sentence)
    }

    /// Noun groups of the first sentence in the document
    pub fn first_sentence_groups(&self) -> &[NounGroup] {
        self.paragraphs
            .first()
            .and_then(|p| p.first())
            .map(|s| s.noun_groups.as_slice())
            .unwrap_or(&[])
    }

    /// Count page noun groups and their adposition components.
    ///
    /// Only groups made of alphanumerics and spaces are counted. Sorted by
    /// count, descending, then text.
    pub fn count_noun_groups(&self) -> Vec<NounGroupCount> {
        let mut counts: HashMap<String, (usize, GroupKind)> = HashMap::new();
        let mut record = |group: &NounGroup| {
            let text = group.text().to_lowercase();
            if !text.chars().all(|c| c.is_alphanumeric() || c.is_whitespace()) {
                return;
            }
            let kind = GroupKind::of(&group.pos_sequence);
            counts.entry(text).or_insert((0, kind)).0 += 1;
        };

        for sentence in self.paragraphs.iter().flatten() {
            for group in &sentence.noun_groups {
                record(group);
                if group.shape == Shape::AdpositionCompound {
                    for component in decompose(group).components {
                        record(&component);
                    }
                }
            }
        }

        let mut counted: Vec<NounGroupCount> = counts
            .into_iter()
            .map(|(text, (count, kind))| NounGroupCount { text, count, kind })
            .collect();
        counted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.text.cmp(&b.text)));
        counted
    }

    /// Noun groups on the page that contain `term`, split into leading
    /// modifications and other aspects.
    pub fn term_variants(&self, term: &str) -> TermVariants {
        let term = term.trim().to_lowercase();
        let suffix = format!(" {}", term);
        let mut variants = TermVariants::default();
        if term.is_empty() {
            return variants;
        }

        for entry in self.count_noun_groups() {
            if !entry.text.contains(&term) {
                continue;
            }
            let ends_with_term = entry.text.trim().ends_with(&suffix);
            match entry.kind {
                GroupKind::Simple | GroupKind::Adjectival if ends_with_term => {
                    variants.modified.push(entry.text)
                }
                _ => variants.aspects.push(entry.text),
            }
        }

        variants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Word;

    fn sentence(tagged: &[(&str, &str)]) -> Sentence {
        Sentence::from_words(
            tagged
                .iter()
                .enumerate()
                .map(|(i, (t, u))| Word::tagged(i + 1, t, t, u))
                .collect(),
        )
    }

    fn page() -> ParsedDocument {
        ParsedDocument::new(vec![
            vec![
                sentence(&[("soil", "NOUN"), ("moisture", "NOUN"), ("varies", "VERB")]),
                sentence(&[
                    ("volumetric", "ADJ"),
                    ("soil", "NOUN"),
                    ("moisture", "NOUN"),
                    ("is", "AUX"),
                    ("measured", "VERB"),
                ]),
            ],
            vec![],
            vec![
                sentence(&[
                    ("soil", "NOUN"),
                    ("moisture", "NOUN"),
                    ("content", "NOUN"),
                    ("and", "CCONJ"),
                    ("depth", "NOUN"),
                    ("of", "ADP"),
                    ("soil", "NOUN"),
                    ("moisture", "NOUN"),
                ]),
                sentence(&[("soil", "NOUN"), ("moisture", "NOUN")]),
            ],
        ])
    }

    #[test]
    fn test_empty_paragraphs_dropped() {
        let doc = page();
        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.sentence_count(), 4);
    }

    #[test]
    fn test_count_noun_groups_includes_components() {
        let counts = page().count_noun_groups();
        // two whole-sentence groups plus one compound component
        assert_eq!(counts[0].text, "soil moisture");
        assert_eq!(counts[0].count, 3);
        let compound = counts.iter().find(|c| c.text == "depth of soil moisture").unwrap();
        assert_eq!(compound.kind, GroupKind::Multiple);
    }

    #[test]
    fn test_term_variants() {
        let variants = page().term_variants("soil moisture");
        assert_eq!(variants.modified, vec!["volumetric soil moisture".to_string()]);
        assert!(variants.aspects.contains(&"soil moisture content".to_string()));
        assert!(variants.aspects.contains(&"depth of soil moisture".to_string()));
        assert!(variants.aspects.contains(&"soil moisture".to_string()));
    }
}
