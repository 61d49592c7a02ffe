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

//! Noun-group segmentation
//!
//! A noun group is a maximal run of nouns, adjectives and adpositions that
//! ends in a noun, e.g. "thermal conductivity of dry soil". Groups are found
//! by scanning a sentence right to left, so every group is anchored on its
//! final (head) noun.
//!
//! ```text
//!   the  thermal  conductivity  of  dry  soil  varies
//!   DET  ADJ      NOUN          ADP ADJ  NOUN  VERB
//!        <------------------------------------ scan
//!        [thermal conductivity of dry soil]
//! ```

use crate::word::Word;
use serde::{Deserialize, Serialize};
use termgraph_core::{normalize_term, PartOfSpeech, Shape};

/// A candidate technical term with its tags and lemmas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounGroup {
    /// Surface words, as written
    pub words: Vec<String>,
    pub pos_sequence: Vec<PartOfSpeech>,
    pub lemma_sequence: Vec<String>,
    pub shape: Shape,
}

impl NounGroup {
    /// Build a group, classifying its shape from the tags.
    pub fn new(words: Vec<String>, pos_sequence: Vec<PartOfSpeech>, lemma_sequence: Vec<String>) -> Self {
        let shape = Shape::classify(&pos_sequence);
        Self {
            words,
            pos_sequence,
            lemma_sequence,
            shape,
        }
    }

    /// Build a group with an explicitly assigned shape
    pub fn with_shape(
        words: Vec<String>,
        pos_sequence: Vec<PartOfSpeech>,
        lemma_sequence: Vec<String>,
        shape: Shape,
    ) -> Self {
        Self {
            words,
            pos_sequence,
            lemma_sequence,
            shape,
        }
    }

    /// A one-word group of the given part of speech
    pub fn single(word: &str, lemma: &str, pos: PartOfSpeech) -> Self {
        Self::new(vec![word.to_string()], vec![pos], vec![lemma.to_string()])
    }

    /// Sub-range `[start, end)` of this group, shape re-classified
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self::new(
            self.words[start..end].to_vec(),
            self.pos_sequence[start..end].to_vec(),
            self.lemma_sequence[start..end].to_vec(),
        )
    }

    /// Surface text joined by single spaces
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    /// Canonical graph key
    pub fn key(&self) -> String {
        normalize_term(&self.text())
    }

    pub fn lemma(&self) -> String {
        self.lemma_sequence.join(" ")
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Extracts noun groups from a tagged sentence
#[derive(Debug, Clone, Copy, Default)]
pub struct NounGroupSegmenter;

impl NounGroupSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Segment a sentence into noun groups.
    ///
    /// Groups are returned in sentence order, deduplicated by key (first
    /// occurrence wins).
    pub fn segment(&self, words: &[Word]) -> Vec<NounGroup> {
        let mut found: Vec<NounGroup> = Vec::new();
        let mut current = Cluster::default();

        for word in words.iter().rev() {
            let pos = word.pos();
            let accepted = match pos {
                Some(PartOfSpeech::Noun) => true,
                // Adjectives only modify a noun to their right, never an adposition
                Some(PartOfSpeech::Adjective) => {
                    current.is_open() && current.first() != Some(PartOfSpeech::Adposition)
                }
                Some(PartOfSpeech::Adposition) => current.is_open(),
                None => false,
            };

            match (accepted, pos) {
                (true, Some(pos)) => current.push_front(word, pos),
                _ => {
                    if let Some(group) = current.take().finish() {
                        found.push(group);
                    }
                }
            }
        }
        if let Some(group) = current.take().finish() {
            found.push(group);
        }

        found.reverse();
        let mut seen = std::collections::HashSet::new();
        found.retain(|group| seen.insert(group.key()));
        found
    }
}

/// In-progress cluster, built right to left
#[derive(Debug, Default)]
struct Cluster {
    words: Vec<String>,
    pos: Vec<PartOfSpeech>,
    lemmas: Vec<String>,
}

impl Cluster {
    fn is_open(&self) -> bool {
        !self.pos.is_empty()
    }

    /// Leftmost tag so far
    fn first(&self) -> Option<PartOfSpeech> {
        self.pos.last().copied()
    }

    fn push_front(&mut self, word: &Word, pos: PartOfSpeech) {
        // Stored reversed; flipped in `finish`
        self.words.push(word.text.clone());
        self.pos.push(pos);
        self.lemmas.push(word.lemma.clone());
    }

    fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Strip leading function words and emit the group, if anything remains.
    ///
    /// A leading ADPOSITION,NOUN,ADPOSITION window ("in terms of") is one
    /// separator and goes as a unit; remaining leading adpositions go one
    /// at a time.
    fn finish(mut self) -> Option<NounGroup> {
        if self.pos.is_empty() {
            return None;
        }
        self.words.reverse();
        self.pos.reverse();
        self.lemmas.reverse();

        use PartOfSpeech::*;
        let mut start = 0;
        loop {
            let rest = &self.pos[start..];
            if rest.len() >= 3 && rest[0] == Adposition && rest[1] == Noun && rest[2] == Adposition {
                start += 3;
            } else if rest.first() == Some(&Adposition) {
                start += 1;
            } else {
                break;
            }
        }

        if start >= self.pos.len() {
            return None;
        }

        Some(NounGroup::new(
            self.words.split_off(start),
            self.pos.split_off(start),
            self.lemmas.split_off(start),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tagged: &[(&str, &str)]) -> Vec<Word> {
        tagged
            .iter()
            .enumerate()
            .map(|(i, (text, upos))| Word::tagged(i + 1, text, &text.to_lowercase(), upos))
            .collect()
    }

    #[test]
    fn test_noun_group() {
        let groups = NounGroupSegmenter::new().segment(&words(&[("soil", "NOUN"), ("moisture", "NOUN")]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].text(), "soil moisture");
        assert_eq!(groups[0].shape, Shape::NounGroup);
        assert_eq!(groups[0].pos_sequence, vec![PartOfSpeech::Noun, PartOfSpeech::Noun]);
    }

    #[test]
    fn test_leading_separator_window_dropped() {
        let groups = NounGroupSegmenter::new().segment(&words(&[
            ("in", "ADP"),
            ("terms", "NOUN"),
            ("of", "ADP"),
            ("mass", "NOUN"),
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].text(), "mass");
        assert_eq!(groups[0].shape, Shape::SingleNoun);
    }

    #[test]
    fn test_leading_adposition_stripped() {
        let groups = NounGroupSegmenter::new().segment(&words(&[
            ("rises", "VERB"),
            ("in", "ADP"),
            ("thermal", "ADJ"),
            ("conductivity", "NOUN"),
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].text(), "thermal conductivity");
        assert_eq!(groups[0].shape, Shape::ModifiedNoun);
    }

    #[test]
    fn test_adjective_before_adposition_closes_group() {
        // "dry" cannot attach to "of"; it closes the cluster and is dropped
        let groups = NounGroupSegmenter::new().segment(&words(&[
            ("dry", "ADJ"),
            ("of", "ADP"),
            ("soil", "NOUN"),
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].text(), "soil");
    }

    #[test]
    fn test_compound_and_sentence_order() {
        let groups = NounGroupSegmenter::new().segment(&words(&[
            ("The", "DET"),
            ("rate", "NOUN"),
            ("of", "ADP"),
            ("evaporation", "NOUN"),
            ("depends", "VERB"),
            ("on", "ADP"),
            ("air", "NOUN"),
            ("temperature", "NOUN"),
            (".", "PUNCT"),
        ]));
        let texts: Vec<String> = groups.iter().map(|g| g.text()).collect();
        assert_eq!(texts, vec!["rate of evaporation", "air temperature"]);
        assert_eq!(groups[0].shape, Shape::AdpositionCompound);
    }

    #[test]
    fn test_duplicate_groups_collapse() {
        let groups = NounGroupSegmenter::new().segment(&words(&[
            ("rain", "NOUN"),
            ("and", "CCONJ"),
            ("Rain", "NOUN"),
        ]));
        assert_eq!(groups.len(), 1);
    }
}
