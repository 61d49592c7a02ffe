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

//! One-level decomposition of a noun group into strictly shorter parts.
//!
//! | shape                   | parts                                          |
//! |-------------------------|------------------------------------------------|
//! | modified-noun(-group)   | head type from the first noun + one attribute per leading adjective |
//! | adposition-compound     | components between adpositions                 |
//! | noun-group              | one single-noun constituent per word           |
//! | single-noun, adjective  | none                                           |

use crate::segmenter::NounGroup;
use termgraph_core::{PartOfSpeech, Shape};

/// Parts of a noun group, one level down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    /// Head noun (group) of a modified noun
    pub head_type: Option<NounGroup>,
    /// Leading adjectives of a modified noun
    pub attributes: Vec<NounGroup>,
    /// Adposition-separated runs of a compound
    pub components: Vec<NounGroup>,
    /// Individual nouns of a noun group
    pub constituents: Vec<NounGroup>,
}

impl Decomposition {
    pub fn is_atomic(&self) -> bool {
        self.head_type.is_none()
            && self.attributes.is_empty()
            && self.components.is_empty()
            && self.constituents.is_empty()
    }

    /// Every sub-term, in wiring order
    pub fn parts(&self) -> impl Iterator<Item = &NounGroup> {
        self.components
            .iter()
            .chain(self.head_type.iter())
            .chain(self.attributes.iter())
            .chain(self.constituents.iter())
    }
}

/// Split a group by its shape. Every returned part is shorter than `group`.
/// A group whose words, tags and lemmas differ in length is atomic.
pub fn decompose(group: &NounGroup) -> Decomposition {
    let len = group.words.len();
    if group.pos_sequence.len() != len || group.lemma_sequence.len() != len {
        return Decomposition::default();
    }
    match group.shape {
        Shape::ModifiedNoun | Shape::ModifiedNounGroup => split_modified(group),
        Shape::AdpositionCompound => Decomposition {
            components: split_compound(group),
            ..Default::default()
        },
        Shape::NounGroup => Decomposition {
            constituents: group
                .words
                .iter()
                .zip(&group.lemma_sequence)
                .map(|(word, lemma)| NounGroup::single(word, lemma, PartOfSpeech::Noun))
                .collect(),
            ..Default::default()
        },
        Shape::SingleNoun | Shape::Adjective => Decomposition::default(),
    }
}

fn split_modified(group: &NounGroup) -> Decomposition {
    let first_noun = group
        .pos_sequence
        .iter()
        .position(|pos| *pos == PartOfSpeech::Noun);

    let i = match first_noun {
        // A group that starts with its noun has no leading modifiers
        Some(0) | None => return Decomposition::default(),
        Some(i) => i,
    };

    let head_len = group.len() - i;
    let head_shape = if head_len == 1 {
        Shape::SingleNoun
    } else {
        Shape::NounGroup
    };
    let head_type = NounGroup::with_shape(
        group.words[i..].to_vec(),
        group.pos_sequence[i..].to_vec(),
        group.lemma_sequence[i..].to_vec(),
        head_shape,
    );

    let attributes = group.words[..i]
        .iter()
        .zip(&group.lemma_sequence[..i])
        .map(|(word, lemma)| NounGroup::single(word, lemma, PartOfSpeech::Adjective))
        .collect();

    Decomposition {
        head_type: Some(head_type),
        attributes,
        ..Default::default()
    }
}

/// Split at adpositions. An ADPOSITION,NOUN,ADPOSITION window is a single
/// separator and its interior noun is dropped.
fn split_compound(group: &NounGroup) -> Vec<NounGroup> {
    use PartOfSpeech::*;

    let pos = &group.pos_sequence;
    let adpositions: Vec<usize> = (0..pos.len()).filter(|&i| pos[i] == Adposition).collect();
    let is_window_start =
        |i: usize| i + 2 < pos.len() && pos[i] == Adposition && pos[i + 1] == Noun && pos[i + 2] == Adposition;

    let mut components = Vec::new();
    let mut start = 0;
    for &adp in &adpositions {
        if start < adp && !is_window_start(start) && pos[start] != Adposition {
            components.push(group.slice(start, adp));
        }
        start = if is_window_start(adp) { adp + 3 } else { adp + 1 };
    }
    if start < pos.len() {
        components.push(group.slice(start, pos.len()));
    }

    components
}
