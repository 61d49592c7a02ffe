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

//! Parsed word and sentence model (Universal Dependencies conventions)

use serde::{Deserialize, Serialize};
use termgraph_core::PartOfSpeech;

/// A word as produced by the dependency parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// 1-based position in the sentence
    pub id: usize,
    pub text: String,
    pub lemma: String,
    /// Universal part-of-speech tag (NOUN, ADJ, ADP, VERB, ...)
    pub upos: String,
    /// Language-specific tag (Penn Treebank for English models)
    pub xpos: String,
    /// Id of the governing word, 0 for the root
    pub head: usize,
    /// Dependency relation to the head, possibly with a subtype (`nsubj:pass`)
    pub deprel: String,
}

impl Word {
    /// A word carrying only surface and tag information. Handy when the
    /// dependency structure is irrelevant (segmentation).
    pub fn tagged(id: usize, text: &str, lemma: &str, upos: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            lemma: lemma.to_string(),
            upos: upos.to_string(),
            xpos: String::new(),
            head: 0,
            deprel: String::new(),
        }
    }

    /// Builder-style dependency attachment
    pub fn with_dep(mut self, head: usize, deprel: &str) -> Self {
        self.head = head;
        self.deprel = deprel.to_string();
        self
    }

    pub fn with_xpos(mut self, xpos: &str) -> Self {
        self.xpos = xpos.to_string();
        self
    }

    pub fn pos(&self) -> Option<PartOfSpeech> {
        PartOfSpeech::from_upos(&self.upos)
    }

    /// Relation without its subtype: `nsubj:pass` -> `nsubj`
    pub fn base_deprel(&self) -> &str {
        self.deprel.split(':').next().unwrap_or("")
    }

    pub fn is_verb(&self) -> bool {
        self.xpos.starts_with("VB") || self.upos == "VERB" || self.upos == "AUX"
    }

    pub fn is_nominal(&self) -> bool {
        self.xpos.starts_with("NN") || self.upos == "NOUN" || self.upos == "PROPN"
    }
}

/// One parsed sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub words: Vec<Word>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, words: Vec<Word>) -> Self {
        Self {
            text: text.into(),
            words,
        }
    }

    /// Build a sentence whose text is the words joined by spaces
    pub fn from_words(words: Vec<Word>) -> Self {
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text, words }
    }

    /// Word by 1-based id
    pub fn word(&self, id: usize) -> Option<&Word> {
        if id == 0 {
            return None;
        }
        self.words.get(id - 1).filter(|w| w.id == id).or_else(|| {
            self.words.iter().find(|w| w.id == id)
        })
    }
}
