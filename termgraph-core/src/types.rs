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

//! Grammatical and semantic classification types
//!
//! - [`PartOfSpeech`]: the three tags a noun group may contain
//! - [`Shape`]: structural classification of a term, decides decomposition
//! - [`Category`]: inferred top-level ontological class

use serde::{Deserialize, Serialize};
use std::fmt;

/// Part-of-speech tags retained inside a noun group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Adposition,
}

impl PartOfSpeech {
    /// Map a Universal Dependencies UPOS tag. Tags that never appear
    /// inside a noun group return `None`.
    pub fn from_upos(upos: &str) -> Option<Self> {
        match upos {
            "NOUN" => Some(PartOfSpeech::Noun),
            "ADJ" => Some(PartOfSpeech::Adjective),
            "ADP" => Some(PartOfSpeech::Adposition),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Adjective => "ADJECTIVE",
            PartOfSpeech::Adposition => "ADPOSITION",
        }
    }
}

/// Structural classification of a term
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    SingleNoun,
    NounGroup,
    ModifiedNoun,
    ModifiedNounGroup,
    AdpositionCompound,
    Adjective,
}

impl Shape {
    /// Classify a tag sequence.
    ///
    /// Checks run in a fixed order: any adposition wins, then an adjacent
    /// NOUN,ADJECTIVE pair, then a noun/adjective mix, then adjective-only,
    /// then multi-noun; everything else is a single noun.
    pub fn classify(pos_sequence: &[PartOfSpeech]) -> Self {
        use PartOfSpeech::*;

        if pos_sequence.contains(&Adposition) {
            return Shape::AdpositionCompound;
        }
        if pos_sequence
            .windows(2)
            .any(|w| w[0] == Noun && w[1] == Adjective)
        {
            return Shape::ModifiedNounGroup;
        }

        let has_noun = pos_sequence.contains(&Noun);
        let has_adj = pos_sequence.contains(&Adjective);
        if has_noun && has_adj {
            Shape::ModifiedNoun
        } else if has_adj {
            Shape::Adjective
        } else if pos_sequence.len() > 1 {
            Shape::NounGroup
        } else {
            Shape::SingleNoun
        }
    }

    /// Whether this shape is split further by the decomposer
    pub fn is_compound(&self) -> bool {
        !matches!(self, Shape::SingleNoun | Shape::Adjective)
    }

    /// Order in which the category pass visits shapes. Lower ranks are
    /// resolved first so compound nodes can read their parts.
    pub fn compositional_rank(&self) -> u8 {
        match self {
            Shape::SingleNoun | Shape::Adjective => 0,
            Shape::NounGroup => 1,
            Shape::ModifiedNoun | Shape::ModifiedNounGroup => 2,
            Shape::AdpositionCompound => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::SingleNoun => "single-noun",
            Shape::NounGroup => "noun-group",
            Shape::ModifiedNoun => "modified-noun",
            Shape::ModifiedNounGroup => "modified-noun-group",
            Shape::AdpositionCompound => "adposition-compound",
            Shape::Adjective => "adjective",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inferred top-level category of a term.
///
/// Ontology and dictionary classes outside the four base categories
/// (e.g. "Matter", "Role") are carried verbatim in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Category {
    Phenomenon,
    Property,
    Attribute,
    Process,
    Variable,
    Specialized(Box<Category>),
    Other(String),
}

const SPECIALIZED_PREFIX: &str = "Specialized";

impl Category {
    /// Parse a category name. Unknown names are kept verbatim.
    pub fn from_str(s: &str) -> Self {
        if let Some(rest) = s.strip_prefix(SPECIALIZED_PREFIX) {
            if !rest.is_empty() {
                return Category::specialized_of(Category::from_str(rest));
            }
        }
        match s {
            "Phenomenon" => Category::Phenomenon,
            "Property" => Category::Property,
            "Attribute" => Category::Attribute,
            "Process" => Category::Process,
            "Variable" => Category::Variable,
            other => Category::Other(other.to_string()),
        }
    }

    /// Wrap a category in the specialized form, never nesting twice.
    pub fn specialized_of(inner: Category) -> Self {
        match inner {
            Category::Specialized(_) => inner,
            other => Category::Specialized(Box::new(other)),
        }
    }

    /// The category with any specialization removed
    pub fn base(&self) -> &Category {
        match self {
            Category::Specialized(inner) => inner.base(),
            other => other,
        }
    }

    pub fn is_specialized(&self) -> bool {
        matches!(self, Category::Specialized(_))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Phenomenon
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Phenomenon => f.write_str("Phenomenon"),
            Category::Property => f.write_str("Property"),
            Category::Attribute => f.write_str("Attribute"),
            Category::Process => f.write_str("Process"),
            Category::Variable => f.write_str("Variable"),
            Category::Specialized(inner) => write!(f, "{}{}", SPECIALIZED_PREFIX, inner),
            Category::Other(name) => f.write_str(name),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.to_string()
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from_str(&s)
    }
}
