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

//! Collaborator traits consumed by the graph builder

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use termgraph_nlp::Sentence;

/// Dependency parser: text in, tagged and attached words out
#[async_trait]
pub trait DependencyParser: Send + Sync {
    async fn parse(&self, text: &str) -> Result<Vec<Sentence>>;

    /// Parse each paragraph separately, keeping paragraph boundaries
    async fn parse_paragraphs(&self, paragraphs: &[String]) -> Result<Vec<Vec<Sentence>>> {
        let mut parsed = Vec::with_capacity(paragraphs.len());
        for paragraph in paragraphs {
            parsed.push(self.parse(paragraph).await?);
        }
        Ok(parsed)
    }
}

/// Top encyclopedia search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub page_id: u64,
    pub title: String,
    #[serde(default)]
    pub redirect_title: Option<String>,
    #[serde(default)]
    pub section_title: Option<String>,
}

/// Plain text of an encyclopedia page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub paragraphs: Vec<String>,
    pub is_disambiguation: bool,
}

#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Best search hit for a term, if any
    async fn search_top_result(&self, term: &str) -> Result<Option<SearchHit>>;

    /// Paragraph text and disambiguation flag of a page
    async fn fetch_page(&self, page_id: u64) -> Result<PageText>;
}

/// A ranked ontology entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyMatch {
    /// Search word that surfaced the entity
    pub term: String,
    /// Full entity URI
    pub entity: String,
    pub entity_label: String,
    pub preflabel: String,
    pub entity_class: String,
    /// Match confidence in [0, 1]; 1.0 is an exact match
    pub score: f64,
}

impl OntologyMatch {
    pub fn is_exact(&self) -> bool {
        self.score >= 1.0
    }
}

#[async_trait]
pub trait OntologySearch: Send + Sync {
    /// Ranked entities for a set of synonymous term variants
    async fn rank_search(&self, variants: &[String]) -> Result<Vec<OntologyMatch>>;
}

/// Curated term -> category dictionary
pub trait CategoryDictionary: Send + Sync {
    /// `{category: first definition}` for every category listing the term
    fn get_categories(&self, term: &str) -> BTreeMap<String, String>;
}
