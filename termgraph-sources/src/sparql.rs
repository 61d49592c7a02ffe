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

//! SPARQL-backed ontology search

use crate::error::{check_status, Result, SourceError};
use crate::ranking::{rank, Candidate, DefaultScorer, MatchScorer};
use crate::traits::{OntologyMatch, OntologySearch};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::time::Duration;
use tracing::{debug, warn};

/// Top-level ontology classes a search may be restricted to
pub const VALID_CLASSES: [&str; 10] = [
    "Variable",
    "Phenomenon",
    "Property",
    "Process",
    "Abstraction",
    "Operator",
    "Attribute",
    "Part",
    "Role",
    "Trajectory",
];

const PREFIXES: &str = "PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX skos: <http://www.w3.org/2004/02/skos/core#>";

/// Ontology search against a SPARQL endpoint
pub struct SparqlOntologyClient {
    endpoint: String,
    class_pattern: String,
    client: reqwest::Client,
    scorer: Box<dyn MatchScorer>,
}

impl SparqlOntologyClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: "http://35.194.43.13:3030/ds/query".to_string(),
            class_pattern: class_pattern("All"),
            client,
            scorer: Box::new(DefaultScorer),
        })
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Restrict results to one top-level class; unknown classes search all
    pub fn with_class(mut self, class: &str) -> Self {
        self.class_pattern = class_pattern(class);
        self
    }

    pub fn with_scorer(mut self, scorer: Box<dyn MatchScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    async fn select(&self, query: &str) -> Result<Vec<serde_json::Value>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query)])
            .header("Accept", "application/sparql-results+json")
            .send()
            .await?;
        let response = check_status(response).await?;
        let data: serde_json::Value = response.json().await?;

        data["results"]["bindings"]
            .as_array()
            .cloned()
            .ok_or_else(|| SourceError::InvalidResponse("missing results.bindings".to_string()))
    }

    /// Entities with a label containing `word` as a whole word
    async fn search_label(&self, word: &str) -> Result<Vec<Candidate>> {
        let query = format!(
            "{PREFIXES}
SELECT DISTINCT ?entity ?preflabel ?entitylabel ?entityclass
WHERE {{
  ?entity rdf:type ?entityclass .
  FILTER regex(STR(?entityclass), \"({classes})$\", \"i\") .
  ?entity rdfs:label ?elabel .
  BIND (STR(?elabel) AS ?entitylabel) .
  FILTER regex(?entitylabel, \"(^|~|_|-| ){word}($|~|_|-| )\", \"i\") .
  ?entity skos:prefLabel ?plabel .
  BIND (STR(?plabel) AS ?preflabel) .
}}
ORDER BY ?entity ?entitylabel ?entityclass",
            classes = self.class_pattern,
        );

        let rows = self.select(&query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Candidate {
                    term: word.to_string(),
                    entity: binding(row, "entity")?,
                    entity_label: binding(row, "entitylabel")?,
                    preflabel: binding(row, "preflabel")?,
                    entity_class: class_name(&binding(row, "entityclass")?)?,
                    linked_from: None,
                })
            })
            .collect())
    }

    /// Entities pointing at a first-degree hit
    async fn search_links(&self, hit: &Candidate) -> Result<Vec<Candidate>> {
        let query = format!(
            "{PREFIXES}
SELECT DISTINCT ?linkedentity ?preflabel ?linkedlabel ?linkedclass
WHERE {{
  ?linkedentity ?rel <{entity}> .
  ?linkedentity rdf:type ?linkedclass .
  FILTER regex(STR(?linkedclass), \"({classes})$\", \"i\") .
  ?linkedentity rdfs:label ?llabel .
  ?linkedentity skos:prefLabel ?plabel .
  BIND (STR(?plabel) AS ?preflabel) .
  BIND (STR(?llabel) AS ?linkedlabel) .
}}
ORDER BY ?linkedentity ?linkedlabel ?linkedclass",
            entity = hit.entity,
            classes = self.class_pattern,
        );

        let rows = self.select(&query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(Candidate {
                    term: hit.term.clone(),
                    entity: binding(row, "linkedentity")?,
                    entity_label: binding(row, "linkedlabel")?,
                    preflabel: binding(row, "preflabel")?,
                    entity_class: class_name(&binding(row, "linkedclass")?)?,
                    linked_from: Some(hit.entity.clone()),
                })
            })
            .collect())
    }
}

/// Regex alternation over class URIs for a class filter
fn class_pattern(class: &str) -> String {
    if VALID_CLASSES.contains(&class) {
        return format!("#{}", class);
    }
    if class != "All" {
        warn!(class = %class, "not a valid ontology class, searching all classes");
    }
    VALID_CLASSES
        .iter()
        .map(|c| format!("#{}", c))
        .collect::<Vec<_>>()
        .join("|")
}

/// Keep only characters that are safe inside a quoted SPARQL regex
fn search_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '\'')
        .collect()
}

fn binding(row: &serde_json::Value, name: &str) -> Option<String> {
    row[name]["value"].as_str().map(str::to_string)
}

fn class_name(uri: &str) -> Option<String> {
    uri.split_once('#')
        .map(|(_, class)| class.to_string())
        .filter(|class| !class.is_empty())
}

#[async_trait]
impl OntologySearch for SparqlOntologyClient {
    async fn rank_search(&self, variants: &[String]) -> Result<Vec<OntologyMatch>> {
        let mut searched: Vec<String> = Vec::new();
        let mut first_degree = Vec::new();

        for variant in variants {
            if searched.contains(variant) {
                continue;
            }
            searched.push(variant.clone());

            for word in variant.replace('_', " ").split_whitespace() {
                let word = search_word(word);
                if word.is_empty() {
                    continue;
                }
                first_degree.extend(self.search_label(&word).await?);
            }
        }

        let linked = try_join_all(first_degree.iter().map(|hit| self.search_links(hit))).await?;
        let mut candidates = first_degree;
        candidates.extend(linked.into_iter().flatten());

        debug!(variants = ?variants, rows = candidates.len(), "ontology search");
        Ok(rank(variants, candidates, self.scorer.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_pattern() {
        assert_eq!(class_pattern("Variable"), "#Variable");
        let all = class_pattern("All");
        assert!(all.starts_with("#Variable|#Phenomenon"));
        assert!(all.ends_with("#Trajectory"));
        assert_eq!(class_pattern("Nonsense"), all);
    }

    #[test]
    fn test_search_word_strips_quotes() {
        assert_eq!(search_word("\"mass\")"), "mass");
        assert_eq!(search_word("run-off"), "run-off");
    }

    #[test]
    fn test_class_name() {
        assert_eq!(
            class_name("http://www.geoscienceontology.org/svo/svu#Property").as_deref(),
            Some("Property")
        );
        assert_eq!(class_name("http://example.org/Property"), None);
    }
}
