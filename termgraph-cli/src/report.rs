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

//! Variable report printed after an expansion

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use termgraph_core::Category;
use termgraph_graph::{EntityStore, TermGraph};

const LISTED_TERMS: usize = 5;
const LISTED_SCORES: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f64,
}

/// What the graph knows about one queried term
#[derive(Debug, Clone, Serialize)]
pub struct VariableReport {
    pub term: String,
    pub node: String,
    pub category: String,
    pub guidance: &'static str,
    pub modified_terms: Vec<String>,
    pub term_aspects: Vec<String>,
    pub indicators: Vec<ScoredLabel>,
    pub ontology_variables: Vec<ScoredLabel>,
}

impl VariableReport {
    /// `None` when the term does not resolve to a node
    pub fn build(graph: &TermGraph, entities: &EntityStore, term: &str) -> Option<Self> {
        let node_key = graph.resolve(term)?;
        let node = graph.node(&node_key)?;
        let category = node.determined_category.clone().unwrap_or_default();

        Some(Self {
            term: term.trim().to_string(),
            node: node_key,
            guidance: guidance(&category),
            category: category.to_string(),
            modified_terms: node.modified_terms.clone(),
            term_aspects: node.term_aspects.clone(),
            indicators: top_scores(&node.has_indicator, |key| key.to_string()),
            ontology_variables: top_scores(&node.has_ontology_variable, |key| entities.label(key)),
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "The terms you entered were classified as a {}.", self.category);
        let _ = writeln!(out, "{}", self.guidance);

        render_terms(&mut out, &self.modified_terms, &format!("types of {}", self.term));
        render_terms(&mut out, &self.term_aspects, &format!("more complex aspects of {}", self.term));
        render_scores(&mut out, &self.indicators, "indicators related to this search");
        render_scores(&mut out, &self.ontology_variables, "ontology variables related to this search");
        out
    }
}

/// What is still missing before the term names a variable
pub fn guidance(category: &Category) -> &'static str {
    match category {
        Category::Variable => "This is minimally sufficient to classify as a variable.",
        Category::Property => {
            "You will need to specify the Phenomenon observed (object of observation) in order to completely define your variable."
        }
        Category::Process => {
            "You will need to specify the Phenomenon observed (object of observation) as well as a Property in order to completely define your variable."
        }
        Category::Phenomenon => {
            "You will need to specify the Property (or characteristic) of the Phenomenon in order to completely define your variable."
        }
        _ => "You will need to identify a clear Phenomenon and Property to completely identify your variable.",
    }
}

/// Highest scores first, ties by label, at most ten
fn top_scores(scores: &BTreeMap<String, f64>, label: impl Fn(&str) -> String) -> Vec<ScoredLabel> {
    let mut ranked: Vec<ScoredLabel> = scores
        .iter()
        .map(|(key, score)| ScoredLabel {
            label: label(key),
            score: *score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.label.cmp(&b.label)));
    ranked.truncate(LISTED_SCORES);
    ranked
}

fn render_terms(out: &mut String, terms: &[String], what: &str) {
    if terms.is_empty() {
        return;
    }
    let _ = writeln!(out, "I found {} {}.", terms.len(), what);
    let _ = writeln!(out, "{}", if terms.len() > LISTED_TERMS { "Here are the first five ..." } else { "Here they are ..." });
    for term in terms.iter().take(LISTED_TERMS) {
        let _ = writeln!(out, "\t{}", term);
    }
}

fn render_scores(out: &mut String, scores: &[ScoredLabel], what: &str) {
    if scores.is_empty() {
        return;
    }
    let _ = writeln!(out, "Top {} {}:", scores.len(), what);
    for entry in scores {
        let _ = writeln!(out, "\t{}\t{:.3}", entry.label, entry.score);
    }
}
