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

//! Term graph store
//!
//! Nodes are keyed by their canonical (case-folded) term. The synonym index
//! maps every known surface form, including keys of merged-away nodes, to
//! the canonical key currently holding its information. Edge targets are
//! stored as the term that was linked and resolved through the index when
//! read.

use serde::Serialize;
use std::collections::BTreeMap;
use termgraph_core::{normalize_term, Relation, Result, ScoreKind, TermGraphError, TermNode};
use tracing::debug;

/// Summary counts for a graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub index_entries: usize,
    /// Total edge targets per relation name
    pub edge_counts: BTreeMap<String, usize>,
    /// Nodes per determined category; undetermined nodes are not counted
    pub category_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermGraph {
    nodes: BTreeMap<String, TermNode>,
    index: BTreeMap<String, String>,
}

impl TermGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from persisted parts. Every node is indexed to
    /// itself unless the index already maps it elsewhere; index entries
    /// pointing at missing nodes are dropped.
    pub fn from_parts(nodes: BTreeMap<String, TermNode>, mut index: BTreeMap<String, String>) -> Self {
        let before = index.len();
        index.retain(|_, canonical| nodes.contains_key(canonical));
        if index.len() < before {
            debug!(dropped = before - index.len(), "dropped dangling index entries");
        }
        for key in nodes.keys() {
            index.entry(key.clone()).or_insert_with(|| key.clone());
        }
        Self { nodes, index }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &BTreeMap<String, TermNode> {
        &self.nodes
    }

    pub fn index(&self) -> &BTreeMap<String, String> {
        &self.index
    }

    /// Node stored under exactly `key`, without index resolution
    pub fn node(&self, key: &str) -> Option<&TermNode> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: &str) -> Option<&mut TermNode> {
        self.nodes.get_mut(key)
    }

    /// Canonical key for any known surface form of a term
    pub fn resolve(&self, term: &str) -> Option<String> {
        let key = normalize_term(term);
        match self.index.get(&key) {
            Some(canonical) if self.nodes.contains_key(canonical) => Some(canonical.clone()),
            _ if self.nodes.contains_key(&key) => Some(key),
            _ => None,
        }
    }

    pub fn get(&self, term: &str) -> Option<&TermNode> {
        self.resolve(term).and_then(|key| self.nodes.get(&key))
    }

    pub fn get_mut(&mut self, term: &str) -> Option<&mut TermNode> {
        let key = self.resolve(term)?;
        self.nodes.get_mut(&key)
    }

    pub fn is_indexed(&self, term: &str) -> bool {
        self.index.contains_key(&normalize_term(term))
    }

    /// Insert a node unless the term already resolves to one.
    ///
    /// Returns true if a node was created.
    pub fn insert_node(&mut self, term: &str, node: TermNode) -> bool {
        if self.resolve(term).is_some() {
            return false;
        }
        let key = normalize_term(term);
        self.index.insert(key.clone(), key.clone());
        self.nodes.insert(key, node);
        true
    }

    /// Register `synonym` as another name for the node at `canonical`.
    /// Existing index entries are never overwritten.
    pub fn add_index(&mut self, synonym: &str, canonical: &str) -> bool {
        let synonym = normalize_term(synonym);
        if self.index.contains_key(&synonym) || !self.nodes.contains_key(canonical) {
            return false;
        }
        self.index.insert(synonym, canonical.to_string());
        true
    }

    /// Point `from` and everything that resolved to it at `to`
    pub(crate) fn redirect_index(&mut self, from: &str, to: &str) {
        for canonical in self.index.values_mut() {
            if canonical == from {
                *canonical = to.to_string();
            }
        }
        self.index.insert(from.to_string(), to.to_string());
    }

    pub(crate) fn remove_node(&mut self, key: &str) -> Option<TermNode> {
        self.nodes.remove(key)
    }

    /// Wire a structural relation and its inverse.
    ///
    /// `parent` gets `relation -> child`; `child` gets the inverse relation
    /// back to `parent`. Both terms must resolve to nodes.
    pub fn link(&mut self, parent: &str, relation: Relation, child: &str) -> Result<bool> {
        let parent_key = self
            .resolve(parent)
            .ok_or_else(|| TermGraphError::TermNotFound(parent.to_string()))?;
        let child_key = self
            .resolve(child)
            .ok_or_else(|| TermGraphError::TermNotFound(child.to_string()))?;

        let parent_term = normalize_term(parent);
        let child_term = normalize_term(child);

        let mut added = false;
        if let Some(node) = self.nodes.get_mut(&parent_key) {
            added |= node.add_edge(relation, &child_term);
        }
        if let Some(inverse) = relation.inverse() {
            if let Some(node) = self.nodes.get_mut(&child_key) {
                added |= node.add_edge(inverse, &parent_term);
            }
        }
        Ok(added)
    }

    /// Add a one-directional edge on the node `term` resolves to
    pub fn add_edge(&mut self, term: &str, relation: Relation, target: &str) -> bool {
        let target = normalize_term(target);
        match self.get_mut(term) {
            Some(node) => node.add_edge(relation, &target),
            None => false,
        }
    }

    /// Record an externally supplied indicator score, clamped to [0, 1]
    /// and max-merged with any existing value.
    pub fn add_indicator(&mut self, term: &str, indicator: &str, score: f64) -> bool {
        if !score.is_finite() {
            return false;
        }
        match self.get_mut(term) {
            Some(node) => {
                node.merge_score(ScoreKind::Indicator, indicator, score.clamp(0.0, 1.0));
                true
            }
            None => false,
        }
    }

    /// Rewrite ontology entity keys in every score map and match list.
    /// Keys missing from `remap` are dropped. Returns the number dropped.
    pub fn remap_entity_keys(&mut self, remap: &BTreeMap<String, String>) -> usize {
        let mut dropped = 0;
        for node in self.nodes.values_mut() {
            for kind in [ScoreKind::OntologyVariable, ScoreKind::OntologyEntity] {
                let scores = std::mem::take(node.scores_mut(kind));
                for (key, value) in scores {
                    match remap.get(&key) {
                        Some(fresh) => node.merge_score(kind, fresh, value),
                        None => dropped += 1,
                    }
                }
            }

            let classes = node.ontology_match_classes();
            let mut matches = std::mem::take(&mut node.has_ontology_match);
            node.ontology_match_order.clear();
            for class in classes {
                for hash in matches.remove(&class).unwrap_or_default() {
                    match remap.get(&hash) {
                        Some(fresh) => node.add_ontology_match(&class, fresh),
                        None => dropped += 1,
                    }
                }
            }
        }
        dropped
    }

    /// Terms a node is defined by, from the encyclopedia and the dictionary
    pub fn children(&self, term: &str) -> Vec<String> {
        self.get(term)
            .map(|node| {
                node.is_defined_by
                    .iter()
                    .chain(node.is_wwn_defined_by.iter())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            node_count: self.nodes.len(),
            index_entries: self.index.len(),
            ..Default::default()
        };
        for relation in Relation::ALL {
            let total = self.nodes.values().map(|n| n.edges(relation).len()).sum();
            stats.edge_counts.insert(relation.as_str().to_string(), total);
        }
        for node in self.nodes.values() {
            if let Some(category) = &node.determined_category {
                *stats.category_counts.entry(category.to_string()).or_default() += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_core::{Category, PartOfSpeech};

    fn graph_with(terms: &[&str]) -> TermGraph {
        let mut graph = TermGraph::new();
        for term in terms {
            graph.insert_node(term, TermNode::single_noun(term));
        }
        graph
    }

    #[test]
    fn test_insert_is_idempotent_and_case_folded() {
        let mut graph = graph_with(&["moisture"]);
        assert!(!graph.insert_node("Moisture", TermNode::single_noun("moisture")));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.resolve("  MOISTURE ").as_deref(), Some("moisture"));
    }

    #[test]
    fn test_link_writes_both_directions() {
        let mut graph = graph_with(&["conductivity"]);
        let adjective = TermNode::with_shape(
            vec![PartOfSpeech::Adjective],
            vec!["thermal".to_string()],
            termgraph_core::Shape::Adjective,
        )
        .unwrap();
        graph.insert_node("thermal", adjective);
        let modified = TermNode::new(
            vec![PartOfSpeech::Adjective, PartOfSpeech::Noun],
            vec!["thermal".to_string(), "conductivity".to_string()],
        )
        .unwrap();
        graph.insert_node("thermal conductivity", modified);

        assert!(graph.link("thermal conductivity", Relation::HasAttribute, "thermal").unwrap());
        assert!(!graph.link("thermal conductivity", Relation::HasAttribute, "thermal").unwrap());
        assert_eq!(graph.get("thermal").unwrap().is_attribute_of, vec!["thermal conductivity"]);
        assert!(graph.link("thermal conductivity", Relation::IsTypeOf, "missing").is_err());
    }

    #[test]
    fn test_add_index_never_overwrites() {
        let mut graph = graph_with(&["rain", "rainfall"]);
        assert!(graph.add_index("precipitation", "rain"));
        assert!(!graph.add_index("precipitation", "rainfall"));
        assert!(!graph.add_index("drizzle", "missing"));
        assert_eq!(graph.resolve("precipitation").as_deref(), Some("rain"));
    }

    #[test]
    fn test_add_indicator_clamps_and_max_merges() {
        let mut graph = graph_with(&["drought"]);
        assert!(graph.add_indicator("drought", "crop failure", 0.4));
        assert!(graph.add_indicator("drought", "crop failure", 0.2));
        assert!(graph.add_indicator("drought", "food price", 1.7));
        assert!(!graph.add_indicator("flood", "food price", 0.5));

        let node = graph.get("drought").unwrap();
        assert_eq!(node.has_indicator["crop failure"], 0.4);
        assert_eq!(node.has_indicator["food price"], 1.0);
    }

    #[test]
    fn test_remap_entity_keys() {
        let mut graph = graph_with(&["mass"]);
        let node = graph.get_mut("mass").unwrap();
        node.merge_score(ScoreKind::OntologyVariable, "old1", 0.5);
        node.merge_score(ScoreKind::OntologyEntity, "gone", 0.3);
        node.add_ontology_match("Property", "old2");

        let remap: BTreeMap<String, String> = [("old1", "new1"), ("old2", "new2")]
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        assert_eq!(graph.remap_entity_keys(&remap), 1);

        let node = graph.get("mass").unwrap();
        assert_eq!(node.has_ontology_variable.get("new1"), Some(&0.5));
        assert!(node.has_ontology_entity.is_empty());
        assert_eq!(node.has_ontology_match["Property"], vec!["new2"]);
    }

    #[test]
    fn test_children_and_stats() {
        let mut graph = graph_with(&["drought", "rainfall"]);
        graph.add_edge("drought", Relation::IsDefinedBy, "period");
        graph.add_edge("drought", Relation::IsWwnDefinedBy, "Rainfall");
        graph.get_mut("rainfall").unwrap().determined_category = Some(Category::Phenomenon);

        assert_eq!(graph.children("drought"), vec!["period", "rainfall"]);
        assert!(graph.children("missing").is_empty());

        let stats = graph.stats();
        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.edge_counts["is_defined_by"], 1);
        assert_eq!(stats.edge_counts["has_components"], 0);
        assert_eq!(stats.category_counts["Phenomenon"], 1);
    }

    #[test]
    fn test_from_parts_indexes_nodes() {
        let mut nodes = BTreeMap::new();
        nodes.insert("rain".to_string(), TermNode::single_noun("rain"));
        let mut index = BTreeMap::new();
        index.insert("shower".to_string(), "rain".to_string());
        index.insert("ghost".to_string(), "missing".to_string());

        let graph = TermGraph::from_parts(nodes, index);
        assert_eq!(graph.index().len(), 2);
        assert_eq!(graph.resolve("shower").as_deref(), Some("rain"));
        assert_eq!(graph.resolve("ghost"), None);
    }
}
