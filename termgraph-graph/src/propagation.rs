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

//! Score propagation
//!
//! Scores flow from linked nodes into the linking node, one relation at a
//! time in a fixed order. A node with `k` links of a relation receives
//! `factor * score / k` per linked node and key; contributions are summed,
//! and a sum is written only above [`NOISE_FLOOR`], never lowering an
//! existing score. Updates are visible to later nodes in the same sweep.

use crate::graph::TermGraph;
use std::collections::BTreeMap;
use termgraph_core::{Relation, ScoreKind};
use tracing::debug;

/// Sums at or below this are dropped
pub const NOISE_FLOOR: f64 = 0.05;

/// Decay for definitional links
pub const SECOND_ORDER_FACTOR: f64 = 0.83;

/// Relations in sweep order with their decay factor
pub const PROPAGATION_ORDER: [(Relation, f64); 5] = [
    (Relation::HasComponents, 1.0),
    (Relation::HasAttribute, 1.0),
    (Relation::IsTypeOf, 1.0),
    (Relation::IsDefinedBy, SECOND_ORDER_FACTOR),
    (Relation::IsWwnDefinedBy, SECOND_ORDER_FACTOR),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ScorePropagationEngine;

impl ScorePropagationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run one sweep over every relation and score kind. Returns the number
    /// of score entries written.
    pub fn run(&self, graph: &mut TermGraph) -> usize {
        let keys: Vec<String> = graph.nodes().keys().cloned().collect();
        let mut written = 0;

        for (relation, factor) in PROPAGATION_ORDER {
            for key in &keys {
                for kind in ScoreKind::ALL {
                    let incoming = contributions(graph, key, relation, kind, factor);
                    if incoming.is_empty() {
                        continue;
                    }
                    if let Some(node) = graph.node_mut(key) {
                        for (score_key, value) in incoming {
                            node.merge_score(kind, &score_key, value);
                            written += 1;
                        }
                    }
                }
            }
        }

        debug!(written, "propagated scores");
        written
    }
}

/// Summed contributions above the noise floor for one node
fn contributions(
    graph: &TermGraph,
    key: &str,
    relation: Relation,
    kind: ScoreKind,
    factor: f64,
) -> BTreeMap<String, f64> {
    let Some(node) = graph.node(key) else {
        return BTreeMap::new();
    };
    let linked = node.edges(relation);
    if linked.is_empty() {
        return BTreeMap::new();
    }
    let k = linked.len() as f64;

    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for term in linked {
        if let Some(target) = graph.get(term) {
            for (score_key, value) in target.scores(kind) {
                *sums.entry(score_key.clone()).or_default() += factor * value / k;
            }
        }
    }
    sums.retain(|_, value| *value > NOISE_FLOOR);
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_core::TermNode;

    fn graph_with(terms: &[&str]) -> TermGraph {
        let mut graph = TermGraph::new();
        for term in terms {
            graph.insert_node(term, TermNode::single_noun(term));
        }
        graph
    }

    fn score(graph: &TermGraph, term: &str) -> Option<f64> {
        graph
            .get(term)
            .unwrap()
            .has_ontology_variable
            .get("k")
            .copied()
    }

    fn set_score(graph: &mut TermGraph, term: &str, value: f64) {
        graph
            .get_mut(term)
            .unwrap()
            .merge_score(ScoreKind::OntologyVariable, "k", value);
    }

    #[test]
    fn test_first_order_propagates_unchanged() {
        let mut graph = graph_with(&["parent", "child"]);
        set_score(&mut graph, "child", 0.8);
        graph.link("parent", Relation::HasComponents, "child").unwrap();

        ScorePropagationEngine::new().run(&mut graph);
        assert!((score(&graph, "parent").unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_second_order_decays() {
        let mut graph = graph_with(&["parent", "child"]);
        set_score(&mut graph, "child", 0.8);
        graph.add_edge("parent", Relation::IsDefinedBy, "child");

        ScorePropagationEngine::new().run(&mut graph);
        assert!((score(&graph, "parent").unwrap() - 0.664).abs() < 1e-9);
    }

    #[test]
    fn test_split_below_floor_is_dropped() {
        // 0.18 * 0.83 / 3 = 0.0498, under the floor
        let mut graph = graph_with(&["parent", "a", "b", "c"]);
        set_score(&mut graph, "a", 0.18);
        for child in ["a", "b", "c"] {
            graph.add_edge("parent", Relation::IsDefinedBy, child);
        }

        ScorePropagationEngine::new().run(&mut graph);
        assert_eq!(score(&graph, "parent"), None);
    }

    #[test]
    fn test_split_above_floor_is_written() {
        // 0.8 * 0.83 / 3 = 0.2213
        let mut graph = graph_with(&["parent", "a", "b", "c"]);
        set_score(&mut graph, "a", 0.8);
        for child in ["a", "b", "c"] {
            graph.add_edge("parent", Relation::IsDefinedBy, child);
        }

        ScorePropagationEngine::new().run(&mut graph);
        assert!((score(&graph, "parent").unwrap() - 0.8 * 0.83 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_contributions_are_summed_and_never_lower() {
        let mut graph = graph_with(&["parent", "a", "b", "other"]);
        set_score(&mut graph, "a", 0.6);
        set_score(&mut graph, "b", 0.4);
        set_score(&mut graph, "other", 0.9);
        graph.link("parent", Relation::HasComponents, "a").unwrap();
        graph.link("parent", Relation::HasComponents, "b").unwrap();
        graph.link("other", Relation::HasComponents, "a").unwrap();

        ScorePropagationEngine::new().run(&mut graph);
        assert!((score(&graph, "parent").unwrap() - 0.5).abs() < 1e-9);
        assert!((score(&graph, "other").unwrap() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_indicators_propagate() {
        let mut graph = graph_with(&["parent", "child"]);
        graph.add_indicator("child", "crop yield", 0.5);
        graph.link("parent", Relation::IsTypeOf, "child").unwrap();

        ScorePropagationEngine::new().run(&mut graph);
        assert_eq!(graph.get("parent").unwrap().has_indicator["crop yield"], 0.5);
    }
}
