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

//! Synonym merging
//!
//! A merge folds a duplicate node into its canonical node and removes the
//! duplicate. Only definitional edges, dictionary annotations and scores
//! transfer; structural edges of the duplicate are dropped, and references
//! to it elsewhere keep resolving through the index.

use crate::graph::TermGraph;
use termgraph_core::{normalize_term, node::push_unique, Relation, Result, ScoreKind, TermGraphError};
use tracing::{debug, info};

/// Edge lists carried over from a merged node
const TRANSFERRED_EDGES: [Relation; 2] = [Relation::IsDefinedBy, Relation::IsWwnDefinedBy];

#[derive(Debug, Clone, Copy, Default)]
pub struct SynonymResolver;

impl SynonymResolver {
    pub fn new() -> Self {
        Self
    }

    /// Merge the node at `duplicate` into the node `canonical` resolves to.
    ///
    /// Returns false when there is nothing to do: the duplicate is already
    /// merged away, or both names resolve to the same node.
    pub fn merge(&self, graph: &mut TermGraph, duplicate: &str, canonical: &str) -> Result<bool> {
        let target = graph
            .resolve(canonical)
            .ok_or_else(|| TermGraphError::TermNotFound(canonical.to_string()))?;
        let duplicate = normalize_term(duplicate);

        if duplicate == target || graph.node(&duplicate).is_none() {
            return Ok(false);
        }

        let removed = match graph.remove_node(&duplicate) {
            Some(node) => node,
            None => return Ok(false),
        };
        graph.redirect_index(&duplicate, &target);

        let node = graph
            .node_mut(&target)
            .ok_or_else(|| TermGraphError::TermNotFound(target.clone()))?;

        for relation in TRANSFERRED_EDGES {
            for value in removed.edges(relation) {
                node.add_edge(relation, value);
            }
        }
        for tag in &removed.has_category_tags {
            push_unique(&mut node.has_category_tags, tag);
        }
        for definition in &removed.has_category_definitions {
            push_unique(&mut node.has_category_definitions, definition);
        }
        for kind in ScoreKind::ALL {
            for (key, value) in removed.scores(kind) {
                node.merge_score(kind, key, *value);
            }
        }
        for class in removed.ontology_match_classes() {
            for hash in removed.has_ontology_match.get(&class).into_iter().flatten() {
                node.add_ontology_match(&class, hash);
            }
        }

        debug!(duplicate = %duplicate, canonical = %target, "merged synonym");
        Ok(true)
    }

    /// Merge every node whose first synonym is another node in the graph.
    /// Merges apply one at a time, each into the then-current canonical
    /// node. Returns the number of nodes merged away.
    pub fn resolve_pending(&self, graph: &mut TermGraph) -> usize {
        let pending: Vec<(String, String)> = graph
            .nodes()
            .iter()
            .filter_map(|(key, node)| {
                let synonym = normalize_term(node.has_synonym.first()?);
                (synonym != *key && graph.node(&synonym).is_some()).then(|| (key.clone(), synonym))
            })
            .collect();

        let mut merged = 0;
        for (duplicate, synonym) in pending {
            // Targets always resolve here: merged nodes stay indexed.
            if let Ok(true) = self.merge(graph, &duplicate, &synonym) {
                merged += 1;
            }
        }

        if merged > 0 {
            info!(merged, "resolved synonym nodes");
        }
        merged
    }
}
