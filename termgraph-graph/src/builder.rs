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

//! Recursive term graph construction
//!
//! Two recursions, each with its own termination argument:
//!
//! - [`TermGraphBuilder::insert_structure`] decomposes a noun group until
//!   its parts are atomic. Every part is strictly shorter than its parent.
//! - `expand_level` follows definitional edges into new terms with a
//!   strictly decreasing depth, bounded by [`MAX_DEPTH`] at entry.
//!
//! Remote annotation of the nodes touched by one decomposition is
//! dispatched concurrently and applied in discovery order.

use crate::annotate::{self, Annotation, AnnotationRequest, Collaborators};
use crate::entity_store::EntityStore;
use crate::graph::TermGraph;
use crate::synonym::SynonymResolver;
use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use termgraph_core::{
    is_reserved, normalize_term, BuildConfig, Relation, Result, TermGraphError, TermNode,
};
use termgraph_nlp::{decompose, NounGroup, NounGroupSegmenter};
use tracing::{debug, info, warn};

/// Deepest definitional expansion allowed
pub const MAX_DEPTH: u32 = 3;

/// Clamp a requested depth to `[0, MAX_DEPTH]`, warning when reduced
pub fn clamp_depth(depth: u32) -> u32 {
    if depth > MAX_DEPTH {
        warn!(requested = depth, max = MAX_DEPTH, "expansion depth clamped");
        MAX_DEPTH
    } else {
        depth
    }
}

/// Builds a term graph by expanding terms against the collaborators.
///
/// The builder owns the graph and entity store for the session and is the
/// only writer. Remote annotation is fetched at most once per canonical
/// key, and an expansion is skipped when the same term was already
/// expanded at least as deep.
pub struct TermGraphBuilder {
    graph: TermGraph,
    entities: EntityStore,
    sources: Collaborators,
    config: BuildConfig,
    annotated: HashSet<String>,
    expanded: HashMap<String, u32>,
}

impl TermGraphBuilder {
    pub fn new(graph: TermGraph, entities: EntityStore, sources: Collaborators, config: BuildConfig) -> Self {
        Self {
            graph,
            entities,
            sources,
            config,
            annotated: HashSet::new(),
            expanded: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &TermGraph {
        &self.graph
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn into_parts(self) -> (TermGraph, EntityStore) {
        (self.graph, self.entities)
    }

    /// Expand `term` into the graph, following definitions `depth` levels
    /// deep, then fold pending synonyms.
    ///
    /// Lookup failures only make the graph sparser. An error is returned
    /// only for a noun group that violates the node invariants.
    pub async fn expand(&mut self, term: &str, depth: u32) -> Result<()> {
        let depth = clamp_depth(depth);
        if depth == 0 || term.trim().is_empty() {
            return Ok(());
        }

        let before = self.graph.len();
        self.expand_level(term.trim().to_string(), depth).await?;
        SynonymResolver::new().resolve_pending(&mut self.graph);

        info!(
            term = %term.trim(),
            depth,
            nodes = self.graph.len(),
            added = self.graph.len().saturating_sub(before),
            "expanded term"
        );
        Ok(())
    }

    fn expand_level(&mut self, term: String, depth: u32) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let key = normalize_term(&term);
            if depth == 0 || key.is_empty() {
                return Ok(());
            }
            if self.expanded.get(&key).map_or(false, |done| *done >= depth) {
                debug!(term = %key, depth, "already expanded");
                return Ok(());
            }
            self.expanded.insert(key.clone(), depth);

            let sentences = match self.sources.parser.parse(&term).await {
                Ok(sentences) => sentences,
                Err(e) => {
                    warn!(term = %key, error = %e, "could not parse term");
                    return Ok(());
                }
            };
            let segmenter = NounGroupSegmenter::new();
            let clusters: Vec<NounGroup> = sentences
                .iter()
                .flat_map(|sentence| segmenter.segment(&sentence.words))
                .collect();
            debug!(term = %key, depth, clusters = clusters.len(), "expanding");

            let mut names = Vec::with_capacity(clusters.len());
            for cluster in &clusters {
                names.push(self.add_term_node(cluster).await?);
            }

            for name in names {
                for child in self.graph.children(&name) {
                    self.expand_level(child, depth - 1).await?;
                }
            }
            Ok(())
        })
    }

    /// Add a noun group with all of its parts, then annotate every node
    /// the decomposition touched. Returns the group's key.
    ///
    /// Calling this again for the same group only appends what is missing.
    pub async fn add_term_node(&mut self, group: &NounGroup) -> Result<String> {
        let mut touched = Vec::new();
        let key = self.insert_structure(group, &mut touched)?;
        self.annotate(touched).await;
        Ok(key)
    }

    /// Create the node if needed and wire its decomposition, recursively.
    /// Reserved category names become stubs and are never decomposed.
    fn insert_structure(&mut self, group: &NounGroup, touched: &mut Vec<String>) -> Result<String> {
        if group.words.len() != group.pos_sequence.len() {
            return Err(TermGraphError::Invariant(format!(
                "noun group has {} words but {} tags",
                group.words.len(),
                group.pos_sequence.len()
            )));
        }
        let key = group.key();
        if self.graph.resolve(&key).is_none() {
            let node = TermNode::with_shape(
                group.pos_sequence.clone(),
                group.lemma_sequence.clone(),
                group.shape,
            )?;
            self.graph.insert_node(&key, node);
            debug!(term = %key, shape = group.shape.as_str(), "created node");
        }

        if is_reserved(&key) || is_reserved(&group.lemma()) {
            return Ok(key);
        }
        if !touched.contains(&key) {
            touched.push(key.clone());
        }

        let parts = decompose(group);
        for component in &parts.components {
            let child = self.insert_structure(component, touched)?;
            self.graph.link(&key, Relation::HasComponents, &child)?;
        }
        if let Some(head) = &parts.head_type {
            let child = self.insert_structure(head, touched)?;
            self.graph.link(&key, Relation::IsTypeOf, &child)?;
        }
        for attribute in &parts.attributes {
            let child = self.insert_structure(attribute, touched)?;
            self.graph.link(&key, Relation::HasAttribute, &child)?;
        }
        for constituent in &parts.constituents {
            let child = self.insert_structure(constituent, touched)?;
            self.graph.link(&key, Relation::HasComponents, &child)?;
        }
        Ok(key)
    }

    /// Fetch annotations for the not yet annotated keys concurrently, then
    /// apply them in order
    async fn annotate(&mut self, touched: Vec<String>) {
        let mut requests = Vec::new();
        for key in touched {
            let Some(canonical) = self.graph.resolve(&key) else {
                continue;
            };
            if !self.annotated.insert(canonical.clone()) {
                continue;
            }
            if let Some(node) = self.graph.node(&canonical) {
                requests.push(AnnotationRequest {
                    lemma: normalize_term(&node.lemma()),
                    single_word: node.is_single_word(),
                    known_definitions: node.has_category_definitions.clone(),
                    key,
                });
            }
        }
        if requests.is_empty() {
            return;
        }

        let limit = self.config.max_concurrent_lookups.max(1);
        let long_page_scan = self.config.long_page_scan;
        let sources = &self.sources;
        let graph = &self.graph;
        let annotations: Vec<Annotation> = stream::iter(requests)
            .map(|request| annotate::fetch(sources, graph, request, long_page_scan))
            .buffered(limit)
            .collect()
            .await;

        for annotation in annotations {
            annotate::apply(&mut self.graph, &mut self.entities, annotation);
        }
    }
}
