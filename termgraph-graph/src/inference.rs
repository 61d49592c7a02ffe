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

//! Category inference
//!
//! One pass over the whole graph, in ascending compositional rank so that
//! every compound sees the final categories of its parts:
//!
//! 1. single nouns and adjectives, from their own annotations
//! 2. noun groups, by a vote over their constituent nouns
//! 3. modified nouns, from their head type
//! 4. adposition compounds, from their components

use crate::graph::TermGraph;
use termgraph_core::{Category, Shape, TermNode};
use tracing::debug;

/// Classes that read as a phenomenon for a single noun
const PHENOMENON_CLASSES: [&str; 4] = ["Phenomenon", "Matter", "Role", "Form"];

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryInferenceEngine;

impl CategoryInferenceEngine {
    pub fn new() -> Self {
        Self
    }

    /// Assign `determined_category` to every node. Returns the node count.
    pub fn run(&self, graph: &mut TermGraph) -> usize {
        let mut order: Vec<(u8, String)> = graph
            .nodes()
            .iter()
            .map(|(key, node)| (node.shape.compositional_rank(), key.clone()))
            .collect();
        order.sort();

        for (_, key) in &order {
            let category = match graph.node(key) {
                Some(node) => self.infer(graph, key, node),
                None => continue,
            };
            if let Some(node) = graph.node_mut(key) {
                node.determined_category = Some(category);
            }
        }

        debug!(nodes = order.len(), "inferred categories");
        order.len()
    }

    fn infer(&self, graph: &TermGraph, key: &str, node: &TermNode) -> Category {
        match node.shape {
            Shape::Adjective => Category::Attribute,
            Shape::SingleNoun => single_noun_category(node),
            Shape::NounGroup => noun_group_category(graph, node),
            Shape::ModifiedNoun | Shape::ModifiedNounGroup => modified_category(graph, node),
            Shape::AdpositionCompound if key.split_whitespace().any(|w| w == "of") => {
                compound_category(graph, node)
            }
            Shape::AdpositionCompound => Category::Phenomenon,
        }
    }
}

fn category_of(graph: &TermGraph, term: &str) -> Option<Category> {
    graph.get(term).and_then(|n| n.determined_category.clone())
}

fn single_noun_category(node: &TermNode) -> Category {
    let classes = if node.has_ontology_match.is_empty() {
        node.has_category_tags.clone()
    } else {
        node.ontology_match_classes()
    };
    let has = |name: &str| classes.iter().any(|c| c == name);

    if classes.is_empty() || PHENOMENON_CLASSES.iter().any(|c| has(c)) {
        Category::Phenomenon
    } else if has("Property") {
        Category::Property
    } else if has("Attribute") {
        Category::Attribute
    } else if has("Process") {
        Category::Process
    } else {
        Category::from_str(&classes[0])
    }
}

/// Most frequent categories, ties kept, in order of first appearance
fn winners(categories: impl Iterator<Item = Category>) -> Vec<Category> {
    let mut tally: Vec<(Category, usize)> = Vec::new();
    for category in categories {
        match tally.iter_mut().find(|(c, _)| *c == category) {
            Some((_, count)) => *count += 1,
            None => tally.push((category, 1)),
        }
    }
    let best = tally.iter().map(|(_, n)| *n).max().unwrap_or(0);
    tally
        .into_iter()
        .filter(|(_, n)| *n == best)
        .map(|(c, _)| c)
        .collect()
}

fn noun_group_category(graph: &TermGraph, node: &TermNode) -> Category {
    let resolved = node.has_components.iter().filter_map(|component| {
        let key = graph.resolve(component)?;
        if key.split_whitespace().count() != 1 {
            return None;
        }
        category_of(graph, &key)
    });
    let winners = winners(resolved);
    let has = |c: &Category| winners.contains(c);

    if has(&Category::Phenomenon) && has(&Category::Property) {
        Category::Variable
    } else if winners.is_empty() || has(&Category::Phenomenon) {
        Category::Phenomenon
    } else if has(&Category::Property) {
        Category::Property
    } else if has(&Category::Attribute) {
        Category::Attribute
    } else if has(&Category::Process) {
        Category::Process
    } else {
        winners[0].clone()
    }
}

/// Only a head type with a category specializes; a group led by its noun
/// has no head type and stays a phenomenon.
fn modified_category(graph: &TermGraph, node: &TermNode) -> Category {
    let Some(head) = node
        .is_type_of
        .first()
        .and_then(|head| category_of(graph, head))
    else {
        return Category::Phenomenon;
    };
    let name = head.to_string();

    if name.contains("Attribute") {
        Category::Attribute
    } else if name.contains("Variable") {
        Category::Variable
    } else {
        Category::specialized_of(head)
    }
}

fn compound_category(graph: &TermGraph, node: &TermNode) -> Category {
    let present: Vec<Category> = node
        .has_components
        .iter()
        .filter_map(|component| category_of(graph, component))
        .collect();
    let has = |c: Category| present.contains(&c);
    let has_family = |base: Category| present.iter().any(|c| *c.base() == base);

    if has_family(Category::Phenomenon) && has_family(Category::Property) {
        return Category::Variable;
    }

    let priority = [
        Category::specialized_of(Category::Phenomenon),
        Category::Phenomenon,
        Category::specialized_of(Category::Property),
        Category::Property,
        Category::specialized_of(Category::Attribute),
        Category::Attribute,
        Category::specialized_of(Category::Process),
        Category::Process,
    ];
    priority
        .into_iter()
        .find(|c| has(c.clone()))
        .unwrap_or(Category::Phenomenon)
}
