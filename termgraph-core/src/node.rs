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

//! Term node and relation types
//!
//! A [`TermNode`] is keyed externally by its canonical term text. All edge
//! lists are insertion-ordered and deduplicated; score maps are ordered so
//! the persisted form is stable.

use crate::entity::EntityHash;
use crate::error::{Result, TermGraphError};
use crate::types::{Category, PartOfSpeech, Shape};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Edge types between term nodes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    HasComponents,
    IsComponentOf,
    IsTypeOf,
    HasType,
    HasAttribute,
    IsAttributeOf,
    IsRelatedTo,
    HasSynonym,
    IsDefinedBy,
    IsCloselyRelatedTo,
    IsWwnDefinedBy,
}

impl Relation {
    pub const ALL: [Relation; 11] = [
        Relation::HasComponents,
        Relation::IsComponentOf,
        Relation::IsTypeOf,
        Relation::HasType,
        Relation::HasAttribute,
        Relation::IsAttributeOf,
        Relation::IsRelatedTo,
        Relation::HasSynonym,
        Relation::IsDefinedBy,
        Relation::IsCloselyRelatedTo,
        Relation::IsWwnDefinedBy,
    ];

    /// The reverse direction for structural relations
    pub fn inverse(&self) -> Option<Relation> {
        match self {
            Relation::HasComponents => Some(Relation::IsComponentOf),
            Relation::IsComponentOf => Some(Relation::HasComponents),
            Relation::IsTypeOf => Some(Relation::HasType),
            Relation::HasType => Some(Relation::IsTypeOf),
            Relation::HasAttribute => Some(Relation::IsAttributeOf),
            Relation::IsAttributeOf => Some(Relation::HasAttribute),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::HasComponents => "has_components",
            Relation::IsComponentOf => "is_component_of",
            Relation::IsTypeOf => "is_type_of",
            Relation::HasType => "has_type",
            Relation::HasAttribute => "has_attribute",
            Relation::IsAttributeOf => "is_attribute_of",
            Relation::IsRelatedTo => "is_related_to",
            Relation::HasSynonym => "has_synonym",
            Relation::IsDefinedBy => "is_defined_by",
            Relation::IsCloselyRelatedTo => "is_closely_related_to",
            Relation::IsWwnDefinedBy => "is_wwn_defined_by",
        }
    }
}

/// The three propagated score maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    OntologyVariable,
    OntologyEntity,
    Indicator,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 3] = [
        ScoreKind::OntologyVariable,
        ScoreKind::OntologyEntity,
        ScoreKind::Indicator,
    ];
}

/// A term in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermNode {
    pub pos_sequence: Vec<PartOfSpeech>,
    pub lemma_sequence: Vec<String>,
    pub shape: Shape,

    #[serde(default)]
    pub has_components: Vec<String>,
    #[serde(default)]
    pub is_component_of: Vec<String>,
    #[serde(default)]
    pub is_type_of: Vec<String>,
    #[serde(default)]
    pub has_type: Vec<String>,
    #[serde(default)]
    pub has_attribute: Vec<String>,
    #[serde(default)]
    pub is_attribute_of: Vec<String>,
    #[serde(default)]
    pub is_related_to: Vec<String>,
    #[serde(default)]
    pub has_synonym: Vec<String>,
    #[serde(default)]
    pub is_defined_by: Vec<String>,
    #[serde(default)]
    pub is_closely_related_to: Vec<String>,
    #[serde(default)]
    pub is_wwn_defined_by: Vec<String>,

    /// Exact ontology matches grouped by entity class
    #[serde(default)]
    pub has_ontology_match: BTreeMap<String, Vec<EntityHash>>,
    /// Match classes in the order they were first matched
    #[serde(default)]
    pub ontology_match_order: Vec<String>,
    #[serde(default)]
    pub has_ontology_variable: BTreeMap<EntityHash, f64>,
    #[serde(default)]
    pub has_ontology_entity: BTreeMap<EntityHash, f64>,
    #[serde(default)]
    pub has_indicator: BTreeMap<String, f64>,
    /// Dictionary categories, paired by position with `has_category_definitions`
    #[serde(default, alias = "has_wwn_category")]
    pub has_category_tags: Vec<String>,
    #[serde(default, alias = "has_wwn_definition")]
    pub has_category_definitions: Vec<String>,

    #[serde(default)]
    pub determined_category: Option<Category>,

    #[serde(default)]
    pub modified_terms: Vec<String>,
    #[serde(default)]
    pub term_aspects: Vec<String>,
}

impl TermNode {
    /// Create a node from a tagged word sequence, classifying its shape
    pub fn new(pos_sequence: Vec<PartOfSpeech>, lemma_sequence: Vec<String>) -> Result<Self> {
        let shape = Shape::classify(&pos_sequence);
        Self::with_shape(pos_sequence, lemma_sequence, shape)
    }

    /// Create a node with a shape fixed by the caller. The shape never
    /// changes afterwards.
    pub fn with_shape(
        pos_sequence: Vec<PartOfSpeech>,
        lemma_sequence: Vec<String>,
        shape: Shape,
    ) -> Result<Self> {
        if pos_sequence.len() != lemma_sequence.len() {
            return Err(TermGraphError::Invariant(format!(
                "pos_sequence has {} tags but lemma_sequence has {} lemmas",
                pos_sequence.len(),
                lemma_sequence.len()
            )));
        }
        if pos_sequence.is_empty() {
            return Err(TermGraphError::Invariant(
                "term node needs at least one word".to_string(),
            ));
        }

        Ok(Self::from_parts(pos_sequence, lemma_sequence, shape))
    }

    /// Shorthand for a one-word noun
    pub fn single_noun(lemma: &str) -> Self {
        Self::from_parts(
            vec![PartOfSpeech::Noun],
            vec![lemma.to_string()],
            Shape::SingleNoun,
        )
    }

    fn from_parts(
        pos_sequence: Vec<PartOfSpeech>,
        lemma_sequence: Vec<String>,
        shape: Shape,
    ) -> Self {
        Self {
            pos_sequence,
            lemma_sequence,
            shape,
            has_components: Vec::new(),
            is_component_of: Vec::new(),
            is_type_of: Vec::new(),
            has_type: Vec::new(),
            has_attribute: Vec::new(),
            is_attribute_of: Vec::new(),
            is_related_to: Vec::new(),
            has_synonym: Vec::new(),
            is_defined_by: Vec::new(),
            is_closely_related_to: Vec::new(),
            is_wwn_defined_by: Vec::new(),
            has_ontology_match: BTreeMap::new(),
            ontology_match_order: Vec::new(),
            has_ontology_variable: BTreeMap::new(),
            has_ontology_entity: BTreeMap::new(),
            has_indicator: BTreeMap::new(),
            has_category_tags: Vec::new(),
            has_category_definitions: Vec::new(),
            determined_category: None,
            modified_terms: Vec::new(),
            term_aspects: Vec::new(),
        }
    }

    /// Lemma sequence joined with spaces
    pub fn lemma(&self) -> String {
        self.lemma_sequence.join(" ")
    }

    pub fn is_single_word(&self) -> bool {
        self.pos_sequence.len() == 1
    }

    pub fn edges(&self, relation: Relation) -> &[String] {
        match relation {
            Relation::HasComponents => &self.has_components,
            Relation::IsComponentOf => &self.is_component_of,
            Relation::IsTypeOf => &self.is_type_of,
            Relation::HasType => &self.has_type,
            Relation::HasAttribute => &self.has_attribute,
            Relation::IsAttributeOf => &self.is_attribute_of,
            Relation::IsRelatedTo => &self.is_related_to,
            Relation::HasSynonym => &self.has_synonym,
            Relation::IsDefinedBy => &self.is_defined_by,
            Relation::IsCloselyRelatedTo => &self.is_closely_related_to,
            Relation::IsWwnDefinedBy => &self.is_wwn_defined_by,
        }
    }

    pub fn edges_mut(&mut self, relation: Relation) -> &mut Vec<String> {
        match relation {
            Relation::HasComponents => &mut self.has_components,
            Relation::IsComponentOf => &mut self.is_component_of,
            Relation::IsTypeOf => &mut self.is_type_of,
            Relation::HasType => &mut self.has_type,
            Relation::HasAttribute => &mut self.has_attribute,
            Relation::IsAttributeOf => &mut self.is_attribute_of,
            Relation::IsRelatedTo => &mut self.is_related_to,
            Relation::HasSynonym => &mut self.has_synonym,
            Relation::IsDefinedBy => &mut self.is_defined_by,
            Relation::IsCloselyRelatedTo => &mut self.is_closely_related_to,
            Relation::IsWwnDefinedBy => &mut self.is_wwn_defined_by,
        }
    }

    /// Append an edge target unless already present. Returns true if added.
    pub fn add_edge(&mut self, relation: Relation, target: &str) -> bool {
        push_unique(self.edges_mut(relation), target)
    }

    pub fn scores(&self, kind: ScoreKind) -> &BTreeMap<String, f64> {
        match kind {
            ScoreKind::OntologyVariable => &self.has_ontology_variable,
            ScoreKind::OntologyEntity => &self.has_ontology_entity,
            ScoreKind::Indicator => &self.has_indicator,
        }
    }

    pub fn scores_mut(&mut self, kind: ScoreKind) -> &mut BTreeMap<String, f64> {
        match kind {
            ScoreKind::OntologyVariable => &mut self.has_ontology_variable,
            ScoreKind::OntologyEntity => &mut self.has_ontology_entity,
            ScoreKind::Indicator => &mut self.has_indicator,
        }
    }

    /// Record a score, keeping the larger of the old and new value
    pub fn merge_score(&mut self, kind: ScoreKind, key: &str, value: f64) {
        let entry = self
            .scores_mut(kind)
            .entry(key.to_string())
            .or_insert(value);
        if value > *entry {
            *entry = value;
        }
    }

    pub fn add_ontology_match(&mut self, class: &str, hash: &str) {
        let matches = self
            .has_ontology_match
            .entry(class.to_string())
            .or_default();
        push_unique(matches, hash);
        push_unique(&mut self.ontology_match_order, class);
    }

    /// Attach a dictionary category and its definition. A category already
    /// present keeps its first definition.
    pub fn add_category(&mut self, category: &str, definition: &str) {
        if push_unique(&mut self.has_category_tags, category) {
            self.has_category_definitions.push(definition.to_string());
        }
    }

    /// Classes of exact ontology matches, in the order first matched.
    /// Classes missing from the recorded order (older files) follow in key
    /// order.
    pub fn ontology_match_classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self
            .ontology_match_order
            .iter()
            .filter(|class| self.has_ontology_match.contains_key(*class))
            .cloned()
            .collect();
        for class in self.has_ontology_match.keys() {
            push_unique(&mut classes, class);
        }
        classes
    }
}

/// Push `value` unless present; preserves insertion order.
pub fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    if list.iter().any(|v| v == value) {
        false
    } else {
        list.push(value.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_rejects_length_mismatch() {
        let err = TermNode::new(
            vec![PartOfSpeech::Adjective, PartOfSpeech::Noun],
            vec!["thermal".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, TermGraphError::Invariant(_)));
    }

    #[test]
    fn test_add_edge_deduplicates() {
        let mut node = TermNode::single_noun("soil");
        assert!(node.add_edge(Relation::IsComponentOf, "soil moisture"));
        assert!(!node.add_edge(Relation::IsComponentOf, "soil moisture"));
        assert!(node.add_edge(Relation::IsComponentOf, "soil type"));
        assert_eq!(
            node.edges(Relation::IsComponentOf),
            &["soil moisture".to_string(), "soil type".to_string()]
        );
    }

    #[test]
    fn test_merge_score_keeps_maximum() {
        let mut node = TermNode::single_noun("moisture");
        node.merge_score(ScoreKind::OntologyVariable, "k", 0.6);
        node.merge_score(ScoreKind::OntologyVariable, "k", 0.4);
        assert_eq!(node.has_ontology_variable["k"], 0.6);
        node.merge_score(ScoreKind::OntologyVariable, "k", 0.9);
        assert_eq!(node.has_ontology_variable["k"], 0.9);
    }

    #[test]
    fn test_structural_inverses() {
        for relation in Relation::ALL {
            if let Some(inverse) = relation.inverse() {
                assert_eq!(inverse.inverse(), Some(relation));
            }
        }
        assert_eq!(Relation::IsDefinedBy.inverse(), None);
    }

    #[test]
    fn test_match_classes_keep_first_matched_order() {
        let mut node = TermNode::single_noun("x");
        node.add_ontology_match("Variable", "h1");
        node.add_ontology_match("Operation", "h2");
        node.add_ontology_match("Variable", "h3");
        assert_eq!(node.ontology_match_classes(), vec!["Variable", "Operation"]);

        let json = serde_json::to_string(&node).unwrap();
        let reloaded: TermNode = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.ontology_match_classes(), vec!["Variable", "Operation"]);
    }

    #[test]
    fn test_match_classes_without_recorded_order() {
        let mut node = TermNode::single_noun("x");
        node.has_ontology_match.insert("Role".to_string(), vec!["h1".to_string()]);
        node.has_ontology_match.insert("Form".to_string(), vec!["h2".to_string()]);
        assert_eq!(node.ontology_match_classes(), vec!["Form", "Role"]);
    }

    #[test]
    fn test_add_category_pairs_definitions() {
        let mut node = TermNode::single_noun("drought");
        node.add_category("Phenomenon", "a long period without rain");
        node.add_category("Phenomenon", "another sense");
        node.add_category("Process", "drying out");
        assert_eq!(node.has_category_tags, vec!["Phenomenon", "Process"]);
        assert_eq!(
            node.has_category_definitions,
            vec!["a long period without rain", "drying out"]
        );
    }

    #[test]
    fn test_legacy_category_field_names() {
        let json = r#"{
            "pos_sequence": ["NOUN"],
            "lemma_sequence": ["rain"],
            "shape": "single-noun",
            "has_wwn_category": ["Phenomenon"],
            "has_wwn_definition": ["water falling from clouds"]
        }"#;
        let node: TermNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.has_category_tags, vec!["Phenomenon"]);
        assert!(node.has_components.is_empty());
    }
}
