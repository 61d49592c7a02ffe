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

//! Remote annotation of a term node
//!
//! Fetching and applying are split so that sibling lookups can run
//! concurrently while every graph write stays with the single writer.
//! [`fetch`] only reads the graph; [`apply`] only writes it. Every
//! collaborator error is logged and read as "no result".

use crate::entity_store::EntityStore;
use crate::graph::TermGraph;
use std::collections::BTreeMap;
use std::sync::Arc;
use termgraph_core::{normalize_term, OntologyEntity, Relation, ScoreKind};
use termgraph_nlp::{NounGroup, ParsedDocument};
use termgraph_sources::{
    CategoryDictionary, DependencyParser, Encyclopedia, OntologyMatch, OntologySearch, SearchHit,
};
use tracing::{debug, warn};

/// External services consulted while building
#[derive(Clone)]
pub struct Collaborators {
    pub parser: Arc<dyn DependencyParser>,
    pub encyclopedia: Arc<dyn Encyclopedia>,
    pub ontology: Arc<dyn OntologySearch>,
    pub dictionary: Arc<dyn CategoryDictionary>,
}

/// What the fetch phase needs to know about a node
#[derive(Debug, Clone)]
pub(crate) struct AnnotationRequest {
    pub key: String,
    pub lemma: String,
    pub single_word: bool,
    pub known_definitions: Vec<String>,
}

/// Results of every lookup for one node, ready to apply
#[derive(Debug, Default)]
pub(crate) struct Annotation {
    key: String,
    categories: BTreeMap<String, String>,
    ontology: Vec<OntologyMatch>,
    page: Option<PageLookup>,
    wwn_groups: Vec<String>,
}

#[derive(Debug)]
struct PageLookup {
    title: String,
    chosen: String,
    mined: Option<MinedDefinition>,
}

#[derive(Debug, Default)]
struct MinedDefinition {
    defined_by: Vec<String>,
    closely_related: Vec<String>,
    modified_terms: Option<Vec<String>>,
    term_aspects: Option<Vec<String>>,
}

/// Run every lookup for one node. Never fails.
pub(crate) async fn fetch(
    sources: &Collaborators,
    graph: &TermGraph,
    request: AnnotationRequest,
    long_page_scan: bool,
) -> Annotation {
    let categories = lookup_categories(sources.dictionary.as_ref(), &request);

    let ontology = if request.single_word {
        lookup_ontology(sources.ontology.as_ref(), &request).await
    } else {
        Vec::new()
    };

    let page = lookup_page(sources, graph, &request, long_page_scan).await;

    let mut definitions = request.known_definitions.clone();
    for definition in categories.values() {
        if !definitions.contains(definition) {
            definitions.push(definition.clone());
        }
    }
    let wwn_groups = mine_dictionary_definitions(sources.parser.as_ref(), &request.key, &definitions).await;

    Annotation {
        key: request.key,
        categories,
        ontology,
        page,
        wwn_groups,
    }
}

fn lookup_categories(dictionary: &dyn CategoryDictionary, request: &AnnotationRequest) -> BTreeMap<String, String> {
    let categories = dictionary.get_categories(&request.key);
    if categories.is_empty() && !request.lemma.is_empty() && request.lemma != request.key {
        return dictionary.get_categories(&request.lemma);
    }
    categories
}

async fn lookup_ontology(ontology: &dyn OntologySearch, request: &AnnotationRequest) -> Vec<OntologyMatch> {
    let mut variants = vec![request.key.clone()];
    if !request.lemma.is_empty() && request.lemma != request.key {
        variants.push(request.lemma.clone());
    }
    match ontology.rank_search(&variants).await {
        Ok(matches) => matches,
        Err(e) => {
            warn!(term = %request.key, error = %e, "ontology search failed");
            Vec::new()
        }
    }
}

async fn lookup_page(
    sources: &Collaborators,
    graph: &TermGraph,
    request: &AnnotationRequest,
    long_page_scan: bool,
) -> Option<PageLookup> {
    let hit = match sources.encyclopedia.search_top_result(&request.key).await {
        Ok(Some(hit)) => hit,
        Ok(None) => return None,
        Err(e) => {
            warn!(term = %request.key, error = %e, "encyclopedia search failed");
            return None;
        }
    };
    let page = match sources.encyclopedia.fetch_page(hit.page_id).await {
        Ok(page) => page,
        Err(e) => {
            warn!(term = %request.key, page_id = hit.page_id, error = %e, "encyclopedia fetch failed");
            return None;
        }
    };
    if page.is_disambiguation {
        debug!(term = %request.key, title = %hit.title, "skipping disambiguation page");
        return None;
    }

    let (title, chosen) = choose_name(&hit, &request.key, &request.lemma);
    let already_defined = graph
        .get(&chosen)
        .or_else(|| graph.get(&request.key))
        .map_or(false, |node| !node.is_defined_by.is_empty());

    let mined = if already_defined || page.paragraphs.is_empty() {
        None
    } else {
        match sources.parser.parse_paragraphs(&page.paragraphs).await {
            Ok(paragraphs) => {
                let document = ParsedDocument::new(paragraphs);
                mine_page(&document, &chosen, long_page_scan && request.single_word)
            }
            Err(e) => {
                warn!(term = %request.key, error = %e, "could not parse definition page");
                None
            }
        }
    };

    Some(PageLookup { title, chosen, mined })
}

/// Page title and the name the definition is keyed under
fn choose_name(hit: &SearchHit, term: &str, lemma: &str) -> (String, String) {
    let title = normalize_term(&hit.title);
    let redirect = hit
        .redirect_title
        .as_deref()
        .map(normalize_term)
        .unwrap_or_default();

    let names_page = |name: &str| {
        !name.is_empty() && (name == title || name == redirect)
    };
    let cued = |name: &str| {
        let cue = format!("({})", name);
        !name.is_empty() && (title.contains(&cue) || redirect.contains(&cue))
    };

    let chosen = if names_page(term) || names_page(lemma) || cued(term) || cued(lemma) {
        title.clone()
    } else {
        term.to_string()
    };
    (title, chosen)
}

/// Definition and follow-up sentence groups, plus page variants when asked
fn mine_page(document: &ParsedDocument, name: &str, long_scan: bool) -> Option<MinedDefinition> {
    let (p, s) = document.find_definition(name)?;
    let groups_of = |sentence: usize| {
        document
            .sentence(p, sentence)
            .map(|parsed| group_keys(&parsed.noun_groups, name))
            .unwrap_or_default()
    };

    let mut mined = MinedDefinition {
        defined_by: groups_of(s),
        closely_related: groups_of(s + 1),
        ..Default::default()
    };
    if long_scan {
        let variants = document.term_variants(name);
        mined.modified_terms = Some(without(variants.modified, name));
        mined.term_aspects = Some(without(variants.aspects, name));
    }
    Some(mined)
}

fn without(terms: Vec<String>, name: &str) -> Vec<String> {
    terms.into_iter().filter(|t| t.as_str() != name).collect()
}

async fn mine_dictionary_definitions(parser: &dyn DependencyParser, name: &str, definitions: &[String]) -> Vec<String> {
    let mut groups = Vec::new();
    for definition in definitions {
        match parser.parse(definition).await {
            Ok(sentences) => {
                let document = ParsedDocument::new(vec![sentences]);
                for key in group_keys(document.first_sentence_groups(), name) {
                    if !groups.contains(&key) {
                        groups.push(key);
                    }
                }
            }
            Err(e) => warn!(term = %name, error = %e, "could not parse dictionary definition"),
        }
    }
    groups
}

fn group_keys(groups: &[NounGroup], exclude: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in groups.iter().map(NounGroup::key) {
        if key != exclude && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Write a fetched annotation into the graph. Append-only.
pub(crate) fn apply(graph: &mut TermGraph, entities: &mut EntityStore, annotation: Annotation) {
    let Some(canonical) = graph.resolve(&annotation.key) else {
        return;
    };
    let name = annotation.key.as_str();

    if let Some(node) = graph.node_mut(&canonical) {
        for (category, definition) in &annotation.categories {
            node.add_category(category, definition);
        }
    }

    apply_ontology(graph, entities, &canonical, &annotation.ontology);

    if let Some(page) = annotation.page {
        if page.chosen != name {
            graph.add_edge(name, Relation::HasSynonym, &page.chosen);
            graph.add_index(&page.chosen, &canonical);
        }
        if page.chosen != page.title {
            graph.add_edge(&page.chosen, Relation::IsRelatedTo, &page.title);
        }
        if let Some(mined) = page.mined {
            for term in &mined.defined_by {
                graph.add_edge(name, Relation::IsDefinedBy, term);
            }
            for term in &mined.closely_related {
                graph.add_edge(name, Relation::IsCloselyRelatedTo, term);
            }
            if let Some(node) = graph.node_mut(&canonical) {
                if let Some(modified) = mined.modified_terms {
                    node.modified_terms = modified;
                }
                if let Some(aspects) = mined.term_aspects {
                    node.term_aspects = aspects;
                }
            }
        }
    }

    for term in &annotation.wwn_groups {
        graph.add_edge(name, Relation::IsWwnDefinedBy, term);
    }
}

fn apply_ontology(graph: &mut TermGraph, entities: &mut EntityStore, canonical: &str, matches: &[OntologyMatch]) {
    for row in matches {
        let Some(entity) = OntologyEntity::from_uri(&row.entity, &row.preflabel, &row.entity_class) else {
            debug!(entity = %row.entity, "ontology row without a namespaced entity");
            continue;
        };
        let hash = entities.add(entity);
        let Some(node) = graph.node_mut(canonical) else {
            return;
        };
        if row.is_exact() {
            node.add_ontology_match(&row.entity_class, &hash);
        } else if row.entity_class == "Variable" {
            node.merge_score(ScoreKind::OntologyVariable, &hash, row.score);
        } else {
            node.merge_score(ScoreKind::OntologyEntity, &hash, row.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_core::TermNode;

    fn hit(title: &str, redirect: Option<&str>) -> SearchHit {
        SearchHit {
            page_id: 1,
            title: title.to_string(),
            redirect_title: redirect.map(str::to_string),
            section_title: None,
        }
    }

    #[test]
    fn test_choose_name() {
        let (title, chosen) = choose_name(&hit("Evaporation", None), "evaporation", "evaporation");
        assert_eq!((title.as_str(), chosen.as_str()), ("evaporation", "evaporation"));

        let (_, chosen) = choose_name(&hit("Evapotranspiration", Some("Evaporation rate")), "evaporation rate", "evaporation rate");
        assert_eq!(chosen, "evapotranspiration");

        let (_, chosen) = choose_name(&hit("Moisture (soil)", None), "soil", "soil");
        assert_eq!(chosen, "moisture (soil)");

        let (_, chosen) = choose_name(&hit("Rivers", None), "streams", "river");
        assert_eq!(chosen, "streams");

        let (_, chosen) = choose_name(&hit("Lake  Superior", None), "lakes", "lake superior");
        assert_eq!(chosen, "lake superior");
    }

    #[test]
    fn test_group_keys_excludes_name_and_duplicates() {
        let groups = vec![
            NounGroup::single("Rain", "rain", termgraph_core::PartOfSpeech::Noun),
            NounGroup::single("water", "water", termgraph_core::PartOfSpeech::Noun),
            NounGroup::single("rain", "rain", termgraph_core::PartOfSpeech::Noun),
        ];
        assert_eq!(group_keys(&groups, "water"), vec!["rain"]);
    }

    fn ontology_row(entity: &str, class: &str, score: f64) -> OntologyMatch {
        OntologyMatch {
            term: "temperature".to_string(),
            entity: entity.to_string(),
            entity_label: String::new(),
            preflabel: entity.rsplit('#').next().unwrap_or_default().to_string(),
            entity_class: class.to_string(),
            score,
        }
    }

    #[test]
    fn test_apply_partitions_ontology_rows() {
        let mut graph = TermGraph::new();
        graph.insert_node("temperature", TermNode::single_noun("temperature"));
        let mut entities = EntityStore::new();

        let annotation = Annotation {
            key: "temperature".to_string(),
            ontology: vec![
                ontology_row("http://x.org/property#temperature", "Property", 1.0),
                ontology_row("http://x.org/variable#air_temperature", "Variable", 0.5),
                ontology_row("http://x.org/phenomenon#air", "Phenomenon", 0.2),
                ontology_row("not-a-uri", "Property", 0.9),
            ],
            ..Default::default()
        };
        apply(&mut graph, &mut entities, annotation);

        let node = graph.get("temperature").unwrap();
        assert_eq!(node.ontology_match_classes(), vec!["Property"]);
        assert_eq!(node.has_ontology_variable.values().copied().collect::<Vec<_>>(), vec![0.5]);
        assert_eq!(node.has_ontology_entity.values().copied().collect::<Vec<_>>(), vec![0.2]);
        assert_eq!(entities.len(), 3);
    }

    #[test]
    fn test_apply_records_synonym_and_definitions() {
        let mut graph = TermGraph::new();
        graph.insert_node("vapour", TermNode::single_noun("vapour"));
        let mut entities = EntityStore::new();

        let annotation = Annotation {
            key: "vapour".to_string(),
            page: Some(PageLookup {
                title: "water vapor".to_string(),
                chosen: "water vapor".to_string(),
                mined: Some(MinedDefinition {
                    defined_by: vec!["gaseous phase".to_string()],
                    closely_related: vec!["humidity".to_string()],
                    modified_terms: Some(vec!["atmospheric water vapor".to_string()]),
                    term_aspects: None,
                }),
            }),
            wwn_groups: vec!["steam".to_string()],
            ..Default::default()
        };
        apply(&mut graph, &mut entities, annotation);

        let node = graph.get("vapour").unwrap();
        assert_eq!(node.has_synonym, vec!["water vapor"]);
        assert_eq!(node.is_defined_by, vec!["gaseous phase"]);
        assert_eq!(node.is_closely_related_to, vec!["humidity"]);
        assert_eq!(node.is_wwn_defined_by, vec!["steam"]);
        assert_eq!(node.modified_terms, vec!["atmospheric water vapor"]);
        assert!(node.is_related_to.is_empty());
        assert_eq!(graph.resolve("water vapor").as_deref(), Some("vapour"));
    }
}
