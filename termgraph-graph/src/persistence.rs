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

//! Load and save of the graph, synonym index and entity table
//!
//! JSON files are pretty-printed with sorted keys. Writes go to a temporary
//! file that is renamed over the target. Loading never fails: unreadable
//! files are logged and replaced by empty structures.

use crate::entity_store::EntityStore;
use crate::graph::TermGraph;
use crate::synonym::SynonymResolver;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use termgraph_core::{Result, StorageConfig, TermNode};
use tracing::{info, warn};

/// Write through a temporary sibling file, then rename over `path`
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    let file = File::create(&temp_path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    drop(writer);

    std::fs::rename(&temp_path, path)?;
    Ok(())
}

/// Pretty JSON with keys sorted at every level
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    // serde_json's default map is ordered, so a round trip through Value
    // sorts struct fields as well as map keys.
    let value = serde_json::to_value(value)?;
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, &value)?;
        writer.write_all(b"\n")?;
        Ok(())
    })
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Load a file, or fall back to the default with a log line
fn load_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    if !path.exists() {
        info!(path = %path.display(), "no {} file, starting empty", what);
        return T::default();
    }
    match load_json(path) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not load {}, starting empty", what);
            T::default()
        }
    }
}

/// Attach `{term: {indicator: score}}` records to existing nodes.
/// Returns the number of scores recorded.
pub fn load_indicators(graph: &mut TermGraph, path: &Path) -> Result<usize> {
    let records: BTreeMap<String, BTreeMap<String, f64>> = load_json(path)?;
    let mut added = 0;
    for (term, indicators) in records {
        for (indicator, score) in indicators {
            if graph.add_indicator(&term, &indicator, score) {
                added += 1;
            }
        }
    }
    Ok(added)
}

/// File locations of a persisted graph
#[derive(Debug, Clone)]
pub struct GraphStore {
    pub graph_path: PathBuf,
    pub index_path: PathBuf,
    pub entity_path: PathBuf,
    pub indicator_path: Option<PathBuf>,
}

impl GraphStore {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            graph_path: storage.graph_path(),
            index_path: storage.index_path(),
            entity_path: storage.entity_path(),
            indicator_path: storage.indicator_path(),
        }
    }

    /// Load graph, index, entities and indicators, then apply pending
    /// synonym merges.
    pub fn load(&self) -> (TermGraph, EntityStore) {
        let nodes: BTreeMap<String, TermNode> = load_or_default(&self.graph_path, "graph");
        let index: BTreeMap<String, String> = load_or_default(&self.index_path, "index");
        let mut graph = TermGraph::from_parts(nodes, index);

        let entities = if self.entity_path.exists() {
            match EntityStore::load(&self.entity_path) {
                Ok(loaded) => {
                    if loaded.needs_remap() {
                        let dropped = graph.remap_entity_keys(&loaded.remap);
                        info!(dropped, "remapped legacy ontology entity keys");
                    }
                    loaded.store
                }
                Err(e) => {
                    warn!(path = %self.entity_path.display(), error = %e, "could not load entity table, starting empty");
                    EntityStore::new()
                }
            }
        } else {
            EntityStore::new()
        };

        if let Some(path) = &self.indicator_path {
            match load_indicators(&mut graph, path) {
                Ok(count) => info!(count, "loaded indicator scores"),
                Err(e) => warn!(path = %path.display(), error = %e, "could not load indicators"),
            }
        }

        SynonymResolver::new().resolve_pending(&mut graph);
        info!(nodes = graph.len(), entities = entities.len(), "loaded term graph");
        (graph, entities)
    }

    pub fn save(&self, graph: &TermGraph, entities: &EntityStore) -> Result<()> {
        save_json(&self.graph_path, graph.nodes())?;
        save_json(&self.index_path, graph.index())?;
        entities.save(&self.entity_path)?;
        info!(path = %self.graph_path.display(), nodes = graph.len(), "saved term graph");
        Ok(())
    }
}
