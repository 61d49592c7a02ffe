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

//! Ontology entity side table
//!
//! Line format, one record per entity:
//!
//! ```text
//! hash,3f2a9c0d11b7e845
//! namespace,property
//! entity,thermal_conductivity
//! preflabel,thermal conductivity
//! class,Property
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use termgraph_core::{EntityHash, OntologyEntity, Result, TermGraphError};
use tracing::warn;

/// Entities read back from disk, with the stored-to-current key mapping
/// for every record. Stored keys from older files may differ from the
/// current hash.
#[derive(Debug, Default)]
pub struct LoadedEntities {
    pub store: EntityStore,
    pub remap: BTreeMap<String, EntityHash>,
}

impl LoadedEntities {
    /// True if any stored key differs from its recomputed hash
    pub fn needs_remap(&self) -> bool {
        self.remap.iter().any(|(stored, fresh)| stored != fresh)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    entities: BTreeMap<EntityHash, OntologyEntity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, hash: &str) -> Option<&OntologyEntity> {
        self.entities.get(hash)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityHash, &OntologyEntity)> {
        self.entities.iter()
    }

    /// Add an entity and return its key. On a hash collision with a
    /// different entity the first one is kept.
    pub fn add(&mut self, entity: OntologyEntity) -> EntityHash {
        let hash = entity.hash();
        match self.entities.get(&hash) {
            Some(existing) if existing.namespace != entity.namespace || existing.entity != entity.entity => {
                warn!(
                    hash = %hash,
                    kept = %existing.entity,
                    rejected = %entity.entity,
                    "ontology entity hash collision"
                );
            }
            Some(_) => {}
            None => {
                self.entities.insert(hash.clone(), entity);
            }
        }
        hash
    }

    /// Preferred label for a key, falling back to the key itself
    pub fn label(&self, hash: &str) -> String {
        self.get(hash)
            .map(|e| e.preflabel.clone())
            .unwrap_or_else(|| hash.to_string())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (hash, entity) in &self.entities {
            writeln!(writer, "hash,{}", hash)?;
            writeln!(writer, "namespace,{}", single_line(&entity.namespace))?;
            writeln!(writer, "entity,{}", single_line(&entity.entity))?;
            writeln!(writer, "preflabel,{}", single_line(&entity.preflabel))?;
            writeln!(writer, "class,{}", single_line(&entity.class))?;
        }
        Ok(())
    }

    pub fn read_from<R: BufRead>(reader: R) -> Result<LoadedEntities> {
        let mut loaded = LoadedEntities::default();
        let mut current: Option<(String, OntologyEntity)> = None;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (field, value) = line.split_once(',').ok_or_else(|| TermGraphError::FormatError {
                line: line_no + 1,
                message: "expected `field,value`".to_string(),
            })?;

            if field == "hash" {
                if let Some((stored, entity)) = current.take() {
                    loaded.insert(stored, entity);
                }
                current = Some((value.to_string(), empty_entity()));
                continue;
            }

            let (_, entity) = current.as_mut().ok_or_else(|| TermGraphError::FormatError {
                line: line_no + 1,
                message: format!("`{}` before any `hash` line", field),
            })?;
            match field {
                "namespace" => entity.namespace = value.to_string(),
                "entity" => entity.entity = value.to_string(),
                "preflabel" => entity.preflabel = value.to_string(),
                "class" => entity.class = value.to_string(),
                _ => {}
            }
        }
        if let Some((stored, entity)) = current.take() {
            loaded.insert(stored, entity);
        }

        Ok(loaded)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        crate::persistence::write_atomic(path, |writer| self.write_to(writer))
    }

    pub fn load(path: &Path) -> Result<LoadedEntities> {
        Self::read_from(BufReader::new(File::open(path)?))
    }
}

impl LoadedEntities {
    fn insert(&mut self, stored: String, entity: OntologyEntity) {
        let fresh = self.store.add(entity);
        self.remap.insert(stored, fresh);
    }
}

fn empty_entity() -> OntologyEntity {
    OntologyEntity {
        namespace: String::new(),
        entity: String::new(),
        preflabel: String::new(),
        class: String::new(),
    }
}

fn single_line(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_core::entity_hash;

    fn entity(ns: &str, id: &str, label: &str, class: &str) -> OntologyEntity {
        OntologyEntity {
            namespace: ns.to_string(),
            entity: id.to_string(),
            preflabel: label.to_string(),
            class: class.to_string(),
        }
    }

    #[test]
    fn test_add_returns_stable_hash() {
        let mut store = EntityStore::new();
        let hash = store.add(entity("property", "mass", "mass", "Property"));
        assert_eq!(hash, entity_hash("property", "mass"));
        assert_eq!(store.add(entity("property", "mass", "mass", "Property")), hash);
        assert_eq!(store.len(), 1);
        assert_eq!(store.label(&hash), "mass");
        assert_eq!(store.label("unknown"), "unknown");
    }

    #[test]
    fn test_line_format_round_trip() {
        let mut store = EntityStore::new();
        store.add(entity("property", "mass", "mass, total", "Property"));
        store.add(entity("variable", "air%40medium_temperature", "air temperature", "Variable"));

        let mut buffer = Vec::new();
        store.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("hash,"));
        assert!(text.contains("preflabel,mass, total\n"));

        let loaded = EntityStore::read_from(buffer.as_slice()).unwrap();
        assert_eq!(loaded.store, store);
        assert!(!loaded.needs_remap());
    }

    #[test]
    fn test_legacy_hashes_are_remapped() {
        let legacy = "hash,-4821\nnamespace,property\nentity,mass\npreflabel,mass\nclass,Property\n\
hash,77\nnamespace,process\nentity,evaporation\npreflabel,evaporation\nclass,Process\n";
        let loaded = EntityStore::read_from(legacy.as_bytes()).unwrap();

        assert!(loaded.needs_remap());
        assert_eq!(loaded.remap["-4821"], entity_hash("property", "mass"));
        assert_eq!(loaded.remap["77"], entity_hash("process", "evaporation"));
        assert_eq!(loaded.store.len(), 2);
    }

    #[test]
    fn test_malformed_lines_are_rejected() {
        assert!(EntityStore::read_from("namespace,property\n".as_bytes()).is_err());
        assert!(EntityStore::read_from("hash,1\nno comma here\n".as_bytes()).is_err());
    }
}
