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

//! Ontology entity references
//!
//! Term nodes refer to ontology entities by a short content hash so label
//! strings are stored once, in the entity side table.

use serde::{Deserialize, Serialize};

/// Hex-encoded content hash of `namespace#entity`
pub type EntityHash = String;

const HASH_HEX_LEN: usize = 16;

/// An external ontology entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyEntity {
    /// Last path segment of the entity URI, before `#`
    pub namespace: String,
    /// URI fragment after `#`
    pub entity: String,
    /// Preferred label
    pub preflabel: String,
    /// Top-level ontology class (e.g. "Variable", "Property")
    pub class: String,
}

impl OntologyEntity {
    /// Build from a full entity URI. Returns `None` if the URI has no fragment.
    pub fn from_uri(uri: &str, preflabel: &str, class: &str) -> Option<Self> {
        let (namespace, entity) = split_entity_uri(uri)?;
        Some(Self {
            namespace,
            entity,
            preflabel: preflabel.to_string(),
            class: class.to_string(),
        })
    }

    pub fn hash(&self) -> EntityHash {
        entity_hash(&self.namespace, &self.entity)
    }
}

/// Stable key for an entity: the first 16 hex digits of
/// BLAKE3(`namespace#entity`).
pub fn entity_hash(namespace: &str, entity: &str) -> EntityHash {
    let digest = blake3::hash(format!("{}#{}", namespace, entity).as_bytes());
    let mut hex = digest.to_hex().to_string();
    hex.truncate(HASH_HEX_LEN);
    hex
}

/// Split `http://host/path/namespace#entity` into `(namespace, entity)`.
pub fn split_entity_uri(uri: &str) -> Option<(String, String)> {
    let (path, entity) = uri.rsplit_once('#')?;
    if entity.is_empty() {
        return None;
    }
    let namespace = path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
    Some((namespace.to_string(), entity.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_entity_uri() {
        let (ns, entity) =
            split_entity_uri("http://www.geoscienceontology.org/svo/svl/property#thermal_conductivity")
                .unwrap();
        assert_eq!(ns, "property");
        assert_eq!(entity, "thermal_conductivity");

        assert!(split_entity_uri("http://example.org/no-fragment").is_none());
        assert!(split_entity_uri("http://example.org/ns#").is_none());
    }

    #[test]
    fn test_entity_hash_is_stable() {
        let a = entity_hash("property", "thermal_conductivity");
        let b = entity_hash("property", "thermal_conductivity");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, entity_hash("variable", "thermal_conductivity"));
    }

    #[test]
    fn test_entity_from_uri() {
        let entity = OntologyEntity::from_uri(
            "http://example.org/svl/variable#soil__moisture",
            "soil moisture",
            "Variable",
        )
        .unwrap();
        assert_eq!(entity.namespace, "variable");
        assert_eq!(entity.hash(), entity_hash("variable", "soil__moisture"));
    }
}
