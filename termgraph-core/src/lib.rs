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

//! Termgraph Core
//!
//! Shared data model for the scientific-variable terminology graph:
//! - **Term nodes** keyed by lower-cased canonical term text
//! - **Shapes** and part-of-speech tags produced by noun-group segmentation
//! - **Categories** assigned by the inference pass
//! - **Ontology entity references** with stable content-hash keys
//! - Configuration and the shared error type
//!
//! ```text
//!  "thermal conductivity"
//!        │  is_type_of            has_attribute
//!        ├──────────────► "conductivity"
//!        └──────────────► "thermal"
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod node;
pub mod reserved;
pub mod types;

pub use config::{BuildConfig, SourcesConfig, StorageConfig, TermGraphConfig};
pub use entity::{entity_hash, split_entity_uri, EntityHash, OntologyEntity};
pub use error::{Result, TermGraphError};
pub use node::{Relation, ScoreKind, TermNode};
pub use reserved::{is_reserved, CATEGORY_NAMES};
pub use types::{Category, PartOfSpeech, Shape};

/// Canonical key for a term: lower-cased with whitespace collapsed.
pub fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  Soil   Moisture "), "soil moisture");
        assert_eq!(normalize_term("drought"), "drought");
        assert_eq!(normalize_term(""), "");
    }
}
