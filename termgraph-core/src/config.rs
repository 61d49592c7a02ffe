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

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Termgraph configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TermGraphConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the persisted graph, index and entity files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Term graph JSON, relative to `data_dir`
    #[serde(default = "default_graph_file")]
    pub graph_file: PathBuf,

    /// Synonym index JSON, relative to `data_dir`
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,

    /// Ontology entity side table, relative to `data_dir`
    #[serde(default = "default_entity_file")]
    pub entity_file: PathBuf,

    /// Optional `{term: {indicator: score}}` JSON loaded before inference
    #[serde(default)]
    pub indicator_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Expansion depth used when the caller gives none
    #[serde(default = "default_depth")]
    pub default_depth: u32,

    /// Upper bound on concurrently dispatched sibling lookups
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,

    /// Mine `modified_terms` / `term_aspects` from whole definition pages
    #[serde(default = "default_true")]
    pub long_page_scan: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default = "default_wikipedia_api_url")]
    pub wikipedia_api_url: String,

    #[serde(default = "default_sparql_endpoint")]
    pub sparql_endpoint: String,

    /// UDPipe REST service base URL
    #[serde(default = "default_parser_url")]
    pub parser_url: String,

    #[serde(default = "default_parser_model")]
    pub parser_model: String,

    /// Curated category dictionary JSON
    #[serde(default = "default_dictionary_file")]
    pub dictionary_file: PathBuf,

    /// Request timeout in seconds for every remote collaborator
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Ontology class filter ("All" or one top-level class)
    #[serde(default = "default_ontology_class")]
    pub ontology_class: String,
}

// Default values
fn default_data_dir() -> PathBuf {
    PathBuf::from("resources")
}

fn default_graph_file() -> PathBuf {
    PathBuf::from("scivar_kg.json")
}

fn default_index_file() -> PathBuf {
    PathBuf::from("scivar_index_map.json")
}

fn default_entity_file() -> PathBuf {
    PathBuf::from("scivar_svo_index_map.txt")
}

fn default_depth() -> u32 {
    2
}

fn default_max_concurrent_lookups() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_wikipedia_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_sparql_endpoint() -> String {
    "http://35.194.43.13:3030/ds/query".to_string()
}

fn default_parser_url() -> String {
    "https://lindat.mff.cuni.cz/services/udpipe/api".to_string()
}

fn default_parser_model() -> String {
    "english".to_string()
}

fn default_dictionary_file() -> PathBuf {
    PathBuf::from("resources/wiktiwordnet.json")
}

fn default_request_timeout() -> u64 {
    30
}

fn default_ontology_class() -> String {
    "All".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            graph_file: default_graph_file(),
            index_file: default_index_file(),
            entity_file: default_entity_file(),
            indicator_file: None,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            default_depth: default_depth(),
            max_concurrent_lookups: default_max_concurrent_lookups(),
            long_page_scan: true,
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            wikipedia_api_url: default_wikipedia_api_url(),
            sparql_endpoint: default_sparql_endpoint(),
            parser_url: default_parser_url(),
            parser_model: default_parser_model(),
            dictionary_file: default_dictionary_file(),
            request_timeout_secs: default_request_timeout(),
            ontology_class: default_ontology_class(),
        }
    }
}

impl StorageConfig {
    pub fn graph_path(&self) -> PathBuf {
        self.data_dir.join(&self.graph_file)
    }

    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join(&self.index_file)
    }

    pub fn entity_path(&self) -> PathBuf {
        self.data_dir.join(&self.entity_file)
    }

    pub fn indicator_path(&self) -> Option<PathBuf> {
        self.indicator_file.as_ref().map(|f| self.data_dir.join(f))
    }
}

impl TermGraphConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Supported environment variables:
    /// - TERMGRAPH_DATA_DIR: Data directory (default: ./resources)
    /// - TERMGRAPH_SPARQL_ENDPOINT: Ontology SPARQL endpoint
    /// - TERMGRAPH_WIKIPEDIA_URL: Encyclopedia API URL
    /// - TERMGRAPH_PARSER_URL: UDPipe REST service URL
    /// - TERMGRAPH_DICTIONARY_FILE: Category dictionary JSON path
    /// - TERMGRAPH_REQUEST_TIMEOUT: Request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(data_dir) = std::env::var("TERMGRAPH_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(endpoint) = std::env::var("TERMGRAPH_SPARQL_ENDPOINT") {
            config.sources.sparql_endpoint = endpoint;
        }

        if let Ok(url) = std::env::var("TERMGRAPH_WIKIPEDIA_URL") {
            config.sources.wikipedia_api_url = url;
        }

        if let Ok(url) = std::env::var("TERMGRAPH_PARSER_URL") {
            config.sources.parser_url = url;
        }

        if let Ok(file) = std::env::var("TERMGRAPH_DICTIONARY_FILE") {
            config.sources.dictionary_file = PathBuf::from(file);
        }

        if let Ok(timeout) = std::env::var("TERMGRAPH_REQUEST_TIMEOUT") {
            if let Ok(val) = timeout.parse() {
                config.sources.request_timeout_secs = val;
            }
        }

        config
    }

    /// Load configuration with priority: file > env > defaults
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(path) = config_file {
            if path.exists() {
                tracing::info!("Loading configuration from file: {:?}", path);
                Self::from_file(&path)?
            } else {
                tracing::warn!("Config file not found: {:?}, using defaults", path);
                Self::default()
            }
        } else {
            Self::default()
        };

        config = Self::merge_with_env(config);

        Ok(config)
    }

    /// Merge config with environment variables (env takes priority)
    fn merge_with_env(mut config: Self) -> Self {
        let env_config = Self::from_env();

        // Only override if env var was explicitly set
        if std::env::var("TERMGRAPH_DATA_DIR").is_ok() {
            config.storage.data_dir = env_config.storage.data_dir;
        }
        if std::env::var("TERMGRAPH_SPARQL_ENDPOINT").is_ok() {
            config.sources.sparql_endpoint = env_config.sources.sparql_endpoint;
        }
        if std::env::var("TERMGRAPH_WIKIPEDIA_URL").is_ok() {
            config.sources.wikipedia_api_url = env_config.sources.wikipedia_api_url;
        }
        if std::env::var("TERMGRAPH_PARSER_URL").is_ok() {
            config.sources.parser_url = env_config.sources.parser_url;
        }
        if std::env::var("TERMGRAPH_DICTIONARY_FILE").is_ok() {
            config.sources.dictionary_file = env_config.sources.dictionary_file;
        }
        if std::env::var("TERMGRAPH_REQUEST_TIMEOUT").is_ok() {
            config.sources.request_timeout_secs = env_config.sources.request_timeout_secs;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TermGraphConfig::default();
        assert_eq!(config.build.default_depth, 2);
        assert_eq!(config.sources.request_timeout_secs, 30);
        assert_eq!(
            config.storage.graph_path(),
            PathBuf::from("resources/scivar_kg.json")
        );
        assert!(config.storage.indicator_path().is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[build]\ndefault_depth = 3\n\n[sources]\nontology_class = \"Property\""
        )
        .unwrap();

        let config = TermGraphConfig::from_file(file.path()).unwrap();
        assert_eq!(config.build.default_depth, 3);
        assert_eq!(config.build.max_concurrent_lookups, 8);
        assert_eq!(config.sources.ontology_class, "Property");
        assert_eq!(config.sources.parser_model, "english");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[build\ndefault_depth = ").unwrap();
        let err = TermGraphConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, crate::TermGraphError::ConfigError(_)));
    }
}
