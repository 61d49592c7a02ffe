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

//! File-backed category dictionary (WiktiWordNet format)

use crate::error::Result;
use crate::traits::CategoryDictionary;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// `category -> term -> part of speech -> definitions`
type Entries = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>;

const NOUN: &str = "Noun";
const DOMAIN: &str = "Domain";

#[derive(Debug, Clone, Default)]
pub struct WiktiWordNet {
    data: Entries,
}

impl WiktiWordNet {
    /// Load the dictionary; a missing or malformed file yields an empty one
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(dictionary) => {
                info!(path = %path.display(), categories = dictionary.data.len(), "loaded category dictionary");
                dictionary
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load category dictionary, continuing without it");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let data = serde_json::from_reader(reader)?;
        Ok(Self { data })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self {
            data: serde_json::from_str(json)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn first_noun_definition(&self, category: &str, term: &str) -> Option<&str> {
        self.data
            .get(category)?
            .get(term)?
            .get(NOUN)?
            .first()
            .map(String::as_str)
    }

    /// First noun definition of `term` in the `Domain` category, if listed
    pub fn check_domain(&self, term: &str) -> Option<String> {
        self.first_noun_definition(DOMAIN, term).map(str::to_string)
    }
}

impl CategoryDictionary for WiktiWordNet {
    fn get_categories(&self, term: &str) -> BTreeMap<String, String> {
        self.data
            .keys()
            .filter_map(|category| {
                self.first_noun_definition(category, term)
                    .map(|definition| (category.clone(), definition.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "Property": {
            "temperature": {"Noun": ["A measure of hotness.", "A fever."]},
            "warm": {"Adjective": ["Having a mild heat."]}
        },
        "Domain": {
            "hydrology": {"Noun": ["The study of water."]}
        },
        "Phenomenon": {
            "temperature": {"Noun": ["The state of being hot."]}
        }
    }"#;

    #[test]
    fn test_get_categories_first_noun_definition() {
        let wwn = WiktiWordNet::from_json_str(SAMPLE).unwrap();
        let categories = wwn.get_categories("temperature");
        assert_eq!(categories.len(), 2);
        assert_eq!(categories["Property"], "A measure of hotness.");
        assert_eq!(categories["Phenomenon"], "The state of being hot.");
        assert!(wwn.get_categories("warm").is_empty());
        assert!(wwn.get_categories("pressure").is_empty());
    }

    #[test]
    fn test_check_domain() {
        let wwn = WiktiWordNet::from_json_str(SAMPLE).unwrap();
        assert_eq!(wwn.check_domain("hydrology").as_deref(), Some("The study of water."));
        assert_eq!(wwn.check_domain("temperature"), None);
    }

    #[test]
    fn test_load_missing_or_malformed_is_empty() {
        assert!(WiktiWordNet::load("/nonexistent/wiktiwordnet.json").is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(WiktiWordNet::load(file.path()).is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        assert!(!WiktiWordNet::load(file.path()).is_empty());
    }
}
