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

//! UDPipe REST dependency parser

use crate::error::{check_status, Result, SourceError};
use crate::traits::DependencyParser;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use termgraph_nlp::{conllu, Sentence};

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    result: String,
}

/// Tokenizes, tags and parses text through a UDPipe service
pub struct UdpipeParser {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl UdpipeParser {
    pub fn new(model: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: "https://lindat.mff.cuni.cz/services/udpipe/api".to_string(),
            model: model.to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl DependencyParser for UdpipeParser {
    async fn parse(&self, text: &str) -> Result<Vec<Sentence>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/process", self.base_url.trim_end_matches('/'));
        let params = [
            ("tokenizer", ""),
            ("tagger", ""),
            ("parser", ""),
            ("model", self.model.as_str()),
            ("data", text),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        let response = check_status(response).await?;
        let body: ProcessResponse = response.json().await?;

        conllu::parse(&body.result).map_err(|e| SourceError::InvalidResponse(e.to_string()))
    }
}
