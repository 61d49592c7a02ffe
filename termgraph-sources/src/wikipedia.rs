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

//! MediaWiki API client for definition lookup

use crate::error::{check_status, Result, SourceError};
use crate::traits::{Encyclopedia, PageText, SearchHit};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const SEARCH_LIMIT: &str = "5";

/// Encyclopedia backed by the Wikipedia search and extracts APIs
pub struct WikipediaClient {
    api_url: String,
    client: reqwest::Client,
}

impl WikipediaClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            client,
        })
    }

    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<serde_json::Value> {
        let response = self.client.get(&self.api_url).query(params).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Pick the hit whose title, else redirect, else section title equals the
/// term; fall back to the first hit.
fn select_hit(term: &str, hits: &[SearchHit]) -> Option<SearchHit> {
    let term = term.to_lowercase();
    let lower = |s: &Option<String>| s.as_deref().map(|v| v.to_lowercase().replace('_', " "));

    hits.iter()
        .find(|h| h.title.to_lowercase() == term)
        .or_else(|| hits.iter().find(|h| lower(&h.redirect_title).as_deref() == Some(term.as_str())))
        .or_else(|| hits.iter().find(|h| lower(&h.section_title).as_deref() == Some(term.as_str())))
        .or_else(|| hits.first())
        .cloned()
}

/// Split a plain-text extract into paragraphs, dropping section headings
fn split_paragraphs(extract: &str) -> Vec<String> {
    extract
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("=="))
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn search_top_result(&self, term: &str) -> Result<Option<SearchHit>> {
        let query = term
            .trim_matches('"')
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if query.is_empty() {
            return Ok(None);
        }

        let data = self
            .get_json(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query.as_str()),
                ("srwhat", "text"),
                ("srsort", "relevance"),
                ("srlimit", SEARCH_LIMIT),
                ("srprop", "redirecttitle|sectiontitle"),
                ("format", "json"),
            ])
            .await?;

        let results = data["query"]["search"]
            .as_array()
            .ok_or_else(|| SourceError::InvalidResponse("missing query.search".to_string()))?;

        let hits: Vec<SearchHit> = results
            .iter()
            .filter_map(|r| {
                Some(SearchHit {
                    page_id: r["pageid"].as_u64()?,
                    title: r["title"].as_str()?.to_string(),
                    redirect_title: r["redirecttitle"].as_str().map(str::to_string),
                    section_title: r["sectiontitle"].as_str().map(str::to_string),
                })
            })
            .collect();

        debug!(term = %query, hits = hits.len(), "encyclopedia search");
        Ok(select_hit(&query, &hits))
    }

    async fn fetch_page(&self, page_id: u64) -> Result<PageText> {
        let page_id = page_id.to_string();
        let data = self
            .get_json(&[
                ("action", "query"),
                ("prop", "extracts|pageprops"),
                ("explaintext", "1"),
                ("ppprop", "disambiguation"),
                ("pageids", page_id.as_str()),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .await?;

        let page = data["query"]["pages"]
            .as_array()
            .and_then(|pages| pages.first())
            .ok_or_else(|| SourceError::InvalidResponse("missing query.pages".to_string()))?;

        let is_disambiguation = page["pageprops"].get("disambiguation").is_some();
        let paragraphs = page["extract"]
            .as_str()
            .map(split_paragraphs)
            .unwrap_or_default();

        Ok(PageText {
            paragraphs,
            is_disambiguation,
        })
    }
}
