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

//! External collaborators for term graph construction
//!
//! Each collaborator is an async trait with one HTTP- or file-backed
//! implementation:
//! - [`DependencyParser`]: [`UdpipeParser`]
//! - [`Encyclopedia`]: [`WikipediaClient`]
//! - [`OntologySearch`]: [`SparqlOntologyClient`], ranked by a [`MatchScorer`]
//! - [`CategoryDictionary`]: [`WiktiWordNet`]

pub mod error;
pub mod ranking;
pub mod sparql;
pub mod traits;
pub mod udpipe;
pub mod wikipedia;
pub mod wiktiwordnet;

pub use error::{Result, SourceError};
pub use ranking::{rank, Candidate, DefaultScorer, EntityEvidence, MatchScorer};
pub use sparql::{SparqlOntologyClient, VALID_CLASSES};
pub use traits::{
    CategoryDictionary, DependencyParser, Encyclopedia, OntologyMatch, OntologySearch, PageText,
    SearchHit,
};
pub use udpipe::UdpipeParser;
pub use wikipedia::WikipediaClient;
pub use wiktiwordnet::WiktiWordNet;
