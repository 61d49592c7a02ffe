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

//! # Termgraph Graph
//!
//! The term graph and everything that reads or writes it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use termgraph_graph::{run_passes, Collaborators, GraphStore, TermGraphBuilder};
//!
//! let store = GraphStore::new(&config.storage);
//! let (graph, entities) = store.load();
//!
//! let mut builder = TermGraphBuilder::new(graph, entities, sources, config.build.clone());
//! builder.expand("soil moisture", 2).await?;
//!
//! let (mut graph, entities) = builder.into_parts();
//! run_passes(&mut graph);
//! store.save(&graph, &entities)?;
//! ```

use serde::Serialize;

mod annotate;
pub mod builder;
pub mod entity_store;
pub mod graph;
pub mod inference;
pub mod persistence;
pub mod propagation;
pub mod synonym;

pub use annotate::Collaborators;
pub use builder::{clamp_depth, TermGraphBuilder, MAX_DEPTH};
pub use entity_store::{EntityStore, LoadedEntities};
pub use graph::{GraphStats, TermGraph};
pub use inference::CategoryInferenceEngine;
pub use persistence::{load_indicators, GraphStore};
pub use propagation::{ScorePropagationEngine, NOISE_FLOOR, SECOND_ORDER_FACTOR};
pub use synonym::SynonymResolver;

/// Counts from one run of the whole-graph passes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub merged: usize,
    pub categorized: usize,
    pub propagated: usize,
}

/// Fold pending synonyms, infer categories, then propagate scores
pub fn run_passes(graph: &mut TermGraph) -> PassSummary {
    let merged = SynonymResolver::new().resolve_pending(graph);
    let categorized = CategoryInferenceEngine::new().run(graph);
    let propagated = ScorePropagationEngine::new().run(graph);
    PassSummary {
        merged,
        categorized,
        propagated,
    }
}
