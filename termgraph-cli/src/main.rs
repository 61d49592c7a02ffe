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

//! Termgraph CLI
//!
//! Build, infer over and inspect the scientific-variable term graph.

mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use report::VariableReport;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use termgraph_core::TermGraphConfig;
use termgraph_graph::{run_passes, Collaborators, GraphStore, TermGraphBuilder};
use termgraph_sources::{SparqlOntologyClient, UdpipeParser, WikipediaClient, WiktiWordNet};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "termgraph")]
#[command(about = "Termgraph - scientific variable knowledge graph", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,

    /// Output as JSON (machine-readable)
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a term into the graph and report on it
    Expand {
        /// Term to describe, e.g. "soil moisture"
        term: String,

        /// Definition levels to follow (at most 3)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Do not write the graph back
        #[arg(long)]
        no_save: bool,
    },

    /// Rerun synonym resolution, category inference and score propagation
    Infer,

    /// Print a node as JSON
    Show {
        term: String,
    },

    /// Graph statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = TermGraphConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    let store = GraphStore::new(&config.storage);

    match cli.command {
        Commands::Expand { term, depth, no_save } => {
            let sources = collaborators(&config).context("Failed to set up collaborators")?;
            let (graph, entities) = store.load();
            let depth = depth.unwrap_or(config.build.default_depth);

            let mut builder = TermGraphBuilder::new(graph, entities, sources, config.build.clone());
            builder
                .expand(&term, depth)
                .await
                .with_context(|| format!("Failed to expand {:?}", term))?;
            let (mut graph, entities) = builder.into_parts();
            let summary = run_passes(&mut graph);
            info!(
                merged = summary.merged,
                categorized = summary.categorized,
                propagated = summary.propagated,
                "graph passes done"
            );

            if !no_save {
                store.save(&graph, &entities).context("Failed to save graph")?;
            }

            match VariableReport::build(&graph, &entities, &term) {
                Some(report) if cli.json => println!("{}", serde_json::to_string_pretty(&report)?),
                Some(report) => print!("{}", report.render()),
                None => println!("✗ No terms found in {:?}", term),
            }
        }

        Commands::Infer => {
            let (mut graph, entities) = store.load();
            let summary = run_passes(&mut graph);
            store.save(&graph, &entities).context("Failed to save graph")?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("✓ Inferred categories for {} nodes", summary.categorized);
                println!("  Synonyms merged: {}", summary.merged);
                println!("  Scores propagated: {}", summary.propagated);
            }
        }

        Commands::Show { term } => {
            let (graph, _) = store.load();
            match graph.resolve(&term).and_then(|key| graph.node(&key).map(|node| (key, node))) {
                Some((key, node)) => {
                    if !cli.json {
                        println!("{}:", key);
                    }
                    println!("{}", serde_json::to_string_pretty(node)?);
                }
                None => println!("✗ Term not found: {}", term),
            }
        }

        Commands::Stats => {
            let (graph, entities) = store.load();
            let stats = graph.stats();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Graph statistics:");
                println!("  Nodes: {}", stats.node_count);
                println!("  Index entries: {}", stats.index_entries);
                println!("  Ontology entities: {}", entities.len());
                println!("  Edges:");
                for (relation, count) in &stats.edge_counts {
                    println!("    {}: {}", relation, count);
                }
                if !stats.category_counts.is_empty() {
                    println!("  Categories:");
                    for (category, count) in &stats.category_counts {
                        println!("    {}: {}", category, count);
                    }
                }
            }
        }
    }

    Ok(())
}

fn collaborators(config: &TermGraphConfig) -> Result<Collaborators> {
    let sources = &config.sources;
    let timeout = Duration::from_secs(sources.request_timeout_secs);

    let parser = UdpipeParser::new(&sources.parser_model, timeout)?.with_base_url(sources.parser_url.clone());
    let encyclopedia = WikipediaClient::new(timeout)?.with_api_url(sources.wikipedia_api_url.clone());
    let ontology = SparqlOntologyClient::new(timeout)?
        .with_endpoint(sources.sparql_endpoint.clone())
        .with_class(&sources.ontology_class);
    let dictionary = WiktiWordNet::load(&sources.dictionary_file);

    Ok(Collaborators {
        parser: Arc::new(parser),
        encyclopedia: Arc::new(encyclopedia),
        ontology: Arc::new(ontology),
        dictionary: Arc::new(dictionary),
    })
}
