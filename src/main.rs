//! carbokg CLI: build, query, and export the domain knowledge graph.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use carbokg::corpus::write_records;
use carbokg::engine::{Engine, EngineConfig};
use carbokg::export::export_graph;
use carbokg::extract::build_records;
use carbokg::extract::validate::validate_all;
use carbokg::index::KnowledgeIndex;
use carbokg::prompt::format_for_prompt;
use carbokg::tokenize::Segmenter;

#[derive(Parser)]
#[command(name = "carbokg", version, about = "CCUS domain knowledge-graph engine")]
struct Cli {
    /// Explicit corpus path (overrides the default candidate locations).
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and validate a triple corpus from raw text.
    Build {
        /// Input text file, one sentence per line.
        #[arg(long)]
        input: PathBuf,

        /// Output corpus file (line-delimited JSON records).
        #[arg(long)]
        output: PathBuf,
    },

    /// Query the knowledge graph.
    Query {
        /// Free-form query text.
        text: String,
    },

    /// Show knowledge-graph statistics.
    Info,

    /// Export the aggregated visualization graph as JSON.
    Export {
        /// Output JSON file.
        #[arg(long)]
        output: PathBuf,
    },
}

fn engine_config(corpus: Option<PathBuf>) -> EngineConfig {
    match corpus {
        Some(path) => EngineConfig {
            corpus_candidates: vec![path],
        },
        None => EngineConfig::default(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => {
            let text = std::fs::read_to_string(&input).into_diagnostic()?;
            let records = build_records(text.lines());
            tracing::info!(records = records.len(), "extraction complete");

            let segmenter = Segmenter::new();
            let validated = validate_all(records, &segmenter);
            let kept: usize = validated.iter().map(|r| r.triples.len()).sum();
            tracing::info!(triples = kept, "validation complete");

            write_records(&output, &validated)?;
            println!(
                "wrote {} records ({} triples) to {}",
                validated.len(),
                kept,
                output.display()
            );
        }

        Commands::Query { text } => {
            let engine = Engine::new(engine_config(cli.corpus))?;
            let output = engine.query(&text);

            if output.records.is_empty() {
                println!("no knowledge found");
                return Ok(());
            }

            println!("entities: {}", output.entities.join(", "));
            println!();
            for result in &output.records {
                println!(
                    "[score {}] #{} {}",
                    result.relevance_score, result.record.id, result.record.sentence
                );
            }
            println!();
            println!("{}", format_for_prompt(&output.records));
            println!();
            println!(
                "subgraph: {} nodes, {} edges",
                output.subgraph.nodes.len(),
                output.subgraph.edges.len()
            );
        }

        Commands::Info => {
            let engine = Engine::new(engine_config(cli.corpus))?;
            match engine.statistics() {
                Some(stats) => print!("{stats}"),
                None => println!("no knowledge base loaded"),
            }
        }

        Commands::Export { output } => {
            let config = engine_config(cli.corpus);
            let index = KnowledgeIndex::load_any(&config.corpus_candidates)
                .map_err(carbokg::KgError::from)?;
            let graph = export_graph(&index);
            let json = serde_json::to_string_pretty(&graph).into_diagnostic()?;
            std::fs::write(&output, json).into_diagnostic()?;
            println!(
                "exported {} nodes and {} links to {}",
                graph.nodes.len(),
                graph.links.len(),
                output.display()
            );
        }
    }

    Ok(())
}
