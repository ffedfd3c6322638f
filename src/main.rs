//! Graph Lens - query Neo4j and render the result as an interactive graph.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graph_lens::graph::PaletteKind;
use graph_lens::render::render_json;
use graph_lens::{AppState, Config};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "graph-lens")]
#[command(about = "Run a Cypher query and render the returned graph")]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, env = "GRAPH_LENS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one query and write the rendered graph
    Render {
        /// Cypher query text
        #[arg(short, long)]
        query: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the JSON model instead of HTML
        #[arg(long)]
        json: bool,

        /// Node palette: hashed or random (overrides config)
        #[arg(long)]
        palette: Option<PaletteKind>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr, so rendered output on stdout stays clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,graph_lens=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            graph_lens::start_server(config).await
        }
        Commands::Render {
            query,
            output,
            json,
            palette,
        } => {
            if let Some(palette) = palette {
                config.palette.palette = palette;
            }
            run_render(config, &query, output, json).await
        }
    }
}

async fn run_render(config: Config, query: &str, output: Option<PathBuf>, json: bool) -> Result<()> {
    let state = AppState::new(config).await?;
    tracing::info!("Connected to Neo4j");

    let document = if json {
        let graph = state.visualizer.visualize(query).await?;
        tracing::info!(
            "Projected {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        render_json(&graph)?
    } else {
        state.visualizer.render_html(query).await?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
