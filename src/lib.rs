//! Graph Lens
//!
//! Runs a Cypher query against Neo4j and renders the returned graph:
//! - Neo4j query execution with records decoded into tagged values
//! - Projection of paths into a deduplicated, colored node/edge model
//! - Self-contained vis-network HTML rendering
//! - HTTP API and CLI front-ends

pub mod api;
pub mod graph;
pub mod neo4j;
pub mod render;
pub mod visualizer;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use graph::{EdgeColoring, GraphProjector, PaletteConfig, PaletteKind};
use render::{HtmlRenderer, RenderOptions};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use visualizer::GraphVisualizer;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub neo4j: Neo4jYamlConfig,
    pub render: RenderYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Neo4j configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jYamlConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for Neo4jYamlConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".into(),
            user: "neo4j".into(),
            password: "neo4j".into(),
        }
    }
}

/// Render configuration section: page options plus the color palette
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RenderYamlConfig {
    #[serde(flatten)]
    pub options: RenderOptions,
    pub palette: PaletteKind,
    pub edge_coloring: EdgeColoring,
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub server_port: u16,
    pub render: RenderOptions,
    pub palette: PaletteConfig,
}

impl Config {
    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        let palette = match std::env::var("GRAPH_LENS_PALETTE") {
            Ok(value) => value
                .parse::<PaletteKind>()
                .map_err(anyhow::Error::msg)
                .context("Invalid GRAPH_LENS_PALETTE")?,
            Err(_) => yaml.render.palette,
        };

        Ok(Self {
            neo4j_uri: std::env::var("NEO4J_URI").unwrap_or(yaml.neo4j.uri),
            neo4j_user: std::env::var("NEO4J_USER").unwrap_or(yaml.neo4j.user),
            neo4j_password: std::env::var("NEO4J_PASSWORD").unwrap_or(yaml.neo4j.password),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.server.port),
            render: yaml.render.options,
            palette: PaletteConfig {
                palette,
                edge_coloring: yaml.render.edge_coloring,
            },
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub visualizer: Arc<GraphVisualizer>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Connect to Neo4j and build the pipeline
    pub async fn new(config: Config) -> Result<Self> {
        let neo4j = neo4j::Neo4jClient::new(
            &config.neo4j_uri,
            &config.neo4j_user,
            &config.neo4j_password,
        )
        .await?;

        Ok(Self::with_executor(Arc::new(neo4j), config))
    }

    /// Build the pipeline around an existing executor
    pub fn with_executor(executor: Arc<dyn neo4j::QueryExecutor>, config: Config) -> Self {
        let visualizer = GraphVisualizer::new(
            executor,
            GraphProjector::new(config.palette),
            HtmlRenderer::new(config.render.clone()),
        );

        Self {
            visualizer: Arc::new(visualizer),
            config: Arc::new(config),
        }
    }
}

/// Start the HTTP API and serve until the process is stopped
pub async fn start_server(config: Config) -> Result<()> {
    let port = config.server_port;
    let state = AppState::new(config).await?;
    let app = api::create_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Graph Lens listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
