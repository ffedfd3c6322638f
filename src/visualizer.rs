//! Query → projection → rendering pipeline.
//!
//! `GraphVisualizer` is the single entry point for the API and CLI. It
//! composes:
//!
//! 1. **Execution**: query text → records via a `QueryExecutor`
//! 2. **Projection**: records → `VisualGraph` via `GraphProjector`
//! 3. **Rendering**: `VisualGraph` → HTML via `HtmlRenderer`
//!
//! A failed execution stops the pipeline: nothing is projected or rendered.

use crate::graph::{GraphProjector, VisualGraph};
use crate::neo4j::{QueryError, QueryExecutor};
use crate::render::HtmlRenderer;
use std::sync::Arc;
use thiserror::Error;

/// Failure of a full visualize-and-render invocation
#[derive(Debug, Error)]
pub enum VisualizeError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("failed to render graph: {0:#}")]
    Render(anyhow::Error),
}

/// Runs one query and turns its result into a visual graph.
pub struct GraphVisualizer {
    executor: Arc<dyn QueryExecutor>,
    projector: GraphProjector,
    renderer: HtmlRenderer,
}

impl GraphVisualizer {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        projector: GraphProjector,
        renderer: HtmlRenderer,
    ) -> Self {
        Self {
            executor,
            projector,
            renderer,
        }
    }

    pub fn executor(&self) -> &Arc<dyn QueryExecutor> {
        &self.executor
    }

    /// Execute `query` and project its records.
    pub async fn visualize(&self, query: &str) -> Result<VisualGraph, QueryError> {
        let records = self.executor.execute(query).await?;
        Ok(self.projector.project(&records))
    }

    /// Execute `query`, project its records and render them to HTML.
    pub async fn render_html(&self, query: &str) -> Result<String, VisualizeError> {
        let graph = self.visualize(query).await?;
        self.renderer.render(&graph).map_err(VisualizeError::Render)
    }
}
