//! API request handlers

use crate::graph::VisualGraph;
use crate::neo4j::QueryError;
use crate::visualizer::VisualizeError;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Health check
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `"connected"` or `"disconnected"`
    pub neo4j: String,
    /// Node palette in effect (`"hashed"` or `"random"`)
    pub palette: String,
}

/// Health check handler, verifies actual connectivity to Neo4j.
///
/// Returns:
/// - 200 + `"ok"` if Neo4j answers
/// - 503 + `"unhealthy"` otherwise
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let neo4j_ok = state.visualizer.executor().health_check().await;

    let (http_status, status) = if neo4j_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            neo4j: if neo4j_ok {
                "connected".to_string()
            } else {
                "disconnected".to_string()
            },
            palette: state.config.palette.palette.to_string(),
        }),
    )
}

// ============================================================================
// Graph queries
// ============================================================================

/// Request body for the graph endpoints
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Cypher query text
    pub query: String,
}

/// Run a query and return the projected graph as JSON
pub async fn query_graph(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<VisualGraph>, AppError> {
    let graph = state.visualizer.visualize(&req.query).await?;
    Ok(Json(graph))
}

/// Run a query and return the rendered graph page
pub async fn query_graph_html(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Html<String>, AppError> {
    let html = state.visualizer.render_html(&req.query).await?;
    Ok(Html(html))
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    BadRequest(String),
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        if status.is_server_error() {
            tracing::error!("{}", message);
        }

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Connection(_) => AppError::ServiceUnavailable(err.to_string()),
            QueryError::EmptyQuery | QueryError::Execution(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<VisualizeError> for AppError {
    fn from(err: VisualizeError) -> Self {
        match err {
            VisualizeError::Query(e) => e.into(),
            VisualizeError::Render(e) => AppError::Internal(e),
        }
    }
}
