//! QueryExecutor trait definition
//!
//! Defines the abstract interface between the query surface and the graph
//! database, enabling tests with mock implementations.

use crate::neo4j::models::ResultRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single query execution.
///
/// Execution is all-or-nothing: when any of these is returned, no record of
/// the failed execution is handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query text was empty or whitespace only
    #[error("query is empty")]
    EmptyQuery,
    /// The database could not be reached or refused the credentials
    #[error("failed to connect to Neo4j: {0}")]
    Connection(String),
    /// The database rejected or failed to run the query
    #[error("query execution failed: {0}")]
    Execution(String),
}

/// Abstract interface for running a query and materializing its records.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run `query` and return every record it produced, in result order.
    async fn execute(&self, query: &str) -> Result<Vec<ResultRecord>, QueryError>;

    /// Check that the database is reachable
    async fn health_check(&self) -> bool;
}

/// Reject blank queries before they reach the database.
pub fn validate_query(query: &str) -> Result<&str, QueryError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(QueryError::EmptyQuery);
    }
    Ok(trimmed)
}
