//! In-memory mock implementation of QueryExecutor for testing.
//!
//! Returns pre-configured records (or a pre-configured error) without any
//! database access, and records every query it receives.

use crate::neo4j::models::ResultRecord;
use crate::neo4j::traits::{validate_query, QueryError, QueryExecutor};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Mock implementation of `QueryExecutor` for testing.
pub struct MockQueryExecutor {
    response: Result<Vec<ResultRecord>, QueryError>,
    healthy: bool,
    pub queries: RwLock<Vec<String>>,
}

impl MockQueryExecutor {
    /// Create a mock that answers every query with no records.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a mock that answers every query with `records`.
    pub fn with_records(records: Vec<ResultRecord>) -> Self {
        Self {
            response: Ok(records),
            healthy: true,
            queries: RwLock::new(Vec::new()),
        }
    }

    /// Create a mock whose executions all fail with `error`.
    pub fn failing(error: QueryError) -> Self {
        let healthy = !matches!(error, QueryError::Connection(_));
        Self {
            response: Err(error),
            healthy,
            queries: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MockQueryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryExecutor for MockQueryExecutor {
    async fn execute(&self, query: &str) -> Result<Vec<ResultRecord>, QueryError> {
        let cypher = validate_query(query)?;
        self.queries.write().await.push(cypher.to_string());
        self.response.clone()
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}
