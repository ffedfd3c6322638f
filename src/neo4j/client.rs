//! Neo4j client for running ad-hoc Cypher queries

use super::models::{GraphFragment, Properties, ResultRecord, ResultValue, SourceNode, SourceRelationship};
use super::traits::{validate_query, QueryError, QueryExecutor};
use async_trait::async_trait;
use indexmap::IndexMap;
use neo4rs::{query, DeError, Graph};
use serde::de::IgnoredAny;
use std::sync::Arc;
use std::time::Instant;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Create a new Neo4j client
    pub async fn new(uri: &str, user: &str, password: &str) -> Result<Self, QueryError> {
        let graph = Graph::new(uri, user, password)
            .await
            .map_err(|e| QueryError::Connection(e.to_string()))?;

        tracing::info!("Connected to Neo4j at {}", uri);

        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    /// Execute a raw Cypher query and collect every row before returning.
    ///
    /// The row stream is dropped on every exit path, which hands the pooled
    /// connection back to the driver.
    async fn fetch_rows(&self, cypher: &str) -> Result<Vec<neo4rs::Row>, QueryError> {
        let mut result = self
            .graph
            .execute(query(cypher))
            .await
            .map_err(|e| QueryError::Execution(e.to_string()))?;

        let mut rows = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| QueryError::Execution(e.to_string()))?
        {
            rows.push(row);
        }
        Ok(rows)
    }
}

#[async_trait]
impl QueryExecutor for Neo4jClient {
    async fn execute(&self, query: &str) -> Result<Vec<ResultRecord>, QueryError> {
        let cypher = validate_query(query)?;
        let started = Instant::now();

        let rows = self.fetch_rows(cypher).await?;
        let records: Vec<ResultRecord> = rows.iter().map(decode_row).collect();

        tracing::info!(
            rows = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Executed Cypher query"
        );
        Ok(records)
    }

    async fn health_check(&self) -> bool {
        self.fetch_rows("RETURN 1 AS ping").await.is_ok()
    }
}

// ============================================================================
// Row decoding
// ============================================================================

/// Decode a driver row into a [`ResultRecord`].
///
/// The driver does not expose the server's column order, so columns are
/// visited in lexicographic order to keep projections reproducible.
fn decode_row(row: &neo4rs::Row) -> ResultRecord {
    let mut columns: Vec<String> = match row.to::<IndexMap<String, IgnoredAny>>() {
        Ok(map) => map.into_keys().collect(),
        Err(e) => {
            tracing::warn!("Could not list columns of result row: {}", e);
            return ResultRecord::new();
        }
    };
    columns.sort();

    columns
        .into_iter()
        .map(|column| {
            let value = decode_value(row, &column);
            (column, value)
        })
        .collect()
}

fn decode_value(row: &neo4rs::Row, column: &str) -> ResultValue {
    if let Ok(path) = row.get::<neo4rs::Path>(column) {
        return match decode_path(&path) {
            Ok(fragment) => ResultValue::Graph(fragment),
            Err(e) => {
                tracing::warn!("Skipping undecodable path in column '{}': {}", column, e);
                ResultValue::Scalar(serde_json::Value::Null)
            }
        };
    }

    match row.get::<serde_json::Value>(column) {
        Ok(value) => ResultValue::from_json(value),
        Err(e) => {
            tracing::warn!("Skipping undecodable value in column '{}': {}", column, e);
            ResultValue::Scalar(serde_json::Value::Null)
        }
    }
}

/// Decode a path by walking its `indices`.
///
/// A path lists each distinct node and relationship once. The traversal is
/// the sequence of `(rel, node)` index pairs starting from `nodes[0]`:
/// `rel` is 1-based and negative when the relationship was walked against
/// its direction, `node` is 0-based. Every step yields one relationship, so
/// a path that revisits nodes or relationships keeps all of its hops.
fn decode_path(path: &neo4rs::Path) -> Result<GraphFragment, DeError> {
    let nodes: Vec<SourceNode> = path
        .nodes_as::<neo4rs::Node>()?
        .iter()
        .map(decode_node)
        .collect();
    let rels = path.relationships_as::<neo4rs::UnboundedRelation>()?;
    let indices = path.indices_as::<i64>()?;

    if nodes.is_empty() {
        return Ok(GraphFragment::new(nodes, Vec::new()));
    }

    let mut relationships = Vec::with_capacity(indices.len() / 2);
    let mut prev = &nodes[0];
    for step in indices.chunks(2) {
        let &[rel_index, node_index] = step else {
            tracing::warn!("Path indices have odd length {}, ignoring the tail", indices.len());
            break;
        };

        let rel = usize::try_from(rel_index.unsigned_abs())
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| rels.get(i));
        let next = usize::try_from(node_index).ok().and_then(|i| nodes.get(i));
        let (Some(rel), Some(next)) = (rel, next) else {
            tracing::warn!(
                "Path step ({}, {}) is out of range, ignoring the rest of the path",
                rel_index,
                node_index
            );
            break;
        };

        let (start, end) = if rel_index > 0 { (prev, next) } else { (next, prev) };
        relationships.push(decode_relationship(rel, start, end));
        prev = next;
    }

    Ok(GraphFragment::new(nodes, relationships))
}

fn decode_relationship(
    rel: &neo4rs::UnboundedRelation,
    start: &SourceNode,
    end: &SourceNode,
) -> SourceRelationship {
    let mut keys: Vec<String> = rel.keys().iter().map(|k| k.to_string()).collect();
    keys.sort();

    let mut properties = Properties::new();
    for key in keys {
        if let Ok(value) = rel.get::<serde_json::Value>(&key) {
            properties.insert(key, value);
        }
    }

    SourceRelationship {
        rel_type: rel.typ().to_string(),
        start: start.id.clone(),
        end: end.id.clone(),
        properties,
    }
}

fn decode_node(node: &neo4rs::Node) -> SourceNode {
    let mut keys: Vec<String> = node.keys().iter().map(|k| k.to_string()).collect();
    keys.sort();

    let mut properties = Properties::new();
    for key in keys {
        match node.get::<serde_json::Value>(&key) {
            Ok(value) => {
                properties.insert(key, value);
            }
            Err(e) => tracing::debug!("Dropping property '{}' of node {}: {}", key, node.id(), e),
        }
    }

    SourceNode {
        id: node.id().to_string(),
        labels: node.labels().iter().map(|l| l.to_string()).collect(),
        properties,
    }
}
