//! Integration tests for graph-lens
//!
//! These tests require Neo4j to be running.
//! Run with: cargo test --test integration_tests

use graph_lens::neo4j::{Neo4jClient, QueryError, QueryExecutor, ResultValue};
use graph_lens::render::RenderOptions;
use graph_lens::{AppState, Config};
use std::sync::Arc;
use uuid::Uuid;

/// Get test configuration from environment or use defaults
fn test_config() -> Config {
    Config {
        neo4j_uri: std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".into()),
        neo4j_user: std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".into()),
        neo4j_password: std::env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "neo4j".into()),
        server_port: 8080,
        render: RenderOptions::default(),
        palette: Default::default(),
    }
}

/// Connect to Neo4j, or None when it is not reachable
async fn connect() -> Option<Neo4jClient> {
    let config = test_config();
    let client = Neo4jClient::new(
        &config.neo4j_uri,
        &config.neo4j_user,
        &config.neo4j_password,
    )
    .await
    .ok()?;

    if !client.health_check().await {
        eprintln!("Neo4j not available at {}", config.neo4j_uri);
        return None;
    }
    Some(client)
}

/// Unique tag so concurrent runs never see each other's data
fn run_tag() -> String {
    format!("gl_{}", Uuid::new_v4().simple())
}

async fn cleanup(client: &Neo4jClient, tag: &str) {
    let _ = client
        .execute(&format!("MATCH (n {{run: '{}'}}) DETACH DELETE n", tag))
        .await;
}

#[tokio::test]
async fn test_path_query_projects_people() {
    let Some(client) = connect().await else {
        eprintln!("Skipping test: Neo4j not available");
        return;
    };
    let tag = run_tag();

    client
        .execute(&format!(
            "CREATE (:Person {{name: 'Ann', run: '{0}'}})-[:KNOWS]->(:Person {{name: 'Bo', run: '{0}'}})",
            tag
        ))
        .await
        .unwrap();

    let client = Arc::new(client);
    let state = AppState::with_executor(client.clone(), test_config());
    let query = format!(
        "MATCH p=(a:Person {{run: '{0}'}})-[:KNOWS]->(b:Person {{run: '{0}'}}) RETURN p",
        tag
    );
    let graph = state.visualizer.visualize(&query).await.unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    let labels: Vec<&str> = graph.nodes().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["Ann", "Bo"]);
    let nodes: Vec<_> = graph.nodes().collect();
    assert_eq!(nodes[0].color, nodes[1].color);
    assert_eq!(graph.edges()[0].label, "KNOWS");
    assert_eq!(graph.edges()[0].from, nodes[0].id);
    assert_eq!(graph.edges()[0].to, nodes[1].id);

    let html = state.visualizer.render_html(&query).await.unwrap();
    assert!(html.contains("\"label\":\"Ann\""));

    cleanup(&client, &tag).await;
}

#[tokio::test]
async fn test_backward_hop_keeps_relationship_direction() {
    let Some(client) = connect().await else {
        eprintln!("Skipping test: Neo4j not available");
        return;
    };
    let tag = run_tag();

    client
        .execute(&format!(
            "CREATE (:Person {{name: 'Ann', run: '{0}'}})-[:KNOWS]->(b:Person {{name: 'Bo', run: '{0}'}}), \
             (:Person {{name: 'Cy', run: '{0}'}})-[:LIKES]->(b)",
            tag
        ))
        .await
        .unwrap();

    let query = format!(
        "MATCH p=(:Person {{name: 'Ann', run: '{0}'}})-[:KNOWS]->(:Person)<-[:LIKES]-(:Person) RETURN p",
        tag
    );
    let records = client.execute(&query).await.unwrap();
    cleanup(&client, &tag).await;

    assert_eq!(records.len(), 1);
    let fragment = records[0].get("p").and_then(ResultValue::as_graph).unwrap();
    let name_of = |id: &str| {
        fragment
            .nodes
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.properties.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    let hops: Vec<(String, String, String)> = fragment
        .relationships
        .iter()
        .map(|r| (r.rel_type.clone(), name_of(&r.start), name_of(&r.end)))
        .collect();
    assert_eq!(
        hops,
        vec![
            ("KNOWS".to_string(), "Ann".to_string(), "Bo".to_string()),
            ("LIKES".to_string(), "Cy".to_string(), "Bo".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_scalar_columns_decode_without_graph() {
    let Some(client) = connect().await else {
        eprintln!("Skipping test: Neo4j not available");
        return;
    };

    let records = client
        .execute("RETURN 1 AS one, {name: 'Ann'} AS props, 'x' AS text")
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    let columns: Vec<&str> = record.columns().collect();
    assert_eq!(columns, vec!["one", "props", "text"]);
    assert!(matches!(record.get("one"), Some(ResultValue::Scalar(_))));
    assert!(matches!(record.get("props"), Some(ResultValue::PropertyMap(_))));
}

#[tokio::test]
async fn test_malformed_query_is_execution_error() {
    let Some(client) = connect().await else {
        eprintln!("Skipping test: Neo4j not available");
        return;
    };

    let err = client.execute("MATC (n) RETURN n").await.unwrap_err();
    assert!(matches!(err, QueryError::Execution(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_database_is_connection_error() {
    let result = Neo4jClient::new("bolt://127.0.0.1:1", "neo4j", "wrong").await;
    match result {
        Err(QueryError::Connection(_)) => {}
        Err(other) => panic!("unexpected error: {:?}", other),
        // Some driver versions connect lazily; the first query must then fail
        Ok(client) => assert!(!client.health_check().await),
    }
}
