//! Test helper factories and mock state builders
//!
//! Provides convenience functions for creating source graph fixtures with
//! sensible defaults, and helpers for building mock AppState instances.
#![allow(dead_code)]

use crate::graph::{Color, ColorPolicy, PaletteConfig};
use crate::neo4j::mock::MockQueryExecutor;
use crate::neo4j::models::*;
use crate::render::RenderOptions;
use crate::{AppState, Config};
use std::sync::Arc;

// ============================================================================
// Mock state builders
// ============================================================================

/// Config pointing at a database that is never contacted
pub fn mock_config() -> Config {
    Config {
        neo4j_uri: "bolt://mock:7687".to_string(),
        neo4j_user: "neo4j".to_string(),
        neo4j_password: "mock".to_string(),
        server_port: 0,
        render: RenderOptions::default(),
        palette: PaletteConfig::default(),
    }
}

/// Create a mock AppState answering every query with `records`
pub fn mock_app_state(records: Vec<ResultRecord>) -> AppState {
    mock_app_state_with(MockQueryExecutor::with_records(records))
}

/// Create a mock AppState around a pre-configured executor
pub fn mock_app_state_with(executor: MockQueryExecutor) -> AppState {
    AppState::with_executor(Arc::new(executor), mock_config())
}

// ============================================================================
// Source graph factories
// ============================================================================

/// A `Person` node with a `name` property
pub fn person(id: &str, name: &str) -> SourceNode {
    SourceNode::new(id)
        .with_label("Person")
        .with_property("name", name)
}

/// A record with a single graph-bearing column
pub fn fragment_record(
    column: &str,
    nodes: Vec<SourceNode>,
    relationships: Vec<SourceRelationship>,
) -> ResultRecord {
    ResultRecord::new().with(column, GraphFragment::new(nodes, relationships))
}

/// Ann -KNOWS-> Bo, as a single-record result
pub fn ann_knows_bo() -> Vec<ResultRecord> {
    vec![fragment_record(
        "p",
        vec![person("1", "Ann"), person("2", "Bo")],
        vec![SourceRelationship::new("KNOWS", "1", "2")],
    )]
}

// ============================================================================
// Color policy stub
// ============================================================================

/// Deterministic policy: every node is `#111111`, edges count up from `#000001`.
#[derive(Debug, Default)]
pub struct StubPalette {
    pub node_labels: Vec<String>,
    edges_drawn: u32,
}

impl ColorPolicy for StubPalette {
    fn node_color(&mut self, label: &str) -> Color {
        self.node_labels.push(label.to_string());
        Color::new(0x111111)
    }

    fn edge_color(&mut self, _rel_type: &str) -> Color {
        self.edges_drawn += 1;
        Color::new(self.edges_drawn)
    }
}
