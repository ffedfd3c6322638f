//! Result-to-graph projection.
//!
//! Flattens query result records into a [`VisualGraph`]:
//!
//! 1. Values that carry no graph structure (scalars, property maps) are skipped.
//! 2. Nodes are deduplicated by id; the first occurrence wins.
//! 3. Relationships become edges unconditionally, in encounter order, with no
//!    check that their endpoints were materialized.
//!
//! Projection never fails: missing labels fall back to [`FALLBACK_LABEL`] and
//! missing properties give an empty tooltip.

use super::models::{VisualEdge, VisualGraph, VisualNode, FALLBACK_LABEL, TOOLTIP_SEPARATOR};
use super::palette::{ColorPolicy, PaletteConfig};
use crate::neo4j::models::{GraphFragment, Properties, ResultRecord, SourceNode, SourceRelationship};

/// Properties tried, in order, for a node's display label
const DISPLAY_PROPERTIES: [&str; 2] = ["name", "title"];

/// Projects result records into a visual graph model.
#[derive(Debug, Clone, Default)]
pub struct GraphProjector {
    palette: PaletteConfig,
}

impl GraphProjector {
    pub fn new(palette: PaletteConfig) -> Self {
        Self { palette }
    }

    /// Project `records` with a fresh color policy built from the configured
    /// palette.
    pub fn project(&self, records: &[ResultRecord]) -> VisualGraph {
        let mut policy = self.palette.build();
        self.project_with(records, policy.as_mut())
    }

    /// Project `records` using the given color policy.
    pub fn project_with(&self, records: &[ResultRecord], policy: &mut dyn ColorPolicy) -> VisualGraph {
        let mut graph = VisualGraph::new();
        let mut skipped_values = 0usize;

        for record in records {
            for value in record.values() {
                match value.as_graph() {
                    Some(fragment) => project_fragment(&mut graph, fragment, policy),
                    None => skipped_values += 1,
                }
            }
        }

        tracing::debug!(
            records = records.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            skipped_values,
            "Projected query result"
        );
        graph
    }
}

fn project_fragment(graph: &mut VisualGraph, fragment: &GraphFragment, policy: &mut dyn ColorPolicy) {
    for node in &fragment.nodes {
        if graph.contains_node(&node.id) {
            continue;
        }
        graph.add_node(visual_node(node, policy));
    }

    for rel in &fragment.relationships {
        graph.add_edge(visual_edge(rel, policy));
    }
}

fn visual_node(node: &SourceNode, policy: &mut dyn ColorPolicy) -> VisualNode {
    let group = effective_label(node).to_string();
    VisualNode {
        id: node.id.clone(),
        label: display_label(node),
        title: tooltip(&node.properties),
        color: policy.node_color(&group),
        group,
    }
}

fn visual_edge(rel: &SourceRelationship, policy: &mut dyn ColorPolicy) -> VisualEdge {
    VisualEdge {
        from: rel.start.clone(),
        to: rel.end.clone(),
        label: rel.rel_type.clone(),
        color: policy.edge_color(&rel.rel_type),
    }
}

/// First label of the node, or [`FALLBACK_LABEL`].
pub fn effective_label(node: &SourceNode) -> &str {
    node.labels
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_LABEL)
}

/// `name` property, else `title` property, else the effective label.
pub fn display_label(node: &SourceNode) -> String {
    DISPLAY_PROPERTIES
        .iter()
        .filter_map(|key| node.properties.get(*key))
        .find(|value| !value.is_null())
        .map(display_value)
        .unwrap_or_else(|| effective_label(node).to_string())
}

/// One `key: value` line per property, in property order.
pub fn tooltip(properties: &Properties) -> String {
    properties
        .iter()
        .map(|(key, value)| format!("{}: {}", key, display_value(value)))
        .collect::<Vec<_>>()
        .join(TOOLTIP_SEPARATOR)
}

/// Strings are shown bare, everything else as JSON text.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
