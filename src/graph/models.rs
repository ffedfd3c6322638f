//! Visual graph models.
//!
//! The rendering-ready projection of a query result:
//! - [`Color`]: 24-bit RGB color, shown as `#rrggbb`
//! - [`VisualNode`] / [`VisualEdge`]: one drawable node / edge
//! - [`VisualGraph`]: nodes keyed by id in first-seen order, plus an ordered
//!   edge list (duplicates allowed)

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Literal used as effective label for nodes without any label
pub const FALLBACK_LABEL: &str = "Node";

/// Separator between `key: value` lines of a node tooltip
pub const TOOLTIP_SEPARATOR: &str = "\n";

// ============================================================================
// Color
// ============================================================================

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const MAX: u32 = 0xFF_FF_FF;

    /// Build a color, discarding anything above the low 24 bits.
    pub fn new(rgb: u32) -> Self {
        Self(rgb & Self::MAX)
    }

    pub fn rgb(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Nodes and edges
// ============================================================================

/// A drawable node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    /// Same as the source node id
    pub id: String,
    /// Display label
    pub label: String,
    /// Tooltip text (`key: value` lines)
    pub title: String,
    pub color: Color,
    /// Effective type label of the source node
    pub group: String,
}

/// A drawable directed edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualEdge {
    pub from: String,
    pub to: String,
    /// Relationship type
    pub label: String,
    pub color: Color,
}

// ============================================================================
// Graph
// ============================================================================

/// The projected graph handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisualGraph {
    #[serde(serialize_with = "serialize_nodes")]
    nodes: IndexMap<String, VisualNode>,
    edges: Vec<VisualEdge>,
}

fn serialize_nodes<S: Serializer>(
    nodes: &IndexMap<String, VisualNode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(nodes.values())
}

impl VisualGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same id already exists.
    ///
    /// Returns `false` (and leaves the existing node untouched) for a
    /// duplicate id.
    pub fn add_node(&mut self, node: VisualNode) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Append an edge. Edges are never deduplicated.
    pub fn add_edge(&mut self, edge: VisualEdge) {
        self.edges.push(edge);
    }

    pub fn node(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.get(id)
    }

    /// Nodes in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &VisualNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[VisualEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, label: &str) -> VisualNode {
        VisualNode {
            id: id.to_string(),
            label: label.to_string(),
            title: String::new(),
            color: Color::new(0x445566),
            group: FALLBACK_LABEL.to_string(),
        }
    }

    #[test]
    fn test_color_display_is_zero_padded_hex() {
        assert_eq!(Color::new(0x0000ff).to_string(), "#0000ff");
        assert_eq!(Color::new(0xABCDEF).to_string(), "#abcdef");
        // Only the low 24 bits are kept
        assert_eq!(Color::new(0x1_00_00_01).to_string(), "#000001");
    }

    #[test]
    fn test_add_node_keeps_first() {
        let mut graph = VisualGraph::new();
        assert!(graph.add_node(node("1", "first")));
        assert!(!graph.add_node(node("1", "second")));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("1").unwrap().label, "first");
    }

    #[test]
    fn test_serializes_nodes_as_list() {
        let mut graph = VisualGraph::new();
        graph.add_node(node("b", "B"));
        graph.add_node(node("a", "A"));
        graph.add_edge(VisualEdge {
            from: "b".into(),
            to: "a".into(),
            label: "LINKS".into(),
            color: Color::new(0x666666),
        });

        let json = serde_json::to_value(&graph).unwrap();
        let nodes = json["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["id"], "b");
        assert_eq!(nodes[1]["id"], "a");
        assert_eq!(nodes[0]["color"], "#445566");
        assert_eq!(json["edges"][0]["from"], "b");
        assert_eq!(json["edges"][0]["label"], "LINKS");
        assert_eq!(json["edges"][0]["color"], "#666666");
    }
}
