//! Query result models
//!
//! Records returned by the [`QueryExecutor`](super::QueryExecutor) are decoded
//! once into these types. Every column value is resolved up front into a
//! [`ResultValue`] variant so that downstream consumers never have to probe a
//! value to find out whether it carries graph structure.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered property mapping (insertion order is the iteration order)
pub type Properties = IndexMap<String, serde_json::Value>;

// ============================================================================
// Source graph entities
// ============================================================================

/// A node as returned by the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    /// Identifier, unique within one query execution
    pub id: String,
    /// Categorical type tags; the first one is the effective type
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Properties,
}

impl SourceNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            labels: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A directed relationship between two source nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRelationship {
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Id of the start node
    pub start: String,
    /// Id of the end node
    pub end: String,
    #[serde(default)]
    pub properties: Properties,
}

impl SourceRelationship {
    pub fn new(rel_type: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            rel_type: rel_type.into(),
            start: start.into(),
            end: end.into(),
            properties: Properties::new(),
        }
    }
}

/// The node and relationship collections carried by a graph-bearing value
/// (typically a returned path).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphFragment {
    #[serde(default)]
    pub nodes: Vec<SourceNode>,
    #[serde(default)]
    pub relationships: Vec<SourceRelationship>,
}

impl GraphFragment {
    pub fn new(nodes: Vec<SourceNode>, relationships: Vec<SourceRelationship>) -> Self {
        Self {
            nodes,
            relationships,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// A single column value of a result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResultValue {
    /// Numbers, strings, booleans, null and lists
    Scalar(serde_json::Value),
    /// A plain key/value mapping with no graph structure
    PropertyMap(Properties),
    /// A value exposing nodes and relationships
    Graph(GraphFragment),
}

impl ResultValue {
    /// Classify a plain JSON value. Objects become property maps, everything
    /// else is a scalar.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => ResultValue::PropertyMap(map.into_iter().collect()),
            other => ResultValue::Scalar(other),
        }
    }

    pub fn as_graph(&self) -> Option<&GraphFragment> {
        match self {
            ResultValue::Graph(fragment) => Some(fragment),
            _ => None,
        }
    }
}

impl From<GraphFragment> for ResultValue {
    fn from(fragment: GraphFragment) -> Self {
        ResultValue::Graph(fragment)
    }
}

/// One row of a query result: column name to value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRecord {
    values: IndexMap<String, ResultValue>,
}

impl ResultRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Re-inserting an existing column replaces its value
    /// but keeps its original position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<ResultValue>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<ResultValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&ResultValue> {
        self.values.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Values in column order
    pub fn values(&self) -> impl Iterator<Item = &ResultValue> {
        self.values.values()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, ResultValue)> for ResultRecord {
    fn from_iter<I: IntoIterator<Item = (String, ResultValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
