//! Color-assignment policies.
//!
//! Node colors are derived from the node's effective label, edge colors from
//! the relationship. Two node policies exist:
//!
//! - [`HashedPalette`]: color derived from a SHA-256 of the label. No memo,
//!   identical across runs and processes.
//! - [`RandomPalette`]: color drawn on first sighting of a label and memoized
//!   for the remainder of the pass.
//!
//! Edges are colored per [`EdgeColoring`]: by default every edge gets an
//! independent random draw; `ByType` hashes the relationship type instead.
//!
//! Policies are built fresh for every projection pass, so memoized colors
//! never leak from one query to the next.

use super::models::Color;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Lowest node color; keeps nodes visible on a dark background
pub const NODE_COLOR_FLOOR: u32 = 0x44_44_44;

/// Lowest edge color
pub const EDGE_COLOR_FLOOR: u32 = 0x66_66_66;

/// Source of uniformly distributed `u32` draws
pub type RandomSource = Box<dyn FnMut() -> u32 + Send>;

/// Strategy assigning colors during one projection pass.
pub trait ColorPolicy {
    /// Color for a node whose effective label is `label`
    fn node_color(&mut self, label: &str) -> Color;

    /// Color for one edge of type `rel_type`
    fn edge_color(&mut self, rel_type: &str) -> Color;
}

/// Map `value` into `floor..=0xFFFFFF`.
fn fold_into_range(value: u32, floor: u32) -> Color {
    let span = Color::MAX - floor + 1;
    Color::new(floor + value % span)
}

/// Deterministic color for `key`, at or above `floor`.
pub fn hashed_color(key: &str, floor: u32) -> Color {
    let digest = Sha256::digest(key.as_bytes());
    let value = u32::from_be_bytes([0, digest[0], digest[1], digest[2]]);
    fold_into_range(value, floor)
}

fn thread_rng_source() -> RandomSource {
    Box::new(rand::random::<u32>)
}

// ============================================================================
// Configuration
// ============================================================================

/// Node color policy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteKind {
    #[default]
    Hashed,
    Random,
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hashed => write!(f, "hashed"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl FromStr for PaletteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hashed" | "hash" => Ok(Self::Hashed),
            "random" => Ok(Self::Random),
            other => Err(format!(
                "unknown palette '{}' (expected hashed|random)",
                other
            )),
        }
    }
}

/// Edge color policy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeColoring {
    /// Independent random draw for every edge
    #[default]
    PerEdge,
    /// Hashed from the relationship type, so same-type edges match
    ByType,
}

impl FromStr for EdgeColoring {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per_edge" | "per-edge" => Ok(Self::PerEdge),
            "by_type" | "by-type" => Ok(Self::ByType),
            other => Err(format!(
                "unknown edge coloring '{}' (expected per_edge|by_type)",
                other
            )),
        }
    }
}

/// Palette settings; [`PaletteConfig::build`] yields a fresh policy per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub palette: PaletteKind,
    pub edge_coloring: EdgeColoring,
}

impl PaletteConfig {
    pub fn build(&self) -> Box<dyn ColorPolicy + Send> {
        match self.palette {
            PaletteKind::Hashed => Box::new(HashedPalette::new(self.edge_coloring)),
            PaletteKind::Random => Box::new(RandomPalette::new(self.edge_coloring)),
        }
    }
}

fn edge_color_for(mode: EdgeColoring, rel_type: &str, source: &mut RandomSource) -> Color {
    match mode {
        EdgeColoring::PerEdge => fold_into_range(source(), EDGE_COLOR_FLOOR),
        EdgeColoring::ByType => hashed_color(rel_type, EDGE_COLOR_FLOOR),
    }
}

// ============================================================================
// Policies
// ============================================================================

/// Label-hash node colors.
pub struct HashedPalette {
    edges: EdgeColoring,
    source: RandomSource,
}

impl HashedPalette {
    pub fn new(edges: EdgeColoring) -> Self {
        Self::with_source(edges, thread_rng_source())
    }

    /// Use `source` for per-edge draws
    pub fn with_source(edges: EdgeColoring, source: RandomSource) -> Self {
        Self { edges, source }
    }
}

impl ColorPolicy for HashedPalette {
    fn node_color(&mut self, label: &str) -> Color {
        hashed_color(label, NODE_COLOR_FLOOR)
    }

    fn edge_color(&mut self, rel_type: &str) -> Color {
        edge_color_for(self.edges, rel_type, &mut self.source)
    }
}

/// Random node colors, memoized per label for one pass.
pub struct RandomPalette {
    edges: EdgeColoring,
    source: RandomSource,
    memo: HashMap<String, Color>,
}

impl RandomPalette {
    pub fn new(edges: EdgeColoring) -> Self {
        Self::with_source(edges, thread_rng_source())
    }

    /// Draw node and edge colors from `source`
    pub fn with_source(edges: EdgeColoring, source: RandomSource) -> Self {
        Self {
            edges,
            source,
            memo: HashMap::new(),
        }
    }

    /// Number of labels that have been assigned a color
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }
}

impl ColorPolicy for RandomPalette {
    fn node_color(&mut self, label: &str) -> Color {
        if let Some(color) = self.memo.get(label) {
            return *color;
        }
        let color = fold_into_range((self.source)(), NODE_COLOR_FLOOR);
        self.memo.insert(label.to_string(), color);
        color
    }

    fn edge_color(&mut self, rel_type: &str) -> Color {
        edge_color_for(self.edges, rel_type, &mut self.source)
    }
}
