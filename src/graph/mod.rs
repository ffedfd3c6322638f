//! Result-to-graph projection.
//!
//! Turns property-graph query results into a renderable node/edge model.
//!
//! ```text
//! Vec<ResultRecord> ──► GraphProjector ──► VisualGraph ──► render
//!                             │
//!                        ColorPolicy (palette)
//! ```
//!
//! ## Modules
//!
//! - [`models`]: Visual model (Color, VisualNode, VisualEdge, VisualGraph)
//! - [`palette`]: Color-assignment policies (hashed, memoized random)
//! - [`projector`]: `GraphProjector`, deduplication and display identity

pub mod models;
pub mod palette;
pub mod projector;

pub use models::{Color, VisualEdge, VisualGraph, VisualNode, FALLBACK_LABEL};
pub use palette::{ColorPolicy, EdgeColoring, PaletteConfig, PaletteKind};
pub use projector::GraphProjector;
