//! Page and network layout options for the HTML renderer.
//!
//! The vis-network options are kept as an opaque JSON document: they only
//! change how the graph looks, never what it contains, so they are passed to
//! the browser verbatim.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Renderer configuration (`render` section of config.yaml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// CSS height of the graph canvas
    pub height: String,
    /// CSS width of the graph canvas
    pub width: String,
    pub bgcolor: String,
    pub font_color: String,
    /// Optional heading shown above the canvas
    pub heading: Option<String>,
    /// vis-network options object
    pub network: serde_json::Value,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            height: "800px".into(),
            width: "100%".into(),
            bgcolor: "#111111".into(),
            font_color: "white".into(),
            heading: None,
            network: default_network_options(),
        }
    }
}

/// Dot-shaped nodes, dynamic edge smoothing, forceAtlas2Based physics.
pub fn default_network_options() -> serde_json::Value {
    json!({
        "layout": { "improvedLayout": true },
        "nodes": {
            "shape": "dot",
            "size": 20,
            "font": { "size": 16, "color": "#ffffff" },
            "borderWidth": 2
        },
        "edges": {
            "color": { "color": "#999999" },
            "width": 2,
            "smooth": {
                "type": "dynamic",
                "forceDirection": "none",
                "roundness": 0.3
            }
        },
        "physics": {
            "forceAtlas2Based": {
                "gravitationalConstant": -80,
                "centralGravity": 0.005,
                "springLength": 200,
                "springConstant": 0.18
            },
            "maxVelocity": 75,
            "solver": "forceAtlas2Based",
            "timestep": 0.4,
            "stabilization": { "iterations": 200 }
        },
        "interaction": { "hover": true, "tooltipDelay": 200 }
    })
}
