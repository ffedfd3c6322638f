//! Standalone HTML rendering of a visual graph (vis-network).

use super::options::RenderOptions;
use crate::graph::VisualGraph;
use anyhow::{Context, Result};
use std::collections::HashMap;

const TEMPLATE: &str = include_str!("template.html");

const DEFAULT_TITLE: &str = "Graph";

/// Renders a [`VisualGraph`] into a self-contained HTML document.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render `graph` to HTML markup.
    pub fn render(&self, graph: &VisualGraph) -> Result<String> {
        let nodes: Vec<_> = graph.nodes().collect();
        let nodes_json = script_json(&nodes).context("Failed to serialize nodes")?;
        let edges_json = script_json(graph.edges()).context("Failed to serialize edges")?;
        let options_json =
            script_json(&self.options.network).context("Failed to serialize network options")?;

        let title = self.options.heading.as_deref().unwrap_or(DEFAULT_TITLE);
        let heading = match &self.options.heading {
            Some(text) => format!("<h1>{}</h1>", escape_html(text)),
            None => String::new(),
        };

        let mut values: HashMap<&str, String> = HashMap::new();
        values.insert("TITLE", escape_html(title));
        values.insert("HEADING", heading);
        values.insert("HEIGHT", escape_css(&self.options.height));
        values.insert("WIDTH", escape_css(&self.options.width));
        values.insert("BGCOLOR", escape_css(&self.options.bgcolor));
        values.insert("FONT_COLOR", escape_css(&self.options.font_color));
        values.insert("NODE_COUNT", graph.node_count().to_string());
        values.insert("EDGE_COUNT", graph.edge_count().to_string());
        values.insert("NODES_JSON", nodes_json);
        values.insert("EDGES_JSON", edges_json);
        values.insert("OPTIONS_JSON", options_json);

        let html = fill_template(TEMPLATE, &values);
        tracing::debug!(bytes = html.len(), "Rendered graph HTML");
        Ok(html)
    }
}

/// Pretty JSON of the visual graph (`{"nodes": [...], "edges": [...]}`).
pub fn render_json(graph: &VisualGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// JSON safe to embed in a `<script>` element: `</` can never close the tag.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Substitute every `{{NAME}}` placeholder in a single pass, so substituted
/// text is never scanned for placeholders again. Unknown placeholders are
/// left as-is.
fn fill_template(template: &str, values: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match values.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// CSS values come from config; strip anything that could end the declaration.
fn escape_css(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\''))
        .collect()
}
