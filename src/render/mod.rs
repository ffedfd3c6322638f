//! Rendering of visual graphs into embeddable documents

pub mod html;
pub mod options;

pub use html::{render_json, HtmlRenderer};
pub use options::RenderOptions;
