//! Rendering utilities for resolved policies (header lines, JSON, Markdown).

#![forbid(unsafe_code)]

mod header;
mod markdown;
mod model;

pub use header::{render_header_lines, render_json};
pub use markdown::render_markdown;
pub use model::{RenderableDirective, RenderableHeader, RenderableResolution};
