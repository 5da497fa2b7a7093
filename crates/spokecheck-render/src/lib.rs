//! Rendering utilities for human-facing surfaces (Markdown, HTML).
//!
//! Renderers only see the `Renderable*` model; the app converts reports into it.

#![forbid(unsafe_code)]

mod html;
mod markdown;
mod model;

pub use html::render_html;
pub use markdown::render_markdown;
pub use model::{
    RenderableFinding, RenderableReport, RenderableSeverity, RenderableSummary, RenderableSymbol,
    RenderableTarget, RenderableVerdictStatus,
};
