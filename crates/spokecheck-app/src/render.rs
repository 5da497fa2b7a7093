//! Render use cases: Markdown and HTML from in-memory reports.

use spokecheck_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    spokecheck_render::render_markdown(report)
}

pub fn render_html(report: &RenderableReport) -> String {
    spokecheck_render::render_html(report)
}
