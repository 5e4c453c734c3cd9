//! Render use cases: terminal text, Markdown, and GitHub annotations from in-memory reports.

use hostcheck_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    hostcheck_render::render_markdown(report)
}

pub fn render_text(report: &RenderableReport) -> String {
    hostcheck_render::render_text(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    hostcheck_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
