//! Rendering utilities for terminals and CI surfaces (Markdown, GitHub annotations).
//!
//! Renderers take the [`RenderableReport`] view model, never the wire types, so the
//! report schema can evolve without touching output formats.

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableCheck, RenderableCheckStatus, RenderableData, RenderableHost, RenderableHostStatus,
    RenderableMismatch, RenderableReport, RenderableVerdictStatus,
};
pub use text::render_text;
