//! Markdown rendering for Folio pages.
//!
//! [`MarkdownRenderer`] turns markdown into an HTML string with
//! `pulldown-cmark`. [`ContentRenderer`] parses that string into a
//! [`folio_dom::Element`] wrapper and runs the post-render hooks:
//!
//! - diagram preparation through a [`DiagramHook`] (see [`MermaidHook`])
//! - separators before every second-level heading after the first, for
//!   sections registered with [`ContentRenderer::with_separated_sections`]
//!
//! Hooks run as soon as the tree is built; nothing is deferred.

mod content;
mod diagrams;
mod error;
mod markdown;

pub use content::{
    CONTENT_WRAPPER_CLASS, ContentRenderer, RenderedContent, SEPARATOR_CLASS,
};
pub use diagrams::{DIAGRAM_CLASS, DiagramHook, MermaidHook};
pub use error::RenderError;
pub use markdown::{MarkdownRenderer, RenderOptions};
