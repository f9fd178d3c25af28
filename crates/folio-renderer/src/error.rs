//! Error types for rendering.

use folio_dom::DomError;

/// Error returned when rendered output cannot be turned into a tree.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Rendered HTML could not be parsed.
    #[error("rendered HTML could not be parsed: {0}")]
    Dom(#[from] DomError),
}
