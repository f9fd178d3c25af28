//! Error types for HTML parsing.

/// Error while parsing rendered HTML into a tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DomError {
    /// XML tokenizer error.
    #[error("HTML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Text could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}
