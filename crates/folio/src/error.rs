//! CLI error types.

use folio_config::ConfigError;
use folio_page::PageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Page(#[from] PageError),

    #[error("failed to load section '{section}': {reason}")]
    Load { section: String, reason: String },

    /// Localized "enter a search term" message.
    #[error("{0}")]
    EmptyTerm(String),

    /// Localized "no results" message.
    #[error("{0}")]
    NoResults(String),
}
