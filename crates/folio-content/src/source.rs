//! Content source trait.

use crate::error::FetchError;

/// Backend that serves raw resource text.
///
/// `target` is the request path relative to the site root, for example
/// `content/introduction.md`. Implementations report a missing resource as
/// [`FetchError::Status`] with 404 so every backend fails the same way a
/// static web server would.
pub trait ContentSource: Send + Sync {
    /// Fetch the full text of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for non-success answers and
    /// [`FetchError::Network`] when the request itself fails.
    fn fetch(&self, target: &str) -> Result<String, FetchError>;

    /// Short backend name for log output.
    fn name(&self) -> &'static str;
}
