//! Mock content source for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem or network
//! access. Every requested target is recorded so tests can assert on fetch
//! order.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::FetchError;
use crate::source::ContentSource;

/// In-memory content source.
///
/// # Example
///
/// ```ignore
/// use folio_content::{ContentSource, MockSource};
///
/// let source = MockSource::new()
///     .with_section("faq", "# FAQ")
///     .with_status("content/faq2.md", 500);
///
/// assert!(source.fetch("content/faq.md").is_ok());
/// assert_eq!(source.requests(), vec!["content/faq.md"]);
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    resources: RwLock<HashMap<String, String>>,
    failures: RwLock<HashMap<String, FetchError>>,
    requests: RwLock<Vec<String>>,
}

impl MockSource {
    /// Create an empty mock source. Unknown targets answer 404.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `content` for an exact target.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_resource(self, target: impl Into<String>, content: impl Into<String>) -> Self {
        self.resources
            .write()
            .unwrap()
            .insert(target.into(), content.into());
        self
    }

    /// Serve `content` for `content/<section>.md`.
    #[must_use]
    pub fn with_section(self, section: &str, content: impl Into<String>) -> Self {
        self.with_resource(format!("content/{section}.md"), content)
    }

    /// Answer `target` with a non-success status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_status(self, target: impl Into<String>, status: u16) -> Self {
        let target = target.into();
        let error = FetchError::status(target.clone(), status);
        self.failures.write().unwrap().insert(target, error);
        self
    }

    /// Fail `target` with a network error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_network_error(self, target: impl Into<String>, reason: impl Into<String>) -> Self {
        let target = target.into();
        let error = FetchError::network(target.clone(), reason);
        self.failures.write().unwrap().insert(target, error);
        self
    }

    /// Targets requested so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }
}

impl ContentSource for MockSource {
    fn fetch(&self, target: &str) -> Result<String, FetchError> {
        self.requests.write().unwrap().push(target.to_owned());

        if let Some(error) = self.failures.read().unwrap().get(target) {
            return Err(error.clone());
        }
        self.resources
            .read()
            .unwrap()
            .get(target)
            .cloned()
            .ok_or_else(|| FetchError::status(target, 404))
    }

    fn name(&self) -> &'static str {
        "Mock"
    }
}
