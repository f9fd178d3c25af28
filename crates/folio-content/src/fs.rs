//! Filesystem content source.

use std::path::{Component, Path, PathBuf};

use crate::error::FetchError;
use crate::source::ContentSource;

/// Backend identifier for log output.
const BACKEND: &str = "Fs";

/// Reads resources from a site directory on disk.
///
/// A target `content/faq.md` is read from `<root>/content/faq.md`. Errors
/// are reported the way a static file server would answer: missing files
/// are 404, unreadable ones 403, and targets escaping the root 400.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Whether `target` stays inside the root (no `..`, no absolute path).
fn is_contained(target: &Path) -> bool {
    target
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl ContentSource for FsSource {
    fn fetch(&self, target: &str) -> Result<String, FetchError> {
        let relative = Path::new(target);
        if !is_contained(relative) {
            return Err(FetchError::status(target, 400));
        }

        let path = self.root.join(relative);
        std::fs::read_to_string(&path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "Failed to read resource");
            match e.kind() {
                std::io::ErrorKind::NotFound => FetchError::status(target, 404),
                std::io::ErrorKind::PermissionDenied => FetchError::status(target, 403),
                _ => FetchError::network(target, e.to_string()),
            }
        })
    }

    fn name(&self) -> &'static str {
        BACKEND
    }
}
