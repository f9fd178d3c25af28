//! Fetch error type.

/// Failure to retrieve a resource.
///
/// The `Display` output is the reason shown to readers when a section
/// cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The source answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Status {
        /// Requested target (e.g., `content/faq.md`).
        target: String,
        /// Status code.
        status: u16,
    },

    /// The request did not complete.
    #[error("network error: {reason}")]
    Network {
        /// Requested target.
        target: String,
        /// Transport failure description.
        reason: String,
    },
}

impl FetchError {
    /// Create a status error.
    #[must_use]
    pub fn status(target: impl Into<String>, status: u16) -> Self {
        Self::Status {
            target: target.into(),
            status,
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn network(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Target the failed request was for.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Status { target, .. } | Self::Network { target, .. } => target,
        }
    }

    /// Status code, if the source answered.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = FetchError::status("content/faq.md", 404);
        assert_eq!(err.to_string(), "HTTP error! status: 404");
        assert_eq!(err.target(), "content/faq.md");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_network_display() {
        let err = FetchError::network("content/faq.md", "connection refused");
        assert_eq!(err.to_string(), "network error: connection refused");
        assert_eq!(err.status_code(), None);
    }
}
