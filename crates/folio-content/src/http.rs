//! HTTP content source.

use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use ureq::Agent;

use crate::error::FetchError;
use crate::source::ContentSource;

/// Backend identifier for log output.
const BACKEND: &str = "Http";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Characters escaped inside a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Fetches resources from a remote site with a blocking `ureq` agent.
pub struct HttpSource {
    agent: Agent,
    base_url: String,
}

impl HttpSource {
    /// Create a source for the site at `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a source with an explicit request timeout.
    #[must_use]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Full URL for a target. Each path segment is percent-encoded.
    #[must_use]
    pub fn url_for(&self, target: &str) -> String {
        let path = target
            .trim_start_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{path}", self.base_url)
    }
}

impl ContentSource for HttpSource {
    fn fetch(&self, target: &str) -> Result<String, FetchError> {
        let url = self.url_for(target);

        let response = self
            .agent
            .get(&url)
            .header("Accept", "text/markdown, text/plain, */*")
            .call()
            .map_err(|e| FetchError::network(target, e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            tracing::debug!(url = %url, status, "Resource request failed");
            return Err(FetchError::status(target, status));
        }

        let mut body = response.into_body();
        body.read_to_string()
            .map_err(|e| FetchError::network(target, e.to_string()))
    }

    fn name(&self) -> &'static str {
        BACKEND
    }
}
