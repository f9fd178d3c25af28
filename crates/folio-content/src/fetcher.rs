//! Section loading.

use std::sync::Arc;

use crate::catalog::SectionCatalog;
use crate::error::FetchError;
use crate::source::ContentSource;

/// Default resource directory under the site root.
const DEFAULT_DIR: &str = "content";

/// Separator placed between the parts of a composite section.
const PART_SEPARATOR: &str = "\n\n";

/// Markdown assembled for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionText {
    /// Section identifier.
    pub section: String,
    /// Markdown source.
    pub markdown: String,
}

/// Remove the first line of `text` if it is a heading.
///
/// Only a line starting with `#` and terminated by a newline is removed;
/// anything else is returned unchanged.
#[must_use]
pub fn strip_leading_heading(text: &str) -> &str {
    if !text.starts_with('#') {
        return text;
    }
    match text.find('\n') {
        Some(end) => &text[end + 1..],
        None => text,
    }
}

/// Resolves section identifiers to markdown through a [`ContentSource`].
pub struct ContentFetcher {
    source: Arc<dyn ContentSource>,
    catalog: SectionCatalog,
    dir: String,
}

impl ContentFetcher {
    /// Create a fetcher reading from `source` under `content/`.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, catalog: SectionCatalog) -> Self {
        Self {
            source,
            catalog,
            dir: DEFAULT_DIR.to_owned(),
        }
    }

    /// Use a different resource directory.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Section composition rules.
    #[must_use]
    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    /// Request target for a resource name (`content/<name>.md`).
    #[must_use]
    pub fn target_for(&self, resource: &str) -> String {
        format!("{}/{resource}.md", self.dir)
    }

    /// Fetch the single resource named `resource`, ignoring composition rules.
    ///
    /// # Errors
    ///
    /// Returns the source's [`FetchError`].
    pub fn fetch_resource(&self, resource: &str) -> Result<String, FetchError> {
        let target = self.target_for(resource);
        tracing::debug!(source = self.source.name(), target = %target, "Fetching resource");
        self.source.fetch(&target)
    }

    /// Load the markdown for `section`.
    ///
    /// Composite sections fetch their parts one after another, in order, and
    /// join them with a blank line; every part after the first has its leading
    /// heading line removed. The first failing part fails the whole section.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of the first resource that could not be fetched.
    pub fn load_section(&self, section: &str) -> Result<SectionText, FetchError> {
        let mut markdown = String::new();
        for (index, resource) in self.catalog.resources(section).into_iter().enumerate() {
            let text = self.fetch_resource(resource)?;
            if index == 0 {
                markdown = text;
            } else {
                markdown.push_str(PART_SEPARATOR);
                markdown.push_str(strip_leading_heading(&text));
            }
        }

        Ok(SectionText {
            section: section.to_owned(),
            markdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::MockSource;

    fn fetcher(source: &Arc<MockSource>) -> ContentFetcher {
        ContentFetcher::new(
            Arc::clone(source) as Arc<dyn ContentSource>,
            SectionCatalog::default(),
        )
    }

    #[test]
    fn test_strip_leading_heading() {
        assert_eq!(strip_leading_heading("# Title\nBody"), "Body");
        assert_eq!(strip_leading_heading("## FAQ (cont.)\n\nQ1"), "\nQ1");
        assert_eq!(strip_leading_heading("Body only"), "Body only");
        assert_eq!(strip_leading_heading("Intro\n# Later heading\n"), "Intro\n# Later heading\n");
        assert_eq!(strip_leading_heading("# Only a heading"), "# Only a heading");
        assert_eq!(strip_leading_heading(""), "");
    }

    #[test]
    fn test_faq_strips_second_heading() {
        let source = Arc::new(
            MockSource::new()
                .with_section("faq", "# FAQ\n\n## Q1\nA1")
                .with_section("faq2", "# FAQ\n## Q2\nA2"),
        );
        let text = fetcher(&source).load_section("faq").unwrap();

        assert_eq!(text.section, "faq");
        assert_eq!(text.markdown, "# FAQ\n\n## Q1\nA1\n\n## Q2\nA2");
        assert_eq!(source.requests(), vec!["content/faq.md", "content/faq2.md"]);
    }

    #[test]
    fn test_faq_keeps_second_part_without_heading() {
        let source = Arc::new(
            MockSource::new()
                .with_section("faq", "# FAQ\n## Q1")
                .with_section("faq2", "Q2\nA2"),
        );
        let text = fetcher(&source).load_section("faq").unwrap();
        assert_eq!(text.markdown, "# FAQ\n## Q1\n\nQ2\nA2");
    }

    #[test]
    fn test_faq_first_part_failure_skips_second() {
        let source = Arc::new(
            MockSource::new()
                .with_status("content/faq.md", 500)
                .with_section("faq2", "## Q2"),
        );
        let err = fetcher(&source).load_section("faq").unwrap_err();

        assert_eq!(err, FetchError::status("content/faq.md", 500));
        assert_eq!(source.requests(), vec!["content/faq.md"]);
    }

    #[test]
    fn test_faq_second_part_failure_fails_section() {
        let source = Arc::new(MockSource::new().with_section("faq", "# FAQ"));
        let err = fetcher(&source).load_section("faq").unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.target(), "content/faq2.md");
    }

    #[test]
    fn test_hub_fetches_only_main_page() {
        let source = Arc::new(MockSource::new().with_section("audit_checkpoints", "# Hub"));
        let text = fetcher(&source).load_section("audit_checkpoints").unwrap();
        assert_eq!(text.markdown, "# Hub");
        assert_eq!(source.requests(), vec!["content/audit_checkpoints.md"]);
    }

    #[test]
    fn test_sub_pages_and_unknown_ids_fetch_same_named_resource() {
        let ids = [
            "latest_checkpoints",
            "latest_technical",
            "latest_additional",
            "security_iso27001",
            "gov_quality_manual",
            "data_quality_assessment",
            "some_unknown_section",
        ];
        let source = Arc::new(MockSource::new());
        let fetcher = fetcher(&source);
        for id in ids {
            let _ = fetcher.load_section(id);
        }

        let expected: Vec<String> = ids.iter().map(|id| format!("content/{id}.md")).collect();
        assert_eq!(source.requests(), expected);
    }

    #[test]
    fn test_network_error_propagates() {
        let source = Arc::new(
            MockSource::new().with_network_error("content/introduction.md", "connection reset"),
        );
        let err = fetcher(&source).load_section("introduction").unwrap_err();
        assert_eq!(
            err,
            FetchError::network("content/introduction.md", "connection reset")
        );
    }

    #[test]
    fn test_custom_dir() {
        let source = Arc::new(MockSource::new().with_resource("pages/intro.md", "hi"));
        let fetcher = fetcher(&source).with_dir("pages");
        assert_eq!(fetcher.target_for("intro"), "pages/intro.md");
        assert_eq!(fetcher.fetch_resource("intro").unwrap(), "hi");
    }

    #[test]
    fn test_three_part_composite() {
        let source = Arc::new(
            MockSource::new()
                .with_section("a", "# A\nx")
                .with_section("b", "# B\ny")
                .with_section("c", "z"),
        );
        let fetcher = ContentFetcher::new(
            Arc::clone(&source) as Arc<dyn ContentSource>,
            SectionCatalog::empty().with_composite("all", ["a", "b", "c"]),
        );
        assert_eq!(fetcher.load_section("all").unwrap().markdown, "# A\nx\n\ny\n\nz");
    }
}
