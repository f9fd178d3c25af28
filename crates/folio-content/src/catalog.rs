//! Section composition rules.

use std::collections::BTreeMap;

/// Known sections and how each is composed.
///
/// Hub, sub-page and generic sections all fetch the resource named after
/// the identifier. The distinction matters to the page (hub links are
/// intercepted), not to fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalog {
    composites: BTreeMap<String, Vec<String>>,
    hub: Option<String>,
    sub_pages: Vec<String>,
}

impl Default for SectionCatalog {
    /// Audit guide layout: `faq` + `faq2`, the `audit_checkpoints` hub and
    /// its six sub-pages.
    fn default() -> Self {
        Self::empty()
            .with_composite("faq", ["faq", "faq2"])
            .with_hub("audit_checkpoints")
            .with_sub_pages([
                "latest_checkpoints",
                "latest_technical",
                "latest_additional",
                "security_iso27001",
                "gov_quality_manual",
                "data_quality_assessment",
            ])
    }
}

impl SectionCatalog {
    /// Catalog where every identifier is generic.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            composites: BTreeMap::new(),
            hub: None,
            sub_pages: Vec::new(),
        }
    }

    /// Register a composite section built from `parts` in order.
    #[must_use]
    pub fn with_composite<I, S>(mut self, section: impl Into<String>, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composites
            .insert(section.into(), parts.into_iter().map(Into::into).collect());
        self
    }

    /// Set the hub section.
    #[must_use]
    pub fn with_hub(mut self, hub: impl Into<String>) -> Self {
        self.hub = Some(hub.into());
        self
    }

    /// Set the sub-pages reachable from the hub.
    #[must_use]
    pub fn with_sub_pages<I, S>(mut self, sub_pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_pages = sub_pages.into_iter().map(Into::into).collect();
        self
    }

    /// Resource names fetched for `section`, in concatenation order.
    #[must_use]
    pub fn resources<'a>(&'a self, section: &'a str) -> Vec<&'a str> {
        match self.composites.get(section) {
            Some(parts) => parts.iter().map(String::as_str).collect(),
            None => vec![section],
        }
    }

    /// Hub section, if configured.
    #[must_use]
    pub fn hub(&self) -> Option<&str> {
        self.hub.as_deref()
    }

    /// Sub-pages reachable from the hub.
    #[must_use]
    pub fn sub_pages(&self) -> &[String] {
        &self.sub_pages
    }

    /// Whether `section` is one of the hub's sub-pages.
    #[must_use]
    pub fn is_sub_page(&self, section: &str) -> bool {
        self.sub_pages.iter().any(|s| s == section)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_layout() {
        let catalog = SectionCatalog::default();
        assert_eq!(catalog.hub(), Some("audit_checkpoints"));
        assert!(catalog.is_sub_page("latest_technical"));
        assert!(!catalog.is_sub_page("audit_checkpoints"));
        assert!(!catalog.is_sub_page("introduction"));
    }

    #[test]
    fn test_resources_outlive_borrowed_id() {
        let catalog = SectionCatalog::default();
        let id = String::from("introduction");
        let resources = catalog.resources(&id);
        assert_eq!(resources, vec!["introduction"]);
    }

    #[test]
    fn test_resources() {
        let catalog = SectionCatalog::default();
        assert_eq!(catalog.resources("faq"), vec!["faq", "faq2"]);
        assert_eq!(catalog.resources("audit_checkpoints"), vec!["audit_checkpoints"]);
        assert_eq!(catalog.resources("gov_quality_manual"), vec!["gov_quality_manual"]);
        assert_eq!(catalog.resources("anything"), vec!["anything"]);
    }

    #[test]
    fn test_empty_catalog_is_all_generic() {
        let catalog = SectionCatalog::empty();
        assert_eq!(catalog.resources("faq"), vec!["faq"]);
        assert_eq!(catalog.hub(), None);
        assert!(catalog.sub_pages().is_empty());
    }
}
