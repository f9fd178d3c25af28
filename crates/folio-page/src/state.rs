//! Explicit page state.

use std::collections::BTreeMap;

use folio_dom::Element;

/// `id` of the element holding the current section's content.
pub const CONTENT_CONTAINER_ID: &str = "content-container";

/// Navigation entry as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Section loaded when the entry is clicked.
    pub section: String,
    /// Display label.
    pub label: String,
    /// Whether the entry carries the active marker.
    pub active: bool,
}

impl NavEntry {
    /// Inactive entry.
    #[must_use]
    pub fn new(section: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            label: label.into(),
            active: false,
        }
    }
}

/// Identifies one load request. Only the most recently issued ticket may
/// commit its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Mutable page state: content container, navigation markers, hub link
/// interceptions and the load generation.
#[derive(Debug, Clone)]
pub struct UiState {
    container: Element,
    nav: Vec<NavEntry>,
    current_section: Option<String>,
    intercepts: BTreeMap<String, String>,
    generation: u64,
}

impl UiState {
    /// Empty page with the given navigation entries, none active.
    #[must_use]
    pub fn new(nav: Vec<NavEntry>) -> Self {
        Self {
            container: Element::new("div").with_attr("id", CONTENT_CONTAINER_ID),
            nav,
            current_section: None,
            intercepts: BTreeMap::new(),
            generation: 0,
        }
    }

    /// The content container.
    #[must_use]
    pub fn container(&self) -> &Element {
        &self.container
    }

    pub(crate) fn container_mut(&mut self) -> &mut Element {
        &mut self.container
    }

    /// Navigation entries in display order.
    #[must_use]
    pub fn nav(&self) -> &[NavEntry] {
        &self.nav
    }

    /// Section of the first active navigation entry.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.nav
            .iter()
            .find(|entry| entry.active)
            .map(|entry| entry.section.as_str())
    }

    /// Section currently rendered in the container, if any.
    #[must_use]
    pub fn current_section(&self) -> Option<&str> {
        self.current_section.as_deref()
    }

    /// Section a click on `href` loads in place, if the link is intercepted.
    #[must_use]
    pub fn intercepted(&self, href: &str) -> Option<&str> {
        self.intercepts.get(href).map(String::as_str)
    }

    /// Whether a navigation entry exists for `section`.
    #[must_use]
    pub fn has_nav_entry(&self, section: &str) -> bool {
        self.nav.iter().any(|entry| entry.section == section)
    }

    /// Whether `ticket` is the most recently issued one.
    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    pub(crate) fn issue_ticket(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Replace the container's children with `content`.
    pub(crate) fn show_content(&mut self, section: &str, content: Element) {
        self.container.children = vec![content.into()];
        self.current_section = Some(section.to_owned());
    }

    /// Replace the container's children with an error element. Navigation
    /// markers are left as they are.
    pub(crate) fn show_error(&mut self, error: Element) {
        self.container.children = vec![error.into()];
        self.current_section = None;
        self.intercepts.clear();
    }

    /// Deactivate every entry, then activate the one for `section`.
    ///
    /// Returns whether a matching entry was found.
    pub(crate) fn activate(&mut self, section: &str) -> bool {
        let mut found = false;
        for entry in &mut self.nav {
            entry.active = !found && entry.section == section;
            found |= entry.active;
        }
        found
    }

    pub(crate) fn set_intercepts(&mut self, intercepts: BTreeMap<String, String>) {
        self.intercepts = intercepts;
    }
}
