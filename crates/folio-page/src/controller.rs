//! Page controller.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use folio_config::{Config, Locale};
use folio_content::{
    ContentFetcher, ContentSource, FetchError, FsSource, HttpSource, SectionCatalog, SectionText,
};
use folio_dom::HtmlSerializer;
use folio_renderer::{ContentRenderer, MarkdownRenderer, MermaidHook, RenderOptions};

use crate::links::LinkPostProcessor;
use crate::messages::Messages;
use crate::notify::{LogNotifier, Notifier};
use crate::search::{SearchError, TermMatcher, clear_highlights, highlight};
use crate::state::{LoadTicket, NavEntry, UiState};

/// Controller error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// Navigation click on a section without an entry.
    #[error("no navigation entry for section '{0}'")]
    UnknownNavEntry(String),

    /// Click on a link that is not in the current content.
    #[error("no link with href '{0}' in the current content")]
    UnknownLink(String),
}

/// Result of a section load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Section was rendered into the container.
    Rendered { section: String },
    /// Section could not be loaded; the container shows an inline error.
    Failed { section: String, reason: String },
    /// A newer load was issued before this one completed; nothing changed.
    Superseded { section: String },
}

impl LoadOutcome {
    /// Whether the section was rendered.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// What happened when a link in the content was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Intercepted hub link; the sub-page was loaded in place.
    Loaded(LoadOutcome),
    /// External link, opened in a new browsing context.
    OpenInNewContext(String),
    /// Ordinary link, followed by the browser.
    Follow(String),
}

/// Fetched section waiting to be committed.
#[derive(Debug)]
pub struct PendingLoad {
    ticket: LoadTicket,
    section: String,
    result: Result<SectionText, FetchError>,
}

impl PendingLoad {
    /// Section being loaded.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Ticket issued for this load.
    #[must_use]
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }
}

/// Drives the page: loads sections, keeps navigation markers in sync,
/// intercepts hub links, marks external links and runs search.
pub struct PageController {
    fetcher: ContentFetcher,
    renderer: ContentRenderer,
    links: LinkPostProcessor,
    messages: Messages,
    notifier: Arc<dyn Notifier>,
    default_section: String,
    search_order: Vec<String>,
    serializer: HtmlSerializer,
    state: UiState,
}

impl PageController {
    /// Build a controller reading from the source named by `config`:
    /// [`HttpSource`] when a base URL is set, otherwise [`FsSource`].
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let content = &config.content_resolved;
        let source: Arc<dyn ContentSource> = match &content.base_url {
            Some(base_url) => Arc::new(HttpSource::with_timeout(
                base_url,
                Duration::from_secs(content.timeout_secs),
            )),
            None => Arc::new(FsSource::new(content.source_dir.clone())),
        };
        Self::with_source(config, source)
    }

    /// Build a controller reading from `source`.
    #[must_use]
    pub fn with_source(config: &Config, source: Arc<dyn ContentSource>) -> Self {
        let sections = &config.sections;

        let mut catalog = SectionCatalog::empty().with_sub_pages(sections.sub_pages.clone());
        if !sections.hub.is_empty() {
            catalog = catalog.with_hub(sections.hub.clone());
        }
        for (section, parts) in &sections.composite {
            catalog = catalog.with_composite(section.clone(), parts.clone());
        }
        let fetcher =
            ContentFetcher::new(source, catalog).with_dir(config.content_resolved.dir.clone());

        let markdown = MarkdownRenderer::new(RenderOptions {
            raw_html: config.render.raw_html,
            ..RenderOptions::default()
        });
        let mut renderer =
            ContentRenderer::new(markdown).with_separated_sections(sections.composite.keys().cloned());
        if config.render.diagrams {
            renderer = renderer.with_diagrams(Box::new(MermaidHook));
        }

        let nav = config
            .nav
            .iter()
            .map(|item| NavEntry::new(item.section.clone(), item.label.clone()))
            .collect();

        Self {
            fetcher,
            renderer,
            links: LinkPostProcessor::new(&config.site.host),
            messages: Messages::new(config.site.locale),
            notifier: Arc::new(LogNotifier),
            default_section: config.site.default_section.clone(),
            search_order: sections.search_order.clone(),
            serializer: HtmlSerializer::new(),
            state: UiState::new(nav),
        }
    }

    /// Send user notifications to `notifier`.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Current page state.
    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Display language of user-facing messages.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.messages.locale()
    }

    /// Serialized content container.
    #[must_use]
    pub fn html(&self) -> String {
        self.serializer.serialize(self.state.container())
    }

    /// Page load: render the default section.
    pub fn start(&mut self) -> LoadOutcome {
        let section = self.default_section.clone();
        self.load_section(&section)
    }

    /// Fetch `section` and take a ticket for it. Any load begun earlier is
    /// superseded.
    pub fn begin_load(&mut self, section: &str) -> PendingLoad {
        let ticket = self.state.issue_ticket();
        tracing::debug!(section, "Loading section");
        PendingLoad {
            ticket,
            section: section.to_owned(),
            result: self.fetcher.load_section(section),
        }
    }

    /// Render and commit a fetched section, unless a newer load was begun in
    /// the meantime.
    pub fn complete_load(&mut self, pending: PendingLoad) -> LoadOutcome {
        let PendingLoad {
            ticket,
            section,
            result,
        } = pending;

        if !self.state.is_current(ticket) {
            tracing::debug!(section = %section, "Discarding superseded load");
            return LoadOutcome::Superseded { section };
        }

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(section = %section, error = %e, "Failed to load section");
                return self.show_error(section, &e.to_string());
            }
        };

        let content = match self.renderer.render(&text.markdown, &section) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(section = %section, error = %e, "Failed to render section");
                return self.show_error(section, &e.to_string());
            }
        };

        self.state.show_content(&section, content.root);
        self.state.activate(&section);
        let intercepts = self.intercepts_for(&section);
        self.state.set_intercepts(intercepts);
        let external = self.links.process(self.state.container_mut());

        tracing::info!(
            section = %section,
            diagrams = content.diagrams,
            separators = content.separators,
            external,
            "Section rendered"
        );
        LoadOutcome::Rendered { section }
    }

    /// Load and commit `section`.
    pub fn load_section(&mut self, section: &str) -> LoadOutcome {
        let pending = self.begin_load(section);
        self.complete_load(pending)
    }

    /// Navigation click.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNavEntry`] if no entry exists for `section`.
    pub fn click_nav(&mut self, section: &str) -> Result<LoadOutcome, PageError> {
        if !self.state.has_nav_entry(section) {
            return Err(PageError::UnknownNavEntry(section.to_owned()));
        }
        Ok(self.load_section(section))
    }

    /// Click on the link with `href` in the current content.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownLink`] if no anchor with that `href` is
    /// present.
    pub fn click_content_link(&mut self, href: &str) -> Result<LinkAction, PageError> {
        if let Some(section) = self.state.intercepted(href) {
            let section = section.to_owned();
            return Ok(LinkAction::Loaded(self.load_section(&section)));
        }

        let anchor = self
            .state
            .container()
            .find(|el| el.tag == "a" && el.attr("href") == Some(href))
            .ok_or_else(|| PageError::UnknownLink(href.to_owned()))?;

        if anchor.attr("target") == Some("_blank") {
            Ok(LinkAction::OpenInNewContext(href.to_owned()))
        } else {
            Ok(LinkAction::Follow(href.to_owned()))
        }
    }

    /// Search submit. Failures are reported through the notifier.
    ///
    /// Returns whether a matching section was found.
    pub fn search(&mut self, term: &str) -> bool {
        match self.try_search(term) {
            Ok(_) => true,
            Err(e) => {
                self.notifier.alert(&e.message(self.locale()));
                false
            }
        }
    }

    /// Scan sections in search order for `term` and load the first one whose
    /// raw markdown contains it, highlighting every occurrence.
    ///
    /// Sections that fail to fetch are skipped. Sections after the first
    /// match are not fetched.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyTerm`] for a blank term (nothing is
    /// fetched) and [`SearchError::NotFound`] when no section matches.
    pub fn try_search(&mut self, term: &str) -> Result<String, SearchError> {
        let matcher = TermMatcher::new(term.trim())?;

        let mut found = None;
        for section in &self.search_order {
            match self.fetcher.fetch_resource(section) {
                Ok(text) if matcher.is_match(&text) => {
                    found = Some(section.clone());
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(section = %section, error = %e, "Skipping section in search");
                }
            }
        }

        let Some(section) = found else {
            tracing::info!(term = matcher.term(), "No search results");
            return Err(SearchError::NotFound {
                term: matcher.term().to_owned(),
            });
        };

        if self.load_section(&section).is_rendered() {
            let highlighted = self.apply_highlights(&matcher);
            tracing::info!(
                term = matcher.term(),
                section = %section,
                highlighted,
                "Search matched"
            );
        }
        Ok(section)
    }

    /// Highlight `term` in the current content, clearing earlier highlights.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyTerm`] for a blank term.
    pub fn highlight_term(&mut self, term: &str) -> Result<usize, SearchError> {
        let matcher = TermMatcher::new(term.trim())?;
        Ok(self.apply_highlights(&matcher))
    }

    fn apply_highlights(&mut self, matcher: &TermMatcher) -> usize {
        let container = self.state.container_mut();
        clear_highlights(container);
        highlight(container, matcher)
    }

    fn show_error(&mut self, section: String, reason: &str) -> LoadOutcome {
        let message = self.messages.load_error(reason);
        let error = self.renderer.render_error(&message);
        self.state.show_error(error);
        LoadOutcome::Failed {
            section,
            reason: reason.to_owned(),
        }
    }

    /// Rendered `#<sub_page>` anchors of the hub, mapped to the sub-pages
    /// they load.
    fn intercepts_for(&self, section: &str) -> BTreeMap<String, String> {
        let catalog = self.fetcher.catalog();
        if catalog.hub() != Some(section) {
            return BTreeMap::new();
        }
        self.state
            .container()
            .find_all(|el| el.tag == "a")
            .into_iter()
            .filter_map(|anchor| anchor.attr("href"))
            .filter_map(|href| {
                let target = href.strip_prefix('#')?;
                catalog
                    .is_sub_page(target)
                    .then(|| (href.to_owned(), target.to_owned()))
            })
            .collect()
    }
}
