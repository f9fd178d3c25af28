//! Content rendering with post-render hooks.

use std::collections::HashSet;

use folio_dom::{Element, HtmlParser};

use crate::diagrams::DiagramHook;
use crate::error::RenderError;
use crate::markdown::MarkdownRenderer;

/// Class of the wrapper element holding rendered markdown.
pub const CONTENT_WRAPPER_CLASS: &str = "markdown-content";

/// Class of the separator inserted between FAQ entries.
pub const SEPARATOR_CLASS: &str = "faq-separator";

/// Rendered section content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    /// `<div class="markdown-content">` wrapper holding the rendered HTML.
    pub root: Element,
    /// Number of diagram elements prepared.
    pub diagrams: usize,
    /// Number of separators inserted.
    pub separators: usize,
}

/// Converts section markdown into a content tree and runs post-render hooks.
///
/// # Example
///
/// ```
/// use folio_renderer::{ContentRenderer, MarkdownRenderer, MermaidHook};
///
/// let renderer = ContentRenderer::new(MarkdownRenderer::default())
///     .with_diagrams(Box::new(MermaidHook))
///     .with_separated_sections(["faq"]);
/// let content = renderer.render("## Q1\n\n## Q2", "faq").unwrap();
/// assert_eq!(content.separators, 1);
/// ```
pub struct ContentRenderer {
    markdown: MarkdownRenderer,
    parser: HtmlParser,
    diagrams: Option<Box<dyn DiagramHook>>,
    separated: HashSet<String>,
}

impl ContentRenderer {
    /// Create a renderer without diagram support or separators.
    #[must_use]
    pub fn new(markdown: MarkdownRenderer) -> Self {
        Self {
            markdown,
            parser: HtmlParser::new(),
            diagrams: None,
            separated: HashSet::new(),
        }
    }

    /// Prepare diagrams with `hook` after each render.
    #[must_use]
    pub fn with_diagrams(mut self, hook: Box<dyn DiagramHook>) -> Self {
        self.diagrams = Some(hook);
        self
    }

    /// Insert separators between second-level headings for these sections.
    #[must_use]
    pub fn with_separated_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separated.extend(sections.into_iter().map(Into::into));
        self
    }

    /// Render `markdown` for `section`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Dom`] if the generated HTML cannot be parsed.
    pub fn render(&self, markdown: &str, section: &str) -> Result<RenderedContent, RenderError> {
        let html = self.markdown.render(markdown);
        let nodes = self.parser.parse_fragment(&html)?;
        let mut root = Element::new("div")
            .with_attr("class", CONTENT_WRAPPER_CLASS)
            .with_children(nodes);

        let diagrams = self
            .diagrams
            .as_ref()
            .map_or(0, |hook| hook.init(&mut root));

        let separators = if self.separated.contains(section) {
            insert_separators(&mut root)
        } else {
            0
        };

        tracing::debug!(section, diagrams, separators, "Rendered section");

        Ok(RenderedContent {
            root,
            diagrams,
            separators,
        })
    }

    /// Inline error shown in place of content.
    #[must_use]
    pub fn render_error(&self, message: &str) -> Element {
        Element::new("p").with_text(message)
    }
}

/// Insert a separator before every `h2` except the first.
fn insert_separators(root: &mut Element) -> usize {
    root.insert_before_each(
        |el| el.tag == "h2",
        1,
        || Element::new("div").with_attr("class", SEPARATOR_CLASS),
    )
}
