//! Markdown to HTML conversion.

use pulldown_cmark::{Event, Options, Parser};

/// Options for rendering markdown to HTML.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Enable GitHub Flavored Markdown tables.
    pub enable_tables: bool,
    /// Enable strikethrough syntax (~~text~~).
    pub enable_strikethrough: bool,
    /// Enable task list items ([x] and [ ]).
    pub enable_tasklists: bool,
    /// Enable footnotes.
    pub enable_footnotes: bool,
    /// Enable heading attributes ({#id .class}).
    pub enable_heading_attributes: bool,
    /// Emit raw HTML from the markdown source as-is. When off, raw HTML is
    /// escaped and shows up as text.
    pub raw_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            enable_tables: true,
            enable_strikethrough: true,
            enable_tasklists: true,
            enable_footnotes: true,
            enable_heading_attributes: true,
            raw_html: false,
        }
    }
}

impl RenderOptions {
    fn to_pulldown_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.enable_tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.enable_footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.enable_heading_attributes {
            options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        options
    }
}

/// Markdown renderer producing HTML strings.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a renderer with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render markdown to an HTML string.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let raw_html = self.options.raw_html;
        let events = Parser::new_ext(markdown, self.options.to_pulldown_options()).map(|event| {
            match event {
                Event::Html(html) | Event::InlineHtml(html) if !raw_html => Event::Text(html),
                other => other,
            }
        });

        let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
        pulldown_cmark::html::push_html(&mut out, events);
        out
    }
}
