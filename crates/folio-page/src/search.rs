//! Term matching and highlighting.
//!
//! Search terms are matched literally and without regard to case; the term
//! is escaped before it is compiled into a pattern, so characters such as
//! `(` or `.` carry no special meaning.

use folio_config::Locale;
use folio_dom::{Element, Node};
use regex::{Regex, RegexBuilder};

use crate::messages::Messages;

/// Class of the wrapper placed around each highlighted occurrence.
pub const HIGHLIGHT_CLASS: &str = "highlight";

/// Search failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Term was empty after trimming.
    #[error("search term is empty")]
    EmptyTerm,

    /// No section in the search order contains the term.
    #[error("no results for \"{term}\"")]
    NotFound { term: String },

    /// Term is too large to compile into a pattern.
    #[error("invalid search term: {reason}")]
    InvalidTerm { term: String, reason: String },
}

impl SearchError {
    /// User-facing notification for this failure.
    #[must_use]
    pub fn message(&self, locale: Locale) -> String {
        let messages = Messages::new(locale);
        match self {
            Self::EmptyTerm => messages.empty_search_term(),
            Self::NotFound { term } | Self::InvalidTerm { term, .. } => messages.no_results(term),
        }
    }
}

/// Piece of a text split around matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Text outside any match.
    Plain(&'t str),
    /// Matched text with its original casing.
    Match(&'t str),
}

/// Case-insensitive literal matcher for a search term.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: String,
    pattern: Regex,
}

impl TermMatcher {
    /// Build a matcher for `term` (already trimmed).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyTerm`] for an empty term and
    /// [`SearchError::InvalidTerm`] if the pattern exceeds the regex size limit.
    pub fn new(term: &str) -> Result<Self, SearchError> {
        if term.is_empty() {
            return Err(SearchError::EmptyTerm);
        }
        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::InvalidTerm {
                term: term.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            term: term.to_owned(),
            pattern,
        })
    }

    /// The term as given.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether `text` contains the term.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Split `text` into non-empty plain and matched segments, in order.
    #[must_use]
    pub fn split<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        let mut segments = Vec::new();
        let mut last = 0;
        for found in self.pattern.find_iter(text) {
            if found.start() > last {
                segments.push(Segment::Plain(&text[last..found.start()]));
            }
            segments.push(Segment::Match(found.as_str()));
            last = found.end();
        }
        if last < text.len() {
            segments.push(Segment::Plain(&text[last..]));
        }
        segments
    }
}

fn is_highlight(el: &Element) -> bool {
    el.tag == "span" && el.has_class(HIGHLIGHT_CLASS)
}

/// Replace every highlight wrapper under `root` with its plain text and merge
/// the resulting adjacent text nodes.
///
/// Returns the number of wrappers removed.
pub fn clear_highlights(root: &mut Element) -> usize {
    let mut removed = 0;
    for child in &mut root.children {
        if let Node::Element(el) = child {
            if is_highlight(el) {
                let text = el.text_content();
                *child = Node::Text(text);
                removed += 1;
            } else {
                removed += clear_highlights(el);
            }
        }
    }
    if removed > 0 {
        root.normalize();
    }
    removed
}

/// Wrap every occurrence of the term in text under `root` in a
/// `<span class="highlight">`. Text already inside a wrapper is skipped.
///
/// Returns the number of wrappers created.
pub fn highlight(root: &mut Element, matcher: &TermMatcher) -> usize {
    if is_highlight(root) {
        return 0;
    }

    let mut created = 0;
    let mut children = Vec::with_capacity(root.children.len());
    for child in root.children.drain(..) {
        match child {
            Node::Text(text) if matcher.is_match(&text) => {
                for segment in matcher.split(&text) {
                    match segment {
                        Segment::Plain(plain) => children.push(Node::text(plain)),
                        Segment::Match(found) => {
                            children.push(Node::Element(
                                Element::new("span")
                                    .with_attr("class", HIGHLIGHT_CLASS)
                                    .with_text(found),
                            ));
                            created += 1;
                        }
                    }
                }
            }
            Node::Element(mut el) => {
                created += highlight(&mut el, matcher);
                children.push(Node::Element(el));
            }
            text @ Node::Text(_) => children.push(text),
        }
    }
    root.children = children;
    created
}

#[cfg(test)]
mod tests {
    use folio_dom::HtmlSerializer;
    use pretty_assertions::assert_eq;

    use super::*;

    fn matcher(term: &str) -> TermMatcher {
        TermMatcher::new(term).unwrap()
    }

    fn wrappers(root: &Element) -> Vec<String> {
        root.find_all(is_highlight)
            .iter()
            .map(|el| el.text_content())
            .collect()
    }

    #[test]
    fn test_empty_term_rejected() {
        assert_eq!(TermMatcher::new("").unwrap_err(), SearchError::EmptyTerm);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let matcher = matcher("Audit");
        assert!(matcher.is_match("field AUDIT plan"));
        assert!(!matcher.is_match("audi"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let matcher = matcher("a.b (c)");
        assert!(matcher.is_match("see A.B (C) here"));
        assert!(!matcher.is_match("axb c"));
        assert_eq!(matcher.term(), "a.b (c)");
    }

    #[test]
    fn test_split_preserves_casing() {
        assert_eq!(
            matcher("cat").split("Concatenate cats carefully"),
            vec![
                Segment::Plain("Con"),
                Segment::Match("cat"),
                Segment::Plain("enate "),
                Segment::Match("cat"),
                Segment::Plain("s carefully"),
            ]
        );
        assert_eq!(
            matcher("cat").split("CAT"),
            vec![Segment::Match("CAT")]
        );
    }

    #[test]
    fn test_highlight_wraps_each_occurrence() {
        let mut root = Element::new("div")
            .with_child(Element::new("p").with_text("Concatenate cats carefully"));
        let created = highlight(&mut root, &matcher("cat"));

        assert_eq!(created, 2);
        assert_eq!(wrappers(&root), vec!["cat", "cat"]);
        assert_eq!(root.text_content(), "Concatenate cats carefully");
        assert_eq!(
            HtmlSerializer::new().serialize(&root),
            "<div><p>Con<span class=\"highlight\">cat</span>enate \
             <span class=\"highlight\">cat</span>s carefully</p></div>"
        );
    }

    #[test]
    fn test_highlight_nested_elements() {
        let mut root = Element::new("div").with_child(
            Element::new("p")
                .with_text("Audit ")
                .with_child(Element::new("strong").with_text("audit"))
                .with_text(" done"),
        );
        assert_eq!(highlight(&mut root, &matcher("AUDIT")), 2);
        assert_eq!(wrappers(&root), vec!["Audit", "audit"]);
    }

    #[test]
    fn test_highlight_skips_existing_wrappers() {
        let mut root = Element::new("div").with_child(
            Element::new("span")
                .with_attr("class", HIGHLIGHT_CLASS)
                .with_text("cat"),
        );
        assert_eq!(highlight(&mut root, &matcher("cat")), 0);
        assert_eq!(wrappers(&root).len(), 1);
    }

    #[test]
    fn test_clear_restores_text() {
        let original = Element::new("div")
            .with_child(Element::new("p").with_text("Concatenate cats carefully"));
        let mut root = original.clone();
        highlight(&mut root, &matcher("cat"));

        assert_eq!(clear_highlights(&mut root), 2);
        assert_eq!(root, original);
    }

    #[test]
    fn test_repeated_highlight_does_not_accumulate() {
        let mut root = Element::new("div")
            .with_child(Element::new("p").with_text("cat and dog and cat"));

        for _ in 0..3 {
            clear_highlights(&mut root);
            highlight(&mut root, &matcher("cat"));
        }
        assert_eq!(wrappers(&root), vec!["cat", "cat"]);
        assert!(
            root.find_all(is_highlight)
                .iter()
                .all(|el| el.find(is_highlight).is_none())
        );

        clear_highlights(&mut root);
        highlight(&mut root, &matcher("dog"));
        assert_eq!(wrappers(&root), vec!["dog"]);
    }

    #[test]
    fn test_error_messages_localized() {
        let err = SearchError::NotFound {
            term: "cat".to_owned(),
        };
        assert_eq!(err.message(Locale::En), "No results found for \"cat\".");
        assert_eq!(
            SearchError::EmptyTerm.message(Locale::Ko),
            "검색어를 입력해주세요."
        );
    }
}
