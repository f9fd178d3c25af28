//! Tolerant XHTML parser built on `quick-xml`.
//!
//! Renderer output is well-formed XHTML, but raw HTML passed through from
//! markdown may use unclosed void elements (`<br>`) or stray end tags. The
//! parser keeps an explicit open-element stack: void elements never open a
//! scope, and an end tag closes the nearest matching open element or is
//! ignored when nothing matches.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::borrow::Cow;

use quick_xml::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::{convert_html_entities, decode_entity};
use crate::error::DomError;
use crate::node::{Element, Node, is_void_element};

/// Wrapper tag used to give fragments a single root.
const FRAGMENT_ROOT: &str = "folio-fragment";

/// Parse rendered HTML into [`Node`] trees.
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML fragment into a list of top-level nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokenizer rejects the input.
    pub fn parse_fragment(&self, html: &str) -> Result<Vec<Node>, DomError> {
        let html = convert_html_entities(html);
        let wrapped = format!("<{FRAGMENT_ROOT}>{html}</{FRAGMENT_ROOT}>");

        let mut reader = Reader::from_str(&wrapped);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        // The tokenizer's own open-tag stack drifts on void and stray tags;
        // scoping is decided by `close_element` instead.
        config.allow_unmatched_ends = true;
        let decoder = reader.decoder();

        // stack[0] is the fragment root
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let el = self.element_from(decoder, &e);
                    if stack.is_empty() || !is_void_element(&el.tag) {
                        stack.push(el);
                    } else {
                        push_node(&mut stack, Node::Element(el));
                    }
                }
                Event::Empty(e) => {
                    let el = self.element_from(decoder, &e);
                    push_node(&mut stack, Node::Element(el));
                }
                Event::End(e) => {
                    let tag = decode_lossy(decoder, e.name().as_ref());
                    close_element(&mut stack, &tag);
                }
                Event::Text(e) => {
                    let text = decoder.decode(&e)?;
                    push_text(&mut stack, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = decoder.decode(&e)?;
                    push_text(&mut stack, &decode_entity(&entity));
                }
                Event::CData(e) => {
                    push_text(&mut stack, &String::from_utf8_lossy(&e));
                }
                Event::Eof => break,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        // Unclosed elements are closed at end of input
        while stack.len() > 1 {
            if let Some(el) = stack.pop() {
                push_node(&mut stack, Node::Element(el));
            }
        }

        Ok(stack.pop().map(|root| root.children).unwrap_or_default())
    }

    fn element_from(&self, decoder: Decoder, e: &BytesStart) -> Element {
        let tag = decode_lossy(decoder, e.name().as_ref()).to_ascii_lowercase();
        let attrs = e
            .html_attributes()
            .flatten()
            .map(|attr| {
                let key = decode_lossy(decoder, attr.key.as_ref());
                let value = attr.unescape_value().map_or_else(
                    |_| String::from_utf8_lossy(&attr.value).into_owned(),
                    Cow::into_owned,
                );
                (key, value)
            })
            .collect();
        Element {
            tag,
            attrs,
            children: Vec::new(),
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_lossy(decoder: Decoder, bytes: &[u8]) -> String {
    decoder.decode(bytes).map_or_else(
        |_| String::from_utf8_lossy(bytes).into_owned(),
        Cow::into_owned,
    )
}

/// Append a node to the innermost open element.
fn push_node(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Append text, merging with a preceding text node.
fn push_text(stack: &mut [Element], text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        if let Some(Node::Text(prev)) = parent.children.last_mut() {
            prev.push_str(text);
        } else {
            parent.children.push(Node::Text(text.to_owned()));
        }
    }
}

/// Close the nearest open element named `tag`, closing anything opened inside it.
fn close_element(stack: &mut Vec<Element>, tag: &str) {
    let tag = tag.to_ascii_lowercase();
    let Some(index) = stack.iter().rposition(|el| el.tag == tag) else {
        return;
    };
    // Never pop the fragment root on a stray end tag
    if index == 0 && tag != FRAGMENT_ROOT {
        return;
    }
    while stack.len() > index.max(1) {
        if let Some(el) = stack.pop() {
            push_node(stack, Node::Element(el));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(html: &str) -> Vec<Node> {
        HtmlParser::new().parse_fragment(html).unwrap()
    }

    #[test]
    fn test_parse_simple_element() {
        let nodes = parse("<p>Hello</p>");
        assert_eq!(nodes, vec![Node::Element(Element::new("p").with_text("Hello"))]);
    }

    #[test]
    fn test_parse_nested_with_tail_text() {
        let nodes = parse("<p><strong>Bold</strong> text</p>");
        let p = nodes[0].as_element().unwrap();
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.children[0].as_element().unwrap().tag, "strong");
        assert_eq!(p.children[1].as_text(), Some(" text"));
    }

    #[test]
    fn test_parse_attributes_in_order() {
        let nodes = parse(r#"<a href="https://example.org/x" title="T &amp; C">x</a>"#);
        let a = nodes[0].as_element().unwrap();
        assert_eq!(a.attr("href"), Some("https://example.org/x"));
        assert_eq!(a.attr("title"), Some("T & C"));
        assert_eq!(a.attrs[0].0, "href");
    }

    #[test]
    fn test_parse_entity_references() {
        let nodes = parse("<p>a &lt; b &amp;&amp; c&#39;s &quot;q&quot;</p>");
        assert_eq!(nodes[0].as_element().unwrap().text_content(), "a < b && c's \"q\"");
    }

    #[test]
    fn test_parse_html_named_entities() {
        let nodes = parse("<p>Hello&nbsp;World&mdash;Test</p>");
        let text = nodes[0].as_element().unwrap().text_content();
        assert!(text.contains('\u{00a0}'));
        assert!(text.contains('\u{2014}'));
    }

    #[test]
    fn test_parse_self_closing_and_void() {
        let nodes = parse("<p>Before<br />Middle<br>After</p><hr>");
        assert_eq!(nodes.len(), 2);
        let p = nodes[0].as_element().unwrap();
        assert_eq!(p.children.len(), 5);
        assert_eq!(p.children[4].as_text(), Some("After"));
        assert_eq!(nodes[1].as_element().unwrap().tag, "hr");
    }

    #[test]
    fn test_parse_stray_end_tag_ignored() {
        let nodes = parse("<p>one</span>two</p>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].as_element().unwrap().text_content(), "onetwo");
    }

    #[test]
    fn test_parse_stray_end_tag_at_top_level() {
        let nodes = parse("</div><p>kept</p></em>");
        assert_eq!(nodes, vec![Node::Element(Element::new("p").with_text("kept"))]);
    }

    #[test]
    fn test_parse_stray_end_tags_after_void() {
        let nodes = parse("<p>a<br>b</span></b>c</p><p>d</p>");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].as_element().unwrap().text_content(), "abc");
        assert_eq!(nodes[1].as_element().unwrap().text_content(), "d");
    }

    #[test]
    fn test_parse_unclosed_element_closed_at_end() {
        let nodes = parse("<div><p>open");
        let div = nodes[0].as_element().unwrap();
        assert_eq!(div.children[0].as_element().unwrap().text_content(), "open");
    }

    #[test]
    fn test_parse_preserves_whitespace_text() {
        let nodes = parse("<h1>T</h1>\n<p>x</p>\n");
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[1].as_text(), Some("\n"));
    }

    #[test]
    fn test_parse_comment_skipped() {
        let nodes = parse("<p>a<!-- note -->b</p>");
        assert_eq!(nodes[0].as_element().unwrap().text_content(), "ab");
    }
}
