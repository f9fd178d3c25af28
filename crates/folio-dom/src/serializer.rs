//! HTML5 serializer.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use crate::node::{Element, Node, is_void_element};

/// Serialize [`Element`] trees back to HTML.
pub struct HtmlSerializer;

impl HtmlSerializer {
    /// Create a new serializer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize an element including its own tags.
    #[must_use]
    pub fn serialize(&self, el: &Element) -> String {
        let mut out = String::with_capacity(4096);
        serialize_element(el, &mut out);
        out
    }
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(el) => serialize_element(el, out),
        Node::Text(text) => escape_into(text, false, out),
    }
}

fn serialize_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (key, value) in &el.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }

    if is_void_element(&el.tag) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &el.children {
        serialize_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn escape_into(text: &str, escape_quotes: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if escape_quotes => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
