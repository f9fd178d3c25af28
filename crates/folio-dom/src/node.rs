//! Tree node types.

/// HTML elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Check whether `tag` is an HTML void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Node in an HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with attributes and children.
    Element(Element),
    /// Text content (unescaped).
    Text(String),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Borrow as element, if this is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// Borrow as text, if this is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// HTML element.
///
/// Attributes keep their source order so serialization is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name (lowercase for renderer output).
    pub tag: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Whether the whitespace-separated `class` list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Whether the raw `class` attribute contains `fragment` anywhere.
    ///
    /// Mirrors the CSS `[class*="..."]` selector.
    #[must_use]
    pub fn class_contains(&self, fragment: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.contains(fragment))
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Merge adjacent text nodes and drop empty ones, recursively.
    pub fn normalize(&mut self) {
        let mut merged: Vec<Node> = Vec::with_capacity(self.children.len());
        for child in self.children.drain(..) {
            match child {
                Node::Text(text) if text.is_empty() => {}
                Node::Text(text) => {
                    if let Some(Node::Text(prev)) = merged.last_mut() {
                        prev.push_str(&text);
                    } else {
                        merged.push(Node::Text(text));
                    }
                }
                Node::Element(mut el) => {
                    el.normalize();
                    merged.push(Node::Element(el));
                }
            }
        }
        self.children = merged;
    }

    /// Collect descendant elements (document order) matching `pred`.
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.find_into(&pred, &mut found);
        found
    }

    fn find_into<'a>(&'a self, pred: &impl Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(el) = child {
                if pred(el) {
                    found.push(el);
                }
                el.find_into(pred, found);
            }
        }
    }

    /// First descendant element matching `pred`.
    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.find_all(pred).into_iter().next()
    }

    /// Visit every descendant element in document order.
    pub fn walk_mut<F: FnMut(&mut Element)>(&mut self, f: &mut F) {
        for child in &mut self.children {
            if let Node::Element(el) = child {
                f(el);
                el.walk_mut(f);
            }
        }
    }

    /// Insert an element produced by `make` before every descendant matching
    /// `is_target`, skipping the first `skip` matches in document order.
    ///
    /// Returns the number of inserted elements.
    pub fn insert_before_each(
        &mut self,
        is_target: impl Fn(&Element) -> bool,
        skip: usize,
        make: impl Fn() -> Element,
    ) -> usize {
        let mut seen = 0;
        self.insert_before_each_inner(&is_target, skip, &make, &mut seen)
    }

    fn insert_before_each_inner(
        &mut self,
        is_target: &impl Fn(&Element) -> bool,
        skip: usize,
        make: &impl Fn() -> Element,
        seen: &mut usize,
    ) -> usize {
        let mut inserted = 0;
        let mut children = Vec::with_capacity(self.children.len());
        for child in self.children.drain(..) {
            match child {
                Node::Element(mut el) => {
                    if is_target(&el) {
                        *seen += 1;
                        if *seen > skip {
                            children.push(Node::Element(make()));
                            inserted += 1;
                        }
                    }
                    inserted += el.insert_before_each_inner(is_target, skip, make, seen);
                    children.push(Node::Element(el));
                }
                text @ Node::Text(_) => children.push(text),
            }
        }
        self.children = children;
        inserted
    }
}
