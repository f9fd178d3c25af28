//! Diagram preparation hooks.

use folio_dom::{Element, Node};

/// Class carried by elements the client diagram library renders.
pub const DIAGRAM_CLASS: &str = "mermaid";

/// Prepares diagram elements in freshly rendered content.
pub trait DiagramHook: Send + Sync {
    /// Prepare diagrams under `root`. Returns the number of diagram elements.
    fn init(&self, root: &mut Element) -> usize;
}

/// Marks Mermaid diagrams for the client-side library.
///
/// Fenced `mermaid` code blocks render as
/// `<pre><code class="language-mermaid">`; they are rewritten to
/// `<pre class="mermaid">` holding the diagram source. Elements that
/// already carry a `mermaid` class are counted and left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidHook;

impl DiagramHook for MermaidHook {
    fn init(&self, root: &mut Element) -> usize {
        root.walk_mut(&mut |el: &mut Element| {
            if let Some(source) = mermaid_fence_source(el) {
                el.children = vec![Node::Text(source)];
                el.set_attr("class", DIAGRAM_CLASS);
            }
        });
        root.find_all(|el| el.class_contains(DIAGRAM_CLASS) && el.tag != "code")
            .len()
    }
}

/// Diagram source of a `<pre><code class="language-mermaid">` block.
fn mermaid_fence_source(el: &Element) -> Option<String> {
    if el.tag != "pre" || el.class_contains(DIAGRAM_CLASS) {
        return None;
    }
    let mut elements = el.children.iter().filter_map(Node::as_element);
    let code = elements.next()?;
    if elements.next().is_some() || code.tag != "code" || !code.class_contains(DIAGRAM_CLASS) {
        return None;
    }
    Some(code.text_content())
}
