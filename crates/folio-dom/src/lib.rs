//! Owned HTML tree for rendered page content.
//!
//! The content container of a page is held as a plain [`Element`] tree so
//! that post-render passes (separators, link rewriting, search highlights)
//! are ordinary tree edits instead of ambient document queries.
//!
//! - [`HtmlParser`] turns renderer output into nodes. It is built on
//!   `quick-xml` and tolerates HTML void elements and stray end tags.
//! - [`HtmlSerializer`] writes a tree back out as HTML5.
//!
//! # Example
//!
//! ```
//! use folio_dom::{Element, HtmlParser, HtmlSerializer};
//!
//! let nodes = HtmlParser::new().parse_fragment("<p>Hello <em>world</em></p>").unwrap();
//! let root = Element::new("div").with_children(nodes);
//! assert_eq!(root.text_content(), "Hello world");
//! assert_eq!(
//!     HtmlSerializer::new().serialize(&root),
//!     "<div><p>Hello <em>world</em></p></div>"
//! );
//! ```

mod entities;
mod error;
mod node;
mod parser;
mod serializer;

pub use error::DomError;
pub use node::{Element, Node, is_void_element};
pub use parser::HtmlParser;
pub use serializer::HtmlSerializer;
