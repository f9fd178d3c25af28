//! Section resolution and content retrieval for Folio.
//!
//! A section identifier names one unit of documentation. Most sections map
//! to a single resource `content/<id>.md`; composite sections (the FAQ) are
//! concatenated from several resources with duplicate leading headings
//! removed.
//!
//! # Architecture
//!
//! - [`ContentSource`] trait with a single `fetch(target)` method
//! - [`FsSource`] reads resources from a site directory on disk
//! - [`HttpSource`] fetches resources from a remote site with `ureq`
//! - [`MockSource`] for testing (behind `mock` feature flag)
//! - [`ContentFetcher`] applies the [`SectionCatalog`] composition rules
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_content::{ContentFetcher, FsSource, SectionCatalog};
//!
//! let fetcher = ContentFetcher::new(Arc::new(FsSource::new("site")), SectionCatalog::default());
//! let faq = fetcher.load_section("faq")?;
//! println!("{}", faq.markdown);
//! ```

mod catalog;
mod error;
mod fetcher;
mod fs;
mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod source;

pub use catalog::SectionCatalog;
pub use error::FetchError;
pub use fetcher::{ContentFetcher, SectionText, strip_leading_heading};
pub use fs::FsSource;
pub use http::HttpSource;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;
pub use source::ContentSource;
