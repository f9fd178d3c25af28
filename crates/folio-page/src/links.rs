//! External link handling.

use folio_dom::Element;

/// Marks absolute links to other hosts so they open in a new browsing
/// context without access to this page.
#[derive(Debug, Clone)]
pub struct LinkPostProcessor {
    host: String,
}

impl LinkPostProcessor {
    /// Processor for a page served from `host`.
    ///
    /// A port or userinfo in `host` is ignored.
    #[must_use]
    pub fn new(host: &str) -> Self {
        Self {
            host: bare_host(host).to_owned(),
        }
    }

    /// Whether `href` is an absolute `http://` or `https://` link whose host
    /// differs from the page host. Hosts compare without regard to ASCII case.
    #[must_use]
    pub fn is_external(&self, href: &str) -> bool {
        link_host(href).is_some_and(|host| !host.eq_ignore_ascii_case(&self.host))
    }

    /// Add `target="_blank"` and `rel="noopener noreferrer"` to every external
    /// anchor under `root`. Returns the number of anchors changed.
    pub fn process(&self, root: &mut Element) -> usize {
        let mut changed = 0;
        root.walk_mut(&mut |el: &mut Element| {
            if el.tag != "a" {
                return;
            }
            if el.attr("href").is_some_and(|href| self.is_external(href)) {
                el.set_attr("target", "_blank");
                el.set_attr("rel", "noopener noreferrer");
                changed += 1;
            }
        });
        changed
    }
}

/// Host of an absolute http(s) URL.
fn link_host(href: &str) -> Option<&str> {
    let rest = href
        .strip_prefix("http://")
        .or_else(|| href.strip_prefix("https://"))?;
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    Some(bare_host(authority))
}

/// Strip userinfo and port from an authority.
fn bare_host(authority: &str) -> &str {
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split_once(':').map_or(host, |(name, _)| name)
}
