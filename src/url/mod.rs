//! URL handling module for Sitescribe
//!
//! This module provides address normalization, reference resolution,
//! internal/external scope classification, and filename/anchor sanitization.

mod normalize;
mod resolve;
mod sanitize;

// Re-export main functions
pub use normalize::strip_fragment;
pub use resolve::resolve_href;
pub use sanitize::{sanitize_anchor, sanitize_filename};

use url::Url;

/// Scope of a discovered link relative to the crawl's starting origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScope {
    /// Same site as the starting address
    Internal,
    /// Any other site
    External,
}

impl LinkScope {
    /// Returns true if the link points back to the starting site
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// The origin site of a crawl, captured once from the starting address.
///
/// Scope classification is always performed against this single origin,
/// never against the page a link was discovered on: a link found on an
/// external page that points back to the starting site is still internal.
///
/// The comparison is by exact hostname only; scheme and port are ignored,
/// so `http://site.com/x` found while crawling `https://site.com/` is
/// internal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin {
    host: String,
}

impl SiteOrigin {
    /// Captures the origin of a URL
    ///
    /// # Returns
    ///
    /// * `Some(SiteOrigin)` - The URL has a host
    /// * `None` - The URL has no host (e.g. `data:` URLs)
    pub fn from_url(url: &Url) -> Option<Self> {
        url.host_str().map(|h| Self {
            host: h.to_lowercase(),
        })
    }

    /// The hostname of the origin, lowercase
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true if `url` belongs to this origin
    pub fn contains(&self, url: &Url) -> bool {
        url.host_str()
            .map(|h| h.eq_ignore_ascii_case(&self.host))
            .unwrap_or(false)
    }
}

/// Classifies a URL as internal or external relative to the crawl origin
///
/// # Examples
///
/// ```
/// use sitescribe::url::{classify_scope, LinkScope, SiteOrigin};
/// use url::Url;
///
/// let start = Url::parse("https://site.com/").unwrap();
/// let origin = SiteOrigin::from_url(&start).unwrap();
///
/// let same = Url::parse("https://site.com/docs").unwrap();
/// assert_eq!(classify_scope(&same, &origin), LinkScope::Internal);
///
/// let other = Url::parse("https://other.com/").unwrap();
/// assert_eq!(classify_scope(&other, &origin), LinkScope::External);
/// ```
pub fn classify_scope(url: &Url, origin: &SiteOrigin) -> LinkScope {
    if origin.contains(url) {
        LinkScope::Internal
    } else {
        LinkScope::External
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(url: &str) -> SiteOrigin {
        SiteOrigin::from_url(&Url::parse(url).unwrap()).unwrap()
    }

    #[test]
    fn test_same_host_is_internal() {
        let o = origin("https://site.com/");
        let url = Url::parse("https://site.com/deep/page").unwrap();
        assert_eq!(classify_scope(&url, &o), LinkScope::Internal);
    }

    #[test]
    fn test_other_host_is_external() {
        let o = origin("https://site.com/");
        let url = Url::parse("https://other.com/").unwrap();
        assert_eq!(classify_scope(&url, &o), LinkScope::External);
    }

    #[test]
    fn test_subdomain_is_external() {
        let o = origin("https://site.com/");
        let url = Url::parse("https://docs.site.com/").unwrap();
        assert_eq!(classify_scope(&url, &o), LinkScope::External);
    }

    #[test]
    fn test_host_comparison_is_case_insensitive() {
        let o = origin("https://SITE.com/");
        let url = Url::parse("https://site.COM/page").unwrap();
        assert_eq!(classify_scope(&url, &o), LinkScope::Internal);
    }

    #[test]
    fn test_same_host_different_port_is_internal() {
        // Hostname comparison only; the port does not participate.
        let o = origin("http://127.0.0.1:8001/");
        let url = Url::parse("http://127.0.0.1:8002/").unwrap();
        assert_eq!(classify_scope(&url, &o), LinkScope::Internal);
    }

    #[test]
    fn test_explicit_default_port_is_internal() {
        let o = origin("https://site.com/");
        let url = Url::parse("https://site.com:443/page").unwrap();
        assert_eq!(classify_scope(&url, &o), LinkScope::Internal);
    }

    #[test]
    fn test_http_link_on_https_origin_is_internal() {
        // Scheme is ignored too; a plain-http link back to the start host
        // stays in scope.
        let o = origin("https://site.com/");
        let url = Url::parse("http://site.com/page").unwrap();
        assert_eq!(classify_scope(&url, &o), LinkScope::Internal);
    }

    #[test]
    fn test_classification_relative_to_start_not_discovering_page() {
        // A link back to the start host found anywhere is internal.
        let o = origin("https://site.com/");
        let back = Url::parse("https://site.com/home").unwrap();
        assert_eq!(classify_scope(&back, &o), LinkScope::Internal);
    }

    #[test]
    fn test_origin_host_accessor() {
        let o = origin("https://Site.Com:8443/x");
        assert_eq!(o.host(), "site.com");
    }
}
