use url::Url;

/// Resolves an href attribute to an absolute URL, validating that the
/// result is fetchable.
///
/// Returns `None` (the reference is skipped, not an error) for:
/// - empty hrefs
/// - `javascript:`, `mailto:`, `tel:` and `data:` references
/// - fragment-only references (same-page anchors)
/// - references that fail to resolve against the base
/// - resolved URLs with a non-http(s) scheme
///
/// # Examples
///
/// ```
/// use sitescribe::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://site.com/docs/").unwrap();
/// let resolved = resolve_href("../about", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://site.com/about");
///
/// assert!(resolve_href("mailto:admin@site.com", &base).is_none());
/// ```
pub fn resolve_href(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Non-fetchable schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(absolute)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
