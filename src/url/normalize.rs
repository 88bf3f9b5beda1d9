use url::Url;

/// Strips the fragment component of a URL, producing the normalized address
/// used as the dedup key and the filename seed.
///
/// Two URLs differing only by fragment are the same crawl unit:
/// `https://a.com/p#x` and `https://a.com/p#y` both normalize to
/// `https://a.com/p`.
pub fn strip_fragment(url: &Url) -> Url {
    if url.fragment().is_none() {
        return url.clone();
    }
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}
