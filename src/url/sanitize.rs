//! Pure string sanitizers for filenames and markdown anchors

/// Replaces characters unsafe for filenames with underscores.
///
/// Everything outside `[A-Za-z0-9._-]` becomes `_`, so a full address like
/// `https://site.com/a/b` yields a flat, filesystem-safe name.
///
/// # Examples
///
/// ```
/// use sitescribe::url::sanitize_filename;
///
/// assert_eq!(
///     sanitize_filename("https://site.com/a/b"),
///     "https___site.com_a_b"
/// );
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Converts a heading text into a markdown anchor.
///
/// Lowercases, keeps alphanumerics and hyphens, turns spaces into hyphens,
/// drops everything else. Matches the anchor scheme used in the generated
/// table of contents.
pub fn sanitize_anchor(heading: &str) -> String {
    heading
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}
