//! Last path segment of a URL.

/// Returns the last non-empty path segment of `url`, as it appears in the URL
/// (no percent-decoding). Query and fragment never contribute.
///
/// `None` for unparsable URLs, URLs without a hierarchical path (`data:`,
/// `mailto:`), and root paths.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let last = parsed.path_segments()?.rev().find(|s| !s.is_empty())?;
    match last {
        "." | ".." => None,
        name => Some(name.to_string()),
    }
}
