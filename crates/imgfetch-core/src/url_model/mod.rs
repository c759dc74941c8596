//! URL modeling and filename derivation.
//!
//! Derives a safe local filename from the URL path, sanitized for Linux
//! filesystems. Pure: never touches the filesystem, same inputs give the same
//! name.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

/// Prefix of synthetic filenames used when the URL path has no extension.
pub const FALLBACK_PREFIX: &str = "downloaded_image_";
/// Extension of synthetic filenames.
pub const FALLBACK_EXTENSION: &str = "jpeg";

/// Synthetic name for the URL holding `ticket`: `downloaded_image_<ticket>.jpeg`.
pub fn fallback_filename(ticket: u64) -> String {
    format!("{}{}.{}", FALLBACK_PREFIX, ticket, FALLBACK_EXTENSION)
}

/// Derives a safe filename for saving the body fetched from `url`.
///
/// Uses the last path segment of `url` when, after sanitizing, it still
/// contains a `.`; otherwise falls back to [`fallback_filename`] with `ticket`.
///
/// # Examples
///
/// - `derive_filename("https://example.com/cats/tabby.png", 0)` → `"tabby.png"`
/// - `derive_filename("https://example.com/random", 3)` → `"downloaded_image_3.jpeg"`
pub fn derive_filename(url: &str, ticket: u64) -> String {
    filename_from_url_path(url)
        .map(|raw| sanitize_filename_for_linux(&raw))
        .filter(|name| name.contains('.') && name != "." && name != "..")
        .unwrap_or_else(|| fallback_filename(ticket))
}
