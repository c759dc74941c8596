//! Making URL-derived names safe to create on Linux.

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

fn is_unsafe(c: char) -> bool {
    matches!(c, '/' | '\\') || c.is_control() || c.is_whitespace()
}

/// Rewrites `name` into a single safe path component.
///
/// Separators, whitespace, NUL and other control characters become `_`; runs
/// of `_` collapse to one; leading and trailing `.` and `_` are dropped (so the
/// result is never hidden, `.` or `..`). The result is capped at 255 bytes
/// without splitting a character, and may be empty.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars().map(|c| if is_unsafe(c) { '_' } else { c }) {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    truncate_on_char_boundary(trimmed, NAME_MAX).to_string()
}

fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let end = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    &s[..end]
}
