//! Shared utility functions.

/// Number of characters (Unicode scalar values) in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `count` characters of `s`.
pub fn char_prefix(s: &str, count: usize) -> &str {
    match s.char_indices().nth(count) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// The last `count` characters of `s`.
pub fn char_suffix(s: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match s.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
