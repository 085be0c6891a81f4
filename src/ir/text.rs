//! Character-offset helpers.
//!
//! Annotation tools count offsets in characters. Rust strings index by
//! byte, so every offset crossing that boundary goes through here.

/// Replaces newlines and tabs with single spaces and strips both ends.
///
/// Applied once per document before tokenization and alignment.
pub fn normalize_content(raw: &str) -> String {
    raw.replace(['\n', '\t'], " ").trim().to_string()
}

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Converts a byte offset into a character offset.
///
/// `byte` must lie on a char boundary.
pub fn byte_to_char(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}

/// Converts a character offset into a byte offset.
///
/// An offset equal to the character length maps to `s.len()`. Offsets past
/// the end return `None`.
pub fn char_to_byte(s: &str, char_offset: usize) -> Option<usize> {
    if char_offset == 0 {
        return Some(0);
    }
    let mut count = 0;
    for (byte, _) in s.char_indices() {
        if count == char_offset {
            return Some(byte);
        }
        count += 1;
    }
    (count == char_offset).then_some(s.len())
}

/// Slices `s` by character offsets `[start, end)`.
pub fn char_slice(s: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let from = char_to_byte(s, start)?;
    let to = char_to_byte(s, end)?;
    Some(&s[from..to])
}
