//! Whitespace trimming of span boundaries.

use crate::ir::EntitySpan;

/// Moves `start` forward and `end` backward past whitespace.
///
/// `text` is the document as characters. The label is untouched, and the
/// result never has `end < start`. An all-whitespace span collapses to an
/// empty span at its first non-whitespace position (or its end).
pub fn trim_span(text: &[char], span: &EntitySpan) -> EntitySpan {
    let end_limit = span.end.min(text.len());
    let mut start = span.start;
    let mut end = end_limit;

    while start < end && text[start].is_whitespace() {
        start += 1;
    }
    while end > start && text[end - 1].is_whitespace() {
        end -= 1;
    }

    EntitySpan::new(start, end.max(start), span.label.clone())
}
