//! Greedy overlap resolution.

use crate::ir::EntitySpan;

/// Spans kept and spans rejected by [`resolve_overlaps`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolved {
    /// Non-overlapping spans, sorted by start.
    pub kept: Vec<EntitySpan>,
    /// Spans dropped because they overlap an earlier kept span.
    pub skipped: Vec<EntitySpan>,
}

/// Removes overlapping spans, earliest start first.
///
/// Spans are stably sorted by `start`, so equal starts keep declaration
/// order. A span is kept only if it begins at or after the end of the last
/// kept span. This can drop a later span that would have covered more
/// text; the earliest-declared entity always wins.
pub fn resolve_overlaps(mut spans: Vec<EntitySpan>) -> Resolved {
    spans.sort_by_key(|s| s.start);

    let mut resolved = Resolved::default();
    let mut prev_end = 0;

    for span in spans {
        if span.start < prev_end {
            tracing::debug!(entity = %span, prev_end, "overlapping span skipped");
            resolved.skipped.push(span);
            continue;
        }
        prev_end = span.end;
        resolved.kept.push(span);
    }

    resolved
}
