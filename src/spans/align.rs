//! Snapping annotated snippets onto token boundaries.

use std::fmt;

use crate::ir::text::{byte_to_char, char_len};
use crate::ir::{Document, EntitySpan, RawAnnotation};

/// Why an annotation produced no spans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlignSkip {
    /// The annotation has no points.
    MissingPoint,
    /// The annotation has no labels.
    NoLabels,
    /// The snippet is empty after trimming.
    EmptySnippet,
    /// The trimmed snippet does not occur in the normalized text.
    SnippetNotFound { snippet: String },
    /// The match intersects no token (it lies entirely in whitespace).
    NoCoveringToken { start: usize, end: usize },
}

impl fmt::Display for AlignSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignSkip::MissingPoint => write!(f, "annotation has no points"),
            AlignSkip::NoLabels => write!(f, "annotation has no labels"),
            AlignSkip::EmptySnippet => write!(f, "snippet is empty after trimming"),
            AlignSkip::SnippetNotFound { snippet } => {
                write!(f, "snippet '{}' not found in text", snippet)
            }
            AlignSkip::NoCoveringToken { start, end } => {
                write!(f, "no token covers match [{}, {})", start, end)
            }
        }
    }
}

/// Aligns one annotation against a prepared document.
///
/// The snippet is located by its first exact occurrence in the normalized
/// text; the declared offsets are not used to disambiguate. A match that
/// does not already sit on token boundaries is widened to every token it
/// touches. One span is produced per label, all with the same boundaries.
pub fn align_annotation(
    doc: &Document,
    annotation: &RawAnnotation,
) -> Result<Vec<EntitySpan>, AlignSkip> {
    let point = annotation.primary_point().ok_or(AlignSkip::MissingPoint)?;
    if annotation.labels.is_empty() {
        return Err(AlignSkip::NoLabels);
    }

    let snippet = point.text.trim();
    if snippet.is_empty() {
        return Err(AlignSkip::EmptySnippet);
    }

    let (match_start, match_end) =
        find_first(doc.text(), snippet).ok_or_else(|| AlignSkip::SnippetNotFound {
            snippet: snippet.to_string(),
        })?;

    let (start, end) = snap_to_tokens(doc, match_start, match_end).ok_or(
        AlignSkip::NoCoveringToken {
            start: match_start,
            end: match_end,
        },
    )?;

    Ok(annotation
        .labels
        .iter()
        .map(|label| EntitySpan::new(start, end, label.clone()))
        .collect())
}

/// Aligns every annotation, collecting spans and per-annotation skips.
///
/// Skips carry the annotation's index in `annotations`.
pub fn align(
    doc: &Document,
    annotations: &[RawAnnotation],
) -> (Vec<EntitySpan>, Vec<(usize, AlignSkip)>) {
    let mut spans = Vec::new();
    let mut skipped = Vec::new();

    for (idx, annotation) in annotations.iter().enumerate() {
        match align_annotation(doc, annotation) {
            Ok(aligned) => spans.extend(aligned),
            Err(skip) => {
                tracing::debug!(annotation = idx, reason = %skip, "annotation skipped");
                skipped.push((idx, skip));
            }
        }
    }

    (spans, skipped)
}

/// First occurrence of `needle` in `haystack`, as character offsets.
fn find_first(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let byte = haystack.find(needle)?;
    let start = byte_to_char(haystack, byte);
    Some((start, start + char_len(needle)))
}

fn snap_to_tokens(doc: &Document, start: usize, end: usize) -> Option<(usize, usize)> {
    if doc.is_token_start(start) && doc.is_token_end(end) {
        return Some((start, end));
    }

    let mut covering = doc.tokens_overlapping(start, end);
    let first = covering.next()?;
    let last = covering.last().unwrap_or(first);
    Some((first.index, last.end()))
}
