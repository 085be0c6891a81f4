//! Core value types for the nerprep pipeline.
//!
//! Raw records come out of the annotation tool and are never mutated.
//! Training examples are derived from them and handed to a trainer. All
//! offsets are character offsets (Unicode scalar values), not byte offsets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One annotated document as read from the annotation export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// The document text exactly as annotated (not yet normalized).
    pub content: String,

    /// Annotations in declaration order.
    pub annotations: Vec<RawAnnotation>,
}

impl RawRecord {
    /// Creates a record with no annotations.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            annotations: Vec::new(),
        }
    }

    /// Adds an annotation to the record.
    pub fn with_annotation(mut self, annotation: RawAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A single human annotation: one or more points plus one or more labels.
///
/// Only the first point is used by the aligner. Labels are already
/// normalized to a list; a single-string label becomes a one-element list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawAnnotation {
    pub points: Vec<Point>,
    pub labels: Vec<String>,
}

impl RawAnnotation {
    /// Creates an annotation with a single point and a single label.
    pub fn new(point: Point, label: impl Into<String>) -> Self {
        Self {
            points: vec![point],
            labels: vec![label.into()],
        }
    }

    /// Creates an annotation with a single point fanned out to several labels.
    pub fn with_labels<I, S>(point: Point, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            points: vec![point],
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The point the aligner works from.
    pub fn primary_point(&self) -> Option<&Point> {
        self.points.first()
    }
}

/// The text the annotator selected, with its declared character range.
///
/// Alignment only uses `text`. The declared offsets are `None` when the
/// export had no usable non-negative integer for them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub text: String,
}

impl Point {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            text: text.into(),
        }
    }
}

/// A token produced by a [`Tokenizer`](crate::tokenize::Tokenizer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Character offset of the first character.
    pub index: usize,
    pub text: String,
}

impl Token {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Length of the token in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character offset one past the last character.
    pub fn end(&self) -> usize {
        self.index + self.char_len()
    }

    /// Returns true if the token's range intersects `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.index < end && self.end() > start
    }
}

/// A labelled half-open character range `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Length in characters. Zero for degenerate spans.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns true if the two spans share at least one character.
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for EntitySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) {}", self.start, self.end, self.label)
    }
}

/// A normalized document with its resolved entities, ready for training.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<EntitySpan>,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, entities: Vec<EntitySpan>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    /// A negative example has no entities at all.
    pub fn is_negative(&self) -> bool {
        self.entities.is_empty()
    }

    /// The text covered by `span`, by character offsets.
    ///
    /// Returns `None` if the span is out of range for this example.
    pub fn span_text(&self, span: &EntitySpan) -> Option<&str> {
        super::text::char_slice(&self.text, span.start, span.end)
    }
}
