//! Span stages: alignment, trimming and overlap resolution.
//!
//! Each stage is a pure function over one document. The pipeline driver
//! runs them in order: align, then trim, then resolve.

mod align;
mod overlap;
mod trim;

pub use align::{align, align_annotation, AlignSkip};
pub use overlap::{resolve_overlaps, Resolved};
pub use trim::trim_span;
