//! Value types and I/O for the nerprep pipeline.
//!
//! Raw records ([`RawRecord`], [`RawAnnotation`], [`Point`]) are what the
//! annotation tool exported. [`Document`] is the normalized, tokenized view
//! the span stages work on. [`TrainingExample`] and [`EntitySpan`] are the
//! output handed to a trainer.
//!
//! Offsets everywhere are character offsets into the normalized text.
//!
//! # Example
//!
//! ```
//! use nerprep::ir::{Document, EntitySpan, Point, RawAnnotation};
//! use nerprep::spans::align_annotation;
//! use nerprep::tokenize::RuleTokenizer;
//!
//! let doc = Document::prepare("John Smith worked at Google.", &RuleTokenizer::new());
//! let ann = RawAnnotation::new(Point::new(0, 10, "John Smith"), "PERSON");
//! assert_eq!(
//!     align_annotation(&doc, &ann),
//!     Ok(vec![EntitySpan::new(0, 10, "PERSON")])
//! );
//! ```

mod document;
pub mod io_dataturks;
pub mod io_json;
mod model;
pub mod text;

// Re-export core types for convenient access
pub use document::Document;
pub use model::{EntitySpan, Point, RawAnnotation, RawRecord, Token, TrainingExample};
