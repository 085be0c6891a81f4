use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::PipelineReport;

/// The main error type for nerprep operations.
///
/// Only caller-level failures live here. Annotations and records that the
/// pipeline skips are reported through [`PipelineReport`], not as errors.
#[derive(Debug, Error)]
pub enum NerPrepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse training JSON from {path}: {source}")]
    TrainingJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write training JSON to {path}: {source}")]
    TrainingJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write tags to {path}: {source}")]
    TagsWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("Invalid split parameters: {message}")]
    InvalidSplitParams { message: String },

    #[error("Strict mode: pipeline finished with {warning_count} warning(s)")]
    StrictFailed {
        warning_count: usize,
        report: Box<PipelineReport>,
    },

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),
}
