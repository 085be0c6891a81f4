//! JSON serialization for training examples.
//!
//! A training set is written as a JSON array of
//! `{"text": ..., "entities": [{"start", "end", "label"}]}` objects, with
//! character offsets. This is what `prepare` writes for `train.json` and
//! `test.json`, and what a trainer process reads back.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::TrainingExample;
use crate::error::NerPrepError;

/// Reads training examples from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_training_json(path: &Path) -> Result<Vec<TrainingExample>, NerPrepError> {
    let file = File::open(path).map_err(NerPrepError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| NerPrepError::TrainingJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes training examples to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_training_json(path: &Path, examples: &[TrainingExample]) -> Result<(), NerPrepError> {
    let file = File::create(path).map_err(NerPrepError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, examples).map_err(|source| {
        NerPrepError::TrainingJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads training examples from a JSON string.
pub fn from_json_str(json: &str) -> Result<Vec<TrainingExample>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes training examples to a JSON string.
pub fn to_json_string(examples: &[TrainingExample]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(examples)
}
