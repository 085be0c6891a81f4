//! Dataturks JSON-lines reader.
//!
//! The annotation export is one JSON object per line:
//!
//! ```text
//! {"content": "...", "annotation": [{"points": [{"start": 0, "end": 9, "text": "..."}], "label": ["Name"]}]}
//! ```
//!
//! `label` may be a string or a list of strings; it is normalized to a list
//! here so later stages never see the two shapes. `annotation` may be
//! `null`. Lines that fail to parse are collected as [`MalformedLine`]s and
//! do not stop the rest of the file from being read.

use std::path::Path;

use serde::Deserialize;

use super::model::{Point, RawAnnotation, RawRecord};
use crate::error::NerPrepError;

// ============================================================================
// Dataturks schema types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
struct DtRecord {
    content: String,
    #[serde(default)]
    annotation: Option<Vec<DtAnnotation>>,
}

#[derive(Debug, Deserialize)]
struct DtAnnotation {
    points: Vec<DtPoint>,
    label: DtLabel,
}

// Offsets are never used for matching, so any JSON value is accepted.
#[derive(Debug, Deserialize)]
struct DtPoint {
    #[serde(default)]
    start: Option<serde_json::Value>,
    #[serde(default)]
    end: Option<serde_json::Value>,
    text: String,
}

fn declared_offset(value: Option<serde_json::Value>) -> Option<usize> {
    value?.as_u64().and_then(|n| usize::try_from(n).ok())
}

impl From<DtPoint> for Point {
    fn from(point: DtPoint) -> Self {
        Point {
            start: declared_offset(point.start),
            end: declared_offset(point.end),
            text: point.text,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DtLabel {
    One(String),
    Many(Vec<String>),
}

impl From<DtLabel> for Vec<String> {
    fn from(label: DtLabel) -> Self {
        match label {
            DtLabel::One(label) => vec![label],
            DtLabel::Many(labels) => labels,
        }
    }
}

impl From<DtRecord> for RawRecord {
    fn from(record: DtRecord) -> Self {
        let annotations = record
            .annotation
            .unwrap_or_default()
            .into_iter()
            .map(|ann| RawAnnotation {
                points: ann.points.into_iter().map(Point::from).collect(),
                labels: ann.label.into(),
            })
            .collect();

        RawRecord {
            content: record.content,
            annotations,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// A line that could not be turned into a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number in the input.
    pub line: usize,
    pub message: String,
}

/// Everything read from one export file.
#[derive(Clone, Debug, Default)]
pub struct DataturksCorpus {
    /// Parsed records in input order.
    pub records: Vec<RawRecord>,
    /// 1-based source line of each entry in `records`.
    pub record_lines: Vec<usize>,
    pub malformed: Vec<MalformedLine>,
}

impl DataturksCorpus {
    /// Builds a corpus from records that did not come from a file.
    ///
    /// Line numbers are assigned as if each record were on its own line.
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        let record_lines = (1..=records.len()).collect();
        Self {
            records,
            record_lines,
            malformed: Vec::new(),
        }
    }

    /// Number of annotations across all parsed records.
    pub fn annotation_count(&self) -> usize {
        self.records.iter().map(|r| r.annotations.len()).sum()
    }
}

/// Reads a Dataturks JSON-lines export from disk.
///
/// # Errors
/// Only I/O failures are errors. Unparseable lines end up in
/// [`DataturksCorpus::malformed`].
pub fn read_dataturks_jsonl(path: &Path) -> Result<DataturksCorpus, NerPrepError> {
    let bytes = std::fs::read(path).map_err(NerPrepError::Io)?;
    Ok(from_dataturks_slice(&bytes))
}

/// Parses a Dataturks JSON-lines export from a string.
pub fn from_dataturks_str(input: &str) -> DataturksCorpus {
    parse_lines(input.split('\n').map(Ok))
}

/// Parses a Dataturks JSON-lines export from bytes.
///
/// A line that is not valid UTF-8 is reported as malformed.
pub fn from_dataturks_slice(bytes: &[u8]) -> DataturksCorpus {
    parse_lines(
        bytes
            .split(|b| *b == b'\n')
            .map(|line| std::str::from_utf8(line).map_err(|e| e.to_string())),
    )
}

fn parse_lines<'a, I>(lines: I) -> DataturksCorpus
where
    I: Iterator<Item = Result<&'a str, String>>,
{
    let mut corpus = DataturksCorpus::default();

    for (idx, line) in lines.enumerate() {
        let line_no = idx + 1;
        let parsed = line.and_then(|line| {
            let line = line.trim_end_matches('\r');
            let line = line.strip_prefix('\u{feff}').unwrap_or(line);
            if line.trim().is_empty() {
                return Ok(None);
            }
            serde_json::from_str::<DtRecord>(line)
                .map(Some)
                .map_err(|e| e.to_string())
        });

        match parsed {
            Ok(Some(record)) => {
                corpus.records.push(record.into());
                corpus.record_lines.push(line_no);
            }
            Ok(None) => {}
            Err(message) => {
                tracing::warn!(line = line_no, %message, "malformed record skipped");
                corpus.malformed.push(MalformedLine {
                    line: line_no,
                    message,
                });
            }
        }
    }

    corpus
}
