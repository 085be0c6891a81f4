//! Pipeline report types for tracking what was skipped and why.
//!
//! Nothing the pipeline drops disappears silently: every skipped record,
//! annotation or span becomes a [`PipelineIssue`] here.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A report generated while turning raw records into training examples.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PipelineReport {
    /// Counts from the input file.
    pub input: InputCounts,
    /// Counts of produced training examples.
    pub output: OutputCounts,
    /// Split sizes, once the corpus has been split.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitCounts>,
    /// Number of kept entities per label.
    pub labels: BTreeMap<String, usize>,
    /// Issues discovered while processing.
    pub issues: Vec<PipelineIssue>,
}

impl PipelineReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: PipelineIssue) {
        self.issues.push(issue);
    }

    /// Count of warning-level issues (data that was lost).
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == PipelineSeverity::Warning)
            .count()
    }

    /// Count of info-level issues (policy decisions).
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == PipelineSeverity::Info)
            .count()
    }

    /// Number of issues with the given code.
    pub fn count_of(&self, code: PipelineIssueCode) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }

    /// Returns true if no issues were recorded at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  input: {} record(s), {} annotation(s), {} malformed line(s)",
            self.input.records, self.input.annotations, self.input.malformed_records
        )?;
        writeln!(
            f,
            "  output: {} example(s) ({} negative), {} entit{}",
            self.output.examples,
            self.output.negative_examples,
            self.output.entities,
            if self.output.entities == 1 { "y" } else { "ies" }
        )?;

        if let Some(split) = &self.split {
            writeln!(
                f,
                "  split: {} train, {} test (test fraction {}, seed {})",
                split.train, split.test, split.test_fraction, split.seed
            )?;
        }

        if !self.labels.is_empty() {
            writeln!(f)?;
            writeln!(f, "Labels ({}):", self.labels.len())?;
            for (label, count) in &self.labels {
                writeln!(f, "  {:<30} {}", label, count)?;
            }
        }

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == PipelineSeverity::Warning)
            {
                writeln!(f, "  - {}", issue)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == PipelineSeverity::Info)
            {
                writeln!(f, "  - {}", issue)?;
            }
        }

        Ok(())
    }
}

/// Counts taken from the input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InputCounts {
    pub records: usize,
    pub malformed_records: usize,
    pub annotations: usize,
}

/// Counts of produced training examples.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OutputCounts {
    pub examples: usize,
    pub negative_examples: usize,
    pub entities: usize,
}

/// Train/test sizes and the parameters that produced them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplitCounts {
    pub train: usize,
    pub test: usize,
    pub test_fraction: f64,
    pub seed: u64,
}

/// A single issue discovered while processing.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineIssue {
    pub severity: PipelineSeverity,
    pub code: PipelineIssueCode,
    pub message: String,
    /// 1-based input line of the record the issue belongs to.
    pub line: usize,
}

impl PipelineIssue {
    /// Create a warning-level issue (data was dropped).
    pub fn warning(code: PipelineIssueCode, line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: PipelineSeverity::Warning,
            code,
            message: message.into(),
            line,
        }
    }

    /// Create an info-level issue (expected policy outcome).
    pub fn info(code: PipelineIssueCode, line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: PipelineSeverity::Info,
            code,
            message: message.into(),
            line,
        }
    }
}

impl fmt::Display for PipelineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {:?}: {}", self.line, self.code, self.message)
    }
}

/// Severity level for pipeline issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineSeverity {
    /// Annotation data was dropped; fails `--strict`.
    Warning,
    /// A deterministic policy decision; never blocks.
    Info,
}

/// Stable issue codes for programmatic consumption.
///
/// These codes are part of the JSON report and should remain stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineIssueCode {
    /// A line could not be parsed into a record.
    MalformedRecord,
    /// An annotation had an empty `points` list.
    MissingPoint,
    /// An annotation had an empty label list.
    NoLabels,
    /// An annotation's snippet was blank.
    EmptySnippet,
    /// An annotation's snippet does not occur in the normalized text.
    SnippetNotFound,
    /// A matched snippet touched no token.
    NoCoveringToken,
    /// A span was all whitespace and trimmed to nothing.
    EmptyAfterTrim,
    /// A span overlapped an earlier span and was dropped.
    OverlapSkipped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_clean() {
        let report = PipelineReport::new();
        assert!(report.is_clean());
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.info_count(), 0);
    }

    #[test]
    fn counts_by_severity_and_code() {
        let mut report = PipelineReport::new();
        report.add(PipelineIssue::warning(
            PipelineIssueCode::SnippetNotFound,
            3,
            "snippet 'IBM' not found in text",
        ));
        report.add(PipelineIssue::info(
            PipelineIssueCode::OverlapSkipped,
            3,
            "dropped [5, 15) ORG",
        ));
        report.add(PipelineIssue::info(
            PipelineIssueCode::OverlapSkipped,
            4,
            "dropped [0, 2) ORG",
        ));
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.info_count(), 2);
        assert_eq!(report.count_of(PipelineIssueCode::OverlapSkipped), 2);
    }

    #[test]
    fn display_lists_labels_and_issues() {
        let mut report = PipelineReport::new();
        report.labels.insert("Name".into(), 2);
        report.add(PipelineIssue::warning(
            PipelineIssueCode::MalformedRecord,
            7,
            "expected value",
        ));
        let text = report.to_string();
        assert!(text.contains("Labels (1):"));
        assert!(text.contains("Warnings (1):"));
        assert!(text.contains("line 7: MalformedRecord: expected value"));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = PipelineReport::new();
        report.split = Some(SplitCounts {
            train: 8,
            test: 2,
            test_fraction: 0.2,
            seed: 42,
        });
        report.add(PipelineIssue::info(
            PipelineIssueCode::OverlapSkipped,
            1,
            "dropped",
        ));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"train\":8"));
        assert!(json.contains("\"severity\":\"info\""));
        assert!(json.contains("\"code\":\"overlap_skipped\""));
    }
}
