//! The annotation-to-training-example pipeline.
//!
//! Per record: normalize and tokenize, align every annotation, trim each
//! span, drop spans that trimmed to nothing, resolve overlaps. Per corpus:
//! process records in input order, then split. A record that keeps no
//! entities is still emitted, as a negative example.

pub mod report;

pub use report::{
    InputCounts, OutputCounts, PipelineIssue, PipelineIssueCode, PipelineReport,
    PipelineSeverity, SplitCounts,
};

use crate::error::NerPrepError;
use crate::ir::io_dataturks::DataturksCorpus;
use crate::ir::text::char_slice;
use crate::ir::{Document, EntitySpan, RawRecord, Token, TrainingExample};
use crate::spans::{align, resolve_overlaps, trim_span, AlignSkip};
use crate::split::{split_corpus, SplitOptions};
use crate::tokenize::Tokenizer;

/// The result of running one record through the span stages.
#[derive(Clone, Debug)]
pub struct ExampleOutcome {
    pub example: TrainingExample,
    /// Tokens of the normalized text, as the aligner saw them.
    pub tokens: Vec<Token>,
    /// Annotations that produced no spans, by annotation index.
    pub skipped: Vec<(usize, AlignSkip)>,
    /// Aligned spans that were all whitespace.
    pub emptied: Vec<EntitySpan>,
    /// Spans dropped by overlap resolution.
    pub overlaps: Vec<EntitySpan>,
}

/// Runs the span stages over a single record.
pub fn build_example<T>(record: &RawRecord, tokenizer: &T) -> ExampleOutcome
where
    T: Tokenizer + ?Sized,
{
    let doc = Document::prepare(&record.content, tokenizer);
    let (aligned, skipped) = align(&doc, &record.annotations);

    let mut trimmed = Vec::with_capacity(aligned.len());
    let mut emptied = Vec::new();
    for span in &aligned {
        let span_trimmed = trim_span(doc.chars(), span);
        if span_trimmed.is_empty() {
            emptied.push(span.clone());
        } else {
            trimmed.push(span_trimmed);
        }
    }

    let resolved = resolve_overlaps(trimmed);
    let (text, tokens) = doc.into_parts();

    ExampleOutcome {
        example: TrainingExample::new(text, resolved.kept),
        tokens,
        skipped,
        emptied,
        overlaps: resolved.skipped,
    }
}

/// Runs every parsed record through [`build_example`], in input order.
///
/// Malformed lines and everything the span stages dropped are recorded in
/// the returned report.
pub fn process_corpus<T>(
    corpus: &DataturksCorpus,
    tokenizer: &T,
) -> (Vec<ExampleOutcome>, PipelineReport)
where
    T: Tokenizer + ?Sized,
{
    let mut report = PipelineReport::new();
    report.input = InputCounts {
        records: corpus.records.len(),
        malformed_records: corpus.malformed.len(),
        annotations: corpus.annotation_count(),
    };

    for malformed in &corpus.malformed {
        report.add(PipelineIssue::warning(
            PipelineIssueCode::MalformedRecord,
            malformed.line,
            malformed.message.clone(),
        ));
    }

    let mut outcomes = Vec::with_capacity(corpus.records.len());
    for (idx, record) in corpus.records.iter().enumerate() {
        let line = corpus.record_lines.get(idx).copied().unwrap_or(idx + 1);
        let outcome = build_example(record, tokenizer);
        record_outcome(&outcome, line, &mut report);
        outcomes.push(outcome);
    }

    tracing::info!(
        records = report.input.records,
        examples = report.output.examples,
        entities = report.output.entities,
        "corpus processed"
    );

    (outcomes, report)
}

fn record_outcome(outcome: &ExampleOutcome, line: usize, report: &mut PipelineReport) {
    for (ann_idx, skip) in &outcome.skipped {
        let code = match skip {
            AlignSkip::MissingPoint => PipelineIssueCode::MissingPoint,
            AlignSkip::NoLabels => PipelineIssueCode::NoLabels,
            AlignSkip::EmptySnippet => PipelineIssueCode::EmptySnippet,
            AlignSkip::SnippetNotFound { .. } => PipelineIssueCode::SnippetNotFound,
            AlignSkip::NoCoveringToken { .. } => PipelineIssueCode::NoCoveringToken,
        };
        let message = format!("annotation {}: {}", ann_idx, skip);
        let issue = match skip {
            AlignSkip::EmptySnippet => PipelineIssue::info(code, line, message),
            _ => PipelineIssue::warning(code, line, message),
        };
        report.add(issue);
    }

    for span in &outcome.emptied {
        report.add(PipelineIssue::warning(
            PipelineIssueCode::EmptyAfterTrim,
            line,
            format!("span {} is only whitespace", span),
        ));
    }

    let text = &outcome.example.text;
    for span in &outcome.overlaps {
        report.add(PipelineIssue::info(
            PipelineIssueCode::OverlapSkipped,
            line,
            format!(
                "overlapping entity '{}' ({}) at [{}, {}) dropped",
                char_slice(text, span.start, span.end).unwrap_or_default(),
                span.label,
                span.start,
                span.end
            ),
        ));
    }

    let entities = &outcome.example.entities;
    report.output.examples += 1;
    report.output.entities += entities.len();
    if entities.is_empty() {
        report.output.negative_examples += 1;
    }
    for span in entities {
        *report.labels.entry(span.label.clone()).or_insert(0) += 1;
    }
}

/// Fuzz-only entrypoint: parse raw export bytes and run every record
/// through the span stages.
#[cfg(feature = "fuzzing")]
pub fn fuzz_process_slice(bytes: &[u8]) -> PipelineReport {
    let corpus = crate::ir::io_dataturks::from_dataturks_slice(bytes);
    let (_, report) = process_corpus(&corpus, &crate::tokenize::RuleTokenizer::new());
    report
}

/// Training and test sets plus the report that produced them.
#[derive(Clone, Debug)]
pub struct PreparedCorpus {
    pub train: Vec<TrainingExample>,
    pub test: Vec<TrainingExample>,
    pub report: PipelineReport,
}

/// Processes a whole corpus and splits it into train and test sets.
///
/// # Errors
/// Fails only on invalid split options, which [`split_corpus`] checks.
/// Skipped data is reported, not returned as an error.
pub fn prepare_corpus<T>(
    corpus: &DataturksCorpus,
    tokenizer: &T,
    opts: &SplitOptions,
) -> Result<PreparedCorpus, NerPrepError>
where
    T: Tokenizer + ?Sized,
{
    let (outcomes, mut report) = process_corpus(corpus, tokenizer);
    let examples: Vec<TrainingExample> = outcomes.into_iter().map(|o| o.example).collect();
    let split = split_corpus(examples, opts)?;

    report.split = Some(SplitCounts {
        train: split.train.len(),
        test: split.test.len(),
        test_fraction: opts.test_fraction,
        seed: opts.seed,
    });

    Ok(PreparedCorpus {
        train: split.train,
        test: split.test,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Point, RawAnnotation};
    use crate::tokenize::RuleTokenizer;

    fn record(content: &str, anns: &[(usize, usize, &str, &str)]) -> RawRecord {
        anns.iter().fold(RawRecord::new(content), |r, (s, e, text, label)| {
            r.with_annotation(RawAnnotation::new(Point::new(*s, *e, *text), *label))
        })
    }

    #[test]
    fn person_scenario_survives_every_stage() {
        let rec = record(
            "John Smith worked at Google.",
            &[(0, 10, "John Smith", "PERSON")],
        );
        let outcome = build_example(&rec, &RuleTokenizer::new());
        assert_eq!(
            outcome.example.entities,
            vec![EntitySpan::new(0, 10, "PERSON")]
        );
        assert!(outcome.skipped.is_empty());
        assert!(outcome.overlaps.is_empty());
    }

    #[test]
    fn overlapping_annotations_keep_the_earlier_one() {
        let rec = record(
            "John Smith Google Inc is here",
            &[
                (0, 10, "John Smith", "PERSON"),
                (5, 17, "Smith Google", "ORG"),
            ],
        );
        let outcome = build_example(&rec, &RuleTokenizer::new());
        assert_eq!(
            outcome.example.entities,
            vec![EntitySpan::new(0, 10, "PERSON")]
        );
        assert_eq!(outcome.overlaps, vec![EntitySpan::new(5, 17, "ORG")]);
    }

    #[test]
    fn padded_snippet_ends_up_without_padding() {
        let rec = record("Worked at  Google  for years", &[(9, 19, " Google ", "ORG")]);
        let outcome = build_example(&rec, &RuleTokenizer::new());
        let span = &outcome.example.entities[0];
        assert_eq!(outcome.example.span_text(span), Some("Google"));
    }

    #[test]
    fn record_without_entities_is_a_negative_example() {
        let rec = record("Nothing to see", &[(0, 3, "IBM", "ORG")]);
        let outcome = build_example(&rec, &RuleTokenizer::new());
        assert!(outcome.example.is_negative());
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn process_corpus_reports_everything_dropped() {
        let mut corpus = DataturksCorpus::from_records(vec![
            record(
                "Alice Doe, Rust, Rust",
                &[
                    (0, 9, "Alice Doe", "Name"),
                    (11, 15, "Rust", "Skills"),
                    (17, 21, "Rust", "Skills"),
                    (0, 3, "Bob", "Name"),
                ],
            ),
            RawRecord::new("empty resume"),
        ]);
        corpus.malformed.push(crate::ir::io_dataturks::MalformedLine {
            line: 3,
            message: "EOF while parsing".into(),
        });

        let (outcomes, report) = process_corpus(&corpus, &RuleTokenizer::new());
        assert_eq!(outcomes.len(), 2);
        assert_eq!(report.input.records, 2);
        assert_eq!(report.input.annotations, 4);
        assert_eq!(report.output.examples, 2);
        assert_eq!(report.output.negative_examples, 1);
        // Both "Rust" annotations match the first occurrence.
        assert_eq!(report.output.entities, 2);
        assert_eq!(report.count_of(PipelineIssueCode::OverlapSkipped), 1);
        assert_eq!(report.count_of(PipelineIssueCode::SnippetNotFound), 1);
        assert_eq!(report.count_of(PipelineIssueCode::MalformedRecord), 1);
        assert_eq!(report.labels.get("Skills"), Some(&1));
    }

    #[test]
    fn prepare_corpus_splits_and_records_sizes() {
        let records = (0..10)
            .map(|i| record(&format!("Candidate {i} knows Rust"), &[(0, 9, "Candidate", "Name")]))
            .collect();
        let corpus = DataturksCorpus::from_records(records);
        let opts = SplitOptions {
            test_fraction: 0.2,
            seed: 42,
        };
        let prepared = prepare_corpus(&corpus, &RuleTokenizer::new(), &opts).expect("prepare");
        assert_eq!(prepared.train.len(), 8);
        assert_eq!(prepared.test.len(), 2);
        let split = prepared.report.split.expect("split counts");
        assert_eq!((split.train, split.test), (8, 2));
    }

    #[test]
    fn prepare_corpus_rejects_bad_options() {
        let corpus = DataturksCorpus::default();
        let opts = SplitOptions {
            test_fraction: 2.0,
            seed: 0,
        };
        assert!(matches!(
            prepare_corpus(&corpus, &RuleTokenizer::new(), &opts),
            Err(NerPrepError::InvalidSplitParams { .. })
        ));
    }
}
