//! End-to-end tests from Dataturks text through to training JSON.

use nerprep::ir::io_dataturks::from_dataturks_str;
use nerprep::ir::io_json::{read_training_json, write_training_json};
use nerprep::ir::EntitySpan;
use nerprep::pipeline::{prepare_corpus, process_corpus, PipelineIssueCode, PipelineSeverity};
use nerprep::split::SplitOptions;
use nerprep::tokenize::RuleTokenizer;

const SAMPLE: &str = include_str!("fixtures/resumes_sample.jsonl");

fn line(content: &str, annotations: &str) -> String {
    format!(r#"{{"content": {content:?}, "annotation": {annotations}}}"#)
}

#[test]
fn person_and_org_scenario() {
    let input = line(
        "John Smith worked at Google.",
        r#"[
            {"label": ["PERSON"], "points": [{"start": 0, "end": 9, "text": "John Smith"}]},
            {"label": ["ORG"], "points": [{"start": 21, "end": 26, "text": "Google"}]}
        ]"#,
    );
    let corpus = from_dataturks_str(&input);
    let (outcomes, report) = process_corpus(&corpus, &RuleTokenizer::new());

    assert_eq!(
        outcomes[0].example.entities,
        vec![
            EntitySpan::new(0, 10, "PERSON"),
            EntitySpan::new(21, 27, "ORG")
        ]
    );
    assert!(report.is_clean());
}

#[test]
fn newlines_and_tabs_are_normalized_before_alignment() {
    let input = line(
        "  Jane\tDoe\nSenior Engineer at Acme  ",
        r#"[{"label": ["Name"], "points": [{"start": 2, "end": 9, "text": "Jane\tDoe"}]},
            {"label": ["Companies worked at"], "points": [{"start": 30, "end": 34, "text": "Acme"}]}]"#,
    );
    let corpus = from_dataturks_str(&input);
    let (outcomes, report) = process_corpus(&corpus, &RuleTokenizer::new());
    let example = &outcomes[0].example;

    assert_eq!(example.text, "Jane Doe Senior Engineer at Acme");
    // The tab in the snippet no longer occurs in the normalized text.
    assert_eq!(report.count_of(PipelineIssueCode::SnippetNotFound), 1);
    assert_eq!(example.entities.len(), 1);
    assert_eq!(example.span_text(&example.entities[0]), Some("Acme"));
}

#[test]
fn sample_export_reports_each_kind_of_loss() {
    let corpus = from_dataturks_str(SAMPLE);
    let (outcomes, report) = process_corpus(&corpus, &RuleTokenizer::new());

    assert_eq!(outcomes.len(), 4);
    assert_eq!(report.input.malformed_records, 1);
    assert_eq!(report.count_of(PipelineIssueCode::MalformedRecord), 1);
    assert_eq!(report.count_of(PipelineIssueCode::SnippetNotFound), 1);
    assert_eq!(report.count_of(PipelineIssueCode::OverlapSkipped), 1);

    let malformed = report
        .issues
        .iter()
        .find(|i| i.code == PipelineIssueCode::MalformedRecord)
        .expect("malformed issue");
    assert_eq!(malformed.line, 4);
    assert_eq!(malformed.severity, PipelineSeverity::Warning);

    let overlap = report
        .issues
        .iter()
        .find(|i| i.code == PipelineIssueCode::OverlapSkipped)
        .expect("overlap issue");
    assert_eq!(overlap.severity, PipelineSeverity::Info);

    assert_eq!(report.output.negative_examples, 1);
}

#[test]
fn prepared_sets_round_trip_through_training_json() {
    let corpus = from_dataturks_str(SAMPLE);
    let opts = SplitOptions {
        test_fraction: 0.25,
        seed: 7,
    };
    let prepared = prepare_corpus(&corpus, &RuleTokenizer::new(), &opts).expect("prepare");
    assert_eq!(prepared.train.len(), 3);
    assert_eq!(prepared.test.len(), 1);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("train.json");
    write_training_json(&path, &prepared.train).expect("write");
    let restored = read_training_json(&path).expect("read");
    assert_eq!(restored, prepared.train);

    for example in restored.iter().chain(&prepared.test) {
        for span in &example.entities {
            let covered = example.span_text(span).expect("span in bounds");
            assert_eq!(covered, covered.trim());
        }
    }
}

#[test]
fn same_seed_same_split() {
    let corpus = from_dataturks_str(SAMPLE);
    let opts = SplitOptions {
        test_fraction: 0.5,
        seed: 1234,
    };
    let a = prepare_corpus(&corpus, &RuleTokenizer::new(), &opts).expect("first");
    let b = prepare_corpus(&corpus, &RuleTokenizer::new(), &opts).expect("second");
    assert_eq!(a.train, b.train);
    assert_eq!(a.test, b.test);
}
