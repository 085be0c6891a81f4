#![allow(dead_code)]

use nerprep::ir::{EntitySpan, Point, RawAnnotation, RawRecord};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

const WORDS: &[&str] = &[
    "John",
    "Smith",
    "Google",
    "Rust",
    "(Acme)",
    "Zürich",
    "e-mail",
    "2019–2021",
    "Inc.",
    "Sr.",
    "•",
    "Java/Spring",
];

const SEPARATORS: &[&str] = &[" ", "  ", "\n", "\t", ", ", " - ", "\n\n"];

const LABELS: &[&str] = &["Name", "Skills", "Companies worked at", "Location"];

/// Resume-like text with mixed whitespace, punctuation and multibyte chars.
pub fn arb_content(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(WORDS), prop::sample::select(SEPARATORS)),
        1..=max_words,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .map(|(word, sep)| format!("{}{}", word, sep))
            .collect()
    })
}

fn arb_labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(LABELS).prop_map(str::to_string), 0..3)
}

/// How an annotation's snippet relates to the content it was cut from.
#[derive(Clone, Copy, Debug)]
enum SnippetShape {
    Exact,
    Padded,
    Missing,
}

fn arb_shape() -> impl Strategy<Value = SnippetShape> {
    prop_oneof![
        6 => Just(SnippetShape::Exact),
        3 => Just(SnippetShape::Padded),
        1 => Just(SnippetShape::Missing),
    ]
}

/// A record whose annotations are mostly cut from its own content.
pub fn arb_record(max_words: usize, max_annotations: usize) -> impl Strategy<Value = RawRecord> {
    arb_content(max_words)
        .prop_flat_map(move |content| {
            let len = content.chars().count();
            let annotation = (0..=len, 0..=len, arb_labels(), arb_shape());
            (
                Just(content),
                prop::collection::vec(annotation, 0..=max_annotations),
            )
        })
        .prop_map(|(content, raw_annotations)| {
            let chars: Vec<char> = content.chars().collect();
            let annotations = raw_annotations
                .into_iter()
                .map(|(a, b, labels, shape)| {
                    let (start, end) = (a.min(b), a.max(b));
                    let cut: String = chars[start..end].iter().collect();
                    let text = match shape {
                        SnippetShape::Exact => cut,
                        SnippetShape::Padded => format!(" {} ", cut),
                        SnippetShape::Missing => "Nonexistent Corp".to_string(),
                    };
                    RawAnnotation {
                        points: vec![Point::new(start, end, text)],
                        labels,
                    }
                })
                .collect();
            RawRecord {
                content,
                annotations,
            }
        })
}

/// Arbitrary (possibly overlapping, possibly unsorted) spans within `len`.
pub fn arb_spans(len: usize, max_spans: usize) -> impl Strategy<Value = Vec<EntitySpan>> {
    prop::collection::vec(
        (0..len.max(1), 1..=8usize, prop::sample::select(LABELS)),
        0..=max_spans,
    )
    .prop_map(move |raw| {
        raw.into_iter()
            .map(|(start, width, label)| {
                EntitySpan::new(start, (start + width).min(len.max(start + 1)), label)
            })
            .collect()
    })
}
