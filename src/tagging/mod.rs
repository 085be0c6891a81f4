//! BILOU tagging of tokens.
//!
//! Sequence labelers are trained on one tag per token rather than on
//! character spans. Each entity contributes `U-` for a single-token
//! entity, or `B-`, `I-`…, `L-` across several tokens; everything else is
//! `O`.

use serde::Serialize;

use crate::ir::{EntitySpan, Token};

/// Tag for tokens outside any entity.
pub const OUTSIDE: &str = "O";

/// Tags each token with its BILOU tag.
///
/// Only tokens that lie entirely inside `[start, end)` belong to an
/// entity. An entity that covers no whole token tags nothing. If entities
/// overlap, the later one overwrites; resolved spans never overlap.
pub fn bilou_tags(tokens: &[Token], entities: &[EntitySpan]) -> Vec<String> {
    let mut tags = vec![OUTSIDE.to_string(); tokens.len()];

    for entity in entities {
        let inside: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.index >= entity.start && t.end() <= entity.end)
            .map(|(i, _)| i)
            .collect();

        let last = inside.len().saturating_sub(1);
        for (pos, &token_idx) in inside.iter().enumerate() {
            let prefix = match (inside.len(), pos) {
                (1, _) => "U",
                (_, 0) => "B",
                (_, p) if p == last => "L",
                _ => "I",
            };
            tags[token_idx] = format!("{}-{}", prefix, entity.label);
        }
    }

    tags
}

/// One example as token texts plus their tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaggedExample {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
}

impl TaggedExample {
    pub fn new(tokens: &[Token], entities: &[EntitySpan]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.text.clone()).collect(),
            tags: bilou_tags(tokens, entities),
        }
    }
}
