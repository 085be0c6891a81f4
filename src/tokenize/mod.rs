//! Tokenizer capability and the built-in rule tokenizer.
//!
//! The pipeline only depends on the [`Tokenizer`] trait. Tokens carry
//! character offsets into the text they were produced from, and must be
//! ordered and non-overlapping.

use crate::ir::Token;

/// Segments text into ordered tokens with character offsets.
///
/// Implementations must be deterministic: equal input yields equal tokens.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }
}

/// Whitespace tokenizer that also splits punctuation off word edges.
///
/// `"(Google)."` becomes `(`, `Google`, `)`, `.`. Punctuation inside a word
/// (`e-mail`, `U.S`) stays attached. Whitespace is never part of a token.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleTokenizer;

impl RuleTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut chunk: Vec<char> = Vec::new();
        let mut chunk_start = 0;

        for (offset, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                emit_chunk(&chunk, chunk_start, &mut tokens);
                chunk.clear();
            } else {
                if chunk.is_empty() {
                    chunk_start = offset;
                }
                chunk.push(c);
            }
        }
        emit_chunk(&chunk, chunk_start, &mut tokens);

        tokens
    }
}

fn is_edge_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2013}' | '\u{2014}' | '\u{2022}'
        )
}

/// Splits one whitespace-free chunk into prefix punctuation, core, suffix
/// punctuation.
fn emit_chunk(chunk: &[char], start: usize, tokens: &mut Vec<Token>) {
    if chunk.is_empty() {
        return;
    }

    let prefix = chunk
        .iter()
        .take_while(|c| is_edge_punctuation(**c))
        .count();
    let suffix = chunk[prefix..]
        .iter()
        .rev()
        .take_while(|c| is_edge_punctuation(**c))
        .count();
    let core_end = chunk.len() - suffix;

    for (i, c) in chunk[..prefix].iter().enumerate() {
        tokens.push(Token::new(start + i, c.to_string()));
    }
    if core_end > prefix {
        tokens.push(Token::new(
            start + prefix,
            chunk[prefix..core_end].iter().collect::<String>(),
        ));
    }
    for (i, c) in chunk[core_end..].iter().enumerate() {
        tokens.push(Token::new(start + core_end + i, c.to_string()));
    }
}
