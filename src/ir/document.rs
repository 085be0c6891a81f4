//! A normalized, tokenized document.

use std::collections::HashSet;

use super::model::Token;
use super::text::normalize_content;
use crate::tokenize::Tokenizer;

/// Normalized text plus the token view the aligner snaps spans to.
///
/// Built once per record; every annotation of that record is aligned
/// against the same instance.
#[derive(Clone, Debug)]
pub struct Document {
    text: String,
    chars: Vec<char>,
    tokens: Vec<Token>,
    token_starts: HashSet<usize>,
    token_ends: HashSet<usize>,
}

impl Document {
    /// Normalizes `content` and tokenizes the result.
    pub fn prepare<T>(content: &str, tokenizer: &T) -> Self
    where
        T: Tokenizer + ?Sized,
    {
        let text = normalize_content(content);
        let tokens = tokenizer.tokenize(&text);
        Self::from_parts(text, tokens)
    }

    /// Builds a document from already-normalized text and its tokens.
    pub fn from_parts(text: String, tokens: Vec<Token>) -> Self {
        let chars = text.chars().collect();
        let token_starts = tokens.iter().map(|t| t.index).collect();
        let token_ends = tokens.iter().map(Token::end).collect();
        Self {
            text,
            chars,
            tokens,
            token_starts,
            token_ends,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The normalized text as characters, indexed by character offset.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Length of the normalized text in characters.
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if some token starts at `offset`.
    pub fn is_token_start(&self, offset: usize) -> bool {
        self.token_starts.contains(&offset)
    }

    /// Returns true if some token ends at `offset`.
    pub fn is_token_end(&self, offset: usize) -> bool {
        self.token_ends.contains(&offset)
    }

    /// Tokens whose range intersects `[start, end)`, in document order.
    pub fn tokens_overlapping(&self, start: usize, end: usize) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |t| t.overlaps(start, end))
    }

    /// Consumes the document, returning its normalized text and tokens.
    pub fn into_parts(self) -> (String, Vec<Token>) {
        (self.text, self.tokens)
    }
}
