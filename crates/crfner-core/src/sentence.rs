//! # Token Triples
//!
//! A sentence is an ordered slice of `(text, part-of-speech, label)` triples.
//! Order is significant: it defines which tokens are neighbours when context
//! features are extracted.

use serde::{Deserialize, Serialize};

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text as produced by the tokenizer.
    pub text: String,
    /// Part-of-speech tag (e.g. `NNP`).
    pub pos: String,
    /// Entity label. May be a placeholder such as `O` during inference.
    pub label: String,
}

impl Token {
    /// Create a token triple.
    pub fn new(text: impl Into<String>, pos: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: pos.into(),
            label: label.into(),
        }
    }
}

/// Collect the label column of a sentence.
pub fn sentence_labels(sentence: &[Token]) -> Vec<String> {
    sentence.iter().map(|t| t.label.clone()).collect()
}

/// Collect the text column of a sentence.
pub fn sentence_tokens(sentence: &[Token]) -> Vec<String> {
    sentence.iter().map(|t| t.text.clone()).collect()
}
