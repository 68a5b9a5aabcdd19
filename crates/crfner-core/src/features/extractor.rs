//! # Context-Window Feature Extractor
//!
//! Every token gets a bias, shape features of its own word and part-of-speech
//! tag, and a reduced set of the same features for its left and right
//! neighbours. A missing neighbour is replaced by a `BOS` / `EOS` marker.
//!
//! The feature names mirror the ones used when the CRF models were trained
//! (`word.lower()`, `-1:postag`, ...), so the named view produced by
//! [`TokenFeatures::entries`] can be fed to any model that consumes them.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::text::{is_digit, is_title, is_upper, prefix, suffix};
use super::value::FeatureValue;
use crate::sentence::Token;

pub const BIAS: &str = "bias";
pub const BOS: &str = "BOS";
pub const EOS: &str = "EOS";

const WORD_KEYS: [&str; 8] = [
    "word.lower()",
    "word[-3:]",
    "word[-2:]",
    "word.isupper()",
    "word.istitle()",
    "word.isdigit()",
    "postag",
    "postag[:2]",
];

const PREV_KEYS: [&str; 5] = [
    "-1:word.lower()",
    "-1:word.istitle()",
    "-1:word.isupper()",
    "-1:postag",
    "-1:postag[:2]",
];

const NEXT_KEYS: [&str; 5] = [
    "+1:word.lower()",
    "+1:word.istitle()",
    "+1:word.isupper()",
    "+1:postag",
    "+1:postag[:2]",
];

/// Shape features of the token being labeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenShape {
    pub lower: String,
    pub suffix3: String,
    pub suffix2: String,
    pub is_upper: bool,
    pub is_title: bool,
    pub is_digit: bool,
    pub postag: String,
    pub postag_prefix: String,
}

impl TokenShape {
    fn of(token: &Token) -> Self {
        let word = token.text.as_str();
        Self {
            lower: word.to_lowercase(),
            suffix3: suffix(word, 3).to_string(),
            suffix2: suffix(word, 2).to_string(),
            is_upper: is_upper(word),
            is_title: is_title(word),
            is_digit: is_digit(word),
            postag: token.pos.clone(),
            postag_prefix: prefix(&token.pos, 2).to_string(),
        }
    }

    fn values(&self) -> [FeatureValue; 8] {
        [
            self.lower.as_str().into(),
            self.suffix3.as_str().into(),
            self.suffix2.as_str().into(),
            self.is_upper.into(),
            self.is_title.into(),
            self.is_digit.into(),
            self.postag.as_str().into(),
            self.postag_prefix.as_str().into(),
        ]
    }

    fn get(&self, key: &str) -> Option<FeatureValue> {
        let value = match key {
            "word.lower()" => self.lower.as_str().into(),
            "word[-3:]" => self.suffix3.as_str().into(),
            "word[-2:]" => self.suffix2.as_str().into(),
            "word.isupper()" => self.is_upper.into(),
            "word.istitle()" => self.is_title.into(),
            "word.isdigit()" => self.is_digit.into(),
            "postag" => self.postag.as_str().into(),
            "postag[:2]" => self.postag_prefix.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

/// Reduced shape features of a neighbouring token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextShape {
    pub lower: String,
    pub is_title: bool,
    pub is_upper: bool,
    pub postag: String,
    pub postag_prefix: String,
}

impl ContextShape {
    fn of(token: &Token) -> Self {
        let word = token.text.as_str();
        Self {
            lower: word.to_lowercase(),
            is_title: is_title(word),
            is_upper: is_upper(word),
            postag: token.pos.clone(),
            postag_prefix: prefix(&token.pos, 2).to_string(),
        }
    }

    fn values(&self) -> [FeatureValue; 5] {
        [
            self.lower.as_str().into(),
            self.is_title.into(),
            self.is_upper.into(),
            self.postag.as_str().into(),
            self.postag_prefix.as_str().into(),
        ]
    }

    fn get(&self, key: &str) -> Option<FeatureValue> {
        let value = match key {
            "word.lower()" => self.lower.as_str().into(),
            "word.istitle()" => self.is_title.into(),
            "word.isupper()" => self.is_upper.into(),
            "postag" => self.postag.as_str().into(),
            "postag[:2]" => self.postag_prefix.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

/// All features of one token.
///
/// `prev` is `None` exactly when the token opens the sentence (`BOS`), and
/// `next` is `None` exactly when it closes it (`EOS`).
#[derive(Debug, Clone, PartialEq)]
pub struct TokenFeatures {
    pub bias: f64,
    pub word: TokenShape,
    pub prev: Option<ContextShape>,
    pub next: Option<ContextShape>,
}

impl TokenFeatures {
    /// Whether the token has no left neighbour.
    pub fn is_bos(&self) -> bool {
        self.prev.is_none()
    }

    /// Whether the token has no right neighbour.
    pub fn is_eos(&self) -> bool {
        self.next.is_none()
    }

    /// Named view of the features in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, FeatureValue)> {
        let mut out = Vec::with_capacity(1 + WORD_KEYS.len() + 2 * PREV_KEYS.len());
        out.push((BIAS, FeatureValue::Float(self.bias)));
        out.extend(WORD_KEYS.into_iter().zip(self.word.values()));

        match &self.prev {
            Some(prev) => out.extend(PREV_KEYS.into_iter().zip(prev.values())),
            None => out.push((BOS, FeatureValue::Flag(true))),
        }
        match &self.next {
            Some(next) => out.extend(NEXT_KEYS.into_iter().zip(next.values())),
            None => out.push((EOS, FeatureValue::Flag(true))),
        }
        out
    }

    /// Look up one feature by name.
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        match name {
            BIAS => Some(FeatureValue::Float(self.bias)),
            BOS => self.is_bos().then_some(FeatureValue::Flag(true)),
            EOS => self.is_eos().then_some(FeatureValue::Flag(true)),
            _ => {
                if let Some(key) = name.strip_prefix("-1:") {
                    self.prev.as_ref()?.get(key)
                } else if let Some(key) = name.strip_prefix("+1:") {
                    self.next.as_ref()?.get(key)
                } else {
                    self.word.get(name)
                }
            }
        }
    }

    /// Whether a feature with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Flatten into weighted CRF attributes.
    ///
    /// Text features become `name:value` with weight 1.0, flags become `name`
    /// weighted 1.0 or 0.0, and the bias keeps its float value.
    pub fn attributes(&self) -> Vec<(String, f64)> {
        self.entries()
            .into_iter()
            .map(|(key, value)| match value {
                FeatureValue::Text(s) => (format!("{key}:{s}"), 1.0),
                FeatureValue::Flag(b) => (key.to_string(), if b { 1.0 } else { 0.0 }),
                FeatureValue::Float(v) => (key.to_string(), v),
            })
            .collect()
    }
}

impl Serialize for TokenFeatures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Features of the token at position `i`.
///
/// # Panics
/// If `i` is not a valid index into `sentence`.
pub fn features_at(sentence: &[Token], i: usize) -> TokenFeatures {
    let prev = i.checked_sub(1).map(|p| ContextShape::of(&sentence[p]));
    let next = sentence.get(i + 1).map(ContextShape::of);

    TokenFeatures {
        bias: 1.0,
        word: TokenShape::of(&sentence[i]),
        prev,
        next,
    }
}

/// Features of every token, in sentence order.
pub fn sentence_features(sentence: &[Token]) -> Vec<TokenFeatures> {
    (0..sentence.len()).map(|i| features_at(sentence, i)).collect()
}
