//! # Annotated Samples
//!
//! An annotated sample carries the tokenizer and tagger output for one
//! sentence: tokens, part-of-speech tags and working entity labels. Before
//! inference its labels are translated into the label space the model was
//! trained on; translation returns a new label sequence and never mutates the
//! sample.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CrfNerError, Result};
use crate::labels::Label;
use crate::sentence::Token;

/// Remaps labels from one entity taxonomy into another.
pub trait TagTranslator {
    /// Translate every label, preserving length and order.
    fn translate(&self, tags: &[String]) -> Vec<String>;
}

/// Rename table for entity categories.
///
/// The `B-`/`I-`/`L-`/`U-` prefix of a label is kept and only the entity part
/// is looked up. Entities missing from the table are kept as they are, or
/// turned into `O` when `ignore_unknown` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMapping {
    pub mapping: HashMap<String, String>,
    #[serde(default)]
    pub ignore_unknown: bool,
}

impl EntityMapping {
    /// Create a mapping from `(from, to)` pairs.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            mapping: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ignore_unknown: false,
        }
    }

    /// Map unknown entity types to `O` instead of keeping them.
    pub fn with_ignore_unknown(mut self, ignore: bool) -> Self {
        self.ignore_unknown = ignore;
        self
    }

    /// Parse a mapping from a JSON document.
    ///
    /// Accepts either the full `{"mapping": {...}, "ignore_unknown": bool}`
    /// form or a plain `{"FROM": "TO"}` object.
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<Self>(json) {
            Ok(mapping) => Ok(mapping),
            Err(_) => {
                let plain: HashMap<String, String> = serde_json::from_str(json)?;
                Ok(Self {
                    mapping: plain,
                    ignore_unknown: false,
                })
            }
        }
    }

    /// Translate a single label.
    pub fn translate_label(&self, tag: &str) -> String {
        let label = Label::parse(tag);
        let Some(entity) = label.entity() else {
            return label.to_string();
        };

        match self.mapping.get(entity) {
            Some(target) if target == "O" => Label::Outside.to_string(),
            Some(target) => label.with_entity(target.as_str()).to_string(),
            None if self.ignore_unknown => Label::Outside.to_string(),
            None => tag.to_string(),
        }
    }
}

impl TagTranslator for EntityMapping {
    fn translate(&self, tags: &[String]) -> Vec<String> {
        tags.iter().map(|t| self.translate_label(t)).collect()
    }
}

/// Leaves labels untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl TagTranslator for IdentityTranslator {
    fn translate(&self, tags: &[String]) -> Vec<String> {
        tags.to_vec()
    }
}

/// A sample that can be turned into a sentence of token triples.
pub trait AnnotatedSample {
    /// Token texts in order.
    fn tokens(&self) -> &[String];

    /// Part-of-speech tag per token.
    fn pos_tags(&self) -> &[String];

    /// Working labels per token, in the sample's own taxonomy.
    fn tags(&self) -> &[String];

    /// Labels translated into the model's training label space.
    fn translated_tags(&self) -> Vec<String>;

    /// Build the `(text, pos, label)` triples using the translated labels.
    fn to_sentence(&self) -> Result<Vec<Token>> {
        let tokens = self.tokens();
        let pos_tags = self.pos_tags();
        let labels = self.translated_tags();

        if pos_tags.len() != tokens.len() || labels.len() != tokens.len() {
            return Err(CrfNerError::InvalidSample(format!(
                "{} tokens, {} part-of-speech tags, {} labels",
                tokens.len(),
                pos_tags.len(),
                labels.len()
            )));
        }

        Ok(tokens
            .iter()
            .zip(pos_tags)
            .zip(labels)
            .map(|((text, pos), label)| Token::new(text.as_str(), pos.as_str(), label))
            .collect())
    }
}

/// Tokenized, tagged sentence with an optional label translation table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    /// Original sentence text, when known.
    #[serde(default)]
    pub full_text: String,
    pub tokens: Vec<String>,
    pub pos_tags: Vec<String>,
    pub tags: Vec<String>,
    /// Translation into the model's label space. `None` keeps tags as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<EntityMapping>,
}

impl InputSample {
    /// Create a sample from its three columns.
    pub fn new(tokens: Vec<String>, pos_tags: Vec<String>, tags: Vec<String>) -> Self {
        let full_text = tokens.join(" ");
        Self {
            full_text,
            tokens,
            pos_tags,
            tags,
            mapping: None,
        }
    }

    /// Create a sample whose labels are all `O`, for pure inference.
    pub fn unlabeled(tokens: Vec<String>, pos_tags: Vec<String>) -> Self {
        let tags = vec![Label::Outside.to_string(); tokens.len()];
        Self::new(tokens, pos_tags, tags)
    }

    /// Attach a translation table.
    pub fn with_mapping(mut self, mapping: EntityMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sample has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl AnnotatedSample for InputSample {
    fn tokens(&self) -> &[String] {
        &self.tokens
    }

    fn pos_tags(&self) -> &[String] {
        &self.pos_tags
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn translated_tags(&self) -> Vec<String> {
        match &self.mapping {
            Some(mapping) => mapping.translate(&self.tags),
            None => IdentityTranslator.translate(&self.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> InputSample {
        InputSample::new(
            strings(&["Dan", "Brown", "visited", "Paris"]),
            strings(&["NNP", "NNP", "VBD", "NNP"]),
            strings(&["B-PERSON", "I-PERSON", "O", "U-GPE"]),
        )
    }

    #[test]
    fn test_mapping_keeps_prefix() {
        let mapping = EntityMapping::new([("PERSON", "PER"), ("GPE", "LOC")]);
        let translated = mapping.translate(&sample().tags);
        assert_eq!(translated, strings(&["B-PER", "I-PER", "O", "U-LOC"]));
    }

    #[test]
    fn test_mapping_unknown_entities() {
        let mapping = EntityMapping::new([("PERSON", "PER")]);
        assert_eq!(mapping.translate_label("B-GPE"), "B-GPE");

        let mapping = mapping.with_ignore_unknown(true);
        assert_eq!(mapping.translate_label("B-GPE"), "O");
        assert_eq!(mapping.translate_label("I-PERSON"), "I-PER");
    }

    #[test]
    fn test_mapping_to_outside() {
        let mapping = EntityMapping::new([("TITLE", "O")]);
        assert_eq!(mapping.translate_label("B-TITLE"), "O");
    }

    #[test]
    fn test_mapping_from_json_forms() {
        let plain = EntityMapping::from_json(r#"{"PERSON": "PER"}"#).unwrap();
        assert_eq!(plain.translate_label("B-PERSON"), "B-PER");
        assert!(!plain.ignore_unknown);

        let full = EntityMapping::from_json(
            r#"{"mapping": {"PERSON": "PER"}, "ignore_unknown": true}"#,
        )
        .unwrap();
        assert!(full.ignore_unknown);

        assert!(EntityMapping::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_translation_does_not_mutate_sample() {
        let sample = sample().with_mapping(EntityMapping::new([("PERSON", "PER")]));
        let translated = sample.translated_tags();

        assert_eq!(translated[0], "B-PER");
        assert_eq!(sample.tags[0], "B-PERSON");
    }

    #[test]
    fn test_to_sentence_uses_translated_labels() {
        let sample = sample().with_mapping(EntityMapping::new([("GPE", "LOC")]));
        let sentence = sample.to_sentence().unwrap();

        assert_eq!(sentence.len(), 4);
        assert_eq!(sentence[3], Token::new("Paris", "NNP", "U-LOC"));
        assert_eq!(sentence[0].pos, "NNP");
    }

    #[test]
    fn test_to_sentence_rejects_ragged_columns() {
        let mut sample = sample();
        sample.pos_tags.pop();
        let err = sample.to_sentence().unwrap_err();
        assert!(matches!(err, CrfNerError::InvalidSample(_)));
    }

    #[test]
    fn test_unlabeled_sample() {
        let sample = InputSample::unlabeled(strings(&["Hi", "there"]), strings(&["UH", "RB"]));
        assert_eq!(sample.tags, strings(&["O", "O"]));
        assert_eq!(sample.full_text, "Hi there");
        assert_eq!(sample.len(), 2);
    }
}
