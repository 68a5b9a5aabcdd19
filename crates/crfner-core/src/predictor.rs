//! # CRF Predictor
//!
//! Ties the pieces together for single-sample inference: translate the
//! sample's labels into the model's label space, build the token triples,
//! extract features and ask the model for the label sequence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CrfNerError, Result};
use crate::features::sentence_features;
use crate::labels::Label;
use crate::model::{CrfModel, SequenceLabeler};
use crate::sample::{AnnotatedSample, EntityMapping};

/// Configuration for the predictor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Serialized model artifact. Required by [`CrfPredictor::new`].
    pub model_path: Option<PathBuf>,
    /// Entity types to keep in [`CrfPredictor::keep_entities`]; `None` keeps all
    #[serde(default)]
    pub entities_to_keep: Option<Vec<String>>,
    /// Log every prediction
    #[serde(default)]
    pub verbose: bool,
    /// Rename table applied to predicted entity types
    #[serde(default)]
    pub entity_mapping: Option<EntityMapping>,
}

impl PredictorConfig {
    /// Create a new predictor configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model artifact path.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Restrict [`CrfPredictor::keep_entities`] to these entity types.
    pub fn with_entities_to_keep<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities_to_keep = Some(entities.into_iter().map(Into::into).collect());
        self
    }

    /// Enable or disable per-prediction logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the entity rename table.
    pub fn with_entity_mapping(mut self, mapping: EntityMapping) -> Self {
        self.entity_mapping = Some(mapping);
        self
    }

    /// Read a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Run the model over one sample.
///
/// The model's own errors are returned unchanged. The result is exactly the
/// first sequence of the model's batch output.
pub fn crf_predict<S, M>(sample: &S, model: &M) -> Result<Vec<String>>
where
    S: AnnotatedSample + ?Sized,
    M: SequenceLabeler + ?Sized,
{
    let sentence = sample.to_sentence()?;
    let features = sentence_features(&sentence);

    let mut batch = model.predict(&[features])?;
    if batch.is_empty() {
        return Err(CrfNerError::Inference(
            "model returned an empty batch".into(),
        ));
    }
    Ok(batch.swap_remove(0))
}

/// Named-entity predictor wrapping a loaded sequence labeling model.
///
/// The model is loaded once and never mutated, so `&CrfPredictor` can be
/// shared across threads.
#[derive(Debug)]
pub struct CrfPredictor<M = CrfModel> {
    config: PredictorConfig,
    model: M,
}

impl CrfPredictor<CrfModel> {
    /// Load the CRF model named by `config.model_path`.
    ///
    /// Fails with [`CrfNerError::MissingModelPath`] when no path is set.
    pub fn new(config: PredictorConfig) -> Result<Self> {
        let path = config
            .model_path
            .as_ref()
            .ok_or(CrfNerError::MissingModelPath)?;
        let model = CrfModel::load(path)?;

        Ok(Self { config, model })
    }
}

impl<M: SequenceLabeler> CrfPredictor<M> {
    /// Wrap an already loaded model.
    pub fn from_model(model: M, config: PredictorConfig) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Predict one label per token of `sample`.
    ///
    /// A prediction whose length differs from the sample's token count is
    /// logged as a warning and returned as-is.
    pub fn predict<S: AnnotatedSample + ?Sized>(&self, sample: &S) -> Result<Vec<String>> {
        let tags = crf_predict(sample, &self.model)?;

        let expected = sample.tokens().len();
        if tags.len() != expected {
            warn!(
                expected,
                predicted = tags.len(),
                "mismatch between previous tokens and new tokens"
            );
        }

        if self.config.verbose {
            info!(tokens = ?sample.tokens(), predicted = ?tags, "prediction");
        } else {
            debug!(tokens = expected, "prediction");
        }

        Ok(tags)
    }

    /// Rename predicted entity types with the configured mapping and replace
    /// entities outside `entities_to_keep` with `O`.
    pub fn keep_entities(&self, labels: &[String]) -> Vec<String> {
        labels
            .iter()
            .map(|raw| {
                let renamed = match &self.config.entity_mapping {
                    Some(mapping) => mapping.translate_label(raw),
                    None => raw.clone(),
                };
                let label = Label::parse(&renamed);

                match (&self.config.entities_to_keep, label.entity()) {
                    (Some(keep), Some(entity)) if !keep.iter().any(|k| k == entity) => {
                        Label::Outside.to_string()
                    }
                    _ => renamed,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::features::TokenFeatures;
    use crate::sample::InputSample;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> InputSample {
        InputSample::new(
            strings(&["Apple", "hired", "Tim"]),
            strings(&["NNP", "VBD", "NNP"]),
            strings(&["B-ORGANIZATION", "O", "B-PERSON"]),
        )
    }

    /// Returns a fixed answer and remembers what it was asked.
    struct FixedModel {
        answer: Vec<Vec<String>>,
        seen: Mutex<Vec<Vec<TokenFeatures>>>,
    }

    impl FixedModel {
        fn new(answer: Vec<Vec<String>>) -> Self {
            Self {
                answer,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl SequenceLabeler for FixedModel {
        fn predict(&self, batch: &[Vec<TokenFeatures>]) -> Result<Vec<Vec<String>>> {
            self.seen.lock().unwrap().extend(batch.iter().cloned());
            Ok(self.answer.clone())
        }
    }

    struct FailingModel;

    impl SequenceLabeler for FailingModel {
        fn predict(&self, _batch: &[Vec<TokenFeatures>]) -> Result<Vec<Vec<String>>> {
            Err(CrfNerError::Inference("bad attribute".into()))
        }
    }

    #[test]
    fn test_missing_model_path_fails_at_construction() {
        let err = CrfPredictor::new(PredictorConfig::new().with_verbose(true)).unwrap_err();
        assert!(matches!(err, CrfNerError::MissingModelPath));
    }

    #[test]
    fn test_unreadable_model_path() {
        let config = PredictorConfig::new().with_model_path("/nonexistent/ner.crfsuite");
        assert!(matches!(
            CrfPredictor::new(config),
            Err(CrfNerError::Io(_))
        ));
    }

    #[test]
    fn test_predict_sends_single_sentence_batch() {
        let model = FixedModel::new(vec![strings(&["B-ORG", "O", "B-PER"])]);
        let predictor = CrfPredictor::from_model(model, PredictorConfig::new());

        let tags = predictor.predict(&sample()).unwrap();
        assert_eq!(tags, strings(&["B-ORG", "O", "B-PER"]));

        let seen = predictor.model().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 3);
        assert!(seen[0][0].is_bos());
        assert!(seen[0][2].is_eos());
    }

    #[test]
    fn test_length_mismatch_is_not_an_error() {
        let model = FixedModel::new(vec![strings(&["O", "O"])]);
        let predictor = CrfPredictor::from_model(model, PredictorConfig::new());

        let tags = predictor.predict(&sample()).unwrap();
        assert_eq!(tags, strings(&["O", "O"]));
    }

    #[test]
    fn test_only_first_batch_item_is_used() {
        let model = FixedModel::new(vec![strings(&["O", "O", "O"]), strings(&["X"])]);
        let tags = crf_predict(&sample(), &model).unwrap();
        assert_eq!(tags, strings(&["O", "O", "O"]));
    }

    #[test]
    fn test_empty_batch_is_an_inference_error() {
        let model = FixedModel::new(vec![]);
        assert!(matches!(
            crf_predict(&sample(), &model),
            Err(CrfNerError::Inference(_))
        ));
    }

    #[test]
    fn test_model_errors_propagate_unchanged() {
        let predictor = CrfPredictor::from_model(FailingModel, PredictorConfig::new());
        let err = predictor.predict(&sample()).unwrap_err();
        assert_eq!(err.to_string(), "inference error: bad attribute");
    }

    #[test]
    fn test_ragged_sample_is_rejected() {
        let mut sample = sample();
        sample.tags.pop();
        let model = FixedModel::new(vec![strings(&["O"])]);
        assert!(matches!(
            crf_predict(&sample, &model),
            Err(CrfNerError::InvalidSample(_))
        ));
    }

    #[test]
    fn test_keep_entities_filters_and_renames() {
        let config = PredictorConfig::new()
            .with_entities_to_keep(["PERSON"])
            .with_entity_mapping(EntityMapping::new([("PER", "PERSON")]));
        let predictor = CrfPredictor::from_model(FixedModel::new(vec![]), config);

        let kept = predictor.keep_entities(&strings(&["B-ORG", "O", "B-PER", "I-PER"]));
        assert_eq!(kept, strings(&["O", "O", "B-PERSON", "I-PERSON"]));
    }

    #[test]
    fn test_keep_entities_without_filter() {
        let predictor = CrfPredictor::from_model(FixedModel::new(vec![]), PredictorConfig::new());
        let labels = strings(&["B-ORG", "O"]);
        assert_eq!(predictor.keep_entities(&labels), labels);
    }

    #[test]
    fn test_config_from_json() {
        let config: PredictorConfig = serde_json::from_str(
            r#"{"model_path": "models/ner.crfsuite", "entities_to_keep": ["PERSON"], "verbose": true}"#,
        )
        .unwrap();

        assert_eq!(config.model_path, Some(PathBuf::from("models/ner.crfsuite")));
        assert_eq!(config.entities_to_keep, Some(strings(&["PERSON"])));
        assert!(config.verbose);
        assert!(config.entity_mapping.is_none());
    }
}
