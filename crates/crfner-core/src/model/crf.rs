//! CRFsuite model adapter.
//!
//! Wraps a binary CRFsuite model (the format written by `crfsuite`,
//! `python-crfsuite` and `sklearn-crfsuite`) read with the `crfs` crate.
//! Token features are passed in as weighted attributes, see
//! [`TokenFeatures::attributes`].

use std::path::Path;

use tracing::debug;

use super::SequenceLabeler;
use crate::error::{CrfNerError, Result};
use crate::features::TokenFeatures;

/// A loaded CRFsuite model. The model bytes are never mutated after load.
#[derive(Debug, Clone)]
pub struct CrfModel {
    bytes: Vec<u8>,
}

impl CrfModel {
    /// Read a CRFsuite model file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let model = Self::from_bytes(bytes)?;
        debug!(path = %path.display(), bytes = model.bytes.len(), "loaded CRF model");
        Ok(model)
    }

    /// Validate an in-memory CRFsuite model.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        {
            let model = crfs::Model::new(&bytes)
                .map_err(|e| CrfNerError::ModelLoad(format!("not a CRFsuite model: {e}")))?;
            model
                .tagger()
                .map_err(|e| CrfNerError::ModelLoad(format!("unusable CRFsuite model: {e}")))?;
        }
        Ok(Self { bytes })
    }

    /// Most likely label sequence for one sentence.
    pub fn tag(&self, sequence: &[TokenFeatures]) -> Result<Vec<String>> {
        if sequence.is_empty() {
            return Ok(Vec::new());
        }

        let model = crfs::Model::new(&self.bytes)
            .map_err(|e| CrfNerError::Inference(e.to_string()))?;
        let mut tagger = model
            .tagger()
            .map_err(|e| CrfNerError::Inference(e.to_string()))?;

        let xseq: Vec<Vec<crfs::Attribute>> = sequence.iter().map(to_attributes).collect();
        let labels = tagger
            .tag(&xseq)
            .map_err(|e| CrfNerError::Inference(e.to_string()))?;

        Ok(labels.into_iter().map(|l| l.to_string()).collect())
    }
}

impl SequenceLabeler for CrfModel {
    fn predict(&self, batch: &[Vec<TokenFeatures>]) -> Result<Vec<Vec<String>>> {
        batch.iter().map(|sequence| self.tag(sequence)).collect()
    }
}

fn to_attributes(features: &TokenFeatures) -> Vec<crfs::Attribute> {
    features
        .attributes()
        .into_iter()
        .map(|(name, value)| crfs::Attribute::new(name, value))
        .collect()
}
