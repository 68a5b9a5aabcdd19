//! # Sequence Labeling Models
//!
//! The predictor only needs one capability from a model: label a batch of
//! feature sequences. [`SequenceLabeler`] captures that, and [`CrfModel`] is
//! the adapter over a trained CRFsuite model file.

pub mod crf;

pub use crf::CrfModel;

use crate::error::Result;
use crate::features::TokenFeatures;

/// Batch inference over per-token feature sequences.
///
/// Implementations are immutable once loaded, so a single instance can serve
/// concurrent callers.
pub trait SequenceLabeler: Send + Sync {
    /// Return one label sequence per input sequence, in batch order.
    fn predict(&self, batch: &[Vec<TokenFeatures>]) -> Result<Vec<Vec<String>>>;
}

impl<T: SequenceLabeler + ?Sized> SequenceLabeler for Box<T> {
    fn predict(&self, batch: &[Vec<TokenFeatures>]) -> Result<Vec<Vec<String>>> {
        (**self).predict(batch)
    }
}

impl<T: SequenceLabeler + ?Sized> SequenceLabeler for std::sync::Arc<T> {
    fn predict(&self, batch: &[Vec<TokenFeatures>]) -> Result<Vec<Vec<String>>> {
        (**self).predict(batch)
    }
}
