//! # Token Feature Extraction
//!
//! Maps every token of a sentence to a fixed set of orthographic,
//! part-of-speech and neighbouring-token features, using a context window of
//! one token on each side.

pub mod extractor;
pub mod text;
pub mod value;

pub use extractor::{ContextShape, TokenFeatures, TokenShape, features_at, sentence_features};
pub use value::FeatureValue;
