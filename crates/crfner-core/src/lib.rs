//! # crfner Core
//!
//! Named-entity tagging with a pre-trained linear-chain CRF. Turns an
//! annotated sentence into per-token context-window features, runs the model
//! and returns one predicted label per token.
//!
//! ## Quick Start
//!
//! ```rust
//! use crfner_core::{Token, sentence_features};
//!
//! let sentence = vec![
//!     Token::new("Apple", "NNP", "O"),
//!     Token::new("hired", "VBD", "O"),
//!     Token::new("Tim", "NNP", "O"),
//! ];
//! let features = sentence_features(&sentence);
//!
//! assert_eq!(features.len(), 3);
//! assert!(features[0].contains("BOS"));
//! assert_eq!(features[0].get("word[-3:]").unwrap().as_text(), Some("ple"));
//! ```
pub mod conll;
pub mod error;
pub mod features;
pub mod labels;
pub mod model;
pub mod predictor;
pub mod sample;
pub mod sentence;

// Re-export primary API
pub use error::{CrfNerError, Result};
pub use features::{FeatureValue, TokenFeatures, features_at, sentence_features};
pub use labels::{Label, Position};
pub use model::{CrfModel, SequenceLabeler};
pub use predictor::{CrfPredictor, PredictorConfig, crf_predict};
pub use sample::{AnnotatedSample, EntityMapping, IdentityTranslator, InputSample, TagTranslator};
pub use sentence::{Token, sentence_labels, sentence_tokens};
