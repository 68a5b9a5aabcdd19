use thiserror::Error;

/// Errors that can occur while extracting features or running CRF inference.
#[derive(Debug, Error)]
pub enum CrfNerError {
    /// The predictor was constructed without a model source.
    #[error("model path must be supplied")]
    MissingModelPath,

    /// The serialized model could not be turned into a usable model.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The model's predict capability failed.
    #[error("inference error: {0}")]
    Inference(String),

    /// An annotated sample is malformed (e.g. columns of different length).
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    /// Reading a model, mapping or CoNLL file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for crfner operations.
pub type Result<T> = std::result::Result<T, CrfNerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = CrfNerError::MissingModelPath;
        assert_eq!(err.to_string(), "model path must be supplied");

        let err = CrfNerError::InvalidSample("3 tokens but 2 tags".into());
        assert!(err.to_string().contains("3 tokens but 2 tags"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "ner.crfsuite");
        let err: CrfNerError = io.into();
        assert!(matches!(err, CrfNerError::Io(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CrfNerError>();
    }
}
