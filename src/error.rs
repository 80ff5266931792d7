//! Error types for the FCTMS workout predictor

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for request-time operations
pub type Result<T> = std::result::Result<T, PredictionError>;

/// Errors raised while turning one request into one prediction.
///
/// Every variant is recoverable: the HTTP layer renders it as an `{"error": ...}` body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("missing field {0}")]
    MissingField(String),

    #[error("unknown category {value} for field {field}")]
    UnknownCategory { field: String, value: String },

    #[error("malformed value for field {field}: {reason}")]
    MalformedValue { field: String, reason: String },

    #[error("missing encoder for field {0}")]
    MissingEncoder(String),

    #[error("unknown code {code} for field {field}")]
    UnknownCode { field: String, code: i64 },

    #[error("invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: usize, actual: usize },

    #[error("internal prediction error: {0}")]
    Internal(String),
}

impl PredictionError {
    /// Coarse error kind used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::MissingField(_) => "MissingFieldError",
            PredictionError::UnknownCategory { .. } => "UnknownCategoryError",
            PredictionError::InvalidBody(_) | PredictionError::MalformedValue { .. } => {
                "MalformedValueError"
            }
            PredictionError::MissingEncoder(_) => "MissingEncoderError",
            PredictionError::UnknownCode { .. }
            | PredictionError::ShapeError { .. }
            | PredictionError::Internal(_) => "InternalPredictionError",
        }
    }
}

/// Errors raised while loading the persisted artifacts at startup.
///
/// These are fatal: the server refuses to start without a valid store.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("failed to read {artifact} artifact at {path}: {source}")]
    Io {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {artifact} artifact at {path}: {source}")]
    Parse {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("incompatible {artifact} artifact: {reason}")]
    Schema {
        artifact: &'static str,
        reason: String,
    },
}

impl ArtifactError {
    pub(crate) fn schema(artifact: &'static str, reason: impl Into<String>) -> Self {
        ArtifactError::Schema {
            artifact,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_contract() {
        assert_eq!(
            PredictionError::MissingField("Age".to_string()).to_string(),
            "missing field Age"
        );
        let err = PredictionError::UnknownCategory {
            field: "Gender".to_string(),
            value: "nonbinary".to_string(),
        };
        assert_eq!(err.to_string(), "unknown category nonbinary for field Gender");
        assert_eq!(err.kind(), "UnknownCategoryError");
    }

    #[test]
    fn test_internal_kinds() {
        let err = PredictionError::UnknownCode {
            field: "Workout_Label".to_string(),
            code: 7,
        };
        assert_eq!(err.kind(), "InternalPredictionError");
        assert_eq!(
            PredictionError::ShapeError { expected: 9, actual: 8 }.kind(),
            "InternalPredictionError"
        );
    }
}
