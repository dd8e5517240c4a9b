use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a failed prediction.
///
/// The HTTP surface only ever emits `{error: message}`, but the kind drives
/// the status code and the log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller omitted required fields or sent an unusable body.
    Validation,
    /// A field is present but its value is unusable (non-numeric, outside
    /// the domain of a feature transform).
    Domain,
    /// Feature/scaler/model disagreement or an inference backend failure.
    Internal,
}

/// Errors raised while turning a request into a price.
#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("Missing fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Request body must be a JSON object, got {found}")]
    InvalidBody { found: String },

    #[error("Field '{field}' must be numeric: {reason}")]
    InvalidNumber { field: String, reason: String },

    #[error("{feature} is undefined for {input}: log1p requires a value greater than -1")]
    OutOfDomain { feature: String, input: f64 },

    #[error("Feature vector has {actual} values but the scaler was fitted on {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Inference failed: {reason}")]
    Inference { reason: String },
}

impl PredictionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictionError::MissingFields { .. } | PredictionError::InvalidBody { .. } => {
                ErrorKind::Validation
            }
            PredictionError::InvalidNumber { .. } | PredictionError::OutOfDomain { .. } => {
                ErrorKind::Domain
            }
            PredictionError::DimensionMismatch { .. } | PredictionError::Inference { .. } => {
                ErrorKind::Internal
            }
        }
    }

    pub fn inference(reason: impl Into<String>) -> Self {
        PredictionError::Inference {
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading the encoding table, scaler or model at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("Failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path:?}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Invalid scaler parameters: {reason}")]
    InvalidScaler { reason: String },

    #[error("Model backend '{backend}' is unavailable: {reason}")]
    Backend { backend: String, reason: String },
}
