//! Error types for the classification core
//!
//! The taxonomy is deliberately closed: `LoadError` covers the one-time
//! artifact load at startup (fatal for the surrounding application), and
//! `InferenceError` covers per-request failures after a successful load.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the artifact pair.
///
/// Any variant here means the pipeline was never constructed and the
/// application must refuse to serve classification requests.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Artifact file missing or unreadable
    #[error("Failed to read artifact {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact bytes did not deserialize into the expected structure
    #[error("Failed to parse artifact {}: {}", .path.display(), .reason)]
    Parse { path: PathBuf, reason: String },

    /// Vectorizer deserialized but is structurally unsound
    #[error("Invalid vectorizer: {0}")]
    InvalidVectorizer(String),

    /// Model deserialized but is structurally unsound
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// The two artifacts do not agree on the feature-space dimension
    #[error("Vectorizer dimension {vectorizer} does not match model dimension {model}")]
    DimensionMismatch { vectorizer: usize, model: usize },

    /// Artifact could not be written back to disk
    #[error("Failed to write artifact {}: {}", .path.display(), .reason)]
    Write { path: PathBuf, reason: String },
}

/// Errors raised during vectorization or prediction.
///
/// These should not occur once a load has succeeded; when they do, the
/// request is surfaced as failed and nothing is retried.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Feature index outside the model's weight vector
    #[error("Feature index {index} out of bounds for dimension {dimension}")]
    FeatureOutOfBounds { index: usize, dimension: usize },

    /// Model evaluation produced a non-finite decision score
    #[error("Non-finite decision score from model evaluation")]
    NonFiniteScore,
}
