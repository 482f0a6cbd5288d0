//! Error types for diascreen

use thiserror::Error;

/// Errors that can occur while loading artifacts or parsing input.
///
/// All artifact errors are fatal at startup: an engine is never constructed
/// from a missing, malformed, or dimension-mismatched scaler or classifier.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Artifact dimension mismatch: expected {expected} features, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),
}
