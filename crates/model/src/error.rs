use std::io;
use thiserror::Error;

/// Errors surfaced while loading artifacts or running inference.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An artifact file could not be read.
    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    /// An artifact file is not valid JSON for its schema.
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The artifact parsed but its content is inconsistent.
    #[error("invalid {artifact}: {reason}")]
    InvalidArtifact {
        artifact: &'static str,
        reason: String,
    },
    /// Two shapes that must agree do not.
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Anything else that goes wrong while scoring a document.
    #[error("inference failure: {0}")]
    Inference(String),
}

impl ModelError {
    pub(crate) fn invalid(artifact: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidArtifact {
            artifact,
            reason: reason.into(),
        }
    }
}
