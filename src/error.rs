use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriftError {
    #[error("vector source not found: {identifier} ({reason})")]
    NotFound { identifier: String, reason: String },

    #[error("vector source {identifier} is not a numeric array: {reason}")]
    Parse { identifier: String, reason: String },

    #[error("vector length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("zero-magnitude vector")]
    ZeroMagnitude,

    #[error("webhook request failed: {0}")]
    Http(String),

    #[error("failed to deliver alert after {attempts} attempts: {last_error}")]
    AlertDeliveryFailed { attempts: u32, last_error: String },

    #[error("failed writing report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for DriftError {
    fn from(err: reqwest::Error) -> Self {
        DriftError::Http(err.to_string())
    }
}
