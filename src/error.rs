//! Error types for the prediction store.

use std::path::PathBuf;

use crate::models::Outcome;

/// Errors raised by [`crate::store::PredictionStore`].
///
/// An unknown id on evaluate is not an error; it is reported as `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but is not a valid prediction list
    #[error("Malformed prediction document {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding the collection failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Confidence is a percentage
    #[error("Confidence must be between 0 and 100, got {0}")]
    InvalidConfidence(i32),

    /// Due offset falls outside the representable calendar
    #[error("Due offset of {0} days is out of range")]
    InvalidDueOffset(i64),

    /// Evaluation requires a terminal outcome
    #[error("Outcome must be correct or incorrect, got {0}")]
    InvalidOutcome(Outcome),

    /// Outcomes are set once
    #[error("Prediction {id} was already evaluated as {outcome}")]
    AlreadyEvaluated { id: String, outcome: Outcome },
}

pub type Result<T> = std::result::Result<T, StoreError>;
