//! Error types for stream classification.
//!
//! Base-learner failures are kept as their own enum so a caller can tell a
//! collaborator failure apart from a shape or configuration problem raised
//! by the algorithms themselves.

use thiserror::Error;

/// Result type for drift-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a base learner during training or inference.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LearnerError {
    /// The learner could not fit the supplied batch
    #[error("training failed: {0}")]
    Training(String),

    /// The learner could not score an instance
    #[error("classification failed: {0}")]
    Classification(String),

    /// Instance width differs from what the learner was trained on
    #[error("learner expected {expected} attributes, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors surfaced by the stream classifiers.
#[derive(Error, Debug)]
pub enum Error {
    /// Query and buffered instance differ in attribute count
    #[error("dimension mismatch: expected {expected} attributes, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A base learner failed; the triggering call was rolled back
    #[error("base learner failure: {0}")]
    Learner(#[from] LearnerError),

    /// Invalid configuration value
    #[error("invalid parameter '{param}': {reason}")]
    InvalidConfig { param: &'static str, reason: String },

    /// Configuration document could not be parsed
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A shared classifier handle was poisoned by a panicking holder
    #[error("shared classifier lock poisoned")]
    Poisoned,
}

impl Error {
    pub(crate) fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            param,
            reason: reason.into(),
        }
    }
}
