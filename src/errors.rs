//! Errors
//!
//! Custom error types used throughout the `decision_tree` crate.
use thiserror::Error;

/// Errors that can occur while building, loading or saving a decision tree.
#[derive(Debug, Error)]
pub enum DecisionTreeError {
    /// Unable to write model to file.
    #[error("Unable to write model to file: {0}")]
    UnableToWrite(String),
    /// Unable to read model from file.
    #[error("Unable to read model from a file {0}")]
    UnableToRead(String),
    /// Structurally inconsistent serialized input.
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
}

impl DecisionTreeError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        DecisionTreeError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
