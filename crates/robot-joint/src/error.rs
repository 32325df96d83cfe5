//! Error types for joint construction and evaluation.
//!
//! These are only ever seen by Rust callers. The boundary crates translate
//! them before anything crosses into a foreign runtime.

use thiserror::Error;

/// Common result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the resource core.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A configuration value cannot describe a valid joint.
    #[error("Invalid joint configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The strict transform requires exactly one variable per degree of freedom.
    #[error("Expected {expected} variables, got {actual}")]
    InvalidVariableCount { expected: usize, actual: usize },

    /// A joint variable was NaN or infinite.
    #[error("Joint variable is not finite: {value}")]
    NonFiniteVariable { value: f64 },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
