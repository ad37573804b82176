//! Error types shared by the tree builder, the walker and the automaton.

use std::io;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input: misplaced terminator, unexpected text index,
    /// unterminated text at `finish()`
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A traversal invariant was broken while building a transition network.
    /// Not expected from a correct walk.
    #[error("Inconsistent path: {0}")]
    InconsistentPath(String),

    /// Index lookup past the end of a table
    #[error("Index {index} out of range for {what} (len {len})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A walk was stopped through its cancellation flag
    #[error("Walk cancelled")]
    Cancelled,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors (config file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an inconsistent path error
    pub fn inconsistent_path(msg: impl Into<String>) -> Self {
        Self::InconsistentPath(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfRange { what, index, len }
    }

    /// Check if the error was caused by the caller's input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::invalid_input("terminator inside text 0");
        assert_eq!(err.to_string(), "Invalid input: terminator inside text 0");
        assert!(err.is_invalid_input());

        let err = Error::out_of_range("states", 7, 3);
        assert_eq!(err.to_string(), "Index 7 out of range for states (len 3)");
        assert!(!err.is_invalid_input());
    }
}
