//! Error types for the spamfilter library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SpamFilterError`] enum. Nothing is retried: every variant is terminal for
//! the operation that raised it.
//!
//! # Examples
//!
//! ```
//! use spamfilter::error::{Result, SpamFilterError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpamFilterError::configuration("ham corpus is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for spamfilter operations.
#[derive(Error, Debug)]
pub enum SpamFilterError {
    /// I/O errors without a known path
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O errors on a specific file or directory
    #[error("I/O error on {}: {source}", path.display())]
    PathIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Training set or tunables that make the model undefined
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed model file
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invalid operation, such as reading an unestimated probability
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SpamFilterError.
pub type Result<T> = std::result::Result<T, SpamFilterError>;

impl SpamFilterError {
    /// Wrap an I/O error with the path it happened on.
    pub fn path_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        SpamFilterError::PathIo {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SpamFilterError::Configuration(msg.into())
    }

    /// Create a new parse error for a 1-based line number.
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        SpamFilterError::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        SpamFilterError::InvalidOperation(msg.into())
    }

    /// Line number of a parse error, if this is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            SpamFilterError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SpamFilterError::configuration("spam corpus is empty");
        assert_eq!(
            error.to_string(),
            "Configuration error: spam corpus is empty"
        );

        let error = SpamFilterError::parse(7, "expected 6 fields, found 5");
        assert_eq!(
            error.to_string(),
            "Parse error on line 7: expected 6 fields, found 5"
        );
        assert_eq!(error.line(), Some(7));

        let error = SpamFilterError::invalid_operation("bad input");
        assert_eq!(error.to_string(), "Invalid operation: bad input");
        assert_eq!(error.line(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SpamFilterError::from(io_error);

        match error {
            SpamFilterError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_path_io_error_names_path() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing");
        let error = SpamFilterError::path_io("/tmp/ham", io_error);
        assert!(error.to_string().contains("/tmp/ham"));
    }
}
