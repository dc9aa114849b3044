//! Error types for the document model
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for document model operations
#[derive(Debug, Error)]
pub enum Error {
    /// Empty key passed to `set` or `get`
    #[error("empty section key")]
    EmptyKey,

    /// No entry matched the requested key
    #[error("section {key:?} not found")]
    NotFound {
        /// The key that was queried
        key: String,
    },

    /// More than one entry matched the requested key
    ///
    /// `put` maintains key uniqueness, so this surfaces a document built or
    /// mutated outside the merge path. It is always reported, never silently
    /// resolved.
    #[error("section {key:?} set {count} times")]
    AmbiguousKey {
        /// The key that was queried
        key: String,
        /// Number of entries that matched
        count: usize,
    },

    /// `set_all` received a value that does not encode to an object
    #[error("value does not encode to an object")]
    TypeMismatch,

    /// Encode/decode failure at the typed-value boundary
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Parse or layout failure in the text syntax layer
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Encode/decode failure at the typed-value boundary
///
/// Wraps the underlying serde error verbatim; the document model adds no
/// interpretation of its own.
#[derive(Debug, Error)]
#[error("codec error: {0}")]
pub struct CodecError(#[from] pub serde_json::Error);

/// Parse or layout failure, with the offending source position
///
/// Lives here rather than in the syntax crate so that every layer can
/// reference it without a dependency cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("syntax error at {line}:{column}: {message}")]
pub struct SyntaxError {
    /// 1-based line of the offending token
    pub line: usize,
    /// 1-based column of the offending token
    pub column: usize,
    /// Human-readable description of the failure
    pub message: String,
}

impl SyntaxError {
    /// Create a syntax error at the given position
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound {
            key: "server".to_string(),
        };
        assert_eq!(err.to_string(), "section \"server\" not found");

        let err = Error::AmbiguousKey {
            key: "server".to_string(),
            count: 2,
        };
        assert_eq!(err.to_string(), "section \"server\" set 2 times");
    }

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new(3, 7, "unexpected '='");
        assert_eq!(err.to_string(), "syntax error at 3:7: unexpected '='");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
