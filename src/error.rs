//! Error types for TOON encoding and decoding.
//!
//! The strict decoder fails fast with the first error it encounters; every
//! decode error carries the line and column (1-based) where parsing stopped.
//! The lenient decoder never returns an [`Error`] — it accumulates
//! [`Diagnostic`](crate::lenient::Diagnostic) records instead.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, Error};
//!
//! let result = decode("[3]:\n  1\n  2");
//! assert!(matches!(result, Err(Error::UnexpectedEnd { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the TOON codec.
///
/// Decode errors include the 1-based line and column of the failure.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Input contained no non-whitespace bytes
    #[error("empty input")]
    EmptyInput,

    /// Input ran out in the middle of a production
    #[error("unexpected end of input at line {line}, column {column}: expected {expected}")]
    UnexpectedEnd {
        line: usize,
        column: usize,
        expected: String,
    },

    /// A specific syntactic character was required but not found
    #[error("expected '{expected}' at line {line}, column {column}")]
    ExpectedCharacter {
        line: usize,
        column: usize,
        expected: char,
    },

    /// A quoted string was not closed before end of line or input
    #[error("unterminated string at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    /// The `[...]` array header did not contain a valid length
    #[error("invalid array length at line {line}, column {column}: {msg}")]
    InvalidArrayLength {
        line: usize,
        column: usize,
        msg: String,
    },

    /// Extra content after the root value
    #[error("unexpected trailing content at line {line}, column {column}")]
    UnexpectedTrailing { line: usize, column: usize },

    /// A host value does not map to the TOON value model
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Generic message, used by the serde integration
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn unexpected_end(line: usize, column: usize, expected: &str) -> Self {
        Error::UnexpectedEnd {
            line,
            column,
            expected: expected.to_string(),
        }
    }

    pub(crate) fn expected_char(line: usize, column: usize, expected: char) -> Self {
        Error::ExpectedCharacter {
            line,
            column,
            expected,
        }
    }

    pub(crate) fn unterminated_string(line: usize, column: usize) -> Self {
        Error::UnterminatedString { line, column }
    }

    pub(crate) fn invalid_array_length(line: usize, column: usize, msg: &str) -> Self {
        Error::InvalidArrayLength {
            line,
            column,
            msg: msg.to_string(),
        }
    }

    pub(crate) fn unexpected_trailing(line: usize, column: usize) -> Self {
        Error::UnexpectedTrailing { line, column }
    }

    /// Creates an unsupported-value error for host values outside the model.
    pub fn unsupported_value(msg: &str) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the input position of a decode error, if it carries one.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::UnexpectedEnd { line, column, .. }
            | Error::ExpectedCharacter { line, column, .. }
            | Error::UnterminatedString { line, column }
            | Error::InvalidArrayLength { line, column, .. }
            | Error::UnexpectedTrailing { line, column } => Some((*line, *column)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
