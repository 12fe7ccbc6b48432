//! Error types for DFM parsing and printing.
//!
//! Every parse error is fatal: the parser stops at the first problem and
//! returns it, no partial tree is produced.
//!
//! ## Error Categories
//!
//! - **Binary format**: the input is a binary DFM, which is not supported
//! - **Lexical errors**: a character that starts no token
//! - **Syntax errors**: a token of the wrong kind, a bad object index
//! - **Literal errors**: numbers and character codes that do not convert
//! - **Truncation**: a set, tuple, byte block or item list that never closes
//! - **Nesting**: objects and composite values nested past the configured limit
//! - **I/O errors**: reading or writing through the stream wrappers
//!
//! Positions are 1-based, columns count characters.
//!
//! ## Examples
//!
//! ```rust
//! use dfm::{from_str, Error};
//!
//! let err = from_str("object A: T\n  X = [1 2]\nend").unwrap_err();
//! assert!(matches!(err, Error::UnexpectedToken { line: 2, .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing DFM code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The input starts with the binary DFM signature byte 0xFF
    #[error("binary DFM files are not supported")]
    BinaryFormat,

    /// A character that cannot start any token
    #[error("illegal token {text:?} at line {line}, column {col}")]
    IllegalToken {
        line: usize,
        col: usize,
        text: String,
    },

    /// The parser needed one construct and found another
    #[error("{expected} expected at line {line}, column {col}, but found {found}")]
    UnexpectedToken {
        line: usize,
        col: usize,
        expected: String,
        found: String,
    },

    /// The `[N]` after an object type is not a non-negative integer
    #[error("object index at line {line}, column {col} must be a non-negative integer, found {found}")]
    MalformedIndex {
        line: usize,
        col: usize,
        found: String,
    },

    /// A numeric or character literal failed to convert
    #[error("malformed literal {literal:?} at line {line}, column {col}: {reason}")]
    MalformedLiteral {
        line: usize,
        col: usize,
        literal: String,
        reason: String,
    },

    /// Input ended inside a construct that needs closing
    #[error("premature end of input at line {line}, column {col}: unclosed {context}")]
    PrematureEnd {
        line: usize,
        col: usize,
        context: String,
    },

    /// Objects, sets, tuples or item lists nested deeper than allowed
    #[error("nesting deeper than {limit} levels at line {line}, column {col}")]
    NestingTooDeep {
        line: usize,
        col: usize,
        limit: usize,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an illegal token error for a character that starts no token.
    pub fn illegal_token(line: usize, col: usize, text: &str) -> Self {
        Error::IllegalToken {
            line,
            col,
            text: text.to_string(),
        }
    }

    /// Creates an unexpected token error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dfm::Error;
    ///
    /// let err = Error::unexpected_token(3, 7, "'='", "word \"clRed\"");
    /// assert!(err.to_string().contains("'=' expected at line 3"));
    /// ```
    pub fn unexpected_token(line: usize, col: usize, expected: &str, found: &str) -> Self {
        Error::UnexpectedToken {
            line,
            col,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn malformed_index(line: usize, col: usize, found: &str) -> Self {
        Error::MalformedIndex {
            line,
            col,
            found: found.to_string(),
        }
    }

    pub fn malformed_literal<T: fmt::Display>(
        line: usize,
        col: usize,
        literal: &str,
        reason: T,
    ) -> Self {
        Error::MalformedLiteral {
            line,
            col,
            literal: literal.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an error for input that ended before `context` was closed.
    pub fn premature_end(line: usize, col: usize, context: &str) -> Self {
        Error::PrematureEnd {
            line,
            col,
            context: context.to_string(),
        }
    }

    pub fn nesting_too_deep(line: usize, col: usize, limit: usize) -> Self {
        Error::NestingTooDeep { line, col, limit }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dfm::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the 1-based line and column the error points at, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::IllegalToken { line, col, .. }
            | Error::UnexpectedToken { line, col, .. }
            | Error::MalformedIndex { line, col, .. }
            | Error::MalformedLiteral { line, col, .. }
            | Error::PrematureEnd { line, col, .. }
            | Error::NestingTooDeep { line, col, .. } => Some((*line, *col)),
            Error::Io(_) | Error::BinaryFormat | Error::Custom(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_of_located_errors() {
        assert_eq!(Error::illegal_token(2, 5, "?").position(), Some((2, 5)));
        assert_eq!(Error::premature_end(9, 1, "set").position(), Some((9, 1)));
        assert_eq!(Error::nesting_too_deep(4, 12, 256).position(), Some((4, 12)));
        assert_eq!(Error::BinaryFormat.position(), None);
        assert_eq!(Error::custom("x").position(), None);
    }

    #[test]
    fn test_messages() {
        let err = Error::malformed_literal(1, 3, "#1114112", "not a unicode scalar value");
        assert_eq!(
            err.to_string(),
            "malformed literal \"#1114112\" at line 1, column 3: not a unicode scalar value"
        );
        assert_eq!(
            Error::BinaryFormat.to_string(),
            "binary DFM files are not supported"
        );
    }
}
