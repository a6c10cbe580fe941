//! Error types for ZON serialization and deserialization.
//!
//! Decoding errors carry a [`Position`] (byte offset plus the line and column
//! derived from it) so malformed input can be located. Every error is
//! recoverable: decoding untrusted input reports an [`Error`] and never aborts
//! the host process.
//!
//! ## Error Categories
//!
//! - **Token errors**: input ended early, or a required token (`.`, `=`, `}`) was absent
//! - **Literal errors**: malformed booleans, numbers, strings or non-UTF-8 text
//! - **Shape errors**: a Rust type with no ZON mapping, or a destination that cannot be filled
//! - **Encoding errors**: values the text format cannot represent
//!
//! ## Examples
//!
//! ```rust
//! use serde_zon::{from_str, Error, Value};
//!
//! let result: Result<Value, Error> = from_str(".{ .a = 1");
//! assert!(matches!(result, Err(Error::UnexpectedEnd { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// A location inside the decoded input.
///
/// `offset` is a byte index; `line` and `column` are 1-based and count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Computes the position of `offset` within `input`.
    ///
    /// Offsets past the end are clamped to the input length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::Position;
    ///
    /// let pos = Position::locate(b".{\n  .a = }", 10);
    /// assert_eq!((pos.line, pos.column), (2, 8));
    /// ```
    #[must_use]
    pub fn locate(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let consumed = &input[..offset];
        let line = consumed.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = match consumed.iter().rposition(|&b| b == b'\n') {
            Some(newline) => offset - newline,
            None => offset + 1,
        };
        Position {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (byte {})",
            self.line, self.column, self.offset
        )
    }
}

/// Represents all possible errors that can occur during ZON serialization/deserialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Input ended in the middle of a value or composite
    #[error("Unexpected end of input at {position}")]
    UnexpectedEnd { position: Position },

    /// A required token was absent
    #[error("Expected {expected} at {position}")]
    ExpectedToken {
        position: Position,
        expected: &'static str,
    },

    #[error("Invalid boolean at {position}: expected `true` or `false`")]
    InvalidBoolean { position: Position },

    #[error("Invalid number `{literal}` at {position}")]
    InvalidNumber { position: Position, literal: String },

    #[error("Unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("Invalid UTF-8 in string at {position}")]
    InvalidUtf8 { position: Position },

    /// Something other than whitespace or comments followed the top-level value
    #[error("Trailing characters at {position}")]
    TrailingCharacters { position: Position },

    /// Composites nested deeper than the decoder allows
    #[error("Nesting depth limit exceeded at {position}")]
    DepthLimitExceeded { position: Position },

    /// A Rust shape with no ZON mapping
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// The destination cannot be populated from ZON input
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    /// A map key that cannot be written as a `.identifier`
    #[error("Invalid map key {0:?}: keys must be identifiers")]
    InvalidKey(String),

    /// ZON strings have no escape sequences, so an embedded quote cannot be written
    #[error("String {0:?} contains a double quote and cannot be represented")]
    UnrepresentableString(String),

    /// A fault escaped from a `Deserialize` impl and was caught at the entry point
    #[error("Internal error during decoding: {0}")]
    Internal(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error for types that cannot be represented in ZON.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the input position for decoding errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::from_str;
    ///
    /// let err = from_str::<Vec<bool>>(".{\n  true,\n  tru,\n}").unwrap_err();
    /// let position = err.position().unwrap();
    /// assert_eq!((position.line, position.column), (3, 3));
    /// ```
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::UnexpectedEnd { position }
            | Error::ExpectedToken { position, .. }
            | Error::InvalidBoolean { position }
            | Error::InvalidNumber { position, .. }
            | Error::UnterminatedString { position }
            | Error::InvalidUtf8 { position }
            | Error::TrailingCharacters { position }
            | Error::DepthLimitExceeded { position } => Some(*position),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
