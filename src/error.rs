//! Error types for JSON decoding and encoding.
//!
//! Decode errors carry the position in the input text where decoding
//! stopped; encode errors describe the value that could not be written.

use std::fmt;

/// Error returned when input text is not valid JSON or exceeds the
/// configured depth limit.
///
/// # Examples
///
/// ```
/// use fluent_json::{DecodeError, parse};
///
/// let result: Result<_, DecodeError> = parse("{invalid json}");
///
/// let err = result.unwrap_err();
/// assert!(err.to_string().contains("line 1"));
/// ```
#[derive(Debug, Clone)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    message: String,
    line: Option<usize>,
    column: Option<usize>,
}

/// Specific kinds of decode failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A token that does not fit the JSON grammar.
    InvalidSyntax,
    /// Input ended in the middle of a value.
    UnexpectedEof,
    /// A string was opened but not closed.
    UnterminatedString,
    /// An invalid escape sequence inside a string.
    InvalidEscape,
    /// A malformed or non-finite number literal.
    InvalidNumber,
    /// Non-whitespace input after the end of the document.
    TrailingCharacters,
    /// Nesting deeper than the configured `max_depth`.
    DepthLimitExceeded,
    /// A depth limit of zero was configured.
    InvalidDepth,
    /// The document root is not an object where one is required.
    ExpectedObject,
    /// A custom error message, used by the serde bridge.
    Custom(String),
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, message: impl Into<String>) -> Self {
        DecodeError {
            kind,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Adds input position information to this error.
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn custom(msg: impl Into<String>) -> Self {
        let message = msg.into();
        DecodeError::new(DecodeErrorKind::Custom(message.clone()), message)
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// 1-based line of the failure, when known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// 1-based column of the failure, when known.
    pub fn column(&self) -> Option<usize> {
        self.column
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "{} at line {}, column {}", self.message, line, col)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for DecodeError {}

impl serde::de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        DecodeError::custom(msg.to_string())
    }
}

/// Error returned when a value cannot be written as JSON.
///
/// Encode failures always propagate; there is no non-throwing validity
/// check on the encode side.
#[derive(Debug, Clone)]
pub struct EncodeError {
    kind: EncodeErrorKind,
    message: String,
}

/// Specific kinds of encode failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeErrorKind {
    /// A NaN or infinite number, which JSON cannot represent.
    NonFiniteNumber,
    /// Nesting deeper than the configured `max_depth`.
    DepthLimitExceeded,
    /// A depth limit of zero was configured.
    InvalidDepth,
    /// A map with a non-string key reached the serde bridge.
    KeyMustBeString,
    /// A custom error message, used by the serde bridge.
    Custom(String),
}

impl EncodeError {
    pub fn new(kind: EncodeErrorKind, message: impl Into<String>) -> Self {
        EncodeError {
            kind,
            message: message.into(),
        }
    }

    pub fn custom(msg: impl Into<String>) -> Self {
        let message = msg.into();
        EncodeError::new(EncodeErrorKind::Custom(message.clone()), message)
    }

    pub fn kind(&self) -> &EncodeErrorKind {
        &self.kind
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EncodeError {}

impl serde::ser::Error for EncodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        EncodeError::custom(msg.to_string())
    }
}
