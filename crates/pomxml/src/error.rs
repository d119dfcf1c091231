//! Error types for pomxml

use std::fmt;
use thiserror::Error;

/// Position in source markup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source markup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("invalid token")]
    InvalidToken,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },
    #[error("duplicate attribute: {name}")]
    DuplicateAttribute { name: String },
    #[error("invalid entity reference")]
    InvalidEntity,
    #[error("invalid utf-8")]
    InvalidUtf8,
    #[error("invalid boolean: {found}")]
    InvalidBoolean { found: String },
    #[error("expected element <{expected}>, found <{found}>")]
    UnexpectedElement { expected: String, found: String },
    #[error("max depth exceeded: {max}")]
    MaxDepthExceeded { max: u16 },
    #[error("max size exceeded: {max}")]
    MaxSizeExceeded { max: usize },
    #[error("write failed")]
    Write,
    #[error("read failed")]
    Read,
}

impl ErrorKind {
    /// Whether this error was raised while reading markup.
    ///
    /// Sink failures ([`ErrorKind::Write`]) and source failures
    /// ([`ErrorKind::Read`]) do not belong to this class.
    pub const fn is_malformed(&self) -> bool {
        !matches!(self, Self::Write | Self::Read)
    }
}

/// Main error type for pomxml
#[derive(Error, Clone, Debug, PartialEq)]
#[error("error at {}: {message}", .span.start)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::at(pos))
    }

    /// Create a write error from a sink failure
    pub fn write(message: impl fmt::Display) -> Self {
        Self::with_message(
            ErrorKind::Write,
            Span::empty(),
            format!("write failed: {message}"),
        )
    }

    /// Create a read error from a source failure
    pub fn read(message: impl fmt::Display) -> Self {
        Self::with_message(
            ErrorKind::Read,
            Span::empty(),
            format!("read failed: {message}"),
        )
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn is_malformed(&self) -> bool {
        self.kind.is_malformed()
    }

    pub const fn is_write_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Write)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::write(err)
    }
}

/// Result type alias for pomxml
pub type Result<T> = std::result::Result<T, Error>;
