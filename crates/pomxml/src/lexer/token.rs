//! Token types for the markup lexer

use indexmap::IndexMap;

use crate::error::Span;

/// An opening tag together with its attributes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartTag {
    /// Qualified name as written, prefix included
    pub name: String,
    pub attributes: IndexMap<String, String>,
}

impl StartTag {
    /// Create a start tag with no attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Name without its namespace prefix
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }
}

/// Strip a namespace prefix (`xsi:schemaLocation` -> `schemaLocation`)
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Markup token types
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    StartTag(StartTag),
    EndTag(String),
    /// Character data with entities decoded, whitespace untouched
    Text(String),
    Eof,
}

impl TokenKind {
    /// Get token name for error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartTag(_) => "start tag",
            Self::EndTag(_) => "end tag",
            Self::Text(_) => "text",
            Self::Eof => "EOF",
        }
    }
}

/// Token with source span
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
