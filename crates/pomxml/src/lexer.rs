//! Lexer module for markup tokenization

pub mod cursor;
pub mod markup;
pub mod token;

pub use cursor::Cursor;
pub use markup::MarkupLexer;
pub use token::{local_name, StartTag, Token, TokenKind};
