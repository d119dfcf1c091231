//! Token source consumed by the decoders

use crate::error::{Error, ErrorKind, Result};
use crate::lexer::{MarkupLexer, StartTag, Token, TokenKind};

/// Configuration for reader limits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// Forward-only markup reader with depth and size limits
#[derive(Debug)]
pub struct Reader<'a> {
    lexer: MarkupLexer<'a>,
    config: Config,
    depth: u16,
}

impl<'a> Reader<'a> {
    /// Create a new reader with default configuration
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new reader with custom configuration
    pub fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            lexer: MarkupLexer::new(input),
            config,
            depth: 0,
        }
    }

    pub const fn config(&self) -> Config {
        self.config
    }

    /// Current decoder nesting depth
    pub const fn depth(&self) -> u16 {
        self.depth
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        let token = self.lexer.next_token()?;

        if self.config.max_size > 0 && token.span.end.offset > self.config.max_size {
            return Err(Error::new(
                ErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                token.span,
            ));
        }

        Ok(token)
    }

    /// Run `decode` one nesting level deeper, failing once the configured
    /// maximum depth is exceeded.
    pub fn nested<T>(&mut self, decode: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.enter()?;
        let result = decode(self);
        self.exit();
        result
    }

    fn enter(&mut self) -> Result<()> {
        let depth = self.depth.saturating_add(1);
        if self.config.max_depth > 0 && depth > self.config.max_depth {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                self.lexer.position(),
            ));
        }
        self.depth = depth;
        Ok(())
    }

    fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Read up to and including the document's first start tag
    pub fn root(&mut self) -> Result<StartTag> {
        loop {
            let token = self.next_token()?;
            match token.kind {
                TokenKind::StartTag(tag) => return Ok(tag),
                TokenKind::Text(_) => {}
                TokenKind::EndTag(_) | TokenKind::Eof => {
                    return Err(Error::with_message(
                        ErrorKind::UnexpectedEof,
                        token.span,
                        "document has no root element",
                    ));
                }
            }
        }
    }

    /// Consume whatever follows the root element. Only whitespace, comments
    /// and processing instructions may remain.
    pub fn finish(&mut self) -> Result<()> {
        loop {
            let token = self.next_token()?;
            match token.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Text(text) if text.trim().is_empty() => {}
                _ => {
                    return Err(Error::with_message(
                        ErrorKind::InvalidToken,
                        token.span,
                        "content after root element",
                    ));
                }
            }
        }
    }

    /// Next child start tag of the element being read.
    ///
    /// Returns `None` once the element's end tag has been consumed, or when
    /// input runs out first. Text between children is skipped.
    pub fn next_child(&mut self) -> Result<Option<StartTag>> {
        loop {
            match self.next_token()?.kind {
                TokenKind::StartTag(tag) => return Ok(Some(tag)),
                TokenKind::Text(_) => {}
                TokenKind::EndTag(_) | TokenKind::Eof => return Ok(None),
            }
        }
    }

    /// Consume the rest of the current element, returning its direct
    /// character data concatenated. Nested elements are skipped.
    pub fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next_token()?.kind {
                TokenKind::Text(run) => text.push_str(&run),
                TokenKind::StartTag(_) => self.skip_element()?,
                TokenKind::EndTag(_) | TokenKind::Eof => return Ok(text),
            }
        }
    }

    /// Consume the rest of the current element without recursing
    pub fn skip_element(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.next_token()?.kind {
                TokenKind::StartTag(_) => depth += 1,
                TokenKind::EndTag(_) if depth == 0 => return Ok(()),
                TokenKind::EndTag(_) => depth -= 1,
                TokenKind::Text(_) => {}
                TokenKind::Eof => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.max_depth, 128);
        assert_eq!(config.max_size, 10 * 1024 * 1024);
        assert_eq!(Config::unlimited(), Config::new(0, 0));
    }

    #[test]
    fn test_root_skips_prolog() -> Result<()> {
        let mut reader = Reader::new(b"<?xml version=\"1.0\"?>\n<!-- c -->\n<project>");
        assert_eq!(reader.root()?.name, "project");
        Ok(())
    }

    #[test]
    fn test_root_missing() {
        let mut reader = Reader::new(b"  <!-- nothing -->  ");
        let err = reader.root().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_next_child_walks_siblings() -> Result<()> {
        let mut reader = Reader::new(b"<r> <a>1</a> text <b/> </r>");
        reader.root()?;

        let first = reader.next_child()?.map(|tag| tag.name);
        assert_eq!(first.as_deref(), Some("a"));
        assert_eq!(reader.read_text()?, "1");

        let second = reader.next_child()?.map(|tag| tag.name);
        assert_eq!(second.as_deref(), Some("b"));
        assert_eq!(reader.read_text()?, "");

        assert_eq!(reader.next_child()?, None);
        Ok(())
    }

    #[test]
    fn test_read_text_concatenates_and_skips_children() -> Result<()> {
        let mut reader = Reader::new(b"<a>x<b>ignored<c/></b>y</a>");
        reader.root()?;
        assert_eq!(reader.read_text()?, "xy");
        Ok(())
    }

    #[test]
    fn test_skip_element() -> Result<()> {
        let mut reader = Reader::new(b"<r><skip><deep><er/></deep></skip><keep/></r>");
        reader.root()?;
        reader.next_child()?;
        reader.skip_element()?;
        let next = reader.next_child()?.map(|tag| tag.name);
        assert_eq!(next.as_deref(), Some("keep"));
        Ok(())
    }

    #[test]
    fn test_finish_allows_trailing_misc() -> Result<()> {
        let mut reader = Reader::new(b"<r></r>\n<!-- done -->\n<?pi x?>\n");
        reader.root()?;
        assert_eq!(reader.next_child()?, None);
        reader.finish()
    }

    #[test]
    fn test_finish_rejects_trailing_content() -> Result<()> {
        let mut reader = Reader::new(b"<r></r>tail");
        reader.root()?;
        reader.next_child()?;
        let err = reader.finish().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidToken);
        Ok(())
    }

    #[test]
    fn test_nested_enforces_depth() {
        let mut reader = Reader::with_config(b"", Config::new(2, 0));
        let result = reader.nested(|r| r.nested(|r| r.nested(|_| Ok(()))));
        let err = result.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MaxDepthExceeded { max: 2 });
        assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn test_max_size() {
        let mut reader = Reader::with_config(b"<a>0123456789</a>", Config::new(0, 8));
        let result = reader.root().and_then(|_| reader.read_text());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MaxSizeExceeded { max: 8 });
    }
}
