//! Markup tokenizer
//!
//! Turns raw bytes into start-tag, end-tag, text and EOF tokens. Comments,
//! processing instructions and DOCTYPE declarations never reach the caller.
//! Well-formedness of tag nesting is checked here so every consumer can rely
//! on end tags matching the element they close.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{StartTag, Token, TokenKind};

/// Streaming markup lexer
#[derive(Debug)]
pub struct MarkupLexer<'a> {
    cursor: Cursor<'a>,
    /// Names of elements opened but not yet closed
    open: Vec<String>,
    /// End tag synthesized for a self-closing element
    pending: Option<Token>,
}

impl<'a> MarkupLexer<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            open: Vec::new(),
            pending: None,
        }
    }

    /// Number of currently open elements
    pub fn open_depth(&self) -> usize {
        self.open.len()
    }

    /// Current position in the input
    pub const fn position(&self) -> Pos {
        self.cursor.position()
    }

    /// Get the next token.
    ///
    /// Reaching the end of input while elements are still open yields
    /// [`TokenKind::Eof`] rather than an error; callers treat it as the
    /// implicit end of every open element.
    pub fn next_token(&mut self) -> Result<Token> {
        if let Some(token) = self.pending.take() {
            return Ok(token);
        }

        loop {
            let start = self.cursor.position();
            match self.cursor.current() {
                None => return Ok(Token::new(TokenKind::Eof, Span::at(start))),
                Some(b'<') => {
                    if self.cursor.starts_with(b"<!--") {
                        self.cursor.advance_by(4);
                        self.skip_until(b"-->", "unterminated comment")?;
                    } else if self.cursor.starts_with(b"<![CDATA[") {
                        self.cursor.advance_by(9);
                        return self.lex_cdata(start);
                    } else if self.cursor.starts_with(b"<?") {
                        self.cursor.advance_by(2);
                        self.skip_until(b"?>", "unterminated processing instruction")?;
                    } else if self.cursor.starts_with(b"<!") {
                        self.skip_declaration()?;
                    } else if self.cursor.starts_with(b"</") {
                        return self.lex_end_tag(start);
                    } else {
                        return self.lex_start_tag(start);
                    }
                }
                Some(_) => return self.lex_text(start),
            }
        }
    }

    fn lex_start_tag(&mut self, start: Pos) -> Result<Token> {
        self.cursor.advance();
        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.consume(b'/') {
            self.expect_byte(b'>')?;
            let span = Span::new(start, self.cursor.position());
            self.pending = Some(Token::new(TokenKind::EndTag(name.clone()), span));
            return Ok(Token::new(
                TokenKind::StartTag(StartTag { name, attributes }),
                span,
            ));
        }

        self.expect_byte(b'>')?;
        self.open.push(name.clone());
        Ok(Token::new(
            TokenKind::StartTag(StartTag { name, attributes }),
            Span::new(start, self.cursor.position()),
        ))
    }

    fn lex_end_tag(&mut self, start: Pos) -> Result<Token> {
        self.cursor.advance_by(2);
        let name = self.parse_name()?;
        self.cursor.skip_whitespace();
        self.expect_byte(b'>')?;

        match self.open.pop() {
            Some(expected) if expected == name => Ok(Token::new(
                TokenKind::EndTag(name),
                Span::new(start, self.cursor.position()),
            )),
            Some(expected) => Err(Error::at(
                ErrorKind::MismatchedTag {
                    expected,
                    found: name,
                },
                start,
            )),
            None => Err(Error::with_message(
                ErrorKind::InvalidToken,
                Span::at(start),
                format!("unexpected closing tag </{name}>"),
            )),
        }
    }

    fn lex_text(&mut self, start: Pos) -> Result<Token> {
        let from = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let text = bytes_to_str(self.cursor.slice_from(from), start)?;
        let text = decode_entities(&normalize_newlines(text), start)?;
        Ok(Token::new(
            TokenKind::Text(text),
            Span::new(start, self.cursor.position()),
        ))
    }

    fn lex_cdata(&mut self, start: Pos) -> Result<Token> {
        let from = self.cursor.pos();
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(b"]]>") {
                let text = normalize_newlines(bytes_to_str(self.cursor.slice_from(from), start)?)
                    .into_owned();
                self.cursor.advance_by(3);
                return Ok(Token::new(
                    TokenKind::Text(text),
                    Span::new(start, self.cursor.position()),
                ));
            }
            self.cursor.advance();
        }
        Err(self.error_here(ErrorKind::UnexpectedEof, "unterminated CDATA section"))
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/' | b'>') => break,
                Some(_) => {}
                None => {
                    return Err(self.error_here(ErrorKind::UnexpectedEof, "unterminated tag"));
                }
            }

            let pos = self.cursor.position();
            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(Error::at(ErrorKind::DuplicateAttribute { name }, pos));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(self.error_here(ErrorKind::InvalidToken, "expected quoted attribute value"))
            }
        };
        self.cursor.advance();

        let start = self.cursor.position();
        let from = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = bytes_to_str(self.cursor.slice_from(from), start)?;
                self.cursor.advance();
                return decode_entities(&normalize_newlines(raw), start);
            }
            if b == b'<' {
                return Err(self.error_here(ErrorKind::InvalidToken, "'<' in attribute value"));
            }
            self.cursor.advance();
        }

        Err(self.error_here(ErrorKind::UnexpectedEof, "unterminated attribute value"))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.position();
        let from = self.cursor.pos();

        match self.cursor.current() {
            Some(b) if is_name_start(b) => self.cursor.advance(),
            Some(_) => return Err(self.error_here(ErrorKind::InvalidToken, "expected name")),
            None => return Err(self.error_here(ErrorKind::UnexpectedEof, "expected name")),
        }

        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        bytes_to_str(self.cursor.slice_from(from), start).map(str::to_string)
    }

    /// Skip `<!DOCTYPE ...>` and friends, including an internal subset
    fn skip_declaration(&mut self) -> Result<()> {
        self.cursor.advance_by(2);
        let mut brackets = 0usize;
        let mut quote: Option<u8> = None;

        while let Some(b) = self.cursor.current() {
            self.cursor.advance();
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => brackets += 1,
                (None, b']') => brackets = brackets.saturating_sub(1),
                (None, b'>') if brackets == 0 => return Ok(()),
                _ => {}
            }
        }

        Err(self.error_here(ErrorKind::UnexpectedEof, "unterminated declaration"))
    }

    fn skip_until(&mut self, pattern: &[u8], message: &str) -> Result<()> {
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_here(ErrorKind::UnexpectedEof, message))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else if self.cursor.is_eof() {
            Err(self.error_here(ErrorKind::UnexpectedEof, "unterminated tag"))
        } else {
            Err(self.error_here(
                ErrorKind::InvalidToken,
                &format!("expected '{}'", char::from(expected)),
            ))
        }
    }

    fn error_here(&self, kind: ErrorKind, message: &str) -> Error {
        Error::with_message(kind, Span::at(self.cursor.position()), message)
    }
}

fn bytes_to_str(bytes: &[u8], pos: Pos) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|_| Error::at(ErrorKind::InvalidUtf8, pos))
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

/// Whether `name` lexes back as exactly one element name
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next().is_some_and(is_name_start) && bytes.all(is_name_char)
}

/// Fold `\r\n` and lone `\r` into `\n`
fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

fn decode_entities(input: &str, pos: Pos) -> Result<String> {
    if !input.contains('&') {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (before, after) = rest.split_at(amp);
        result.push_str(before);

        let Some(end) = after.find(';') else {
            return Err(Error::with_message(
                ErrorKind::InvalidEntity,
                Span::at(pos),
                "unterminated entity reference",
            ));
        };
        let entity = after.get(1..end).unwrap_or_default();
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(entity),
        };

        match decoded {
            Some(ch) => result.push(ch),
            None => {
                return Err(Error::with_message(
                    ErrorKind::InvalidEntity,
                    Span::at(pos),
                    format!("invalid entity &{entity};"),
                ));
            }
        }
        rest = after.get(end + 1..).unwrap_or_default();
    }
    result.push_str(rest);

    Ok(result)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
