//! Emitter abstraction and the XML writer implementing it

use std::io;

use crate::error::{Error, Result};
use crate::lexer::markup::is_valid_name;

/// Sink for markup produced by the encoders
pub trait Emitter {
    /// Emit `<name>` with no attributes
    fn start_tag(&mut self, name: &str) -> Result<()>;
    /// Emit character data, escaped as the sink requires
    fn text(&mut self, text: &str) -> Result<()>;
    /// Emit `</name>`
    fn end_tag(&mut self, name: &str) -> Result<()>;

    /// Emit `<name>text</name>`
    fn leaf(&mut self, name: &str, text: &str) -> Result<()> {
        self.start_tag(name)?;
        if !text.is_empty() {
            self.text(text)?;
        }
        self.end_tag(name)
    }
}

/// Standard XML declaration written ahead of the root element
pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Configuration options for writing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterConfig {
    /// Number of spaces per nesting level (0 writes everything on one line)
    pub indent: usize,
    /// Whether to write [`DECLARATION`] before the first element
    pub declaration: bool,
}

impl WriterConfig {
    pub const fn compact() -> Self {
        Self {
            indent: 0,
            declaration: false,
        }
    }

    pub const fn pretty(indent: usize) -> Self {
        Self {
            indent,
            declaration: true,
        }
    }
}

/// XML writer over any [`io::Write`] sink
#[derive(Debug)]
pub struct Writer<W> {
    sink: W,
    config: WriterConfig,
    depth: usize,
    /// Set right after a start tag; the matching end tag then stays inline
    indented_in: bool,
    /// Nothing has been written yet
    first: bool,
}

impl<W: io::Write> Writer<W> {
    /// Create a compact writer
    pub const fn new(sink: W) -> Self {
        Self::with_config(sink, WriterConfig::compact())
    }

    pub const fn with_config(sink: W, config: WriterConfig) -> Self {
        Self {
            sink,
            config,
            depth: 0,
            indented_in: false,
            first: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    fn begin(&mut self) -> Result<()> {
        if self.first {
            self.first = false;
            if self.config.declaration {
                self.sink.write_all(DECLARATION.as_bytes())?;
                if self.config.indent == 0 {
                    return Ok(());
                }
                self.sink.write_all(b"\n")?;
            }
            return Ok(());
        }

        if self.config.indent > 0 {
            self.sink.write_all(b"\n")?;
            let width = self.depth * self.config.indent;
            write!(self.sink, "{:width$}", "")?;
        }
        Ok(())
    }
}

impl<W: io::Write> Emitter for Writer<W> {
    fn start_tag(&mut self, name: &str) -> Result<()> {
        check_name(name)?;
        self.begin()?;
        self.depth += 1;
        self.indented_in = true;
        write!(self.sink, "<{name}>")?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.sink.write_all(escape_text(text).as_bytes())?;
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> Result<()> {
        check_name(name)?;
        self.depth = self.depth.saturating_sub(1);
        if self.indented_in {
            self.indented_in = false;
        } else {
            self.begin()?;
        }
        write!(self.sink, "</{name}>")?;
        Ok(())
    }
}

/// Element names must read back as names; nothing is written otherwise
fn check_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::write(format!("invalid element name {name:?}")))
    }
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Emitter that fails on a chosen call and counts every call it receives
#[cfg(test)]
pub(crate) struct FailingEmitter {
    pub fail_at: usize,
    pub calls: usize,
}

#[cfg(test)]
impl FailingEmitter {
    pub const fn new(fail_at: usize) -> Self {
        Self { fail_at, calls: 0 }
    }

    fn call(&mut self) -> Result<()> {
        self.calls += 1;
        if self.calls >= self.fail_at {
            Err(Error::write("sink closed"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
impl Emitter for FailingEmitter {
    fn start_tag(&mut self, _name: &str) -> Result<()> {
        self.call()
    }

    fn text(&mut self, _text: &str) -> Result<()> {
        self.call()
    }

    fn end_tag(&mut self, _name: &str) -> Result<()> {
        self.call()
    }
}
