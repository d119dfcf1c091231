//! Generic node tree for markup whose shape is not known ahead of time
//!
//! Plugin `configuration` blocks and similar vendor extensions decode into a
//! [`Node`]. The tree keeps element names, child order and text; attributes
//! are dropped on read and never written back.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::lexer::{StartTag, TokenKind};
use crate::reader::{Config, Reader};
use crate::writer::{Emitter, Writer};

/// One element of an arbitrary markup subtree
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    /// Local tag name
    pub name: String,
    /// Trimmed text of the last character-data run directly inside the element
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a leaf node holding `text`
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// First direct child named `name`
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All direct children named `name`, in document order
    pub fn children_named<'n>(&'n self, name: &'n str) -> impl Iterator<Item = &'n Self> + 'n {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Text of the first direct child named `name`
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str())
    }

    /// Follow a path of child names, e.g. `["archive", "manifest", "mainClass"]`
    pub fn find(&self, path: &[&str]) -> Option<&Self> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Depth of the tree; a childless node has depth 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Decode the element whose start tag was just read.
    ///
    /// Consumes tokens up to and including the matching end tag. A later text
    /// run replaces an earlier one, so `<a>x<b/>y</a>` keeps only `y`.
    /// Running out of input before the end tag ends the element.
    pub fn decode(reader: &mut Reader<'_>, start: &StartTag) -> Result<Self> {
        reader.nested(|reader| {
            let mut node = Self::new(start.local_name());
            let mut text = String::new();

            loop {
                match reader.next_token()?.kind {
                    TokenKind::StartTag(tag) => node.children.push(Self::decode(reader, &tag)?),
                    TokenKind::Text(run) => text = run,
                    TokenKind::EndTag(_) | TokenKind::Eof => break,
                }
            }

            node.text = text.trim().to_string();
            Ok(node)
        })
    }

    /// Encode as `<name>children text</name>`.
    ///
    /// Children come before text regardless of how they were interleaved in
    /// the source.
    pub fn encode<E: Emitter>(&self, emitter: &mut E) -> Result<()> {
        emitter.start_tag(&self.name)?;
        for child in &self.children {
            child.encode(emitter)?;
        }
        if !self.text.is_empty() {
            emitter.text(&self.text)?;
        }
        emitter.end_tag(&self.name)
    }

    /// Parse a standalone fragment whose root element becomes the node
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_config(input, Config::default())
    }

    pub fn parse_with_config(input: &str, config: Config) -> Result<Self> {
        let mut reader = Reader::with_config(input.as_bytes(), config);
        let root = reader.root()?;
        Self::decode(&mut reader, &root)
    }

    /// Compact markup for this node
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.encode(&mut writer)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}
