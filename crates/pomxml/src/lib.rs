//! pomxml - Maven POM model with round-trip XML binding
//!
//! Known POM elements bind to typed records. Vendor extension blocks
//! (plugin `configuration`) are kept as a generic [`Node`] tree and
//! `<properties>` as an unordered [`Properties`] map.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), pomxml::Error> {
//! let model = pomxml::from_str(
//!     r#"<project>
//!          <groupId>org.example</groupId>
//!          <artifactId>demo</artifactId>
//!          <version>1.0</version>
//!          <properties><java.version>17</java.version></properties>
//!        </project>"#,
//! )?;
//! assert_eq!(model.coordinates(), "org.example:demo:1.0");
//! assert_eq!(model.property("java.version"), Some("17"));
//!
//! let xml = pomxml::to_string(&model)?;
//! assert!(xml.starts_with("<project><groupId>org.example</groupId>"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use std::io;

use tracing::{debug, instrument};

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod lexer;
pub use lexer::{StartTag, Token, TokenKind};

pub mod reader;
pub use reader::{Config, Reader};

pub mod writer;
pub use writer::{Emitter, Writer, WriterConfig};

pub mod dom;
pub use dom::Node;

pub mod properties;
pub use properties::Properties;

pub mod record;
pub use record::{Field, Record};

pub mod model;
pub use model::Model;

/// Parse a POM from string
pub fn from_str(s: &str) -> Result<Model> {
    from_bytes_with_config(s.as_bytes(), Config::default())
}

/// Parse a POM from bytes
pub fn from_bytes(bytes: &[u8]) -> Result<Model> {
    from_bytes_with_config(bytes, Config::default())
}

/// Parse with custom configuration
pub fn from_str_with_config(s: &str, config: Config) -> Result<Model> {
    from_bytes_with_config(s.as_bytes(), config)
}

/// Parse bytes with custom configuration
#[instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn from_bytes_with_config(bytes: &[u8], config: Config) -> Result<Model> {
    let mut reader = Reader::with_config(bytes, config);
    let root = reader.root()?;
    if root.local_name() != model::ROOT {
        return Err(Error::new(
            ErrorKind::UnexpectedElement {
                expected: model::ROOT.to_string(),
                found: root.name,
            },
            Span::empty(),
        ));
    }

    let model = Model::decode(&mut reader, &root)?;
    reader.finish()?;
    debug!(coordinates = %model.coordinates(), "parsed project descriptor");
    Ok(model)
}

/// Read a whole POM from any reader, then parse it.
///
/// A failing source is reported as [`ErrorKind::Read`].
pub fn from_reader<R: io::Read>(mut source: R) -> Result<Model> {
    let mut buffer = Vec::new();
    source.read_to_end(&mut buffer).map_err(Error::read)?;
    from_bytes(&buffer)
}

/// Serialize a POM to compact markup
pub fn to_string(model: &Model) -> Result<String> {
    to_string_with_config(model, WriterConfig::compact())
}

/// Serialize a POM with an XML declaration and two-space indentation
pub fn to_string_pretty(model: &Model) -> Result<String> {
    to_string_with_config(model, WriterConfig::pretty(2))
}

pub fn to_string_with_config(model: &Model, config: WriterConfig) -> Result<String> {
    let buffer = to_writer(Vec::new(), model, config)?;
    String::from_utf8(buffer)
        .map_err(|_| Error::write("serialized output is not valid utf-8"))
}

/// Serialize a POM into `sink`, returning the sink
#[instrument(level = "debug", skip_all)]
pub fn to_writer<W: io::Write>(sink: W, model: &Model, config: WriterConfig) -> Result<W> {
    let mut writer = Writer::with_config(sink, config);
    model.encode(model::ROOT, &mut writer)?;
    if config.indent > 0 {
        writer.text("\n")?;
    }
    writer.flush()?;
    debug!("wrote project descriptor");
    Ok(writer.into_inner())
}
