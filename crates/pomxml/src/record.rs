//! Binding between typed records and markup
//!
//! A [`Record`] owns an element: it decodes the element's children into
//! fields and encodes them back under a caller-chosen tag. A [`Field`] is one
//! slot inside a record. Scalars, nested records, repeated groups, node trees
//! and property maps all go through the same two traits, so each record only
//! has to list `tag => field` pairs (see [`record!`]).

use crate::dom::Node;
use crate::error::{Error, ErrorKind, Result, Span};
use crate::lexer::StartTag;
use crate::properties::Properties;
use crate::reader::Reader;
use crate::writer::Emitter;

/// A type that reads and writes a whole element
pub trait Record: Sized {
    /// Decode the element whose start tag was just read, consuming through
    /// its end tag
    fn decode(reader: &mut Reader<'_>, start: &StartTag) -> Result<Self>;

    /// Encode as an element named `name`
    fn encode<E: Emitter>(&self, name: &str, emitter: &mut E) -> Result<()>;
}

/// One field slot inside a record
pub trait Field {
    /// Absorb one occurrence of the field's element
    fn decode_field(&mut self, reader: &mut Reader<'_>, start: &StartTag) -> Result<()>;

    fn encode_field<E: Emitter>(&self, name: &str, emitter: &mut E) -> Result<()>;

    /// Unset fields are left out when encoding
    fn is_unset(&self) -> bool;
}

impl Record for Node {
    fn decode(reader: &mut Reader<'_>, start: &StartTag) -> Result<Self> {
        Self::decode(reader, start)
    }

    /// Writes the node's own name; `name` is only used for unnamed nodes
    fn encode<E: Emitter>(&self, name: &str, emitter: &mut E) -> Result<()> {
        if self.name.is_empty() {
            Self {
                name: name.to_string(),
                ..self.clone()
            }
            .encode(emitter)
        } else {
            self.encode(emitter)
        }
    }
}

impl Record for Properties {
    fn decode(reader: &mut Reader<'_>, start: &StartTag) -> Result<Self> {
        Self::decode(reader, start)
    }

    fn encode<E: Emitter>(&self, name: &str, emitter: &mut E) -> Result<()> {
        self.encode(name, emitter)
    }
}

impl Field for String {
    fn decode_field(&mut self, reader: &mut Reader<'_>, _start: &StartTag) -> Result<()> {
        *self = reader.read_text()?;
        Ok(())
    }

    fn encode_field<E: Emitter>(&self, name: &str, emitter: &mut E) -> Result<()> {
        emitter.leaf(name, self)
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Field for bool {
    fn decode_field(&mut self, reader: &mut Reader<'_>, _start: &StartTag) -> Result<()> {
        *self = parse_bool(&reader.read_text()?)?;
        Ok(())
    }

    fn encode_field<E: Emitter>(&self, name: &str, emitter: &mut E) -> Result<()> {
        emitter.leaf(name, if *self { "true" } else { "false" })
    }

    fn is_unset(&self) -> bool {
        !*self
    }
}

impl<T: Record> Field for Option<T> {
    fn decode_field(&mut self, reader: &mut Reader<'_>, start: &StartTag) -> Result<()> {
        *self = Some(T::decode(reader, start)?);
        Ok(())
    }

    fn encode_field<E: Emitter>(&self, name: &str, emitter: &mut E) -> Result<()> {
        match self {
            Some(value) => value.encode(name, emitter),
            None => Ok(()),
        }
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

/// Repeated element: every occurrence appends one item
impl<T: Field + Default> Field for Vec<T> {
    fn decode_field(&mut self, reader: &mut Reader<'_>, start: &StartTag) -> Result<()> {
        let mut item = T::default();
        item.decode_field(reader, start)?;
        self.push(item);
        Ok(())
    }

    fn encode_field<E: Emitter>(&self, name: &str, emitter: &mut E) -> Result<()> {
        for item in self {
            item.encode_field(name, emitter)?;
        }
        Ok(())
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

/// Accepts `1, t, T, TRUE, true, True` and their false counterparts.
/// Blank text reads as `false`.
fn parse_bool(text: &str) -> Result<bool> {
    match text.trim() {
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        other => Err(Error::new(
            ErrorKind::InvalidBoolean {
                found: other.to_string(),
            },
            Span::empty(),
        )),
    }
}

/// Declare a record struct together with its [`Record`] and [`Field`] impls.
///
/// ```ignore
/// record! {
///     /// Where the parent project lives
///     pub struct Parent {
///         "groupId" => group_id: String,
///         "relativePath" => relative_path: String,
///     }
/// }
/// ```
///
/// Children are matched by local name; elements with no matching field are
/// skipped. Fields encode in declaration order and unset fields are omitted.
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $tag:literal => $field:ident: $ty:ty,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::record::Record for $name {
            fn decode(
                reader: &mut $crate::reader::Reader<'_>,
                _start: &$crate::lexer::StartTag,
            ) -> $crate::error::Result<Self> {
                reader.nested(|reader| {
                    #[allow(unused_mut)]
                    let mut record = Self::default();
                    while let Some(child) = reader.next_child()? {
                        match child.local_name() {
                            $(
                                $tag => $crate::record::Field::decode_field(
                                    &mut record.$field,
                                    reader,
                                    &child,
                                )?,
                            )*
                            other => {
                                ::tracing::trace!(
                                    element = other,
                                    record = stringify!($name),
                                    "skipping unknown element"
                                );
                                reader.skip_element()?;
                            }
                        }
                    }
                    Ok(record)
                })
            }

            fn encode<E: $crate::writer::Emitter>(
                &self,
                name: &str,
                emitter: &mut E,
            ) -> $crate::error::Result<()> {
                emitter.start_tag(name)?;
                $(
                    if !$crate::record::Field::is_unset(&self.$field) {
                        $crate::record::Field::encode_field(&self.$field, $tag, emitter)?;
                    }
                )*
                emitter.end_tag(name)
            }
        }

        impl $crate::record::Field for $name {
            fn decode_field(
                &mut self,
                reader: &mut $crate::reader::Reader<'_>,
                start: &$crate::lexer::StartTag,
            ) -> $crate::error::Result<()> {
                *self = <Self as $crate::record::Record>::decode(reader, start)?;
                Ok(())
            }

            fn encode_field<E: $crate::writer::Emitter>(
                &self,
                name: &str,
                emitter: &mut E,
            ) -> $crate::error::Result<()> {
                <Self as $crate::record::Record>::encode(self, name, emitter)
            }

            fn is_unset(&self) -> bool {
                false
            }
        }
    };
}

pub(crate) use record;
