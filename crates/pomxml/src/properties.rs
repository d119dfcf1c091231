//! Free-form name/value property bags
//!
//! `<properties><java.version>17</java.version></properties>` decodes into a
//! [`Properties`] map. The store is unordered: encoding writes entries in
//! whatever order the map yields them.

use std::collections::hash_map::{self, HashMap};

use crate::error::Result;
use crate::lexer::StartTag;
use crate::reader::{Config, Reader};
use crate::writer::{Emitter, Writer};

/// Unordered map of scalar properties
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    /// Free-form annotation; never read from nor written to markup
    pub comment: Option<String>,
    pub entries: HashMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or overwrite, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Decode the element whose start tag was just read.
    ///
    /// Each child element becomes one entry keyed by its local name, valued
    /// by its trimmed direct text. Markup nested inside a value is skipped.
    /// A repeated key keeps the last value. Decoding stops at the
    /// container's end tag or at end of input, whichever comes first.
    pub fn decode(reader: &mut Reader<'_>, _start: &StartTag) -> Result<Self> {
        reader.nested(|reader| {
            let mut entries = HashMap::new();
            while let Some(tag) = reader.next_child()? {
                let value = reader.read_text()?;
                entries.insert(tag.local_name().to_string(), value.trim().to_string());
            }
            Ok(Self {
                comment: None,
                entries,
            })
        })
    }

    /// Encode as `<name>` followed by one `<key>value</key>` per entry
    pub fn encode<E: Emitter>(&self, name: &str, emitter: &mut E) -> Result<()> {
        emitter.start_tag(name)?;
        for (key, value) in &self.entries {
            emitter.leaf(key, value)?;
        }
        emitter.end_tag(name)
    }

    /// Parse a standalone `<properties>` fragment
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_config(input, Config::default())
    }

    pub fn parse_with_config(input: &str, config: Config) -> Result<Self> {
        let mut reader = Reader::with_config(input.as_bytes(), config);
        let root = reader.root()?;
        Self::decode(&mut reader, &root)
    }

    /// Compact markup for this map under the element `name`
    pub fn to_xml(&self, name: &str) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.encode(name, &mut writer)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

impl From<HashMap<String, String>> for Properties {
    fn from(entries: HashMap<String, String>) -> Self {
        Self {
            comment: None,
            entries,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<HashMap<_, _>>()
            .into()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::writer::FailingEmitter;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_decode_basic() -> Result<()> {
        let map = Properties::parse("<props><x>1</x><y>two</y></props>")?;
        assert_eq!(map, props(&[("x", "1"), ("y", "two")]));
        Ok(())
    }

    #[test]
    fn test_duplicate_key_keeps_last() -> Result<()> {
        let map = Properties::parse("<props><x>1</x><x>2</x></props>")?;
        assert_eq!(map, props(&[("x", "2")]));
        Ok(())
    }

    #[test]
    fn test_values_trimmed() -> Result<()> {
        let map = Properties::parse("<props><x>   value  \n</x></props>")?;
        assert_eq!(map.get("x"), Some("value"));
        Ok(())
    }

    #[test]
    fn test_nested_markup_in_value_skipped() -> Result<()> {
        let map = Properties::parse("<props><x>a<inner>ignored</inner>b</x><y/></props>")?;
        assert_eq!(map.get("x"), Some("ab"));
        assert_eq!(map.get("y"), Some(""));
        assert_eq!(map.len(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_container() -> Result<()> {
        let map = Properties::parse("<props></props>")?;
        assert!(map.is_empty());
        assert_eq!(map.to_xml("props")?, "<props></props>");
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<()> {
        let original = props(&[
            ("java.version", "17"),
            ("project.build.sourceEncoding", "UTF-8"),
            ("skipTests", "true"),
        ]);
        let xml = original.to_xml("properties")?;
        assert!(xml.starts_with("<properties>"));
        assert!(xml.contains("<java.version>17</java.version>"));
        assert_eq!(Properties::parse(&xml)?, original);
        Ok(())
    }

    #[test]
    fn test_unterminated_container_is_lenient() -> Result<()> {
        let map = Properties::parse("<props><x>1</x><y>2")?;
        assert_eq!(map, props(&[("x", "1"), ("y", "2")]));
        Ok(())
    }

    #[test]
    fn test_comment_is_not_serialized() -> Result<()> {
        let mut map = props(&[("a", "1")]);
        map.comment = Some("build settings".to_string());
        assert_eq!(map.to_xml("properties")?, "<properties><a>1</a></properties>");
        Ok(())
    }

    #[test]
    fn test_insert_overwrites() {
        let mut map = Properties::new();
        assert_eq!(map.insert("k", "1"), None);
        assert_eq!(map.insert("k", "2"), Some("1".to_string()));
        assert!(map.contains_key("k"));
        assert_eq!(map.remove("k"), Some("2".to_string()));
        assert!(map.is_empty());
    }

    #[test]
    fn test_encode_invalid_key_fails() {
        for key in ["", "a b"] {
            let map = props(&[(key, "v")]);
            let err = map.to_xml("props").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::Write);
        }
    }

    #[test]
    fn test_emitter_failure_stops_encoding() {
        let map = props(&[("a", "1"), ("b", "2"), ("c", "3")]);

        // container start, then start/text/end per entry: the sixth call is
        // the second entry's text
        let mut emitter = FailingEmitter::new(6);
        let err = map.encode("props", &mut emitter).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Write);
        assert_eq!(emitter.calls, 6);
    }
}
