//! Parsed YAML configuration document.
//!
//! The expected layout is a top-level mapping of sections, each holding a
//! mapping of keys:
//!
//! ```yaml
//! internal_server:
//!   host: 0.0.0.0
//!   port: 8080
//! ```
//!
//! Parsing happens once; lookups only walk the resulting [`Value`] tree.

use std::collections::BTreeMap;
use std::path::Path;

use serde_saphyr::Options;
use tracing::debug;

use crate::codec::ElementCodec;
use crate::error::{CfgsynthError, CfgsynthResult};
use crate::value::Value;

/// Keys of one top-level section.
pub type Section = BTreeMap<String, Value>;

const MEMORY_ORIGIN: &str = "<memory>";

/// An immutable, parsed configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: BTreeMap<String, Value>,
}

impl Document {
    /// A document with no sections. Every lookup misses.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            root: BTreeMap::new(),
        }
    }

    /// Parses YAML from raw bytes.
    ///
    /// An empty input or a bare `null` yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`CfgsynthError::Encoding`] for non-UTF-8 input,
    /// [`CfgsynthError::Parse`] when the YAML is malformed, and
    /// [`CfgsynthError::InvalidRoot`] when the top level is not a mapping.
    pub fn parse(data: &[u8]) -> CfgsynthResult<Self> {
        Self::parse_with_origin(data, MEMORY_ORIGIN)
    }

    /// Parses YAML from a string slice.
    ///
    /// # Errors
    ///
    /// See [`Document::parse`].
    pub fn parse_str(contents: &str) -> CfgsynthResult<Self> {
        Self::parse_text(contents, MEMORY_ORIGIN)
    }

    /// Reads and parses the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CfgsynthError::Read`] when the file cannot be read, or any
    /// error [`Document::parse`] reports.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CfgsynthResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| CfgsynthError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_with_origin(&data, &format!("'{}'", path.display()))
    }

    fn parse_with_origin(data: &[u8], origin: &str) -> CfgsynthResult<Self> {
        let contents = std::str::from_utf8(data).map_err(|source| CfgsynthError::Encoding {
            origin: origin.to_owned(),
            source,
        })?;
        Self::parse_text(contents, origin)
    }

    fn parse_text(contents: &str, origin: &str) -> CfgsynthResult<Self> {
        if contents.trim().is_empty() {
            debug!(origin, "configuration document is empty");
            return Ok(Self::empty());
        }
        let value: Value = serde_saphyr::from_str_with_options(
            contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
        .map_err(|err| CfgsynthError::Parse {
            origin: origin.to_owned(),
            message: err.to_string(),
        })?;
        let root = match value {
            Value::Mapping(root) => root,
            Value::Null => BTreeMap::new(),
            other => {
                return Err(CfgsynthError::InvalidRoot {
                    origin: origin.to_owned(),
                    found: other.kind(),
                });
            }
        };
        debug!(origin, sections = root.len(), "parsed configuration document");
        Ok(Self { root })
    }

    /// Whether the document holds no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Names of the top-level entries, in sorted order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Returns the named section when it exists and is a mapping.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.root.get(name).and_then(Value::as_mapping)
    }

    /// Looks up the first string value across `sections` × `keys`.
    ///
    /// Values of any other type do not match; the search continues.
    #[must_use]
    pub fn get_string(&self, sections: &[&str], keys: &[&str]) -> Option<String> {
        self.find(sections, keys, |value| value.as_str().map(str::to_owned))
    }

    /// Looks up the first integer value across `sections` × `keys`.
    ///
    /// See [`Value::as_int`] for the accepted representations.
    #[must_use]
    pub fn get_int(&self, sections: &[&str], keys: &[&str]) -> Option<i64> {
        self.find(sections, keys, Value::as_int)
    }

    /// Looks up the first struct slice across `sections` × `keys`, decoded
    /// with `T`'s [`ElementCodec`].
    #[must_use]
    pub fn get_slice<T: ElementCodec>(&self, sections: &[&str], keys: &[&str]) -> Option<Vec<T>> {
        self.find(sections, keys, T::decode_document)
    }

    /// Searches sections in order and, within each section, keys in order.
    /// The first candidate that `coerce` accepts wins.
    fn find<T, F>(&self, sections: &[&str], keys: &[&str], coerce: F) -> Option<T>
    where
        F: Fn(&Value) -> Option<T>,
    {
        sections
            .iter()
            .filter_map(|name| self.section(name).map(|section| (*name, section)))
            .find_map(|(name, section)| {
                keys.iter()
                    .filter(|key| !key.is_empty())
                    .find_map(|key| {
                        let value = section.get(*key)?;
                        let coerced = coerce(value);
                        if coerced.is_none() {
                            debug!(
                                section = name,
                                key = *key,
                                kind = value.kind(),
                                "document value does not match the requested type"
                            );
                        }
                        coerced
                    })
            })
    }
}
