//! Java-style `.properties` files
//!
//! Theme metadata and message bundles ship as `.properties` files; parsing
//! is done by `java-properties`, which follows `java.util.Properties.load`.
//!
//! Files are decoded as UTF-8 when valid, otherwise as Latin-1 (legacy
//! bundles written for `ResourceBundle`). A key defined twice keeps its last
//! value.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use java_properties::{PropertiesError, PropertiesIter};
use std::collections::hash_map;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Parsed key/value pairs of one `.properties` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy entries from `parent` for keys this set does not define.
    pub fn inherit(&mut self, parent: &Properties) {
        for (key, value) in &parent.entries {
            if let hash_map::Entry::Vacant(slot) = self.entries.entry(key.clone()) {
                slot.insert(value.clone());
            }
        }
    }
}

/// Read and parse a `.properties` file.
pub fn read_properties(path: &Path) -> Result<Properties> {
    let bytes = std::fs::read(path)?;
    let encoding = detect_encoding(&bytes);
    if encoding != UTF_8 {
        tracing::debug!("{:?} is not valid UTF-8, reading as Latin-1", path);
    }
    parse_with_encoding(&bytes, encoding)
}

/// Parse `.properties` text.
pub fn parse_properties(content: &str) -> Result<Properties> {
    parse_with_encoding(content.as_bytes(), UTF_8)
}

/// UTF-8 when the whole file decodes as such, else Latin-1.
///
/// `encoding_rs` implements ISO-8859-1 as its windows-1252 superset.
fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        WINDOWS_1252
    }
}

fn parse_with_encoding(bytes: &[u8], encoding: &'static Encoding) -> Result<Properties> {
    let mut entries = HashMap::new();
    PropertiesIter::new_with_encoding(bytes, encoding)
        .read_into(|key, value| {
            entries.insert(key, value);
        })
        .map_err(properties_error)?;
    Ok(Properties { entries })
}

fn properties_error(err: PropertiesError) -> Error {
    Error::properties(err.line_number().unwrap_or(0), err.to_string())
}
