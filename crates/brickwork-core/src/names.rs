use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BrickError, Result};

/// Caller-supplied dictionary from field hash to display name.
///
/// The codecs never derive names themselves; a table only carries the
/// decimal hash as its default name until a mapping is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNames {
    names: BTreeMap<u32, String>,
}

#[derive(Deserialize)]
struct FieldNamesFile {
    #[serde(default)]
    fields: BTreeMap<String, String>,
}

impl FieldNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hash: u32, name: impl Into<String>) -> Option<String> {
        self.names.insert(hash, name.into())
    }

    pub fn get(&self, hash: u32) -> Option<&str> {
        self.names.get(&hash).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Pairs in ascending hash order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names.iter().map(|(hash, name)| (*hash, name.as_str()))
    }

    /// Parses a `[fields]` table whose keys are decimal or `0x`-prefixed
    /// hexadecimal hashes.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: FieldNamesFile = toml::from_str(source)?;
        let mut names = Self::new();
        for (key, name) in file.fields {
            names.insert(parse_hash(&key)?, name);
        }
        Ok(names)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let names = Self::from_toml_str(&source)?;
        tracing::debug!("FieldNames: {} names from {}", names.len(), path.as_ref().display());
        Ok(names)
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for FieldNames {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|(hash, name)| (hash, name.into())).collect(),
        }
    }
}

fn parse_hash(key: &str) -> Result<u32> {
    let key = key.trim();
    let parsed = match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => key.parse::<u32>(),
    };
    parsed.map_err(|_| BrickError::Config(format!("invalid field hash key {key:?}")))
}
