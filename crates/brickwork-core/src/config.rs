use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Layout knobs for the encoders. The defaults reproduce the on-disk
/// formats exactly; overriding them is only useful for tooling that wants
/// unpadded or differently aligned output.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Table output is padded up to a multiple of this many bytes.
    pub table_alignment: usize,
    pub table_pad_byte: u8,
    /// Filler for the unused tail of fixed-width text fields.
    pub text_pad_byte: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            table_alignment: 32,
            table_pad_byte: b'@',
            text_pad_byte: 0,
        }
    }
}

impl CodecConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("CodecConfig: loaded {}", path.as_ref().display());
        Ok(config)
    }
}
