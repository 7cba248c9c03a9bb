use brickwork_core::primitive;
use brickwork_core::{BrickError, CodecConfig, Result};
use bytes::{Bytes, BytesMut};

use crate::entry::{ParamType, ParamValue, ParameterEntry};

/// Smallest possible entry: hash, name length, empty name, tag, one byte.
const MIN_ENTRY_SIZE: usize = 2 + 2 + 4 + 1;

/// An ordered list of parameter entries.
///
/// On disk: a `u32` entry count followed by the entries back to back. There
/// is no trailing padding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<ParameterEntry>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(source: &[u8]) -> Result<Self> {
        let count = primitive::read_u32(source, 0)? as usize;
        let mut entries = Vec::with_capacity(count.min(source.len() / MIN_ENTRY_SIZE));
        let mut cursor = 4;

        for _ in 0..count {
            let hash = primitive::read_u16(source, cursor)?;
            let name_length = primitive::read_u16(source, cursor + 2)?;
            let name = primitive::read_fixed_text(source, cursor + 4, name_length as usize)?;
            cursor += 4 + name_length as usize;

            let tag = primitive::read_u32(source, cursor)?;
            let param_type = ParamType::try_from(tag)
                .map_err(|tag| BrickError::UnknownParameterType { offset: cursor, tag })?;
            let value = ParamValue::read(source, cursor + 4, param_type)?;
            cursor += 4 + param_type.size();

            entries.push(ParameterEntry::from_parts(hash, name, name_length, value));
        }

        if cursor < source.len() {
            tracing::debug!("ParameterSet: ignoring {} trailing bytes", source.len() - cursor);
        }
        tracing::debug!("ParameterSet: decoded {} entries", entries.len());
        Ok(Self { entries })
    }

    pub fn encode(&self) -> Result<Bytes> {
        self.encode_with(&CodecConfig::default())
    }

    /// Serializes every entry. Only `text_pad_byte` is taken from `config`;
    /// this format is never aligned.
    pub fn encode_with(&self, config: &CodecConfig) -> Result<Bytes> {
        let total = 4 + self.entries.iter().map(ParameterEntry::encoded_len).sum::<usize>();
        let mut out = BytesMut::with_capacity(total);

        let count = primitive::count_as_u32(self.entries.len())?;
        primitive::write_u32(&mut out, 0, count);

        let mut cursor = 4;
        for entry in &self.entries {
            let name_length = entry.name_length() as usize;
            primitive::write_u16(&mut out, cursor, entry.hash);
            primitive::write_u16(&mut out, cursor + 2, entry.name_length());
            primitive::write_fixed_text(&mut out, cursor + 4, entry.name(), name_length, config.text_pad_byte)?;
            cursor += 4 + name_length;

            let param_type = entry.param_type();
            primitive::write_u32(&mut out, cursor, param_type.tag());
            entry.value.write(&mut out, cursor + 4);
            cursor += 4 + param_type.size();
        }

        Ok(out.freeze())
    }

    /// The entry called `name`. Absence is an error; use [`find_entry`]
    /// for an `Option`.
    ///
    /// [`find_entry`]: ParameterSet::find_entry
    pub fn get_entry(&self, name: &str) -> Result<&ParameterEntry> {
        self.find_entry(name)
            .ok_or_else(|| BrickError::EntryNotFound(name.to_string()))
    }

    pub fn get_entry_mut(&mut self, name: &str) -> Result<&mut ParameterEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.name() == name)
            .ok_or_else(|| BrickError::EntryNotFound(name.to_string()))
    }

    pub fn find_entry(&self, name: &str) -> Option<&ParameterEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn find_by_hash(&self, hash: u16) -> Option<&ParameterEntry> {
        self.entries.iter().find(|e| e.hash == hash)
    }

    pub fn push(&mut self, entry: ParameterEntry) {
        self.entries.push(entry);
    }

    pub fn remove(&mut self, name: &str) -> Result<ParameterEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.name() == name)
            .ok_or_else(|| BrickError::EntryNotFound(name.to_string()))?;
        Ok(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ParameterEntry> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = ParameterEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a ParameterEntry;
    type IntoIter = std::slice::Iter<'a, ParameterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
