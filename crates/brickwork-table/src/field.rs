use std::ops::Range;

use brickwork_core::primitive;
use brickwork_core::{BrickError, Result};
use bytes::BytesMut;

/// Size of the fixed preamble: row count, field count, header block size,
/// record stride.
pub const PREAMBLE_SIZE: usize = 16;
/// One descriptor slot: hash, bitmask, start offset, shift, type tag.
pub const FIELD_DESCRIPTOR_SIZE: usize = 12;
/// Width of every `Str` column.
pub const TEXT_WIDTH: usize = 32;

static_assertions::const_assert_eq!(PREAMBLE_SIZE, 4 * 4);
static_assertions::const_assert_eq!(FIELD_DESCRIPTOR_SIZE, 4 + 4 + 2 + 1 + 1);

/// Column type tag stored in the last byte of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldType {
    Int = 0,
    Str = 1,
    Flt = 2,
}

impl FieldType {
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldType::Int => "Int",
            FieldType::Str => "Str",
            FieldType::Flt => "Flt",
        }
    }

    /// Bytes a value of this type occupies inside a record.
    pub fn width(self) -> usize {
        match self {
            FieldType::Int | FieldType::Flt => 4,
            FieldType::Str => TEXT_WIDTH,
        }
    }
}

impl TryFrom<u8> for FieldType {
    type Error = u8;

    fn try_from(tag: u8) -> std::result::Result<Self, u8> {
        match tag {
            0 => Ok(FieldType::Int),
            1 => Ok(FieldType::Str),
            2 => Ok(FieldType::Flt),
            other => Err(other),
        }
    }
}

/// One column of a table.
///
/// Everything except `name` is the verbatim content of the descriptor slot
/// and is written back unchanged. `name` starts out as the decimal hash and
/// is only ever replaced by a caller-supplied mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub hash: u32,
    pub name: String,
    pub bitmask: u32,
    /// Byte offset of the column inside a record.
    pub start_offset: u16,
    pub shift: u8,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new(hash: u32, bitmask: u32, start_offset: u16, shift: u8, field_type: FieldType) -> Self {
        Self {
            hash,
            name: hash.to_string(),
            bitmask,
            start_offset,
            shift,
            field_type,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Byte range the column covers, relative to the record start.
    pub fn span(&self) -> Range<usize> {
        let start = self.start_offset as usize;
        start..start + self.field_type.width()
    }

    /// `(word & bitmask) >> shift`. Shifts of 32 or more yield zero.
    #[inline]
    pub fn extract(&self, word: u32) -> u32 {
        (word & self.bitmask)
            .checked_shr(self.shift as u32)
            .unwrap_or(0)
    }

    /// Places `value` under the mask and keeps every bit of `existing`
    /// outside it.
    #[inline]
    pub fn merge(&self, existing: u32, value: u32) -> u32 {
        let placed = value.checked_shl(self.shift as u32).unwrap_or(0);
        (existing & !self.bitmask) | (placed & self.bitmask)
    }

    /// Parses descriptor number `index` from its slot at `offset`.
    pub(crate) fn read(buf: &[u8], offset: usize, index: usize) -> Result<Self> {
        let hash = primitive::read_u32(buf, offset)?;
        let bitmask = primitive::read_u32(buf, offset + 4)?;
        let start_offset = primitive::read_u16(buf, offset + 8)?;
        let shift = primitive::read_u8(buf, offset + 10)?;
        let tag = primitive::read_u8(buf, offset + 11)?;
        let field_type =
            FieldType::try_from(tag).map_err(|tag| BrickError::UnknownFieldType { index, tag })?;
        Ok(Self::new(hash, bitmask, start_offset, shift, field_type))
    }

    pub(crate) fn write(&self, out: &mut BytesMut, offset: usize) {
        primitive::write_u32(out, offset, self.hash);
        primitive::write_u32(out, offset + 4, self.bitmask);
        primitive::write_u16(out, offset + 8, self.start_offset);
        primitive::write_u8(out, offset + 10, self.shift);
        primitive::write_u8(out, offset + 11, self.field_type.tag());
    }
}

/// Bytes a record must cover: the stride, or further when a column ends past
/// it.
pub(crate) fn record_reach(fields: &[FieldDescriptor], record_stride: usize) -> usize {
    fields
        .iter()
        .map(|f| f.span().end)
        .max()
        .unwrap_or(0)
        .max(record_stride)
}

#[cfg(kani)]
mod proofs {
    use super::*;

    #[kani::proof]
    fn prove_merge_preserves_unowned_bits() {
        let field = FieldDescriptor {
            hash: 0,
            name: String::new(),
            bitmask: kani::any(),
            start_offset: 0,
            shift: kani::any(),
            field_type: FieldType::Int,
        };
        let existing: u32 = kani::any();
        let value: u32 = kani::any();

        let merged = field.merge(existing, value);
        assert_eq!(merged & !field.bitmask, existing & !field.bitmask);
        // Re-merging what was extracted is a no-op for masks aligned to the shift.
        kani::assume(field.bitmask.trailing_zeros() >= field.shift as u32);
        assert_eq!(field.merge(merged, field.extract(merged)), merged);
    }
}
