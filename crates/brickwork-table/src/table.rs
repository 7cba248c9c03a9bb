use brickwork_core::primitive;
use brickwork_core::{BrickError, CodecConfig, FieldNames, Result};
use bytes::{Bytes, BytesMut};

use crate::decoder::{Preamble, TableDecoder};
use crate::field::{record_reach, FieldDescriptor, FieldType, FIELD_DESCRIPTOR_SIZE, PREAMBLE_SIZE, TEXT_WIDTH};
use crate::row::{FieldValue, Row};

/// A decoded table: column descriptors, fixed-stride rows, and the stride.
///
/// Rows store values positionally, so renaming a field never disturbs row
/// lookups. Every mutation keeps one value per field with the field's type.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    fields: Vec<FieldDescriptor>,
    rows: Vec<Row>,
    record_stride: u32,
}

impl Table {
    /// An empty table with the given columns.
    pub fn new(fields: Vec<FieldDescriptor>, record_stride: u32) -> Self {
        Self {
            fields,
            rows: Vec::new(),
            record_stride,
        }
    }

    pub(crate) fn from_parts(fields: Vec<FieldDescriptor>, rows: Vec<Row>, record_stride: u32) -> Self {
        Self {
            fields,
            rows,
            record_stride,
        }
    }

    pub fn decode(source: impl Into<Bytes>) -> Result<Self> {
        TableDecoder::new(source).finish()
    }

    pub fn encode(&self) -> Result<Bytes> {
        self.encode_with(&CodecConfig::default())
    }

    /// Serializes the table.
    ///
    /// Each record is first seeded from the row's backing record, then every
    /// field is written over it. Int fields merge into the word already in
    /// place, which keeps bits outside their mask and lets several fields
    /// share one word. A field reaching past the stride merges into the
    /// source bytes its row was decoded with.
    pub fn encode_with(&self, config: &CodecConfig) -> Result<Bytes> {
        let header_block_size = self.header_block_size();
        let stride = self.record_stride as usize;
        let reach = record_reach(&self.fields, stride);
        let mut out = BytesMut::with_capacity(
            header_block_size + stride * self.rows.len() + config.table_alignment,
        );

        Preamble {
            row_count: primitive::count_as_s32(self.rows.len())?,
            field_count: primitive::count_as_s32(self.fields.len())?,
            header_block_size: header_block_size as u32,
            record_stride: self.record_stride,
        }
        .write(&mut out);

        for (index, field) in self.fields.iter().enumerate() {
            field.write(&mut out, PREAMBLE_SIZE + index * FIELD_DESCRIPTOR_SIZE);
        }

        for (index, row) in self.rows.iter().enumerate() {
            if row.len() != self.fields.len() {
                return Err(BrickError::RowShapeMismatch {
                    row: index,
                    expected: self.fields.len(),
                    found: row.len(),
                });
            }

            // Clear whatever a previous row's field spilled into this slot.
            let base = header_block_size + index * stride;
            if out.len() < base + stride {
                out.resize(base + stride, 0);
            }
            out[base..base + stride].fill(0);

            let seed = &row.record()[..row.record().len().min(reach)];
            if out.len() < base + seed.len() {
                out.resize(base + seed.len(), 0);
            }
            out[base..base + seed.len()].copy_from_slice(seed);

            for (field, value) in self.fields.iter().zip(row.values()) {
                write_value(&mut out, base + field.start_offset as usize, field, value, config)?;
            }
        }

        let padded = primitive::pad_to_alignment(&mut out, config.table_alignment, config.table_pad_byte);
        tracing::debug!(
            "Table: encoded {} rows x {} fields into {} bytes ({} padding)",
            self.rows.len(),
            self.fields.len(),
            out.len(),
            padded
        );
        Ok(out.freeze())
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn record_stride(&self) -> u32 {
        self.record_stride
    }

    /// Changes the record size used by the next encode. Backing records are
    /// truncated at the furthest field or zero-extended to fit.
    pub fn set_record_stride(&mut self, record_stride: u32) {
        self.record_stride = record_stride;
    }

    /// `16 + 12 * field count`, as written by the encoder.
    pub fn header_block_size(&self) -> usize {
        PREAMBLE_SIZE + FIELD_DESCRIPTOR_SIZE * self.fields.len()
    }

    pub fn find_field_by_hash(&self, hash: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.hash == hash)
    }

    pub fn find_field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_index(&self, hash: u32) -> Option<usize> {
        self.fields.iter().position(|f| f.hash == hash)
    }

    /// Renames the first field carrying each mapped hash. Hashes with no
    /// field are skipped. Returns how many fields were renamed.
    pub fn apply_name_mapping(&mut self, names: &FieldNames) -> usize {
        let mut renamed = 0;
        for (hash, name) in names.iter() {
            if let Some(index) = self.field_index(hash) {
                self.fields[index].name = name.to_string();
                renamed += 1;
            }
        }
        tracing::debug!("Table: named {} of {} fields", renamed, self.fields.len());
        renamed
    }

    pub fn value(&self, row: usize, hash: u32) -> Option<&FieldValue> {
        let index = self.field_index(hash)?;
        self.rows.get(row)?.get(index)
    }

    pub fn value_by_name(&self, row: usize, name: &str) -> Option<&FieldValue> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        self.rows.get(row)?.get(index)
    }

    /// Replaces one value and returns the previous one.
    pub fn set_value(&mut self, row: usize, hash: u32, value: impl Into<FieldValue>) -> Result<FieldValue> {
        let index = self.field_index(hash).ok_or(BrickError::FieldNotFound(hash))?;
        let value = value.into();
        check_type(&self.fields[index], &value)?;

        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(BrickError::RowOutOfRange { index: row, len })?;
        Ok(std::mem::replace(&mut target.values_mut()[index], value))
    }

    /// Appends a row; `values` must follow field order.
    pub fn push_row(&mut self, values: Vec<FieldValue>) -> Result<usize> {
        self.check_row(self.rows.len(), &values)?;
        self.rows.push(Row::new(values));
        Ok(self.rows.len() - 1)
    }

    pub fn insert_row(&mut self, index: usize, values: Vec<FieldValue>) -> Result<()> {
        if index > self.rows.len() {
            return Err(BrickError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        self.check_row(index, &values)?;
        self.rows.insert(index, Row::new(values));
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> Result<Row> {
        if index >= self.rows.len() {
            return Err(BrickError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index))
    }

    /// Appends a column; every existing row receives `default`.
    pub fn add_field(&mut self, field: FieldDescriptor, default: impl Into<FieldValue>) -> Result<()> {
        let default = default.into();
        check_type(&field, &default)?;
        for row in &mut self.rows {
            row.values_mut().push(default.clone());
        }
        self.fields.push(field);
        Ok(())
    }

    /// Drops the first column with `hash` and its value in every row. The
    /// bytes it occupied keep their backing-record content.
    pub fn remove_field(&mut self, hash: u32) -> Result<FieldDescriptor> {
        let index = self.field_index(hash).ok_or(BrickError::FieldNotFound(hash))?;
        for row in &mut self.rows {
            row.values_mut().remove(index);
        }
        Ok(self.fields.remove(index))
    }

    fn check_row(&self, row: usize, values: &[FieldValue]) -> Result<()> {
        if values.len() != self.fields.len() {
            return Err(BrickError::RowShapeMismatch {
                row,
                expected: self.fields.len(),
                found: values.len(),
            });
        }
        for (field, value) in self.fields.iter().zip(values) {
            check_type(field, value)?;
        }
        Ok(())
    }
}

fn check_type(field: &FieldDescriptor, value: &FieldValue) -> Result<()> {
    if value.field_type() != field.field_type {
        return Err(BrickError::ValueTypeMismatch {
            hash: field.hash,
            expected: field.field_type.name(),
            found: value.field_type().name(),
        });
    }
    Ok(())
}

fn write_value(
    out: &mut BytesMut,
    offset: usize,
    field: &FieldDescriptor,
    value: &FieldValue,
    config: &CodecConfig,
) -> Result<()> {
    match value {
        FieldValue::Int(v) if field.field_type == FieldType::Int => {
            let end = offset + field.field_type.width();
            if out.len() < end {
                out.resize(end, 0);
            }
            let existing = primitive::read_u32(out, offset)?;
            let word = field.merge(existing, *v);
            if field.extract(word) != *v {
                tracing::warn!("Table: value {} does not fit the mask of field {}", v, field.hash);
            }
            primitive::write_u32(out, offset, word);
        }
        FieldValue::Str(s) if field.field_type == FieldType::Str => {
            primitive::write_fixed_text(out, offset, s, TEXT_WIDTH, config.text_pad_byte)?;
        }
        FieldValue::Flt(f) if field.field_type == FieldType::Flt => {
            primitive::write_f32(out, offset, *f);
        }
        _ => check_type(field, value)?,
    }
    Ok(())
}
