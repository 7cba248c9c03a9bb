use bytes::Bytes;

use crate::field::FieldType;

/// A decoded column value. The variant always matches the owning field's
/// [`FieldType`]; the table rejects mismatches on edit and on encode.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(u32),
    Str(String),
    Flt(f32),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Str(_) => FieldType::Str,
            FieldValue::Flt(_) => FieldType::Flt,
        }
    }

    /// Zero, the empty string, or `0.0`.
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Int => FieldValue::Int(0),
            FieldType::Str => FieldValue::Str(String::new()),
            FieldType::Flt => FieldValue::Flt(0.0),
        }
    }

    pub fn as_int(&self) -> Option<u32> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_flt(&self) -> Option<f32> {
        match self {
            FieldValue::Flt(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Flt(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

/// One record of a table: a value per field, stored in field order.
///
/// A decoded row also keeps the raw record it came from, extended past the
/// stride when a field reaches further. The encoder starts each record from
/// those bytes, so padding and bits no field owns come out exactly as they
/// went in. Rows built in memory start from zeroes.
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: Vec<FieldValue>,
    record: Bytes,
}

impl Row {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self {
            values,
            record: Bytes::new(),
        }
    }

    pub(crate) fn with_record(values: Vec<FieldValue>, record: Bytes) -> Self {
        Self { values, record }
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Value of the field at position `index` in the table's field list.
    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw bytes this row was decoded from, up to the end of its furthest
    /// field; empty for rows built in memory.
    pub fn record(&self) -> &Bytes {
        &self.record
    }

    pub(crate) fn values_mut(&mut self) -> &mut Vec<FieldValue> {
        &mut self.values
    }
}

/// Rows compare by value; the backing record is a layout detail.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}
