use brickwork_core::primitive;
use brickwork_core::{BrickError, ErrorKind, Result};
use bytes::{Bytes, BytesMut};

use crate::field::{record_reach, FieldDescriptor, FieldType, FIELD_DESCRIPTOR_SIZE, PREAMBLE_SIZE, TEXT_WIDTH};
use crate::row::{FieldValue, Row};
use crate::table::Table;

/// Progress of a [`TableDecoder`]. A failed step parks the decoder in
/// `Failed` and every later step is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    Start,
    PreambleRead,
    HeaderValidated,
    FieldsLoaded,
    RowsLoaded,
    Ready,
    Failed(ErrorKind),
}

/// The first 16 bytes of a table buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preamble {
    pub row_count: i32,
    pub field_count: i32,
    pub header_block_size: u32,
    pub record_stride: u32,
}

impl Preamble {
    pub fn read(buf: &[u8]) -> Result<Self> {
        Ok(Self {
            row_count: primitive::read_s32(buf, 0)?,
            field_count: primitive::read_s32(buf, 4)?,
            header_block_size: primitive::read_u32(buf, 8)?,
            record_stride: primitive::read_u32(buf, 12)?,
        })
    }

    pub fn write(&self, out: &mut BytesMut) {
        primitive::write_s32(out, 0, self.row_count);
        primitive::write_s32(out, 4, self.field_count);
        primitive::write_u32(out, 8, self.header_block_size);
        primitive::write_u32(out, 12, self.record_stride);
    }
}

/// Step-wise table loader.
///
/// `Start → PreambleRead → HeaderValidated → FieldsLoaded → RowsLoaded →
/// Ready`. [`Table::decode`] simply runs this to completion; driving it by
/// hand is useful to inspect how far a damaged buffer gets.
#[derive(Debug)]
pub struct TableDecoder {
    source: Bytes,
    state: DecodeState,
    preamble: Preamble,
    fields: Vec<FieldDescriptor>,
    rows: Vec<Row>,
}

impl TableDecoder {
    pub fn new(source: impl Into<Bytes>) -> Self {
        Self {
            source: source.into(),
            state: DecodeState::Start,
            preamble: Preamble::default(),
            fields: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Preamble as read from the buffer; all zero before `PreambleRead`.
    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    /// Runs the next stage.
    pub fn step(&mut self) -> Result<DecodeState> {
        let next = match self.state {
            DecodeState::Start => self.read_preamble(),
            DecodeState::PreambleRead => self.validate_header(),
            DecodeState::HeaderValidated => self.load_fields(),
            DecodeState::FieldsLoaded => self.load_rows(),
            DecodeState::RowsLoaded => Ok(DecodeState::Ready),
            DecodeState::Ready | DecodeState::Failed(_) => return Ok(self.state),
        };

        match next {
            Ok(state) => {
                tracing::trace!("TableDecoder: {:?} -> {:?}", self.state, state);
                self.state = state;
                Ok(state)
            }
            Err(e) => {
                tracing::debug!("TableDecoder: failed in {:?}: {}", self.state, e);
                self.state = DecodeState::Failed(e.kind());
                Err(e)
            }
        }
    }

    /// Steps until `Ready` and hands over the decoded table.
    pub fn finish(mut self) -> Result<Table> {
        loop {
            match self.step()? {
                DecodeState::Ready => break,
                DecodeState::Failed(kind) => return Err(BrickError::Aborted(kind)),
                _ => {}
            }
        }
        tracing::debug!(
            "TableDecoder: {} fields, {} rows, stride {}",
            self.fields.len(),
            self.rows.len(),
            self.preamble.record_stride
        );
        Ok(Table::from_parts(self.fields, self.rows, self.preamble.record_stride))
    }

    fn read_preamble(&mut self) -> Result<DecodeState> {
        self.preamble = Preamble::read(&self.source)?;
        Ok(DecodeState::PreambleRead)
    }

    fn validate_header(&mut self) -> Result<DecodeState> {
        let p = self.preamble;
        let mismatch = || BrickError::HeaderSizeMismatch {
            declared: p.header_block_size,
            field_count: p.field_count,
            buffer_len: self.source.len(),
        };

        let declared = p.header_block_size as usize;
        if declared > self.source.len() || declared < PREAMBLE_SIZE {
            return Err(mismatch());
        }
        let block = declared - PREAMBLE_SIZE;
        if block % FIELD_DESCRIPTOR_SIZE != 0 {
            return Err(mismatch());
        }
        if i64::from(p.field_count) != (block / FIELD_DESCRIPTOR_SIZE) as i64 {
            return Err(mismatch());
        }
        Ok(DecodeState::HeaderValidated)
    }

    fn load_fields(&mut self) -> Result<DecodeState> {
        let count = self.preamble.field_count as usize;
        let stride = self.preamble.record_stride as usize;
        let mut fields = Vec::with_capacity(count);

        for index in 0..count {
            let offset = PREAMBLE_SIZE + index * FIELD_DESCRIPTOR_SIZE;
            let field = FieldDescriptor::read(&self.source, offset, index)?;
            if field.span().end > stride {
                tracing::warn!(
                    "TableDecoder: field {} ({:?}) ends at byte {}, past the {} byte record",
                    field.hash,
                    field.field_type,
                    field.span().end,
                    stride
                );
            }
            fields.push(field);
        }

        self.fields = fields;
        Ok(DecodeState::FieldsLoaded)
    }

    fn load_rows(&mut self) -> Result<DecodeState> {
        let p = self.preamble;
        let overflow = || BrickError::EntrySizeOverflow {
            row_count: p.row_count,
            record_stride: p.record_stride,
            header_block_size: p.header_block_size,
            buffer_len: self.source.len(),
        };

        let row_count = u64::try_from(p.row_count).map_err(|_| overflow())?;
        let required = u64::from(p.header_block_size) + u64::from(p.record_stride) * row_count;
        if required > self.source.len() as u64 {
            return Err(overflow());
        }

        let header = p.header_block_size as usize;
        let stride = p.record_stride as usize;
        let reach = record_reach(&self.fields, stride);
        let mut rows = Vec::with_capacity((row_count as usize).min(self.source.len()));

        for index in 0..row_count as usize {
            let base = header + index * stride;
            let mut values = Vec::with_capacity(self.fields.len());
            for field in &self.fields {
                values.push(decode_value(&self.source, base + field.start_offset as usize, field)?);
            }
            // Every value above decoded, so the source covers each field's span.
            let end = (base + reach).min(self.source.len());
            rows.push(Row::with_record(values, self.source.slice(base..end)));
        }

        let end = required as usize;
        if end < self.source.len() {
            tracing::trace!("TableDecoder: {} trailing bytes after row data", self.source.len() - end);
        }

        self.rows = rows;
        Ok(DecodeState::RowsLoaded)
    }
}

fn decode_value(buf: &[u8], offset: usize, field: &FieldDescriptor) -> Result<FieldValue> {
    Ok(match field.field_type {
        FieldType::Int => FieldValue::Int(field.extract(primitive::read_u32(buf, offset)?)),
        FieldType::Str => FieldValue::Str(primitive::read_fixed_text(buf, offset, TEXT_WIDTH)?),
        FieldType::Flt => FieldValue::Flt(primitive::read_f32(buf, offset)?),
    })
}
