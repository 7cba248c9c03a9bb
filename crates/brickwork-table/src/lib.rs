//! Table format: a 16-byte preamble, a block of 12-byte field descriptors,
//! then fixed-stride records, padded with `@` to a 32-byte boundary.

pub mod decoder;
pub mod field;
pub mod row;
pub mod table;

pub use decoder::{DecodeState, Preamble, TableDecoder};
pub use field::{FieldDescriptor, FieldType, FIELD_DESCRIPTOR_SIZE, PREAMBLE_SIZE, TEXT_WIDTH};
pub use row::{FieldValue, Row};
pub use table::Table;
