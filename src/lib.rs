//! Codecs for the table (`.jmp`-style) and parameter (`.prm`-style) asset
//! formats.
//!
//! Both formats are big-endian and re-encode byte for byte after edits. The
//! building blocks live in the member crates; this crate re-exports them.

pub use brickwork_core::{primitive, text};
pub use brickwork_core::{BrickError, CodecConfig, ErrorKind, FieldNames, Result};
pub use brickwork_param::{Color4, ParamType, ParamValue, ParameterEntry, ParameterSet, Vector3};
pub use brickwork_table::{
    DecodeState, FieldDescriptor, FieldType, FieldValue, Preamble, Row, Table, TableDecoder,
};
