//! Parameter format: a `u32` count, then entries of
//! `hash:u16, name_length:u16, name, type_size:u32, payload`.

pub mod entry;
pub mod set;

pub use entry::{Color4, ParamType, ParamValue, ParameterEntry, Vector3};
pub use set::ParameterSet;
