pub mod primitive;
pub mod config;
pub mod error;
pub mod names;
pub mod text;

pub use config::CodecConfig;
pub use error::{BrickError, ErrorKind, Result};
pub use names::FieldNames;
