use thiserror::Error;

/// Every failure the codecs can report. All of them abort the operation in
/// progress; there is no partial load.
#[derive(Debug, Error)]
pub enum BrickError {
    #[error("truncated buffer: {needed} bytes needed at offset {offset}, {available} available")]
    TruncatedBuffer {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("header block size {declared} does not fit {field_count} fields in a {buffer_len} byte buffer")]
    HeaderSizeMismatch {
        declared: u32,
        field_count: i32,
        buffer_len: usize,
    },

    #[error("{row_count} records of {record_stride} bytes after a {header_block_size} byte header overflow a {buffer_len} byte buffer")]
    EntrySizeOverflow {
        row_count: i32,
        record_stride: u32,
        header_block_size: u32,
        buffer_len: usize,
    },

    #[error("field descriptor {index} has unknown type tag {tag}")]
    UnknownFieldType { index: usize, tag: u8 },

    #[error("parameter at offset {offset} has unknown type size {tag}")]
    UnknownParameterType { offset: usize, tag: u32 },

    #[error("value of {len} bytes does not fit a {width} byte field")]
    ValueTooLong { len: usize, width: usize },

    #[error("count {count} exceeds the format limit of {max}")]
    CountOverflow { count: usize, max: usize },

    #[error("text at offset {offset} is not valid Shift-JIS")]
    MalformedText { offset: usize },

    #[error("text {0:?} has no Shift-JIS encoding")]
    UnencodableText(String),

    #[error("field {hash:#010x} holds {expected} values, got {found}")]
    ValueTypeMismatch {
        hash: u32,
        expected: &'static str,
        found: &'static str,
    },

    #[error("row {row} has {found} values for {expected} fields")]
    RowShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {index} out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("no field with hash {0:#010x}")]
    FieldNotFound(u32),

    #[error("no parameter entry named {0:?}")]
    EntryNotFound(String),

    #[error("decoder already failed with {0:?}")]
    Aborted(ErrorKind),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Field-less discriminant of [`BrickError`], cheap to copy into decoder
/// state and to compare in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TruncatedBuffer,
    HeaderSizeMismatch,
    EntrySizeOverflow,
    UnknownFieldType,
    UnknownParameterType,
    ValueTooLong,
    CountOverflow,
    MalformedText,
    UnencodableText,
    ValueTypeMismatch,
    RowShapeMismatch,
    RowOutOfRange,
    FieldNotFound,
    EntryNotFound,
    Aborted,
    Config,
    Io,
}

impl BrickError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BrickError::TruncatedBuffer { .. } => ErrorKind::TruncatedBuffer,
            BrickError::HeaderSizeMismatch { .. } => ErrorKind::HeaderSizeMismatch,
            BrickError::EntrySizeOverflow { .. } => ErrorKind::EntrySizeOverflow,
            BrickError::UnknownFieldType { .. } => ErrorKind::UnknownFieldType,
            BrickError::UnknownParameterType { .. } => ErrorKind::UnknownParameterType,
            BrickError::ValueTooLong { .. } => ErrorKind::ValueTooLong,
            BrickError::CountOverflow { .. } => ErrorKind::CountOverflow,
            BrickError::MalformedText { .. } => ErrorKind::MalformedText,
            BrickError::UnencodableText(_) => ErrorKind::UnencodableText,
            BrickError::ValueTypeMismatch { .. } => ErrorKind::ValueTypeMismatch,
            BrickError::RowShapeMismatch { .. } => ErrorKind::RowShapeMismatch,
            BrickError::RowOutOfRange { .. } => ErrorKind::RowOutOfRange,
            BrickError::FieldNotFound(_) => ErrorKind::FieldNotFound,
            BrickError::EntryNotFound(_) => ErrorKind::EntryNotFound,
            BrickError::Aborted(_) => ErrorKind::Aborted,
            BrickError::Config(_) => ErrorKind::Config,
            BrickError::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<toml::de::Error> for BrickError {
    fn from(e: toml::de::Error) -> Self {
        BrickError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BrickError>;
