//! Fixed-width text as stored by both asset formats.
//!
//! Text is Shift-JIS on disk. Fields are a fixed number of bytes; the
//! logical string ends at the first NUL and anything after it is ignored.

use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

use crate::error::{BrickError, Result};

/// Returns `raw` up to (not including) the first NUL byte.
#[inline]
pub fn trim_at_nul(raw: &[u8]) -> &[u8] {
    match raw.iter().position(|&b| b == 0) {
        Some(end) => &raw[..end],
        None => raw,
    }
}

/// Decodes Shift-JIS bytes. `offset` is only used for error reporting.
pub fn decode(raw: &[u8], offset: usize) -> Result<String> {
    SHIFT_JIS
        .decode_without_bom_handling_and_without_replacement(raw)
        .map(Cow::into_owned)
        .ok_or(BrickError::MalformedText { offset })
}

/// Encodes `text` as Shift-JIS. Characters without a mapping are an error
/// rather than being replaced with numeric character references.
pub fn encode(text: &str) -> Result<Cow<'_, [u8]>> {
    let (bytes, _, had_errors) = SHIFT_JIS.encode(text);
    if had_errors {
        return Err(BrickError::UnencodableText(text.to_string()));
    }
    Ok(bytes)
}

/// Number of bytes `text` occupies once encoded.
pub fn encoded_len(text: &str) -> Result<usize> {
    encode(text).map(|bytes| bytes.len())
}
