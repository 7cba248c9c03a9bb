//! Big-endian primitive reads and writes at absolute offsets.
//!
//! Reads borrow the source slice and fail with `TruncatedBuffer` instead of
//! panicking. Writes target a growable `BytesMut` and zero-extend it when the
//! offset lies past the current end; bytes at other offsets are never touched.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{BrickError, Result};
use crate::text;

/// Bounds-checked view of `width` bytes at `offset`.
#[inline]
fn window(buf: &[u8], offset: usize, width: usize) -> Result<&[u8]> {
    offset
        .checked_add(width)
        .and_then(|end| buf.get(offset..end))
        .ok_or(BrickError::TruncatedBuffer {
            offset,
            needed: width,
            available: buf.len().saturating_sub(offset),
        })
}

#[inline]
pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8> {
    Ok(window(buf, offset, 1)?[0])
}

#[inline]
pub fn read_u16(buf: &[u8], offset: usize) -> Result<u16> {
    let mut w = window(buf, offset, 2)?;
    Ok(w.get_u16())
}

#[inline]
pub fn read_u32(buf: &[u8], offset: usize) -> Result<u32> {
    let mut w = window(buf, offset, 4)?;
    Ok(w.get_u32())
}

#[inline]
pub fn read_s32(buf: &[u8], offset: usize) -> Result<i32> {
    let mut w = window(buf, offset, 4)?;
    Ok(w.get_i32())
}

#[inline]
pub fn read_f32(buf: &[u8], offset: usize) -> Result<f32> {
    let mut w = window(buf, offset, 4)?;
    Ok(w.get_f32())
}

/// Reads exactly `byte_length` bytes and decodes them up to the first NUL.
pub fn read_fixed_text(buf: &[u8], offset: usize, byte_length: usize) -> Result<String> {
    let raw = window(buf, offset, byte_length)?;
    text::decode(text::trim_at_nul(raw), offset)
}

/// Mutable view of `width` bytes at `offset`, growing `buf` with zeroes first.
#[inline]
fn slot(buf: &mut BytesMut, offset: usize, width: usize) -> &mut [u8] {
    let end = offset + width;
    if buf.len() < end {
        buf.resize(end, 0);
    }
    &mut buf[offset..end]
}

#[inline]
pub fn write_u8(buf: &mut BytesMut, offset: usize, value: u8) {
    slot(buf, offset, 1)[0] = value;
}

#[inline]
pub fn write_u16(buf: &mut BytesMut, offset: usize, value: u16) {
    let mut dst = slot(buf, offset, 2);
    dst.put_u16(value);
}

#[inline]
pub fn write_u32(buf: &mut BytesMut, offset: usize, value: u32) {
    let mut dst = slot(buf, offset, 4);
    dst.put_u32(value);
}

#[inline]
pub fn write_s32(buf: &mut BytesMut, offset: usize, value: i32) {
    let mut dst = slot(buf, offset, 4);
    dst.put_i32(value);
}

#[inline]
pub fn write_f32(buf: &mut BytesMut, offset: usize, value: f32) {
    let mut dst = slot(buf, offset, 4);
    dst.put_f32(value);
}

/// Writes `text` into exactly `byte_length` bytes, filling the remainder
/// with `pad_byte`.
pub fn write_fixed_text(
    buf: &mut BytesMut,
    offset: usize,
    text: &str,
    byte_length: usize,
    pad_byte: u8,
) -> Result<()> {
    let encoded = text::encode(text)?;
    if encoded.len() > byte_length {
        return Err(BrickError::ValueTooLong {
            len: encoded.len(),
            width: byte_length,
        });
    }
    let dst = slot(buf, offset, byte_length);
    let (head, tail) = dst.split_at_mut(encoded.len());
    head.copy_from_slice(&encoded);
    tail.fill(pad_byte);
    Ok(())
}

/// Converts an in-memory count to the signed 32-bit form a header stores.
pub fn count_as_s32(count: usize) -> Result<i32> {
    i32::try_from(count).map_err(|_| BrickError::CountOverflow {
        count,
        max: i32::MAX as usize,
    })
}

pub fn count_as_u32(count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| BrickError::CountOverflow {
        count,
        max: u32::MAX as usize,
    })
}

/// Appends `pad_byte` until the length is a multiple of `alignment`.
/// Returns how many bytes were appended. Alignments below 2 never pad.
pub fn pad_to_alignment(buf: &mut BytesMut, alignment: usize, pad_byte: u8) -> usize {
    if alignment < 2 {
        return 0;
    }
    let rem = buf.len() % alignment;
    if rem == 0 {
        return 0;
    }
    let fill = alignment - rem;
    buf.put_bytes(pad_byte, fill);
    fill
}
