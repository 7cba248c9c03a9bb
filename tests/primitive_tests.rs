//! # Primitive Codec Tests: big-endian scalars and fixed-width text
//!
//! Validates bounds-checked reads, growing writes, NUL trimming, and the
//! Shift-JIS text codec shared by both formats.

use brickwork::{primitive, text, ErrorKind};
use bytes::BytesMut;
use std::time::Instant;

/// Verifies big-endian reads and the truncation error.
#[test]
fn test_reads_are_big_endian_and_bounded() {
    let t = Instant::now();

    let buf = [0x12, 0x34, 0x56, 0x78, 0xFF, 0xFF, 0xFF, 0xFE, 0x3F, 0x80, 0x00, 0x00];
    assert_eq!(primitive::read_u8(&buf, 0).unwrap(), 0x12);
    assert_eq!(primitive::read_u16(&buf, 1).unwrap(), 0x3456);
    assert_eq!(primitive::read_u32(&buf, 0).unwrap(), 0x1234_5678);
    assert_eq!(primitive::read_s32(&buf, 4).unwrap(), -2);
    assert_eq!(primitive::read_f32(&buf, 8).unwrap(), 1.0);

    assert_eq!(primitive::read_u32(&buf, 9).unwrap_err().kind(), ErrorKind::TruncatedBuffer);
    assert_eq!(primitive::read_u8(&buf, 12).unwrap_err().kind(), ErrorKind::TruncatedBuffer);
    assert_eq!(primitive::read_u16(&buf, usize::MAX).unwrap_err().kind(), ErrorKind::TruncatedBuffer);

    let overhead = t.elapsed();
    println!("test_reads_are_big_endian_and_bounded: Testing Overhead = {:?}", overhead);
}

/// Verifies writes grow the buffer with zeroes and never touch other offsets.
#[test]
fn test_writes_grow_without_clobbering() {
    let t = Instant::now();

    let mut buf = BytesMut::from(&[0xAA, 0xBB][..]);
    primitive::write_u16(&mut buf, 6, 0x0102);
    assert_eq!(buf.as_ref(), &[0xAA, 0xBB, 0, 0, 0, 0, 0x01, 0x02]);

    primitive::write_s32(&mut buf, 2, -1);
    assert_eq!(buf.as_ref(), &[0xAA, 0xBB, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x02]);

    primitive::write_f32(&mut buf, 0, 1.0);
    primitive::write_u8(&mut buf, 7, 0x09);
    assert_eq!(buf.as_ref(), &[0x3F, 0x80, 0x00, 0x00, 0xFF, 0xFF, 0x01, 0x09]);

    primitive::write_u32(&mut buf, 8, 0xDEAD_BEEF);
    assert_eq!(buf.len(), 12);
    assert_eq!(primitive::read_u32(&buf, 8).unwrap(), 0xDEAD_BEEF);

    let overhead = t.elapsed();
    println!("test_writes_grow_without_clobbering: Testing Overhead = {:?}", overhead);
}

/// Verifies fixed text stops at the first NUL and ignores what follows.
#[test]
fn test_fixed_text_trims_at_nul() {
    let t = Instant::now();

    let buf = b"..name\0garbage";
    assert_eq!(primitive::read_fixed_text(buf, 2, 12).unwrap(), "name");
    assert_eq!(primitive::read_fixed_text(buf, 2, 4).unwrap(), "name");
    assert_eq!(primitive::read_fixed_text(buf, 6, 1).unwrap(), "");
    assert_eq!(primitive::read_fixed_text(buf, 2, 13).unwrap_err().kind(), ErrorKind::TruncatedBuffer);

    let overhead = t.elapsed();
    println!("test_fixed_text_trims_at_nul: Testing Overhead = {:?}", overhead);
}

/// Verifies fixed text writes pad to width and reject oversized text.
#[test]
fn test_write_fixed_text_pads_and_rejects() {
    let t = Instant::now();

    let mut buf = BytesMut::new();
    primitive::write_fixed_text(&mut buf, 0, "ab", 5, 0).unwrap();
    primitive::write_fixed_text(&mut buf, 5, "cd", 3, b'@').unwrap();
    assert_eq!(buf.as_ref(), b"ab\0\0\0cd@");

    let err = primitive::write_fixed_text(&mut buf, 0, "toolong", 4, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueTooLong);
    assert_eq!(buf.as_ref(), b"ab\0\0\0cd@", "Failed write must not touch the buffer");

    let overhead = t.elapsed();
    println!("test_write_fixed_text_pads_and_rejects: Testing Overhead = {:?}", overhead);
}

/// Verifies alignment padding appends exactly the missing bytes.
#[test]
fn test_pad_to_alignment() {
    let t = Instant::now();

    let mut buf = BytesMut::from(&[1u8; 33][..]);
    assert_eq!(primitive::pad_to_alignment(&mut buf, 32, b'@'), 31);
    assert_eq!(buf.len(), 64);
    assert!(buf[33..].iter().all(|&b| b == b'@'));
    assert_eq!(primitive::pad_to_alignment(&mut buf, 32, b'@'), 0);
    assert_eq!(primitive::pad_to_alignment(&mut buf, 0, b'@'), 0);

    let overhead = t.elapsed();
    println!("test_pad_to_alignment: Testing Overhead = {:?}", overhead);
}

/// Verifies Shift-JIS text round-trips and bad input is an error.
#[test]
fn test_shift_jis_text() {
    let t = Instant::now();

    let encoded = text::encode("キノピオ").unwrap();
    assert_eq!(encoded.as_ref(), &[0x83, 0x4C, 0x83, 0x6D, 0x83, 0x73, 0x83, 0x49]);
    assert_eq!(text::decode(&encoded, 0).unwrap(), "キノピオ");
    assert_eq!(text::encoded_len("abc").unwrap(), 3);

    assert_eq!(text::decode(&[0x41, 0x81], 16).unwrap_err().kind(), ErrorKind::MalformedText);
    assert_eq!(text::encode("🍄").unwrap_err().kind(), ErrorKind::UnencodableText);

    let overhead = t.elapsed();
    println!("test_shift_jis_text: Testing Overhead = {:?}", overhead);
}

/// Verifies counts too large for a header word fail with `CountOverflow`.
#[test]
fn test_count_conversion_overflow() {
    let t = Instant::now();

    assert_eq!(primitive::count_as_s32(3).unwrap(), 3);
    assert_eq!(primitive::count_as_u32(3).unwrap(), 3);
    let err = primitive::count_as_s32(i32::MAX as usize + 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CountOverflow);

    #[cfg(target_pointer_width = "64")]
    {
        let err = primitive::count_as_u32(u32::MAX as usize + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CountOverflow);
    }

    let overhead = t.elapsed();
    println!("test_count_conversion_overflow: Testing Overhead = {:?}", overhead);
}
