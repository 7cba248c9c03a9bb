//! # Parameter Codec Tests: entries, payload variants, lookups
//!
//! Validates the count-prefixed entry stream, every payload variant, the
//! unpadded output, and strict name lookup.

use brickwork::{Color4, ErrorKind, ParamType, ParamValue, ParameterEntry, ParameterSet, Vector3};
use std::time::Instant;

/// Verifies the `hp` Short scenario decodes to 100 and re-encodes exactly.
#[test]
fn test_short_entry_scenario() {
    let t = Instant::now();

    let entry_bytes = [
        0x00, 0x01, // hash
        0x00, 0x02, // name length
        b'h', b'p', //
        0x00, 0x00, 0x00, 0x02, // type size
        0x00, 0x64, // payload
    ];
    let mut source = vec![0x00, 0x00, 0x00, 0x01];
    source.extend_from_slice(&entry_bytes);

    let set = ParameterSet::decode(&source).unwrap();
    assert_eq!(set.len(), 1);
    let entry = set.get_entry("hp").unwrap();
    assert_eq!(entry.hash, 1);
    assert_eq!(entry.name_length(), 2);
    assert_eq!(entry.param_type(), ParamType::Short);
    assert_eq!(entry.value, ParamValue::Short(100));

    let encoded = set.encode().unwrap();
    assert_eq!(encoded.as_ref(), source.as_slice());
    assert_eq!(&encoded[4..], &entry_bytes);

    let overhead = t.elapsed();
    println!("test_short_entry_scenario: Testing Overhead = {:?}", overhead);
}

/// Verifies every payload variant survives a round trip and no padding
/// is appended.
#[test]
fn test_all_variants_roundtrip_unpadded() {
    let t = Instant::now();

    let set: ParameterSet = [
        ParameterEntry::new(1, "flag", ParamValue::byte(0x7F)).unwrap(),
        ParameterEntry::new(2, "hp", ParamValue::Short(100)).unwrap(),
        ParameterEntry::new(3, "speed", ParamValue::number_from_f32(2.5)).unwrap(),
        ParameterEntry::new(
            4,
            "offset",
            ParamValue::Vector(Vector3 { x: 1.0, y: -2.0, z: 0.5 }),
        )
        .unwrap(),
        ParameterEntry::new(
            5,
            "tint",
            ParamValue::Color(Color4 { r: 255, g: 128, b: 0, a: 200 }),
        )
        .unwrap(),
    ]
    .into_iter()
    .collect();

    let encoded = set.encode().unwrap();
    let expected_len = 4 + set.iter().map(ParameterEntry::encoded_len).sum::<usize>();
    assert_eq!(encoded.len(), expected_len);
    // count, then hash + name length + name + tag + payload per entry
    assert_eq!(encoded.len(), 4 + 13 + 12 + 17 + 26 + 28);
    assert_ne!(encoded.len() % 32, 0);

    let decoded = ParameterSet::decode(&encoded).unwrap();
    assert_eq!(decoded, set);
    assert_eq!(decoded.get_entry("speed").unwrap().value.as_f32(), Some(2.5));
    assert_eq!(decoded.get_entry("flag").unwrap().value.as_u8(), Some(0x7F));
    assert_eq!(
        decoded.get_entry("tint").unwrap().value.as_color(),
        Some(Color4 { r: 255, g: 128, b: 0, a: 200 })
    );

    let overhead = t.elapsed();
    println!("test_all_variants_roundtrip_unpadded: Testing Overhead = {:?}", overhead);
}

/// Verifies a four-byte payload can be read as integer or float.
#[test]
fn test_number_interpretations() {
    let t = Instant::now();

    let value = ParamValue::number_from_u32(0x3F80_0000);
    assert_eq!(value.as_u32(), Some(0x3F80_0000));
    assert_eq!(value.as_f32(), Some(1.0));
    assert_eq!(value.as_i32(), Some(0x3F80_0000));
    assert_eq!(ParamValue::number_from_i32(-1).as_u32(), Some(u32::MAX));
    assert_eq!(value.as_u16(), None);
    assert_eq!(ParamValue::Short(3).as_u32(), None);

    let overhead = t.elapsed();
    println!("test_number_interpretations: Testing Overhead = {:?}", overhead);
}

/// Verifies type size 5 is rejected.
#[test]
fn test_reject_unknown_parameter_type() {
    let t = Instant::now();

    let mut source = vec![0, 0, 0, 1, 0, 9, 0, 1, b'x'];
    source.extend_from_slice(&5u32.to_be_bytes());
    source.extend_from_slice(&[1, 2, 3, 4, 5]);

    let err = ParameterSet::decode(&source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownParameterType);

    let overhead = t.elapsed();
    println!("test_reject_unknown_parameter_type: Testing Overhead = {:?}", overhead);
}

/// Verifies a payload cut short fails as truncated rather than defaulting.
#[test]
fn test_reject_truncated_payload() {
    let t = Instant::now();

    let mut source = vec![0, 0, 0, 1, 0, 9, 0, 1, b'v'];
    source.extend_from_slice(&12u32.to_be_bytes());
    source.extend_from_slice(&1.0f32.to_be_bytes());

    assert_eq!(ParameterSet::decode(&source).unwrap_err().kind(), ErrorKind::TruncatedBuffer);

    // More entries declared than present.
    let source = [0, 0, 0, 2, 0, 1, 0, 0, 0, 0, 0, 1, 0xAA];
    assert_eq!(ParameterSet::decode(&source).unwrap_err().kind(), ErrorKind::TruncatedBuffer);

    let overhead = t.elapsed();
    println!("test_reject_truncated_payload: Testing Overhead = {:?}", overhead);
}

/// Verifies `get_entry` fails on a missing name while `find_entry` does not.
#[test]
fn test_get_entry_is_strict() {
    let t = Instant::now();

    let mut set = ParameterSet::new();
    set.push(ParameterEntry::new(7, "gravity", ParamValue::number_from_f32(9.8)).unwrap());

    assert_eq!(set.get_entry("friction").unwrap_err().kind(), ErrorKind::EntryNotFound);
    assert!(set.find_entry("friction").is_none());
    assert_eq!(set.find_by_hash(7).map(ParameterEntry::name), Some("gravity"));

    set.get_entry_mut("gravity").unwrap().value = ParamValue::number_from_f32(1.6);
    assert_eq!(set.get_entry("gravity").unwrap().value.as_f32(), Some(1.6));

    let removed = set.remove("gravity").unwrap();
    assert_eq!(removed.hash, 7);
    assert!(set.is_empty());
    assert_eq!(set.remove("gravity").unwrap_err().kind(), ErrorKind::EntryNotFound);

    let overhead = t.elapsed();
    println!("test_get_entry_is_strict: Testing Overhead = {:?}", overhead);
}

/// Verifies a NUL-padded name keeps its declared width through a round trip.
#[test]
fn test_padded_name_keeps_declared_length() {
    let t = Instant::now();

    let mut source = vec![0, 0, 0, 1, 0, 3, 0, 4, b'h', b'p', 0, 0];
    source.extend_from_slice(&1u32.to_be_bytes());
    source.push(0x05);

    let set = ParameterSet::decode(&source).unwrap();
    let entry = set.get_entry("hp").unwrap();
    assert_eq!(entry.name_length(), 4);
    assert_eq!(set.encode().unwrap().as_ref(), source.as_slice());

    let overhead = t.elapsed();
    println!("test_padded_name_keeps_declared_length: Testing Overhead = {:?}", overhead);
}

/// Verifies renaming recomputes the encoded name length.
#[test]
fn test_set_name_updates_length() {
    let t = Instant::now();

    let mut entry = ParameterEntry::new(1, "hp", ParamValue::Short(1)).unwrap();
    assert_eq!(entry.name_length(), 2);
    entry.set_name("max_hp").unwrap();
    assert_eq!(entry.name_length(), 6);
    assert_eq!(entry.encoded_len(), 2 + 2 + 6 + 4 + 2);

    let entry = ParameterEntry::new(2, "キノピオ", ParamValue::byte(1)).unwrap();
    assert_eq!(entry.name_length(), 8);

    let set: ParameterSet = [entry].into_iter().collect();
    let decoded = ParameterSet::decode(&set.encode().unwrap()).unwrap();
    assert_eq!(decoded.get_entry("キノピオ").unwrap().hash, 2);

    let overhead = t.elapsed();
    println!("test_set_name_updates_length: Testing Overhead = {:?}", overhead);
}
