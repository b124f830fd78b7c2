// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encode/decode round trips across every field type, default omission and
//! envelope framing.

#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]

use safeparcel::payload::{License, Status};
use safeparcel::{
    decode, decode_from, decode_with, encode, encode_into, encode_tagged, DecodeContext,
    DecodeOptions, EnvelopeEntries, FieldType, ParcelError, ParcelField, ParcelReader,
    ParcelResult, ParcelWriter, RawEntry, SafeParcelable,
};

#[derive(Debug, Clone, Default, PartialEq, SafeParcelable)]
#[safeparcel(token = "test.AllTypes")]
struct AllTypes {
    #[safeparcel(id = 1)]
    flag: bool,
    #[safeparcel(id = 2)]
    byte: u8,
    #[safeparcel(id = 3)]
    int32: i32,
    #[safeparcel(id = 4)]
    int64: i64,
    #[safeparcel(id = 5)]
    float32: f32,
    #[safeparcel(id = 6)]
    float64: f64,
    #[safeparcel(id = 7)]
    text: String,
    #[safeparcel(id = 8)]
    blob: Vec<u8>,
    #[safeparcel(id = 9)]
    numbers: Vec<i32>,
    #[safeparcel(id = 10)]
    words: Vec<String>,
    #[safeparcel(id = 11)]
    maybe_text: Option<String>,
    #[safeparcel(id = 12)]
    status: Status,
    #[safeparcel(id = 13)]
    licenses: Vec<License>,
    #[safeparcel(id = 14)]
    maybe_status: Option<Status>,
    #[safeparcel(id = 15)]
    sparse: Vec<Option<i64>>,
}

fn populated() -> AllTypes {
    AllTypes {
        flag: true,
        byte: 0xA5,
        int32: -123_456,
        int64: i64::MIN + 7,
        float32: 1.5,
        float64: -2.25,
        text: "héllo wörld".to_string(),
        blob: vec![0, 1, 2, 0xFF],
        numbers: vec![1, -1, i32::MAX],
        words: vec!["alpha".into(), String::new(), "gamma".into()],
        maybe_text: Some(String::new()),
        status: Status::new(8, "interrupted"),
        licenses: vec![
            License::new("serde", 0, 1024, "third_party_licenses"),
            License::new("log", 1024, 96, "third_party_licenses"),
        ],
        maybe_status: Some(Status::new(0, "")),
        sparse: vec![Some(1), None, Some(-1)],
    }
}

fn entries(bytes: &[u8]) -> Vec<RawEntry<'_>> {
    EnvelopeEntries::parse(bytes)
        .expect("envelope header")
        .collect::<ParcelResult<Vec<_>>>()
        .expect("entries")
}

#[test]
fn test_all_types_roundtrip() {
    let value = populated();
    let bytes = encode(&value).expect("encode should succeed");
    let decoded: AllTypes = decode(&bytes).expect("decode should succeed");
    assert_eq!(decoded, value);

    let strict: AllTypes =
        decode_with(&bytes, &DecodeOptions::strict()).expect("strict decode should succeed");
    assert_eq!(strict, value);
}

#[test]
fn test_header_matches_buffer_length() {
    let bytes = encode(&populated()).expect("encode should succeed");
    let declared = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    assert_eq!(declared, bytes.len());
}

#[test]
fn test_entries_in_ascending_id_order() {
    let bytes = encode(&populated()).expect("encode should succeed");
    let ids: Vec<u32> = entries(&bytes).iter().map(|e| e.id).collect();
    assert_eq!(ids, (1..=15).collect::<Vec<u32>>());
}

#[test]
fn test_default_value_is_header_only() {
    let bytes = encode(&AllTypes::default()).expect("encode should succeed");
    assert_eq!(bytes, vec![4, 0, 0, 0]);
    assert_eq!(decode::<AllTypes>(&bytes).expect("decode"), AllTypes::default());
}

#[test]
fn test_some_empty_string_is_not_none() {
    // Some("") writes a 4-byte length prefix, so it survives the trip.
    let value = AllTypes {
        maybe_text: Some(String::new()),
        ..AllTypes::default()
    };
    let bytes = encode(&value).expect("encode should succeed");
    let written = entries(&bytes);
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].id, 11);
    assert_eq!(decode::<AllTypes>(&bytes).expect("decode").maybe_text, Some(String::new()));
}

#[derive(Debug, Clone, PartialEq, SafeParcelable)]
#[safeparcel(token = "test.Retry")]
struct Retry {
    #[safeparcel(id = 1)]
    attempts: i32,
    #[safeparcel(id = 2)]
    label: String,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            attempts: 3,
            label: "default".to_string(),
        }
    }
}

#[test]
fn test_omission_compares_against_declared_default() {
    let bytes = encode(&Retry::default()).expect("encode should succeed");
    assert_eq!(bytes, vec![4, 0, 0, 0]);

    // Zero differs from the declared default of 3 and must be written.
    let zero = Retry {
        attempts: 0,
        label: "default".to_string(),
    };
    let bytes = encode(&zero).expect("encode should succeed");
    assert_eq!(bytes, vec![16, 0, 0, 0, 1, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(decode::<Retry>(&bytes).expect("decode"), zero);

    // An absent field decodes to the declared default, not zero.
    assert_eq!(decode::<Retry>(&[4, 0, 0, 0]).expect("decode"), Retry::default());
}

#[test]
fn test_tagged_roundtrip() {
    let status = Status::new(7, "network error");
    let tagged = encode_tagged(&status).expect("encode should succeed");
    let untagged = encode(&status).expect("encode should succeed");
    assert_eq!(tagged.len(), untagged.len() + 8 + 4 + Status::TYPE_TOKEN.len());

    let written = entries(&tagged);
    assert_eq!(written[0].id, 0);
    assert_eq!(written[0].payload().read_string().expect("token"), Status::TYPE_TOKEN);

    assert_eq!(decode::<Status>(&tagged).expect("lenient"), status);
    assert_eq!(
        decode_with::<Status>(&tagged, &DecodeOptions::strict()).expect("strict"),
        status
    );
}

#[test]
fn test_consecutive_envelopes_in_one_buffer() {
    let mut writer = ParcelWriter::new();
    let first = encode_into(&Status::new(1, "a"), &mut writer).expect("encode first");
    let second = encode_into(&License::new("x", 1, 2, "y"), &mut writer).expect("encode second");
    let bytes = writer.into_inner();
    assert_eq!(bytes.len(), first + second);

    let options = DecodeOptions::default();
    let mut reader = ParcelReader::new(&bytes);
    let status: Status = decode_from(&mut reader, DecodeContext::new(&options)).expect("first");
    let license: License = decode_from(&mut reader, DecodeContext::new(&options)).expect("second");
    assert!(reader.is_empty());
    assert_eq!(status, Status::new(1, "a"));
    assert_eq!(license, License::new("x", 1, 2, "y"));
}

#[test]
fn test_trailing_bytes_ignored() {
    let mut bytes = encode(&Status::new(3, "pad")).expect("encode should succeed");
    bytes.extend_from_slice(&[0xEE; 5]);
    assert_eq!(decode::<Status>(&bytes).expect("decode"), Status::new(3, "pad"));
}

#[test]
fn test_float_bit_patterns_preserved() {
    let value = AllTypes {
        float32: -0.0,
        float64: f64::MAX,
        ..AllTypes::default()
    };
    let decoded: AllTypes = decode(&encode(&value).expect("encode")).expect("decode");
    assert_eq!(decoded.float32.to_bits(), (-0.0f32).to_bits());
    assert_eq!(decoded.float64, f64::MAX);
}

/// Sensor reading that refuses to encode negative values, after writing them.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Reading(i32);

impl ParcelField for Reading {
    fn field_type() -> FieldType {
        FieldType::Int32
    }

    fn write_field(&self, writer: &mut ParcelWriter) -> ParcelResult<()> {
        writer.write_i32(self.0);
        if self.0 < 0 {
            return Err(ParcelError::InvalidData {
                offset: writer.offset(),
                reason: "negative reading".into(),
            });
        }
        Ok(())
    }

    fn read_field(reader: &mut ParcelReader<'_>, _ctx: DecodeContext<'_>) -> ParcelResult<Self> {
        reader.read_i32().map(Reading)
    }
}

#[derive(Debug, Default, Clone, PartialEq, SafeParcelable)]
#[safeparcel(token = "test.Gauge")]
struct Gauge {
    #[safeparcel(id = 1)]
    name: String,
    #[safeparcel(id = 2)]
    reading: Reading,
}

#[derive(Debug, Default, Clone, PartialEq, SafeParcelable)]
#[safeparcel(token = "test.Panel")]
struct Panel {
    #[safeparcel(id = 1)]
    label: String,
    #[safeparcel(id = 2)]
    gauges: Vec<Gauge>,
}

#[test]
fn test_failed_encode_into_leaves_writer_untouched() {
    let mut writer = ParcelWriter::new();
    let first = encode_into(&Status::new(1, "ok"), &mut writer).expect("encode first");
    let before = writer.as_bytes().to_vec();
    assert_eq!(before.len(), first);

    let panel = Panel {
        label: "boiler".into(),
        gauges: vec![
            Gauge {
                name: "inlet".into(),
                reading: Reading(40),
            },
            Gauge {
                name: "outlet".into(),
                reading: Reading(-3),
            },
        ],
    };
    let err = encode_into(&panel, &mut writer).unwrap_err();
    assert!(matches!(err, ParcelError::InvalidData { .. }), "{:?}", err);
    assert_eq!(writer.as_bytes(), &before[..]);

    // The writer is still usable for the next envelope.
    let second = encode_into(&Status::new(2, "next"), &mut writer).expect("encode second");
    let bytes = writer.into_inner();
    assert_eq!(bytes.len(), first + second);
    let mut reader = ParcelReader::new(&bytes);
    let options = DecodeOptions::default();
    let _: Status = decode_from(&mut reader, DecodeContext::new(&options)).expect("first");
    let next: Status = decode_from(&mut reader, DecodeContext::new(&options)).expect("second");
    assert_eq!(next, Status::new(2, "next"));
}
