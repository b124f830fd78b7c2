// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! SafeParcel envelope encode/decode.
//!
//! # Wire Format
//!
//! ```text
//! +----------------------+
//! | u32 total_length     |  envelope size, this header included
//! +----------------------+
//! | u32 field_id         |  \
//! | u32 entry_length     |   } one entry per written field,
//! | payload[entry_length]|  /  ascending field id
//! +----------------------+
//! | ...                  |
//! +----------------------+
//! ```
//!
//! All integers are little-endian. Field id 0 is reserved for the type
//! token written by [`encode_tagged`].
//!
//! Decoding starts from `T::default()`, assigns every known field found in
//! the envelope and skips unknown ones, so older and newer peers can
//! exchange records. Non-required fields still holding their default value
//! are omitted on encode.

use crate::core::cursor::{ParcelReader, ParcelWriter};
use crate::core::envelope::EnvelopeEntries;
use crate::core::parcelable::{SafeParcelable, TYPE_TOKEN_FIELD_ID};
use crate::error::{ParcelError, ParcelResult};
use crate::options::{DecodeContext, DecodeOptions};

/// Encode `value` as a complete envelope.
pub fn encode<T: SafeParcelable>(value: &T) -> ParcelResult<Vec<u8>> {
    let mut writer = ParcelWriter::new();
    write_envelope(value, &mut writer, false)?;
    Ok(writer.into_inner())
}

/// Encode `value` with its type token in field 0, for decoders that
/// resolve the type from the bytes.
pub fn encode_tagged<T: SafeParcelable>(value: &T) -> ParcelResult<Vec<u8>> {
    let mut writer = ParcelWriter::new();
    write_envelope(value, &mut writer, true)?;
    Ok(writer.into_inner())
}

/// Append `value` as an envelope to `writer`, returning the envelope size.
///
/// On error `writer` is left as it was before the call.
pub fn encode_into<T: SafeParcelable>(value: &T, writer: &mut ParcelWriter) -> ParcelResult<usize> {
    write_envelope(value, writer, false)
}

fn write_envelope<T: SafeParcelable>(
    value: &T,
    writer: &mut ParcelWriter,
    tagged: bool,
) -> ParcelResult<usize> {
    let start = writer.offset();
    let result = write_envelope_body(value, writer, tagged);
    if result.is_err() {
        writer.truncate(start);
    }
    result
}

fn write_envelope_body<T: SafeParcelable>(
    value: &T,
    writer: &mut ParcelWriter,
    tagged: bool,
) -> ParcelResult<usize> {
    let table = T::descriptors()?;
    let envelope = writer.begin_envelope();

    if tagged {
        let entry = writer.begin_entry(TYPE_TOKEN_FIELD_ID);
        writer.write_string(T::TYPE_TOKEN)?;
        writer.end_entry(entry)?;
    }

    for field in table.fields() {
        let entry = writer.begin_entry(field.id());
        field.get(value).write_field(writer)?;
        if !field.is_required() && writer.entry_payload(&entry) == field.default_payload() {
            writer.discard_entry(entry);
        } else {
            writer.end_entry(entry)?;
        }
    }

    writer.end_envelope(envelope)
}

/// Decode a `T` with default options (lenient).
pub fn decode<T: SafeParcelable>(bytes: &[u8]) -> ParcelResult<T> {
    decode_with(bytes, &DecodeOptions::default())
}

/// Decode a `T` from the envelope at the start of `bytes`.
///
/// Bytes after the envelope are ignored.
pub fn decode_with<T: SafeParcelable>(bytes: &[u8], options: &DecodeOptions) -> ParcelResult<T> {
    let mut reader = ParcelReader::new(bytes);
    let value = decode_from(&mut reader, DecodeContext::new(options))?;
    if !reader.is_empty() {
        log::debug!(
            "[codec] ignoring {} trailing byte(s) after {} envelope",
            reader.remaining(),
            T::TYPE_TOKEN
        );
    }
    Ok(value)
}

/// Decode one envelope at the reader position, one level deeper than `ctx`.
pub fn decode_from<T: SafeParcelable>(
    reader: &mut ParcelReader<'_>,
    ctx: DecodeContext<'_>,
) -> ParcelResult<T> {
    let ctx = ctx.enter()?;
    let table = T::descriptors()?;
    let entries = EnvelopeEntries::read(reader, ctx.options().max_envelope_len)?;

    let mut value = T::default();
    let mut seen = vec![false; table.len()];

    for entry in entries {
        let entry = entry?;

        if entry.id == TYPE_TOKEN_FIELD_ID {
            if ctx.is_strict() {
                let found = entry.payload().read_string()?;
                if found != T::TYPE_TOKEN {
                    return Err(ParcelError::TypeMismatch {
                        expected: T::TYPE_TOKEN.to_string(),
                        found,
                    });
                }
            }
            continue;
        }

        let Some(index) = table.index_of(entry.id) else {
            log::trace!(
                "[codec] skipping unknown field {} ({} bytes) in {}",
                entry.id,
                entry.len(),
                T::TYPE_TOKEN
            );
            continue;
        };

        let field = &table.fields()[index];
        let mut payload = entry.payload();
        field.set(&mut value, &mut payload, ctx)?;
        if !payload.is_empty() {
            log::trace!(
                "[codec] {} unread byte(s) in field {} of {}",
                payload.remaining(),
                field.name(),
                T::TYPE_TOKEN
            );
        }
        seen[index] = true;
    }

    for (field, present) in table.fields().iter().zip(&seen) {
        if !field.is_required() || *present {
            continue;
        }
        if ctx.is_strict() {
            return Err(ParcelError::MissingRequiredField {
                type_token: T::TYPE_TOKEN.to_string(),
                id: field.id(),
                name: field.name(),
            });
        }
        log::debug!(
            "[codec] required field {} absent from {}, keeping default",
            field.name(),
            T::TYPE_TOKEN
        );
    }

    Ok(value)
}
