// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Raw envelope walking.
//!
//! [`EnvelopeEntries`] reads an envelope header and then yields each
//! `[id][len][payload]` entry without interpreting payloads. The typed
//! decoder is built on it, and tools use it to inspect bytes for which no
//! type is known.

use crate::core::cursor::ParcelReader;
use crate::core::parcelable::{ENVELOPE_HEADER_LEN, TYPE_TOKEN_FIELD_ID};
use crate::error::{ParcelError, ParcelResult};

/// One entry of an envelope.
#[derive(Debug, Clone)]
pub struct RawEntry<'a> {
    pub id: u32,
    /// Absolute offset of the entry header.
    pub offset: usize,
    payload: ParcelReader<'a>,
}

impl<'a> RawEntry<'a> {
    /// Reader positioned at the start of the payload.
    pub fn payload(&self) -> ParcelReader<'a> {
        self.payload.clone()
    }

    pub fn payload_bytes(&self) -> &'a [u8] {
        self.payload.rest()
    }

    pub fn len(&self) -> usize {
        self.payload.remaining()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Iterator over the entries of one envelope.
///
/// Yields `Err` at most once; iteration stops after the first error.
#[derive(Debug)]
pub struct EnvelopeEntries<'a> {
    body: ParcelReader<'a>,
    total_len: usize,
    failed: bool,
}

impl<'a> EnvelopeEntries<'a> {
    /// Consume one envelope from `reader`.
    ///
    /// The header must declare at least its own four bytes and at most
    /// `max_len`; the whole declared envelope must be present.
    pub fn read(reader: &mut ParcelReader<'a>, max_len: usize) -> ParcelResult<Self> {
        let header_offset = reader.offset();
        let total_len = reader.read_len()?;
        if total_len < ENVELOPE_HEADER_LEN {
            return Err(ParcelError::InvalidData {
                offset: header_offset,
                reason: format!(
                    "envelope length {} is smaller than its {}-byte header",
                    total_len, ENVELOPE_HEADER_LEN
                ),
            });
        }
        if total_len > max_len {
            return Err(ParcelError::EnvelopeTooLarge {
                len: total_len,
                max: max_len,
            });
        }
        let body = reader.sub_reader(total_len - ENVELOPE_HEADER_LEN)?;
        Ok(Self {
            body,
            total_len,
            failed: false,
        })
    }

    /// Walk the envelope at the start of `bytes`, with no size limit beyond
    /// the buffer itself.
    pub fn parse(bytes: &'a [u8]) -> ParcelResult<Self> {
        Self::read(&mut ParcelReader::new(bytes), usize::MAX)
    }

    /// Declared envelope size, header included.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    fn next_entry(&mut self) -> ParcelResult<RawEntry<'a>> {
        let offset = self.body.offset();
        let id = self.body.read_u32()?;
        let len = self.body.read_len()?;
        let payload = self.body.sub_reader(len)?;
        Ok(RawEntry {
            id,
            offset,
            payload,
        })
    }
}

impl<'a> Iterator for EnvelopeEntries<'a> {
    type Item = ParcelResult<RawEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.body.is_empty() {
            return None;
        }
        let entry = self.next_entry();
        self.failed = entry.is_err();
        Some(entry)
    }
}

/// Type token carried in field 0 of the envelope at the start of `bytes`.
///
/// Returns `Ok(None)` for untagged envelopes.
pub fn peek_type_token(bytes: &[u8]) -> ParcelResult<Option<String>> {
    for entry in EnvelopeEntries::parse(bytes)? {
        let entry = entry?;
        if entry.id == TYPE_TOKEN_FIELD_ID {
            return entry.payload().read_string().map(Some);
        }
    }
    Ok(None)
}
