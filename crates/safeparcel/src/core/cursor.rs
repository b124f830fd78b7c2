// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors for SafeParcel buffers.
//!
//! [`ParcelWriter`] appends to a growable buffer; fixed-width writes cannot
//! fail. Length-prefixed writes and length patches fail only when a length
//! does not fit the `u32` wire field.
//!
//! [`ParcelReader`] is bounds-checked: every read that would run past the
//! end of its slice returns [`ParcelError::TruncatedData`] carrying the
//! absolute offset of the failed read, so nested readers report positions
//! relative to the outermost buffer.

use crate::error::{ParcelError, ParcelResult};

/// Generate little-endian write methods for fixed-width integers.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
    };
}

/// Generate little-endian read methods for fixed-width integers.
///
/// Each generated method takes `$size` bytes through `read_slice` (which
/// performs the bounds check) and converts them with `from_le_bytes()`.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> ParcelResult<$type> {
            let slice = self.read_slice($size)?;
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(slice);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Convert a buffer length into the `u32` used on the wire.
fn wire_len(len: usize) -> ParcelResult<u32> {
    u32::try_from(len).map_err(|_| ParcelError::EnvelopeTooLarge {
        len,
        max: u32::MAX as usize,
    })
}

/// Position of a reserved envelope length header.
#[derive(Debug)]
#[must_use = "an envelope must be closed with end_envelope"]
pub struct EnvelopeMark {
    start: usize,
}

/// Position of a reserved entry header (`[id][len]`).
#[derive(Debug)]
#[must_use = "an entry must be closed with end_entry or discard_entry"]
pub struct EntryMark {
    start: usize,
    payload_start: usize,
}

/// Growable writer for envelopes.
#[derive(Debug, Default, Clone)]
pub struct ParcelWriter {
    buffer: Vec<u8>,
}

impl ParcelWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Current write offset (bytes written so far).
    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    impl_write_le!(write_u32, u32);
    impl_write_le!(write_i32, i32);
    impl_write_le!(write_u64, u64);
    impl_write_le!(write_i64, i64);

    pub fn write_byte(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Booleans occupy a full 4-byte slot, 0 or 1.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(u32::from(value));
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    /// Append bytes verbatim, without a length prefix.
    pub fn write_raw(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Write a `u32` length (or element count).
    pub fn write_len(&mut self, len: usize) -> ParcelResult<()> {
        let len = wire_len(len)?;
        self.write_u32(len);
        Ok(())
    }

    /// Write `[u32 len][bytes]`.
    pub fn write_bytes(&mut self, data: &[u8]) -> ParcelResult<()> {
        self.write_len(data.len())?;
        self.write_raw(data);
        Ok(())
    }

    /// Write `[u32 byte_len][UTF-8 bytes]`.
    pub fn write_string(&mut self, value: &str) -> ParcelResult<()> {
        self.write_bytes(value.as_bytes())
    }

    /// Reserve the 4-byte total length of a new envelope.
    pub fn begin_envelope(&mut self) -> EnvelopeMark {
        let start = self.offset();
        self.write_u32(0);
        EnvelopeMark { start }
    }

    /// Patch the envelope header with its total size (header included).
    pub fn end_envelope(&mut self, mark: EnvelopeMark) -> ParcelResult<usize> {
        let total = self.offset() - mark.start;
        self.patch_u32(mark.start, total)?;
        Ok(total)
    }

    /// Write an entry's field id and reserve its length.
    pub fn begin_entry(&mut self, id: u32) -> EntryMark {
        let start = self.offset();
        self.write_u32(id);
        self.write_u32(0);
        EntryMark {
            start,
            payload_start: self.offset(),
        }
    }

    /// Payload bytes written since `begin_entry`.
    pub fn entry_payload(&self, mark: &EntryMark) -> &[u8] {
        &self.buffer[mark.payload_start..]
    }

    /// Patch the entry length with the payload size.
    pub fn end_entry(&mut self, mark: EntryMark) -> ParcelResult<()> {
        let len = self.offset() - mark.payload_start;
        self.patch_u32(mark.start + 4, len)
    }

    /// Drop the entry (header and payload) from the buffer.
    pub fn discard_entry(&mut self, mark: EntryMark) {
        self.buffer.truncate(mark.start);
    }

    /// Roll the buffer back to `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.buffer.truncate(len);
    }

    fn patch_u32(&mut self, at: usize, value: usize) -> ParcelResult<()> {
        let value = wire_len(value)?;
        self.buffer[at..at + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }
}

/// Bounds-checked reader over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct ParcelReader<'a> {
    buffer: &'a [u8],
    offset: usize,
    /// Absolute offset of `buffer[0]` within the outermost buffer.
    base: usize,
}

impl<'a> ParcelReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            base: 0,
        }
    }

    /// Absolute read offset.
    pub fn offset(&self) -> usize {
        self.base + self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Bytes not yet consumed.
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.offset..]
    }

    pub fn read_slice(&mut self, len: usize) -> ParcelResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(ParcelError::truncated(
                self.offset(),
                len,
                self.remaining(),
            ));
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Advance past `len` bytes without interpreting them.
    pub fn skip(&mut self, len: usize) -> ParcelResult<()> {
        self.read_slice(len).map(|_| ())
    }

    /// Split off the next `len` bytes as an independent reader.
    ///
    /// The parent advances past them whether or not the child consumes them.
    pub fn sub_reader(&mut self, len: usize) -> ParcelResult<ParcelReader<'a>> {
        let base = self.offset();
        let buffer = self.read_slice(len)?;
        Ok(ParcelReader {
            buffer,
            offset: 0,
            base,
        })
    }

    impl_read_le!(read_u32, u32, 4);
    impl_read_le!(read_i32, i32, 4);
    impl_read_le!(read_u64, u64, 8);
    impl_read_le!(read_i64, i64, 8);

    pub fn read_byte(&mut self) -> ParcelResult<u8> {
        Ok(self.read_slice(1)?[0])
    }

    /// Any non-zero slot reads as `true`.
    pub fn read_bool(&mut self) -> ParcelResult<bool> {
        Ok(self.read_u32()? != 0)
    }

    pub fn read_f32(&mut self) -> ParcelResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> ParcelResult<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Read a `u32` length (or element count).
    pub fn read_len(&mut self) -> ParcelResult<usize> {
        Ok(self.read_u32()? as usize)
    }

    /// Read `[u32 len][bytes]`, borrowing the bytes.
    pub fn read_bytes(&mut self) -> ParcelResult<&'a [u8]> {
        let len = self.read_len()?;
        self.read_slice(len)
    }

    /// Read `[u32 byte_len][UTF-8 bytes]`.
    pub fn read_string(&mut self) -> ParcelResult<String> {
        let len = self.read_len()?;
        let start = self.offset();
        let bytes = self.read_slice(len)?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_owned()),
            Err(e) => Err(ParcelError::InvalidData {
                offset: start + e.valid_up_to(),
                reason: "string is not valid UTF-8".into(),
            }),
        }
    }
}
