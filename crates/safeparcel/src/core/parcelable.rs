// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;

use crate::core::descriptor::DescriptorTable;
use crate::error::ParcelResult;

/// Field id carrying the in-band type token. Never used by a declared field.
pub const TYPE_TOKEN_FIELD_ID: u32 = 0;

/// Size of the `u32` total-length header that opens every envelope.
pub const ENVELOPE_HEADER_LEN: usize = 4;

/// Size of an entry header: `u32` field id followed by `u32` payload length.
pub const ENTRY_HEADER_LEN: usize = 8;

/// A record type with a stable type token and a declared field table.
///
/// Normally implemented with `#[derive(SafeParcelable)]`, which builds the
/// descriptor table once per process and hands out a `'static` reference.
///
/// ```
/// use safeparcel::SafeParcelable;
///
/// #[derive(Debug, Default, PartialEq, SafeParcelable)]
/// #[safeparcel(token = "com.example.Ping")]
/// struct Ping {
///     #[safeparcel(id = 1, required)]
///     seq: i64,
/// }
///
/// let bytes = safeparcel::encode(&Ping { seq: 7 }).unwrap();
/// assert_eq!(safeparcel::decode::<Ping>(&bytes).unwrap(), Ping { seq: 7 });
/// ```
pub trait SafeParcelable: Default + fmt::Debug + Send + Sync + 'static {
    /// Type token naming this type on the wire and in registries.
    const TYPE_TOKEN: &'static str;

    /// Declared fields, sorted by id.
    ///
    /// Fails with a registration error when the declaration is invalid
    /// (duplicate or reserved ids).
    fn descriptors() -> ParcelResult<&'static DescriptorTable<Self>>;
}
