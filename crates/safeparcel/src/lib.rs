// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # SafeParcel - tagged binary object serialization
//!
//! A self-describing, forward- and backward-compatible binary format for
//! records exchanged across a process boundary. Every record is an
//! envelope of `(field id, length, payload)` entries, so a decoder skips
//! fields it does not know and keeps defaults for fields the sender did not
//! write.
//!
//! ## Quick Start
//!
//! ```rust
//! use safeparcel::{decode, encode, SafeParcelable};
//!
//! #[derive(Debug, Default, PartialEq, SafeParcelable)]
//! #[safeparcel(token = "com.example.Status")]
//! struct Status {
//!     #[safeparcel(id = 1, required)]
//!     code: i32,
//!     #[safeparcel(id = 2)]
//!     message: String,
//! }
//!
//! let status = Status { code: 404, message: "not found".into() };
//! let bytes = encode(&status)?;
//! assert_eq!(decode::<Status>(&bytes)?, status);
//! # Ok::<(), safeparcel::ParcelError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  CreatorRegistry      token -> Creator (construct / decode)   |
//! +---------------------------------------------------------------+
//! |  codec                encode / encode_tagged / decode_with    |
//! +---------------------------------------------------------------+
//! |  DescriptorTable      id-sorted fields, accessors, defaults   |
//! +---------------------------------------------------------------+
//! |  ParcelWriter / ParcelReader   little-endian, bounds-checked  |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Features
//!
//! - `config-loaders` (default): [`config::CodecConfig`], YAML plus
//!   environment configuration of decode limits.

// Allow the derive macro to work inside this crate
extern crate self as safeparcel;

/// Envelope encode/decode.
pub mod codec;
/// YAML configuration of decode options.
#[cfg(feature = "config-loaders")]
pub mod config;
/// Cursors, field types, descriptor tables, raw envelope walking.
pub mod core;
/// Creator registry and type-erased records.
pub mod creator;
pub mod error;
pub mod options;
/// Built-in payload types.
pub mod payload;

pub use codec::{decode, decode_from, decode_with, encode, encode_into, encode_tagged};
pub use crate::core::{
    describe, peek_type_token, DescriptorTable, EntryMark, EnvelopeEntries, EnvelopeMark,
    FieldDescriptor, FieldSummary, FieldType, Getter, ParcelField, ParcelReader, ParcelWriter,
    RawEntry, SafeParcelable, Setter, ENTRY_HEADER_LEN, ENVELOPE_HEADER_LEN, TYPE_TOKEN_FIELD_ID,
};
#[cfg(feature = "config-loaders")]
pub use config::CodecConfig;
pub use creator::{AnyParcelable, Creator, CreatorRegistry, CreatorRegistryBuilder};
pub use error::{ParcelError, ParcelResult};
pub use options::{DecodeContext, DecodeOptions};

pub use safeparcel_codegen::SafeParcelable; // Derive macro (for #[derive(SafeParcelable)])
