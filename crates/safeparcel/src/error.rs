// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by the cursor, descriptor tables, codec and registry.
//!
//! Two families live here:
//!
//! - **Wire errors** (`TruncatedData`, `InvalidData`, `UnknownType`, ...)
//!   are produced while decoding bytes handed over by the transport. They
//!   are always returned to the caller and never abort the process.
//! - **Registration errors** (`DuplicateFieldId`, `ReservedFieldId`,
//!   `UnsupportedFieldType`, `DuplicateToken`) mean a payload type
//!   declared an impossible contract. They surface once, at startup, when
//!   tables and registries are built.

use std::fmt;

use crate::core::field::FieldType;

/// Errors produced by the SafeParcel codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParcelError {
    /// Fewer bytes remain than a declared width or length requires.
    TruncatedData {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// Bytes are present but cannot represent a value (bad UTF-8, bad header).
    InvalidData { offset: usize, reason: String },
    /// No creator is registered for the type token.
    UnknownType(String),
    /// Two descriptors of one type share a field id.
    DuplicateFieldId { type_token: String, id: u32 },
    /// A descriptor uses field id 0, which carries the in-band type token.
    ReservedFieldId { type_token: String, id: u32 },
    /// A field type with no lossless encoding (an optional directly inside
    /// an optional).
    UnsupportedFieldType {
        type_token: String,
        id: u32,
        field_type: FieldType,
    },
    /// A creator is already registered under this token.
    DuplicateToken(String),
    /// Strict decode: a required field was absent from the envelope.
    MissingRequiredField {
        type_token: String,
        id: u32,
        name: &'static str,
    },
    /// Polymorphic decode without a type token in the envelope.
    MissingTypeToken,
    /// The envelope names a different type than the one requested.
    TypeMismatch { expected: String, found: String },
    /// Nested envelopes exceed the configured depth.
    DepthLimitExceeded { max_depth: usize },
    /// An envelope or entry length does not fit the configured or wire limit.
    EnvelopeTooLarge { len: usize, max: usize },
    /// `CreatorRegistry::install` was called twice.
    RegistryAlreadyInstalled,
    /// `CreatorRegistry::global` was called before `install`.
    RegistryNotInstalled,
    /// Configuration could not be loaded or failed validation.
    InvalidConfig(String),
}

impl ParcelError {
    /// Shorthand for a [`ParcelError::TruncatedData`] at `offset`.
    pub(crate) fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        ParcelError::TruncatedData {
            offset,
            needed,
            available,
        }
    }

    /// True for errors that indicate a broken type declaration rather than
    /// bad input. These are fatal at startup.
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            ParcelError::DuplicateFieldId { .. }
                | ParcelError::ReservedFieldId { .. }
                | ParcelError::UnsupportedFieldType { .. }
                | ParcelError::DuplicateToken(_)
        )
    }
}

impl fmt::Display for ParcelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParcelError::TruncatedData {
                offset,
                needed,
                available,
            } => write!(
                f,
                "truncated data at offset {}: need {} bytes, {} available",
                offset, needed, available
            ),
            ParcelError::InvalidData { offset, reason } => {
                write!(f, "invalid data at offset {}: {}", offset, reason)
            }
            ParcelError::UnknownType(token) => write!(f, "unknown type token: {}", token),
            ParcelError::DuplicateFieldId { type_token, id } => {
                write!(f, "duplicate field id {} in {}", id, type_token)
            }
            ParcelError::ReservedFieldId { type_token, id } => {
                write!(f, "field id {} is reserved (declared by {})", id, type_token)
            }
            ParcelError::UnsupportedFieldType {
                type_token,
                id,
                field_type,
            } => write!(
                f,
                "field {} of {} has unsupported type {}",
                id, type_token, field_type
            ),
            ParcelError::DuplicateToken(token) => {
                write!(f, "type token already registered: {}", token)
            }
            ParcelError::MissingRequiredField {
                type_token,
                id,
                name,
            } => write!(
                f,
                "required field {} (id {}) missing from {}",
                name, id, type_token
            ),
            ParcelError::MissingTypeToken => write!(f, "envelope carries no type token"),
            ParcelError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            }
            ParcelError::DepthLimitExceeded { max_depth } => {
                write!(f, "nesting deeper than {} envelopes", max_depth)
            }
            ParcelError::EnvelopeTooLarge { len, max } => {
                write!(f, "envelope of {} bytes exceeds limit of {}", len, max)
            }
            ParcelError::RegistryAlreadyInstalled => {
                write!(f, "creator registry already installed")
            }
            ParcelError::RegistryNotInstalled => write!(f, "creator registry not installed"),
            ParcelError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for ParcelError {}

pub type ParcelResult<T> = core::result::Result<T, ParcelError>;
