// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire building blocks: cursors, field types, descriptor tables and raw
//! envelope walking.

pub mod cursor;
pub mod descriptor;
pub mod envelope;
pub mod field;
pub mod parcelable;

pub use cursor::{EntryMark, EnvelopeMark, ParcelReader, ParcelWriter};
pub use descriptor::{describe, DescriptorTable, FieldDescriptor, FieldSummary, Getter, Setter};
pub use envelope::{peek_type_token, EnvelopeEntries, RawEntry};
pub use field::{FieldType, ParcelField};
pub use parcelable::{SafeParcelable, ENTRY_HEADER_LEN, ENVELOPE_HEADER_LEN, TYPE_TOKEN_FIELD_ID};
