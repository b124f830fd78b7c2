// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Semantic field types and the per-type payload encoding.
//!
//! Every value that can sit in a SafeParcel field implements [`ParcelField`].
//! The payload written here is what goes between an entry header and the
//! next entry; the entry length is handled by the codec.
//!
//! | Rust type          | [`FieldType`]           | Payload                       |
//! |--------------------|-------------------------|-------------------------------|
//! | `bool`             | `Bool`                  | `u32` 0/1                     |
//! | `u8`               | `Byte`                  | 1 byte                        |
//! | `i32` / `i64`      | `Int32` / `Int64`       | little-endian                 |
//! | `f32` / `f64`      | `Float32` / `Float64`   | IEEE-754 bits, little-endian  |
//! | `String`           | `String`                | `[u32 len][UTF-8]`            |
//! | `Vec<u8>`          | `Bytes`                 | `[u32 len][bytes]`            |
//! | `Vec<T>`           | `List(T)`               | `[u32 count][element]*`       |
//! | `Option<T>`        | `Optional(T)`           | empty when `None`             |
//! | derived structs    | `Parcelable(token)`     | a complete nested envelope    |

use std::fmt;
use std::mem;

use crate::core::cursor::{ParcelReader, ParcelWriter};
use crate::error::ParcelResult;
use crate::options::DecodeContext;

/// Semantic type of a declared field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    Byte,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Bytes,
    /// Nested object, identified by its type token.
    Parcelable(&'static str),
    List(Box<FieldType>),
    /// Nullable field.
    Optional(Box<FieldType>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Bool => write!(f, "bool"),
            FieldType::Byte => write!(f, "byte"),
            FieldType::Int32 => write!(f, "int32"),
            FieldType::Int64 => write!(f, "int64"),
            FieldType::Float32 => write!(f, "float32"),
            FieldType::Float64 => write!(f, "float64"),
            FieldType::String => write!(f, "string"),
            FieldType::Bytes => write!(f, "bytes"),
            FieldType::Parcelable(token) => write!(f, "parcelable<{}>", token),
            FieldType::List(element) => write!(f, "list<{}>", element),
            FieldType::Optional(inner) => write!(f, "optional<{}>", inner),
        }
    }
}

impl FieldType {
    /// True when an `Optional` directly wraps another `Optional` anywhere in
    /// this type. `Some(None)` and `None` share the empty payload there.
    pub fn has_nested_optional(&self) -> bool {
        match self {
            FieldType::Optional(inner) => {
                matches!(**inner, FieldType::Optional(_)) || inner.has_nested_optional()
            }
            FieldType::List(element) => element.has_nested_optional(),
            _ => false,
        }
    }
}

/// Smallest wire size of a list element other than a raw byte.
const MIN_ELEMENT_LEN: usize = 4;

/// Initial capacity for `count` decoded elements of `T`.
///
/// Bounded so the reservation never exceeds the `remaining` input bytes,
/// whatever the declared count and the in-memory size of `T`.
fn sequence_capacity<T>(count: usize, remaining: usize) -> usize {
    count.min(remaining / mem::size_of::<T>().max(MIN_ELEMENT_LEN))
}

/// A value that can be stored in a SafeParcel field.
///
/// The object-safe part (`write_field`) is what descriptor getters expose;
/// construction goes through `read_field`.
pub trait ParcelField: fmt::Debug + Send + Sync + 'static {
    /// Semantic type reported in descriptor tables.
    fn field_type() -> FieldType
    where
        Self: Sized;

    /// Append this value's payload.
    fn write_field(&self, writer: &mut ParcelWriter) -> ParcelResult<()>;

    /// Read one value from the payload reader.
    fn read_field(reader: &mut ParcelReader<'_>, ctx: DecodeContext<'_>) -> ParcelResult<Self>
    where
        Self: Sized;

    /// Type reported for `Vec<Self>`.
    #[doc(hidden)]
    fn sequence_type() -> FieldType
    where
        Self: Sized,
    {
        FieldType::List(Box::new(Self::field_type()))
    }

    /// Payload for `Vec<Self>`: `[u32 count][element]*`.
    #[doc(hidden)]
    fn write_sequence(items: &[Self], writer: &mut ParcelWriter) -> ParcelResult<()>
    where
        Self: Sized,
    {
        writer.write_len(items.len())?;
        for item in items {
            item.write_field(writer)?;
        }
        Ok(())
    }

    #[doc(hidden)]
    fn read_sequence(reader: &mut ParcelReader<'_>, ctx: DecodeContext<'_>) -> ParcelResult<Vec<Self>>
    where
        Self: Sized,
    {
        let count = reader.read_len()?;
        let mut items = Vec::with_capacity(sequence_capacity::<Self>(count, reader.remaining()));
        for _ in 0..count {
            items.push(Self::read_field(reader, ctx)?);
        }
        Ok(items)
    }
}

/// Implement [`ParcelField`] for a fixed-width primitive.
macro_rules! impl_primitive_field {
    ($type:ty, $kind:ident, $write:ident, $read:ident) => {
        impl ParcelField for $type {
            fn field_type() -> FieldType {
                FieldType::$kind
            }

            fn write_field(&self, writer: &mut ParcelWriter) -> ParcelResult<()> {
                writer.$write(*self);
                Ok(())
            }

            fn read_field(
                reader: &mut ParcelReader<'_>,
                _ctx: DecodeContext<'_>,
            ) -> ParcelResult<Self> {
                reader.$read()
            }
        }
    };
}

impl_primitive_field!(bool, Bool, write_bool, read_bool);
impl_primitive_field!(i32, Int32, write_i32, read_i32);
impl_primitive_field!(i64, Int64, write_i64, read_i64);
impl_primitive_field!(f32, Float32, write_f32, read_f32);
impl_primitive_field!(f64, Float64, write_f64, read_f64);

impl ParcelField for u8 {
    fn field_type() -> FieldType {
        FieldType::Byte
    }

    fn write_field(&self, writer: &mut ParcelWriter) -> ParcelResult<()> {
        writer.write_byte(*self);
        Ok(())
    }

    fn read_field(reader: &mut ParcelReader<'_>, _ctx: DecodeContext<'_>) -> ParcelResult<Self> {
        reader.read_byte()
    }

    // A byte sequence is a length-prefixed blob rather than a list.
    fn sequence_type() -> FieldType {
        FieldType::Bytes
    }

    fn write_sequence(items: &[Self], writer: &mut ParcelWriter) -> ParcelResult<()> {
        writer.write_bytes(items)
    }

    fn read_sequence(reader: &mut ParcelReader<'_>, _ctx: DecodeContext<'_>) -> ParcelResult<Vec<Self>> {
        Ok(reader.read_bytes()?.to_vec())
    }
}

impl ParcelField for String {
    fn field_type() -> FieldType {
        FieldType::String
    }

    fn write_field(&self, writer: &mut ParcelWriter) -> ParcelResult<()> {
        writer.write_string(self)
    }

    fn read_field(reader: &mut ParcelReader<'_>, _ctx: DecodeContext<'_>) -> ParcelResult<Self> {
        reader.read_string()
    }
}

impl<T: ParcelField> ParcelField for Vec<T> {
    fn field_type() -> FieldType {
        T::sequence_type()
    }

    fn write_field(&self, writer: &mut ParcelWriter) -> ParcelResult<()> {
        T::write_sequence(self, writer)
    }

    fn read_field(reader: &mut ParcelReader<'_>, ctx: DecodeContext<'_>) -> ParcelResult<Self> {
        T::read_sequence(reader, ctx)
    }
}

impl<T: ParcelField> ParcelField for Option<T> {
    fn field_type() -> FieldType {
        FieldType::Optional(Box::new(T::field_type()))
    }

    fn write_field(&self, writer: &mut ParcelWriter) -> ParcelResult<()> {
        match self {
            Some(value) => value.write_field(writer),
            None => Ok(()),
        }
    }

    /// Reads from an entry-bounded reader: an empty payload is `None`.
    fn read_field(reader: &mut ParcelReader<'_>, ctx: DecodeContext<'_>) -> ParcelResult<Self> {
        if reader.is_empty() {
            return Ok(None);
        }
        T::read_field(reader, ctx).map(Some)
    }

    // Inside a list an element has no entry of its own, so presence is
    // written explicitly: `[bool present][value]`.
    fn write_sequence(items: &[Self], writer: &mut ParcelWriter) -> ParcelResult<()> {
        writer.write_len(items.len())?;
        for item in items {
            writer.write_bool(item.is_some());
            if let Some(value) = item {
                value.write_field(writer)?;
            }
        }
        Ok(())
    }

    fn read_sequence(reader: &mut ParcelReader<'_>, ctx: DecodeContext<'_>) -> ParcelResult<Vec<Self>> {
        let count = reader.read_len()?;
        let mut items = Vec::with_capacity(sequence_capacity::<Self>(count, reader.remaining()));
        for _ in 0..count {
            if reader.read_bool()? {
                items.push(Some(T::read_field(reader, ctx)?));
            } else {
                items.push(None);
            }
        }
        Ok(items)
    }
}
