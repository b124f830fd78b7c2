// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptor tables.
//!
//! A [`DescriptorTable`] lists the fields of one record type: id, name,
//! semantic type, whether the field is required, and the accessor pair the
//! codec uses to read and write it. Tables are immutable once built and are
//! shared by every encode and decode of the type.

use std::fmt;

use crate::core::cursor::{ParcelReader, ParcelWriter};
use crate::core::field::{FieldType, ParcelField};
use crate::core::parcelable::{SafeParcelable, TYPE_TOKEN_FIELD_ID};
use crate::error::{ParcelError, ParcelResult};
use crate::options::DecodeContext;

/// Borrow a field's value for encoding.
pub type Getter<T> = for<'a> fn(&'a T) -> &'a dyn ParcelField;

/// Decode a field's payload into the target record.
pub type Setter<T> = fn(&mut T, &mut ParcelReader<'_>, DecodeContext<'_>) -> ParcelResult<()>;

/// One declared field of record type `T`.
pub struct FieldDescriptor<T> {
    id: u32,
    name: &'static str,
    field_type: FieldType,
    required: bool,
    getter: Getter<T>,
    setter: Setter<T>,
    /// Payload of this field in `T::default()`, filled in by the table.
    default_payload: Vec<u8>,
}

impl<T> FieldDescriptor<T> {
    pub fn new(
        id: u32,
        name: &'static str,
        field_type: FieldType,
        getter: Getter<T>,
        setter: Setter<T>,
    ) -> Self {
        Self {
            id,
            name,
            field_type,
            required: false,
            getter,
            setter,
            default_payload: Vec::new(),
        }
    }

    /// Mark the field as required: always written, and reported when absent
    /// during a strict decode.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Encoded payload of the field's default value.
    pub fn default_payload(&self) -> &[u8] {
        &self.default_payload
    }

    pub fn get<'a>(&self, target: &'a T) -> &'a dyn ParcelField {
        (self.getter)(target)
    }

    pub fn set(
        &self,
        target: &mut T,
        reader: &mut ParcelReader<'_>,
        ctx: DecodeContext<'_>,
    ) -> ParcelResult<()> {
        (self.setter)(target, reader, ctx)
    }

    pub fn summary(&self) -> FieldSummary {
        FieldSummary {
            id: self.id,
            name: self.name,
            field_type: self.field_type.clone(),
            required: self.required,
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("required", &self.required)
            .finish()
    }
}

/// Type-erased view of a [`FieldDescriptor`], used by registries and tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSummary {
    pub id: u32,
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

impl fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}  {}: {}", self.id, self.name, self.field_type)?;
        if self.required {
            write!(f, " (required)")?;
        }
        Ok(())
    }
}

/// Immutable, id-sorted field table of one record type.
pub struct DescriptorTable<T> {
    type_token: &'static str,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T: Default> DescriptorTable<T> {
    /// Build a table, rejecting reserved and duplicate ids and nested
    /// optionals.
    ///
    /// Also records each field's default payload by encoding the fields of
    /// `T::default()`; the codec omits non-required fields whose payload
    /// equals it.
    pub fn new(type_token: &'static str, mut fields: Vec<FieldDescriptor<T>>) -> ParcelResult<Self> {
        fields.sort_by_key(|field| field.id);

        if let Some(field) = fields.iter().find(|f| f.id == TYPE_TOKEN_FIELD_ID) {
            return Err(ParcelError::ReservedFieldId {
                type_token: type_token.to_string(),
                id: field.id,
            });
        }
        if let Some(pair) = fields.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(ParcelError::DuplicateFieldId {
                type_token: type_token.to_string(),
                id: pair[0].id,
            });
        }
        if let Some(field) = fields.iter().find(|f| f.field_type.has_nested_optional()) {
            return Err(ParcelError::UnsupportedFieldType {
                type_token: type_token.to_string(),
                id: field.id,
                field_type: field.field_type.clone(),
            });
        }

        let defaults = T::default();
        for field in &mut fields {
            let mut writer = ParcelWriter::new();
            field.get(&defaults).write_field(&mut writer)?;
            field.default_payload = writer.into_inner();
        }

        log::debug!(
            "[DescriptorTable] built {} with {} field(s)",
            type_token,
            fields.len()
        );
        Ok(Self { type_token, fields })
    }
}

impl<T> DescriptorTable<T> {
    pub fn type_token(&self) -> &'static str {
        self.type_token
    }

    /// Fields in ascending id order.
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of field `id` in [`fields`](Self::fields).
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.fields.binary_search_by_key(&id, |field| field.id).ok()
    }

    pub fn field(&self, id: u32) -> Option<&FieldDescriptor<T>> {
        self.index_of(id).map(|index| &self.fields[index])
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn summaries(&self) -> Vec<FieldSummary> {
        self.fields.iter().map(FieldDescriptor::summary).collect()
    }
}

impl<T> fmt::Debug for DescriptorTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorTable")
            .field("type_token", &self.type_token)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Descriptor table of `T`.
pub fn describe<T: SafeParcelable>() -> ParcelResult<&'static DescriptorTable<T>> {
    T::descriptors()
}
