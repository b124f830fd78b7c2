// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Creator registry for polymorphic decode.
//!
//! A transport that only knows a type token (out of band, or in field 0 of
//! a tagged envelope) resolves it here to a [`Creator`], which constructs
//! or decodes the matching record as a boxed [`AnyParcelable`].
//!
//! # Architecture
//!
//! ```text
//! CreatorRegistryBuilder          (startup, mutable)
//! +-- register(token, Creator)    DuplicateToken on collision
//! +-- build()
//!        |
//!        v
//! CreatorRegistry                 (immutable, shared freely)
//! +-- creators: HashMap<String, Creator>
//! +-- install() -> process-wide OnceLock, read by global()
//! ```
//!
//! The built registry is never mutated, so lookups take no lock.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::codec;
use crate::core::descriptor::FieldSummary;
use crate::core::envelope::peek_type_token;
use crate::core::parcelable::SafeParcelable;
use crate::error::{ParcelError, ParcelResult};
use crate::options::DecodeOptions;

/// Object-safe view of a [`SafeParcelable`] record.
pub trait AnyParcelable: fmt::Debug + Send + Sync {
    fn type_token(&self) -> &'static str;

    /// Rust type name of the concrete record.
    fn type_name(&self) -> &'static str;

    fn encode(&self) -> ParcelResult<Vec<u8>>;

    fn encode_tagged(&self) -> ParcelResult<Vec<u8>>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: SafeParcelable> AnyParcelable for T {
    fn type_token(&self) -> &'static str {
        T::TYPE_TOKEN
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn encode(&self) -> ParcelResult<Vec<u8>> {
        codec::encode(self)
    }

    fn encode_tagged(&self) -> ParcelResult<Vec<u8>> {
        codec::encode_tagged(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn AnyParcelable {
    pub fn is<T: SafeParcelable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: SafeParcelable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Take the concrete record out of the box.
    pub fn downcast<T: SafeParcelable>(self: Box<Self>) -> ParcelResult<T> {
        let found = self.type_token();
        self.into_any()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ParcelError::TypeMismatch {
                expected: T::TYPE_TOKEN.to_string(),
                found: found.to_string(),
            })
    }
}

/// Factory for one record type.
#[derive(Clone, Copy)]
pub struct Creator {
    type_token: &'static str,
    type_name: &'static str,
    construct: fn() -> Box<dyn AnyParcelable>,
    decode: fn(&[u8], &DecodeOptions) -> ParcelResult<Box<dyn AnyParcelable>>,
    describe: fn() -> ParcelResult<Vec<FieldSummary>>,
}

fn construct_boxed<T: SafeParcelable>() -> Box<dyn AnyParcelable> {
    Box::new(T::default())
}

fn decode_boxed<T: SafeParcelable>(
    bytes: &[u8],
    options: &DecodeOptions,
) -> ParcelResult<Box<dyn AnyParcelable>> {
    let value: T = codec::decode_with(bytes, options)?;
    Ok(Box::new(value))
}

fn describe_fields<T: SafeParcelable>() -> ParcelResult<Vec<FieldSummary>> {
    Ok(T::descriptors()?.summaries())
}

impl Creator {
    pub fn of<T: SafeParcelable>() -> Self {
        Self {
            type_token: T::TYPE_TOKEN,
            type_name: std::any::type_name::<T>(),
            construct: construct_boxed::<T>,
            decode: decode_boxed::<T>,
            describe: describe_fields::<T>,
        }
    }

    /// Token declared by the record type (may differ from the registry key
    /// when the creator is registered under an alias).
    pub fn type_token(&self) -> &'static str {
        self.type_token
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// A fresh record holding default values.
    pub fn create(&self) -> Box<dyn AnyParcelable> {
        (self.construct)()
    }

    pub fn decode(&self, bytes: &[u8], options: &DecodeOptions) -> ParcelResult<Box<dyn AnyParcelable>> {
        (self.decode)(bytes, options)
    }

    pub fn field_summaries(&self) -> ParcelResult<Vec<FieldSummary>> {
        (self.describe)()
    }
}

impl fmt::Debug for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Creator")
            .field("type_token", &self.type_token)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Mutable registry used during startup.
#[derive(Debug, Default)]
pub struct CreatorRegistryBuilder {
    creators: HashMap<String, Creator>,
}

impl CreatorRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `creator` under `token`.
    pub fn register(&mut self, token: impl Into<String>, creator: Creator) -> ParcelResult<&mut Self> {
        let token = token.into();
        if self.creators.contains_key(&token) {
            return Err(ParcelError::DuplicateToken(token));
        }
        log::debug!(
            "[CreatorRegistry] registered {} -> {}",
            token,
            creator.type_name()
        );
        self.creators.insert(token, creator);
        Ok(self)
    }

    /// Register `T` under its own type token.
    ///
    /// The descriptor table is built here, so an invalid declaration fails
    /// at registration rather than at first use.
    pub fn register_type<T: SafeParcelable>(&mut self) -> ParcelResult<&mut Self> {
        T::descriptors()?;
        self.register(T::TYPE_TOKEN, Creator::of::<T>())
    }

    pub fn build(self) -> CreatorRegistry {
        log::debug!(
            "[CreatorRegistry] built with {} creator(s)",
            self.creators.len()
        );
        CreatorRegistry {
            creators: self.creators,
        }
    }
}

static GLOBAL_REGISTRY: OnceLock<CreatorRegistry> = OnceLock::new();

/// Immutable token -> creator map.
#[derive(Debug, Default)]
pub struct CreatorRegistry {
    creators: HashMap<String, Creator>,
}

impl CreatorRegistry {
    pub fn builder() -> CreatorRegistryBuilder {
        CreatorRegistryBuilder::new()
    }

    pub fn resolve(&self, token: &str) -> ParcelResult<&Creator> {
        self.creators
            .get(token)
            .ok_or_else(|| ParcelError::UnknownType(token.to_string()))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.creators.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    /// Registered tokens in sorted order.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.creators.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    /// Decode bytes whose type is known out of band.
    pub fn decode_as(
        &self,
        token: &str,
        bytes: &[u8],
        options: &DecodeOptions,
    ) -> ParcelResult<Box<dyn AnyParcelable>> {
        self.resolve(token)?.decode(bytes, options)
    }

    /// Decode a tagged envelope, resolving its type from field 0.
    pub fn decode_any(&self, bytes: &[u8], options: &DecodeOptions) -> ParcelResult<Box<dyn AnyParcelable>> {
        let token = peek_type_token(bytes)?.ok_or(ParcelError::MissingTypeToken)?;
        self.decode_as(&token, bytes, options)
    }

    /// Make this registry the process-wide one returned by [`global`](Self::global).
    ///
    /// Installation happens once; a second call fails and leaves the first
    /// registry in place.
    pub fn install(self) -> ParcelResult<&'static CreatorRegistry> {
        let count = self.len();
        GLOBAL_REGISTRY
            .set(self)
            .map_err(|_| ParcelError::RegistryAlreadyInstalled)?;
        log::info!(
            "[CreatorRegistry] installed global registry ({} creator(s))",
            count
        );
        GLOBAL_REGISTRY.get().ok_or(ParcelError::RegistryNotInstalled)
    }

    pub fn global() -> ParcelResult<&'static CreatorRegistry> {
        GLOBAL_REGISTRY.get().ok_or(ParcelError::RegistryNotInstalled)
    }
}
