// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML codec configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! # safeparcel.yaml
//! strict: true
//! max_depth: 16
//! max_envelope_len: 1048576
//! ```
//!
//! Every key is optional. Environment variables override the file:
//!
//! | Variable                      | Key                |
//! |-------------------------------|--------------------|
//! | `SAFEPARCEL_STRICT`           | `strict`           |
//! | `SAFEPARCEL_MAX_DEPTH`        | `max_depth`        |
//! | `SAFEPARCEL_MAX_ENVELOPE_LEN` | `max_envelope_len` |

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::parcelable::ENVELOPE_HEADER_LEN;
use crate::error::{ParcelError, ParcelResult};
use crate::options::{DecodeOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ENVELOPE_LEN};

pub const ENV_STRICT: &str = "SAFEPARCEL_STRICT";
pub const ENV_MAX_DEPTH: &str = "SAFEPARCEL_MAX_DEPTH";
pub const ENV_MAX_ENVELOPE_LEN: &str = "SAFEPARCEL_MAX_ENVELOPE_LEN";

/// Decode settings as loaded from YAML and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub strict: bool,
    pub max_depth: usize,
    pub max_envelope_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_envelope_len: DEFAULT_MAX_ENVELOPE_LEN,
        }
    }
}

impl CodecConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> ParcelResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| ParcelError::InvalidConfig(format!("failed to parse YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ParcelResult<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|e| {
            ParcelError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;
        log::debug!("[config] loaded {}", path.display());
        Self::from_yaml_str(&yaml)
    }

    /// Apply overrides from `lookup`, keyed by the `SAFEPARCEL_*` names.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ParcelResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_STRICT) {
            self.strict = parse_flag(ENV_STRICT, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_DEPTH) {
            self.max_depth = parse_size(ENV_MAX_DEPTH, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_ENVELOPE_LEN) {
            self.max_envelope_len = parse_size(ENV_MAX_ENVELOPE_LEN, &value)?;
        }
        self.validate()
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> ParcelResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn validate(&self) -> ParcelResult<()> {
        if self.max_depth == 0 {
            return Err(ParcelError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.max_envelope_len < ENVELOPE_HEADER_LEN {
            return Err(ParcelError::InvalidConfig(format!(
                "max_envelope_len must be at least {}",
                ENVELOPE_HEADER_LEN
            )));
        }
        Ok(())
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict: self.strict,
            max_depth: self.max_depth,
            max_envelope_len: self.max_envelope_len,
        }
    }
}

impl From<CodecConfig> for DecodeOptions {
    fn from(config: CodecConfig) -> Self {
        config.decode_options()
    }
}

fn parse_flag(key: &str, value: &str) -> ParcelResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ParcelError::InvalidConfig(format!(
            "{}: expected a boolean, got '{}'",
            key, other
        ))),
    }
}

fn parse_size(key: &str, value: &str) -> ParcelResult<usize> {
    value.trim().parse::<usize>().map_err(|e| {
        ParcelError::InvalidConfig(format!("{}: invalid number '{}': {}", key, value, e))
    })
}
