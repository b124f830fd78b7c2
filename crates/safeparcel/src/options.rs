// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decode options and the per-call decode context.

use crate::error::{ParcelError, ParcelResult};

/// Default nesting limit for envelopes inside envelopes.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default upper bound for a single envelope (16 MiB).
pub const DEFAULT_MAX_ENVELOPE_LEN: usize = 16 * 1024 * 1024;

/// Options controlling a decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Report absent required fields and mismatched in-band type tokens.
    pub strict: bool,
    /// Maximum number of nested envelopes, the outermost included.
    pub max_depth: usize,
    /// Largest declared envelope length accepted.
    pub max_envelope_len: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_envelope_len: DEFAULT_MAX_ENVELOPE_LEN,
        }
    }
}

impl DecodeOptions {
    /// Default limits with strict mode on.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_envelope_len(mut self, max_envelope_len: usize) -> Self {
        self.max_envelope_len = max_envelope_len;
        self
    }
}

/// State threaded through one decode call: the options and the current
/// envelope depth.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    options: &'a DecodeOptions,
    depth: usize,
}

impl<'a> DecodeContext<'a> {
    pub fn new(options: &'a DecodeOptions) -> Self {
        Self { options, depth: 0 }
    }

    pub fn options(&self) -> &'a DecodeOptions {
        self.options
    }

    pub fn is_strict(&self) -> bool {
        self.options.strict
    }

    /// Number of envelopes currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for the contents of one more envelope.
    pub(crate) fn enter(self) -> ParcelResult<Self> {
        if self.depth >= self.options.max_depth {
            return Err(ParcelError::DepthLimitExceeded {
                max_depth: self.options.max_depth,
            });
        }
        Ok(Self {
            options: self.options,
            depth: self.depth + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DecodeOptions::default();
        assert!(!options.strict);
        assert_eq!(options.max_depth, 32);
        assert_eq!(options.max_envelope_len, 16 * 1024 * 1024);
        assert!(DecodeOptions::strict().strict);
    }

    #[test]
    fn test_enter_respects_max_depth() {
        let options = DecodeOptions::default().with_max_depth(2);
        let ctx = DecodeContext::new(&options);
        let first = ctx.enter().expect("depth 1 allowed");
        let second = first.enter().expect("depth 2 allowed");
        assert_eq!(second.depth(), 2);
        assert_eq!(
            second.enter().unwrap_err(),
            ParcelError::DepthLimitExceeded { max_depth: 2 }
        );
    }
}
