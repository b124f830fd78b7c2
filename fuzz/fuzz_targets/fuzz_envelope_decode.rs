// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fuzz target for envelope decoding
//!
//! Feeds arbitrary bytes to every decode entry point: typed decode of each
//! built-in payload type (lenient and strict), raw entry walking, and
//! registry dispatch. None of these operations should panic on any input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use safeparcel::payload::{License, LicenseList, Status, UnlinkFederatedCredentialAidlRequest};
use safeparcel::{CreatorRegistry, DecodeOptions, EnvelopeEntries};

fuzz_target!(|data: &[u8]| {
    let lenient = DecodeOptions::default();
    let strict = DecodeOptions::strict().with_max_depth(4);

    // ----------------------------------------------------------------
    // 1. Typed decode - must not panic
    // ----------------------------------------------------------------
    for options in [&lenient, &strict] {
        let _ = safeparcel::decode_with::<Status>(data, options);
        let _ = safeparcel::decode_with::<License>(data, options);
        let _ = safeparcel::decode_with::<LicenseList>(data, options);
        let _ = safeparcel::decode_with::<UnlinkFederatedCredentialAidlRequest>(data, options);
    }

    // ----------------------------------------------------------------
    // 2. Raw entry walking - must not panic
    // ----------------------------------------------------------------
    if let Ok(entries) = EnvelopeEntries::parse(data) {
        for entry in entries {
            if entry.is_err() {
                break;
            }
        }
    }
    let _ = safeparcel::peek_type_token(data);

    // ----------------------------------------------------------------
    // 3. Registry dispatch - must not panic
    // ----------------------------------------------------------------
    let mut builder = CreatorRegistry::builder();
    if safeparcel::payload::register_all(&mut builder).is_ok() {
        let registry = builder.build();
        let _ = registry.decode_any(data, &lenient);
    }

    // ----------------------------------------------------------------
    // 4. Re-encode whatever decoded - must not panic
    // ----------------------------------------------------------------
    if let Ok(list) = safeparcel::decode::<LicenseList>(data) {
        let _ = safeparcel::encode(&list);
    }
});
