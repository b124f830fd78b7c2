// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Truncated and corrupted input: every strict prefix of a valid envelope
//! fails with `TruncatedData`, and arbitrary corruption never panics.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use safeparcel::payload::{License, LicenseList, Status};
use safeparcel::{
    decode, decode_with, encode, CreatorRegistry, DecodeOptions, ParcelError, ParcelWriter,
    SafeParcelable,
};

/// Records the largest single allocation made by this test binary.
struct LargestAlloc;

static LARGEST_ALLOC: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for LargestAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        LARGEST_ALLOC.fetch_max(layout.size(), Ordering::Relaxed);
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        LARGEST_ALLOC.fetch_max(new_size, Ordering::Relaxed);
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static ALLOCATOR: LargestAlloc = LargestAlloc;

fn assert_every_prefix_truncated<T: SafeParcelable>(bytes: &[u8]) {
    for len in 0..bytes.len() {
        match decode::<T>(&bytes[..len]) {
            Err(ParcelError::TruncatedData { .. }) => {}
            other => panic!(
                "prefix of {} / {} bytes: expected TruncatedData, got {:?}",
                len,
                bytes.len(),
                other
            ),
        }
    }
}

fn random_string(rng: &mut fastrand::Rng) -> String {
    let len = rng.usize(0..24);
    (0..len).map(|_| rng.alphanumeric()).collect()
}

fn random_license(rng: &mut fastrand::Rng) -> License {
    License::new(
        random_string(rng),
        rng.i64(..),
        rng.i32(..),
        random_string(rng),
    )
}

#[test]
fn test_status_prefixes() {
    let bytes = encode(&Status::new(404, "not found")).expect("encode should succeed");
    assert_eq!(bytes.len(), 37);
    assert_every_prefix_truncated::<Status>(&bytes);
}

#[test]
fn test_nested_list_prefixes() {
    let list = LicenseList {
        licenses: vec![
            License::new("serde", 0, 1024, "res/raw/third_party_licenses"),
            License::new("log", 1024, 512, "res/raw/third_party_licenses"),
        ],
    };
    let bytes = encode(&list).expect("encode should succeed");
    assert_every_prefix_truncated::<LicenseList>(&bytes);
}

#[test]
fn test_empty_input() {
    assert_eq!(
        decode::<Status>(&[]).unwrap_err(),
        ParcelError::TruncatedData {
            offset: 0,
            needed: 4,
            available: 0
        }
    );
}

#[test]
fn test_random_truncation() {
    let mut rng = fastrand::Rng::with_seed(0x5AFE_9A2C);
    for _ in 0..500 {
        let count = rng.usize(0..6);
        let list = LicenseList {
            licenses: (0..count).map(|_| random_license(&mut rng)).collect(),
        };
        let bytes = encode(&list).expect("encode should succeed");
        assert_eq!(decode::<LicenseList>(&bytes).expect("full decode"), list);

        let cut = rng.usize(0..bytes.len());
        let err = decode::<LicenseList>(&bytes[..cut]).unwrap_err();
        assert!(
            matches!(err, ParcelError::TruncatedData { .. }),
            "cut at {} of {}: {:?}",
            cut,
            bytes.len(),
            err
        );
    }
}

#[test]
fn test_random_corruption_never_panics() {
    let mut rng = fastrand::Rng::with_seed(0xC0FF_EE00);
    let mut builder = CreatorRegistry::builder();
    safeparcel::payload::register_all(&mut builder).expect("register");
    let registry = builder.build();
    let strict = DecodeOptions::strict();

    for _ in 0..2_000 {
        let list = LicenseList {
            licenses: (0..rng.usize(1..4)).map(|_| random_license(&mut rng)).collect(),
        };
        let mut bytes = safeparcel::encode_tagged(&list).expect("encode should succeed");
        for _ in 0..rng.usize(1..4) {
            let index = rng.usize(0..bytes.len());
            bytes[index] = rng.u8(..);
        }

        let _ = decode::<LicenseList>(&bytes);
        let _ = decode_with::<LicenseList>(&bytes, &strict);
        let _ = decode::<Status>(&bytes);
        let _ = registry.decode_any(&bytes, &strict);
    }
}

#[test]
fn test_random_bytes_never_panic() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..2_000 {
        let len = rng.usize(0..64);
        let mut bytes: Vec<u8> = (0..len).map(|_| rng.u8(..)).collect();
        // Make the header plausible half of the time so entries get parsed.
        if len >= 4 && rng.bool() {
            bytes[..4].copy_from_slice(&(len as u32).to_le_bytes());
        }
        let _ = decode::<LicenseList>(&bytes);
        let _ = decode::<Status>(&bytes);
        let _ = safeparcel::peek_type_token(&bytes);
    }
}

#[test]
fn test_hostile_list_count_reserves_at_most_input_size() {
    // LicenseList whose list declares u32::MAX elements over 1 MiB of zeros.
    let padding = 1 << 20;
    let mut writer = ParcelWriter::new();
    let envelope = writer.begin_envelope();
    let entry = writer.begin_entry(1);
    writer.write_u32(u32::MAX);
    writer.write_raw(&vec![0u8; padding]);
    writer.end_entry(entry).expect("entry length");
    writer.end_envelope(envelope).expect("envelope length");
    let bytes = writer.into_inner();

    LARGEST_ALLOC.store(0, Ordering::Relaxed);
    let err = decode::<LicenseList>(&bytes).unwrap_err();
    let largest = LARGEST_ALLOC.load(Ordering::Relaxed);

    // The first element is a zero envelope length.
    assert!(matches!(err, ParcelError::InvalidData { .. }), "{:?}", err);
    assert!(
        largest <= bytes.len(),
        "largest allocation {} exceeds input of {} bytes",
        largest,
        bytes.len()
    );
}
