// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide registry installation.
//!
//! Kept to a single test: the global slot is per process and write-once.

use safeparcel::payload::{self, Status};
use safeparcel::{encode_tagged, CreatorRegistry, DecodeOptions, ParcelError, SafeParcelable};

#[test]
fn test_install_once_then_global() {
    assert_eq!(
        CreatorRegistry::global().unwrap_err(),
        ParcelError::RegistryNotInstalled
    );

    let mut builder = CreatorRegistry::builder();
    payload::register_all(&mut builder).expect("register should succeed");
    let installed = builder.build().install().expect("first install should succeed");
    assert_eq!(installed.len(), 4);

    let global = CreatorRegistry::global().expect("global should be installed");
    assert!(std::ptr::eq(installed, global));

    let bytes = encode_tagged(&Status::new(0, "ok")).expect("encode");
    let decoded = global
        .decode_any(&bytes, &DecodeOptions::default())
        .expect("decode through global registry");
    assert!(decoded.is::<Status>());

    // A second install is rejected and leaves the first registry in place.
    let err = CreatorRegistry::builder().build().install().unwrap_err();
    assert_eq!(err, ParcelError::RegistryAlreadyInstalled);
    let global = CreatorRegistry::global().expect("still installed");
    assert!(global.contains(Status::TYPE_TOKEN));
}
