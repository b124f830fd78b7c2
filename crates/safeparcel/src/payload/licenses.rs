// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Records exchanged with the open-source license service.

use crate::SafeParcelable;

/// One third-party license: where its text lives inside a resource file.
#[derive(Debug, Clone, Default, PartialEq, Eq, SafeParcelable)]
#[safeparcel(token = "com.google.android.gms.oss.licenses.License")]
pub struct License {
    #[safeparcel(id = 1)]
    pub name: String,
    /// Byte offset of the license text in `path`.
    #[safeparcel(id = 2)]
    pub offset: i64,
    #[safeparcel(id = 3)]
    pub length: i32,
    #[safeparcel(id = 4)]
    pub path: String,
}

impl License {
    pub fn new(name: impl Into<String>, offset: i64, length: i32, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offset,
            length,
            path: path.into(),
        }
    }
}

/// Licenses returned by a single lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, SafeParcelable)]
#[safeparcel(token = "com.google.android.gms.oss.licenses.LicenseList")]
pub struct LicenseList {
    #[safeparcel(id = 1)]
    pub licenses: Vec<License>,
}
