// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::SafeParcelable;

/// Result of a remote call.
#[derive(Debug, Clone, Default, PartialEq, Eq, SafeParcelable)]
#[safeparcel(token = "com.google.android.gms.common.api.Status")]
pub struct Status {
    #[safeparcel(id = 1, required)]
    pub status_code: i32,
    #[safeparcel(id = 2)]
    pub status_message: String,
}

impl Status {
    pub const SUCCESS: i32 = 0;

    pub fn new(status_code: i32, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == Self::SUCCESS
    }
}
