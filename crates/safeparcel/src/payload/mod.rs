// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in payload types.

pub mod auth;
pub mod licenses;
pub mod status;

pub use auth::UnlinkFederatedCredentialAidlRequest;
pub use licenses::{License, LicenseList};
pub use status::Status;

use crate::creator::CreatorRegistryBuilder;
use crate::error::ParcelResult;

/// Register every built-in payload type.
pub fn register_all(builder: &mut CreatorRegistryBuilder) -> ParcelResult<()> {
    builder
        .register_type::<UnlinkFederatedCredentialAidlRequest>()?
        .register_type::<License>()?
        .register_type::<LicenseList>()?
        .register_type::<Status>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creator::CreatorRegistry;

    #[test]
    fn test_register_all() {
        let mut builder = CreatorRegistry::builder();
        register_all(&mut builder).expect("register");
        let registry = builder.build();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains("com.google.android.gms.common.api.Status"));
    }

    #[test]
    fn test_register_all_twice_collides() {
        let mut builder = CreatorRegistry::builder();
        register_all(&mut builder).expect("register");
        let err = register_all(&mut builder).unwrap_err();
        assert!(err.is_registration_error());
    }
}
