// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Federated-credential requests of the authentication service.

use crate::SafeParcelable;

/// Request to unlink a federated credential. Carries no fields: its
/// envelope is the four-byte header alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, SafeParcelable)]
#[safeparcel(token = "com.google.firebase.auth.api.internal.UnlinkFederatedCredentialAidlRequest")]
pub struct UnlinkFederatedCredentialAidlRequest;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode, encode_tagged, peek_type_token};

    #[test]
    fn test_empty_envelope() {
        let bytes = encode(&UnlinkFederatedCredentialAidlRequest).expect("encode");
        assert_eq!(bytes, vec![4, 0, 0, 0]);
        assert_eq!(
            decode::<UnlinkFederatedCredentialAidlRequest>(&bytes).expect("decode"),
            UnlinkFederatedCredentialAidlRequest
        );
    }

    #[test]
    fn test_tagged_envelope_names_request() {
        let bytes = encode_tagged(&UnlinkFederatedCredentialAidlRequest).expect("encode");
        assert_eq!(
            peek_type_token(&bytes).expect("peek").as_deref(),
            Some("com.google.firebase.auth.api.internal.UnlinkFederatedCredentialAidlRequest")
        );
    }
}
