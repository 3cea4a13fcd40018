// Path: crates/types/src/app/identity.rs

//! Defines the canonical `AccountId` and the single, deterministic function
//! used to derive it from a cryptographic public key.
//!
//! This module is the source of truth for identity across the workspace: a
//! user and a serving node are both addressed by an `AccountId`, and every
//! component that verifies a signature resolves the signer's public key
//! through the same handle.

use crate::error::CryptoError;
use dcrypt::algorithms::hash::{HashFunction, Sha256 as DcryptSha256};
use dcrypt::algorithms::ByteSerializable;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A unique, stable identifier for a signing party, derived from the hash of
/// a public key.
///
/// The `AccountId` stays constant even if the underlying key material is
/// re-encoded, providing a persistent handle for users and serving nodes. It
/// is represented as a 32-byte array.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Default,
    Hash,
)]
pub struct AccountId(pub [u8; 32]);

impl AsRef<[u8]> for AccountId {
    /// Allows treating the `AccountId` as a byte slice.
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for AccountId {
    /// Allows creating an `AccountId` directly from a 32-byte array.
    fn from(hash: [u8; 32]) -> Self {
        Self(hash)
    }
}

/// Defines the cryptographic algorithm suite used for a key or signature.
///
/// Instead of a closed enum, this uses an `i32` identifier compatible with
/// the IANA COSE Algorithms Registry. This provides cryptographic agility:
/// new suites can be introduced under new proof versions without breaking
/// verification of older proofs.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Default,
)]
#[serde(transparent)]
pub struct SignatureSuite(pub i32);

impl SignatureSuite {
    /// Ed25519 (Pure). IANA COSE ID: -8.
    pub const ED25519: Self = Self(-8);
}

/// Derives a canonical, deterministic `AccountId` from a public key's raw
/// material.
///
/// This is the single source of truth for identity derivation across the
/// workspace. It uses a domain-separated SHA-256 hash and includes the suite
/// tag in the preimage so the output cannot collide between key types.
pub fn account_id_from_key_material(
    suite: SignatureSuite,
    public_key: &[u8],
) -> Result<AccountId, CryptoError> {
    // Concatenate all parts to be hashed into a single buffer.
    let mut data_to_hash = Vec::new();
    // Domain separate the hash to prevent collisions with other parts of the system.
    data_to_hash.extend_from_slice(b"POI-ACCOUNT-ID::V1");

    // Include the i32 suite ID in the hash preimage to bind the ID to the
    // algorithm. Big endian for consistency across architectures.
    data_to_hash.extend_from_slice(&suite.0.to_be_bytes());

    if suite == SignatureSuite::ED25519 && public_key.len() != 32 {
        return Err(CryptoError::InvalidKey(format!(
            "Ed25519 public key must be 32 bytes, got {}",
            public_key.len()
        )));
    }
    data_to_hash.extend_from_slice(public_key);

    let hash_bytes = DcryptSha256::digest(&data_to_hash)
        .map_err(|e| CryptoError::OperationFailed(format!("Hashing failed: {}", e)))?
        .to_bytes();

    hash_bytes
        .try_into()
        .map(AccountId)
        .map_err(|v: Vec<u8>| CryptoError::InvalidHashLength {
            expected: 32,
            got: v.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_is_deterministic() {
        let key = [7u8; 32];
        let a = account_id_from_key_material(SignatureSuite::ED25519, &key).unwrap();
        let b = account_id_from_key_material(SignatureSuite::ED25519, &key).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn account_id_binds_suite() {
        let key = [7u8; 32];
        let ed = account_id_from_key_material(SignatureSuite::ED25519, &key).unwrap();
        let other = account_id_from_key_material(SignatureSuite(-100), &key).unwrap();
        assert_ne!(ed, other);
    }

    #[test]
    fn malformed_ed25519_key_is_rejected() {
        let err = account_id_from_key_material(SignatureSuite::ED25519, &[1u8; 16]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey(_)));
    }
}
