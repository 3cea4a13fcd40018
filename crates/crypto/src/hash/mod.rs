// Path: crates/crypto/src/hash/mod.rs
//! Cryptographic hash functions using dcrypt

use crate::error::CryptoError;
use dcrypt::algorithms::hash::sha2::Sha256 as DcryptSha256;
use dcrypt::algorithms::hash::HashFunction as DcryptHashFunction;
use dcrypt::algorithms::ByteSerializable;

/// Hash function trait
pub trait HashFunction {
    /// Hash a message and return the digest
    fn hash(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Get the digest size in bytes
    fn digest_size(&self) -> usize;

    /// Get the name of the hash function
    fn name(&self) -> &str;
}

/// SHA-256 hash function implementation using dcrypt.
///
/// This is the fixed hash behind proof version 1: both `original_hash` and
/// `proof_hash` are SHA-256 digests of canonical preimages.
#[derive(Default, Clone)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn hash(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        // Map the specific algorithm error to the general `dcrypt::Error`
        // to resolve the ambiguity for the `?` operator.
        let digest = DcryptSha256::digest(message).map_err(dcrypt::Error::from)?;
        Ok(digest.to_bytes())
    }

    fn digest_size(&self) -> usize {
        32 // 256 bits = 32 bytes
    }

    fn name(&self) -> &str {
        "SHA-256"
    }
}

/// Create a SHA-256 hash of any type that can be referenced as bytes
pub fn sha256<T: AsRef<[u8]>>(data: T) -> Result<[u8; 32], CryptoError> {
    let hasher = Sha256Hash;
    hasher
        .hash(data.as_ref())?
        .try_into()
        .map_err(|bytes: Vec<u8>| CryptoError::InvalidHashLength {
            expected: 32,
            got: bytes.len(),
        })
}

#[cfg(test)]
mod tests;
