// Path: crates/api/src/crypto/mod.rs
//! Defines unified traits for cryptographic primitives.
//!
//! The protocol core is abstracted over the concrete signature scheme: the
//! assembler and verifier speak only these traits, and the proof's version
//! field records which suite actually produced a given proof.

use crate::error::CryptoError;

/// A trait for any key that can be serialized to and from bytes.
pub trait SerializableKey {
    /// Converts the key to a byte vector.
    fn to_bytes(&self) -> Vec<u8>;

    /// Creates a key from a byte slice.
    ///
    /// Truncated or extended input is rejected here, before any
    /// verification is attempted.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError>
    where
        Self: Sized;
}

/// A trait for a key pair used in a signature algorithm.
pub trait SigningKeyPair {
    /// The public key type used for verification.
    type PublicKey: VerifyingKey<Signature = Self::Signature>;
    /// The private key type used for signing.
    type PrivateKey: SigningKey<Signature = Self::Signature>;
    /// The signature type produced.
    type Signature: Signature;

    /// Gets the public key.
    fn public_key(&self) -> Self::PublicKey;
    /// Gets the private key.
    fn private_key(&self) -> Self::PrivateKey;
    /// Signs a message with the private key.
    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError>;
}

/// A trait for a public key used for signature verification.
///
/// Verification is deterministic and exact-match: a signature verifies for
/// precisely one byte string or it fails with
/// [`CryptoError::VerificationFailed`].
pub trait VerifyingKey: SerializableKey {
    /// The signature type that this key can verify.
    type Signature: Signature;
    /// Verifies a signature against a message.
    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError>;
}

/// A trait for a private key used for signing operations.
pub trait SigningKey: SerializableKey {
    /// The signature type that this key produces.
    type Signature: Signature;
    /// Signs a message.
    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError>;
}

/// A marker trait for a cryptographic signature.
pub trait Signature: SerializableKey {}
