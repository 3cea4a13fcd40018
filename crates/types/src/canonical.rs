// Path: crates/types/src/canonical.rs

//! Canonical, domain-separated byte preimages for everything the protocol
//! hashes or signs.
//!
//! Every preimage is built here and nowhere else. The layout rules are:
//!
//! - each preimage opens with an ASCII domain tag (`POI-…::V1`) so bytes
//!   signed for one purpose can never verify for another;
//! - text is NFC-normalized, UTF-8 encoded, and length-prefixed with a
//!   fixed-width big-endian `u32` byte count, so `("ab", "c")` and
//!   `("a", "bc")` can never canonicalize identically;
//! - integers are fixed-width big-endian;
//! - variable-length byte strings are `u32` big-endian length-prefixed;
//! - an absent optional field encodes as a single `0u8`, a present one as
//!   `1u8` followed by its payload.
//!
//! Later signatures take earlier signatures as preimage input, so the causal
//! order of the protocol steps is enforced cryptographically, not just in
//! code.

use crate::app::identity::AccountId;
use crate::error::CryptoError;
use dcrypt::algorithms::hash::{HashFunction, Sha256 as DcryptSha256};
use dcrypt::algorithms::ByteSerializable;
use unicode_normalization::UnicodeNormalization;

/// Domain tag for hashing a raw input message into `original_hash`.
const DOMAIN_MESSAGE: &[u8] = b"POI-MSG::V1";
/// Domain tag for the bytes a user signs when committing to a selection.
const DOMAIN_SELECTION: &[u8] = b"POI-SELECTION::V1";
/// Domain tag for the bytes a serving node signs when attesting.
const DOMAIN_ATTESTATION: &[u8] = b"POI-ATTEST::V1";
/// Domain tag for the proof fingerprint over all assembled fields.
const DOMAIN_PROOF: &[u8] = b"POI-PROOF::V1";

/// Appends NFC-normalized, length-prefixed UTF-8 text to `buf`.
fn put_text(buf: &mut Vec<u8>, text: &str) -> Result<(), CryptoError> {
    let normalized: String = text.nfc().collect();
    let bytes = normalized.as_bytes();
    let len = u32::try_from(bytes.len()).map_err(|_| {
        CryptoError::InvalidInput(format!(
            "Text of {} bytes exceeds the canonical length prefix",
            bytes.len()
        ))
    })?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Appends a length-prefixed opaque byte string to `buf`.
fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) -> Result<(), CryptoError> {
    let len = u32::try_from(bytes.len()).map_err(|_| {
        CryptoError::InvalidInput(format!(
            "Byte string of {} bytes exceeds the canonical length prefix",
            bytes.len()
        ))
    })?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Hashes an already-canonical preimage into a 32-byte digest.
fn digest(preimage: &[u8]) -> Result<[u8; 32], CryptoError> {
    let hash_bytes = DcryptSha256::digest(preimage)
        .map_err(|e| CryptoError::OperationFailed(format!("Hashing failed: {}", e)))?
        .to_bytes();
    hash_bytes
        .try_into()
        .map_err(|v: Vec<u8>| CryptoError::InvalidHashLength {
            expected: crate::DIGEST_BYTES,
            got: v.len(),
        })
}

/// Computes the content hash of a raw input message (`original_hash`).
pub fn message_hash(message: &str) -> Result<[u8; 32], CryptoError> {
    let mut buf = Vec::with_capacity(DOMAIN_MESSAGE.len() + 4 + message.len());
    buf.extend_from_slice(DOMAIN_MESSAGE);
    put_text(&mut buf, message)?;
    digest(&buf)
}

/// Builds the exact bytes a user signs to commit to a selection:
/// `(selected_text, timestamp)`.
pub fn selection_preimage(selected_text: &str, timestamp: u64) -> Result<Vec<u8>, CryptoError> {
    let mut buf = Vec::with_capacity(DOMAIN_SELECTION.len() + 4 + selected_text.len() + 8);
    buf.extend_from_slice(DOMAIN_SELECTION);
    put_text(&mut buf, selected_text)?;
    buf.extend_from_slice(&timestamp.to_be_bytes());
    Ok(buf)
}

/// Builds the exact bytes a serving node signs to attest a selection:
/// `(original_hash, selected_text, user_signature)`.
///
/// The user signature is part of the preimage, chaining the node's
/// attestation causally after the user's commitment.
pub fn attestation_preimage(
    original_hash: &[u8; 32],
    selected_text: &str,
    user_signature: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let mut buf = Vec::new();
    buf.extend_from_slice(DOMAIN_ATTESTATION);
    buf.extend_from_slice(original_hash);
    put_text(&mut buf, selected_text)?;
    put_bytes(&mut buf, user_signature)?;
    Ok(buf)
}

/// Computes the proof fingerprint (`proof_hash`) over every other proof
/// field.
///
/// The signer handles are included so that swapping either address yields a
/// different fingerprint even before any signature is checked.
#[allow(clippy::too_many_arguments)]
pub fn proof_hash(
    original_hash: &[u8; 32],
    selected_text: &str,
    user_address: &AccountId,
    user_signature: &[u8],
    node_address: Option<&AccountId>,
    node_signature: Option<&[u8]>,
    timestamp: u64,
) -> Result<[u8; 32], CryptoError> {
    let mut buf = Vec::new();
    buf.extend_from_slice(DOMAIN_PROOF);
    buf.extend_from_slice(original_hash);
    put_text(&mut buf, selected_text)?;
    buf.extend_from_slice(user_address.as_ref());
    put_bytes(&mut buf, user_signature)?;
    match node_address {
        Some(addr) => {
            buf.push(1);
            buf.extend_from_slice(addr.as_ref());
        }
        None => buf.push(0),
    }
    match node_signature {
        Some(sig) => {
            buf.push(1);
            put_bytes(&mut buf, sig)?;
        }
        None => buf.push(0),
    }
    buf.extend_from_slice(&timestamp.to_be_bytes());
    digest(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_prefix_prevents_boundary_ambiguity() {
        // ("ab", "c") and ("a", "bc") must not canonicalize identically.
        let ab_c = attestation_preimage(&[0u8; 32], "ab", b"c").unwrap();
        let a_bc = attestation_preimage(&[0u8; 32], "a", b"bc").unwrap();
        assert_ne!(ab_c, a_bc);
    }

    #[test]
    fn text_is_nfc_normalized() {
        // U+00E9 (precomposed) vs U+0065 U+0301 (decomposed) are the same
        // text after NFC and must hash identically.
        let precomposed = "r\u{00e9}sum\u{00e9}";
        let decomposed = "re\u{0301}sume\u{0301}";
        assert_ne!(precomposed.as_bytes(), decomposed.as_bytes());
        assert_eq!(
            message_hash(precomposed).unwrap(),
            message_hash(decomposed).unwrap()
        );
    }

    #[test]
    fn timestamps_are_big_endian_fixed_width() {
        let a = selection_preimage("x", 1).unwrap();
        let b = selection_preimage("x", 256).unwrap();
        assert_eq!(a.len(), b.len());
        assert_ne!(a, b);
        // The final 8 bytes are the big-endian timestamp.
        assert_eq!(&a[a.len() - 8..], &1u64.to_be_bytes());
    }

    #[test]
    fn domains_are_separated() {
        // Bytes signed for one purpose must never open with another
        // purpose's tag.
        let selection = selection_preimage("hello", 0).unwrap();
        assert!(selection.starts_with(DOMAIN_SELECTION));
        assert!(!selection.starts_with(DOMAIN_ATTESTATION));
        assert!(!selection.starts_with(DOMAIN_PROOF));
    }

    #[test]
    fn proof_hash_is_sensitive_to_every_field() {
        let base = || {
            proof_hash(
                &[1u8; 32],
                "text",
                &AccountId([2u8; 32]),
                b"user-sig",
                Some(&AccountId([3u8; 32])),
                Some(b"node-sig"),
                42,
            )
            .unwrap()
        };
        let reference = base();
        let changed_text = proof_hash(
            &[1u8; 32],
            "texT",
            &AccountId([2u8; 32]),
            b"user-sig",
            Some(&AccountId([3u8; 32])),
            Some(b"node-sig"),
            42,
        )
        .unwrap();
        let changed_ts = proof_hash(
            &[1u8; 32],
            "text",
            &AccountId([2u8; 32]),
            b"user-sig",
            Some(&AccountId([3u8; 32])),
            Some(b"node-sig"),
            43,
        )
        .unwrap();
        let absent_node = proof_hash(
            &[1u8; 32],
            "text",
            &AccountId([2u8; 32]),
            b"user-sig",
            None,
            None,
            42,
        )
        .unwrap();
        assert_eq!(reference, base());
        assert_ne!(reference, changed_text);
        assert_ne!(reference, changed_ts);
        assert_ne!(reference, absent_node);
    }
}
