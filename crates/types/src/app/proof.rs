// Path: crates/types/src/app/proof.rs

//! The `SignedSelection` proof, the central immutable entity of the
//! protocol, and the per-node reputation record derived from verification
//! outcomes.

use crate::app::identity::{AccountId, SignatureSuite};
use crate::canonical;
use crate::error::CryptoError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// The current proof format version.
///
/// The version binds the proof to its concrete primitives: bumping the
/// suite or the hash function means bumping the version, so older proofs
/// stay verifiable under their original scheme.
pub const PROOF_VERSION: u16 = 1;

/// Returns the signature suite a proof version was issued under, or `None`
/// for versions this implementation does not know.
pub fn suite_for_version(version: u16) -> Option<SignatureSuite> {
    match version {
        1 => Some(SignatureSuite::ED25519),
        _ => None,
    }
}

/// A cryptographically verifiable record that a specific user deliberately
/// selected a specific text, optionally attested by the serving node.
///
/// A `SignedSelection` is created once by the assembler and never mutated
/// afterward; verification is a pure read. Every field needed for
/// verification is embedded here: no component may assume any prior step's
/// in-memory result is still available.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct SignedSelection {
    /// The proof format version; implies the signature suite and hash.
    pub version: u16,
    /// 32-byte content hash of the raw input message.
    pub original_hash: [u8; 32],
    /// The exact text the user committed to.
    pub selected_text: String,
    /// The identity handle of the selecting user.
    pub user_address: AccountId,
    /// Detached user signature over `canonical(selected_text, timestamp)`.
    pub user_signature: Vec<u8>,
    /// The identity handle of the attesting node, absent in pure-client mode.
    pub node_address: Option<AccountId>,
    /// Detached node signature over
    /// `canonical(original_hash, selected_text, user_signature)`, absent in
    /// pure-client mode.
    pub node_signature: Option<Vec<u8>>,
    /// Unix time (seconds) of the selection; set once, never mutated.
    pub timestamp: u64,
    /// Content hash over every field above.
    pub proof_hash: [u8; 32],
}

impl SignedSelection {
    /// The exact bytes the user's signature must verify against.
    pub fn user_sign_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        canonical::selection_preimage(&self.selected_text, self.timestamp)
    }

    /// The exact bytes the node's signature must verify against.
    pub fn node_sign_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        canonical::attestation_preimage(
            &self.original_hash,
            &self.selected_text,
            &self.user_signature,
        )
    }

    /// Recomputes the proof fingerprint from the other fields.
    pub fn compute_proof_hash(&self) -> Result<[u8; 32], CryptoError> {
        canonical::proof_hash(
            &self.original_hash,
            &self.selected_text,
            &self.user_address,
            &self.user_signature,
            self.node_address.as_ref(),
            self.node_signature.as_deref(),
            self.timestamp,
        )
    }

    /// Whether this proof carries a node attestation.
    pub fn is_node_attested(&self) -> bool {
        self.node_signature.is_some()
    }
}

/// A per-node quality signal derived from verified attestation history.
///
/// Lives only in process memory of whichever component aggregates
/// attestations; restart resets it. It is an external weighting signal, not
/// a correctness gate; each attestation stays independently verifiable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeReputation {
    /// The node this record describes.
    pub node_id: AccountId,
    /// Attestations by this node that verified.
    pub verified_count: u64,
    /// Attestations by this node that failed verification.
    pub failed_count: u64,
    /// `verified / (verified + failed)`, decayed toward the neutral prior
    /// when decay is enabled; `0.5` for a node with no history.
    pub score: f64,
}

/// Returns the current unix time in seconds.
///
/// A clock before the epoch yields zero rather than a panic; every
/// downstream freshness check then fails closed.
pub fn unix_time_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical;

    fn sample() -> SignedSelection {
        SignedSelection {
            version: PROOF_VERSION,
            original_hash: canonical::message_hash("raw message").unwrap(),
            selected_text: "selected".into(),
            user_address: AccountId([1u8; 32]),
            user_signature: vec![2u8; 64],
            node_address: Some(AccountId([3u8; 32])),
            node_signature: Some(vec![4u8; 64]),
            timestamp: 1_735_632_000,
            proof_hash: [0u8; 32],
        }
    }

    #[test]
    fn proof_hash_recomputation_is_deterministic() {
        let mut proof = sample();
        proof.proof_hash = proof.compute_proof_hash().unwrap();
        assert_eq!(proof.proof_hash, proof.compute_proof_hash().unwrap());
    }

    #[test]
    fn proof_hash_excludes_itself() {
        let mut proof = sample();
        proof.proof_hash = proof.compute_proof_hash().unwrap();
        let fingerprint = proof.proof_hash;
        // Scribbling over the embedded hash must not change the recomputation.
        proof.proof_hash = [0xff; 32];
        assert_eq!(fingerprint, proof.compute_proof_hash().unwrap());
    }

    #[test]
    fn unknown_versions_have_no_suite() {
        assert_eq!(suite_for_version(1), Some(SignatureSuite::ED25519));
        assert_eq!(suite_for_version(2), None);
    }

    #[test]
    fn scale_roundtrip() {
        let mut proof = sample();
        proof.proof_hash = proof.compute_proof_hash().unwrap();
        let bytes = crate::codec::to_bytes_canonical(&proof).unwrap();
        let decoded: SignedSelection = crate::codec::from_bytes_canonical(&bytes).unwrap();
        assert_eq!(proof, decoded);
    }
}
