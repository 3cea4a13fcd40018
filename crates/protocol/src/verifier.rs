// Path: crates/protocol/src/verifier.rs

//! Pure verification of a `SignedSelection`, independent of how it was
//! assembled.
//!
//! Verification is a read: given only the proof object, an identity
//! resolver, and the protocol configuration, it recomputes the fingerprint,
//! checks both signatures, and checks freshness. The result distinguishes
//! which guarantee broke: downstream consumers (governance, dispute
//! resolution) need to know *which*, never just a single boolean.

use crate::assembler::verify_detached;
use poi_api::identity::IdentityResolver;
use poi_types::app::{suite_for_version, SignedSelection};
use poi_types::config::ProtocolConfig;
use poi_types::error::{ErrorCode, StalenessError};

/// The outcome of the node attestation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttestationStatus {
    /// A node signature is present and verifies.
    Valid,
    /// A node signature is present but does not verify, is malformed, or
    /// carries no resolvable node identity.
    Invalid,
    /// The proof carries no node attestation (pure-client mode). This is
    /// exposed explicitly; absence is never silently treated as valid
    /// dual-attestation.
    Absent,
}

/// The structured result of verifying one proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// Whether the recomputed proof fingerprint matches the embedded one.
    /// A `false` here is fatal for the proof; there is no recovery path.
    pub hash_valid: bool,
    /// Whether the user signature verifies for exactly
    /// `(selected_text, timestamp)` under the user's resolved key.
    pub user_valid: bool,
    /// The node attestation check outcome.
    pub node_attestation: AttestationStatus,
    /// Present when the proof's timestamp falls outside the tolerance
    /// window, even if every signature is otherwise valid.
    pub staleness: Option<StalenessError>,
}

impl VerificationReport {
    /// Whether every applicable check passed.
    ///
    /// With `require_node_attestation` set, an absent attestation fails the
    /// proof; otherwise a user-attested-only proof can be fully valid.
    pub fn is_fully_valid(&self, require_node_attestation: bool) -> bool {
        let node_ok = match self.node_attestation {
            AttestationStatus::Valid => true,
            AttestationStatus::Invalid => false,
            AttestationStatus::Absent => !require_node_attestation,
        };
        self.hash_valid && self.user_valid && node_ok && self.staleness.is_none()
    }
}

/// Verifies a `SignedSelection` as a pure function of the proof itself.
///
/// `now` is the verifier's clock (unix seconds); passing it explicitly keeps
/// the function deterministic and idempotent for a fixed time.
pub fn verify_proof(
    proof: &SignedSelection,
    resolver: &dyn IdentityResolver,
    config: &ProtocolConfig,
    now: u64,
) -> VerificationReport {
    let suite = suite_for_version(proof.version);

    // Integrity: recompute the fingerprint over every other field.
    let hash_valid = match proof.compute_proof_hash() {
        Ok(recomputed) => recomputed == proof.proof_hash,
        Err(e) => {
            log::warn!("Proof fingerprint recomputation failed: {}", e.code());
            false
        }
    };

    // User commitment: exact preimage, resolved identity, exact signature.
    let user_valid = match (suite, proof.user_sign_bytes()) {
        (Some(suite), Ok(preimage)) => verify_detached(
            suite,
            &proof.user_address,
            resolver,
            &preimage,
            &proof.user_signature,
        )
        .map_err(|e| log::debug!("User signature check failed: {}", e.code()))
        .is_ok(),
        _ => false,
    };

    // Node attestation: chained over the user signature when present.
    let node_attestation = match (&proof.node_address, &proof.node_signature) {
        (None, None) => AttestationStatus::Absent,
        (Some(node_address), Some(node_signature)) => {
            match (suite, proof.node_sign_bytes()) {
                (Some(suite), Ok(preimage)) => {
                    match verify_detached(suite, node_address, resolver, &preimage, node_signature)
                    {
                        Ok(()) => AttestationStatus::Valid,
                        Err(e) => {
                            log::debug!("Node attestation check failed: {}", e.code());
                            AttestationStatus::Invalid
                        }
                    }
                }
                _ => AttestationStatus::Invalid,
            }
        }
        // An address without a signature (or the reverse) is malformed.
        _ => AttestationStatus::Invalid,
    };

    let staleness = config.check_freshness(proof.timestamp, now).err();

    VerificationReport {
        hash_valid,
        user_valid,
        node_attestation,
        staleness,
    }
}
