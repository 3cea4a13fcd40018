// Path: crates/protocol/src/wire.rs

//! The versioned JSON wire format for `SignedSelection` proofs.
//!
//! Digests, addresses, and signatures travel as `0x`-prefixed lowercase hex
//! strings; field names are camelCase. Decoding validates everything the
//! type system cannot: the version, hex well-formedness, digest lengths, and
//! attestation field consistency.

use poi_types::app::{suite_for_version, AccountId, SignedSelection};
use poi_types::error::WireError;
use poi_types::DIGEST_BYTES;
use serde::{Deserialize, Serialize};

/// The JSON shape of a proof on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProofEnvelope {
    /// The proof format version.
    pub version: u16,
    /// Hex of the 32-byte content hash of the raw input message.
    pub original_hash: String,
    /// The exact text the user committed to.
    pub selected_text: String,
    /// Hex of the user's identity handle.
    pub user_address: String,
    /// Hex of the user's detached signature.
    pub user_signature: String,
    /// Hex of the attesting node's identity handle, or `null`.
    pub node_address: Option<String>,
    /// Hex of the node's detached signature, or `null`.
    pub node_signature: Option<String>,
    /// Unix time (seconds) of the selection.
    pub timestamp: u64,
    /// Hex of the proof fingerprint.
    pub proof_hash: String,
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn from_hex(field: &'static str, value: &str) -> Result<Vec<u8>, WireError> {
    let stripped = value.strip_prefix("0x").ok_or(WireError::BadHex {
        field,
        reason: "missing 0x prefix".into(),
    })?;
    hex::decode(stripped).map_err(|e| WireError::BadHex {
        field,
        reason: e.to_string(),
    })
}

fn from_hex_32(field: &'static str, value: &str) -> Result<[u8; 32], WireError> {
    let bytes = from_hex(field, value)?;
    let got = bytes.len();
    bytes.try_into().map_err(|_| WireError::BadLength {
        field,
        expected: DIGEST_BYTES,
        got,
    })
}

impl ProofEnvelope {
    /// Encodes a proof into its wire shape.
    pub fn from_proof(proof: &SignedSelection) -> Self {
        Self {
            version: proof.version,
            original_hash: to_hex(&proof.original_hash),
            selected_text: proof.selected_text.clone(),
            user_address: to_hex(proof.user_address.as_ref()),
            user_signature: to_hex(&proof.user_signature),
            node_address: proof.node_address.as_ref().map(|a| to_hex(a.as_ref())),
            node_signature: proof.node_signature.as_deref().map(to_hex),
            timestamp: proof.timestamp,
            proof_hash: to_hex(&proof.proof_hash),
        }
    }

    /// Validates the envelope and converts it back into a proof.
    pub fn into_proof(self) -> Result<SignedSelection, WireError> {
        if suite_for_version(self.version).is_none() {
            return Err(WireError::UnsupportedVersion(self.version));
        }

        let (node_address, node_signature) = match (self.node_address, self.node_signature) {
            (None, None) => (None, None),
            (Some(addr), Some(sig)) => (
                Some(AccountId(from_hex_32("nodeAddress", &addr)?)),
                Some(from_hex("nodeSignature", &sig)?),
            ),
            _ => return Err(WireError::PartialAttestation),
        };

        Ok(SignedSelection {
            version: self.version,
            original_hash: from_hex_32("originalHash", &self.original_hash)?,
            selected_text: self.selected_text,
            user_address: AccountId(from_hex_32("userAddress", &self.user_address)?),
            user_signature: from_hex("userSignature", &self.user_signature)?,
            node_address,
            node_signature,
            timestamp: self.timestamp,
            proof_hash: from_hex_32("proofHash", &self.proof_hash)?,
        })
    }
}

/// Serializes a proof to its JSON wire form.
pub fn encode_proof(proof: &SignedSelection) -> Result<String, WireError> {
    Ok(serde_json::to_string(&ProofEnvelope::from_proof(proof))?)
}

/// Parses and validates a proof from its JSON wire form.
///
/// Wire decoding checks shape only; cryptographic validity is the
/// verifier's job.
pub fn decode_proof(json: &str) -> Result<SignedSelection, WireError> {
    let envelope: ProofEnvelope = serde_json::from_str(json)?;
    envelope.into_proof()
}
