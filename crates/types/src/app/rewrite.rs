// Path: crates/types/src/app/rewrite.rs

//! Data structures for the rewrite-generation boundary: the request a user
//! submits, the candidates the backend produces, and the selection the user
//! echoes back.
//!
//! None of these structures is ever persisted; they exist only within one
//! request's lifetime.

use crate::app::identity::AccountId;
use crate::codec;
use crate::error::CryptoError;
use dcrypt::algorithms::hash::{HashFunction, Sha256 as DcryptSha256};
use dcrypt::algorithms::ByteSerializable;
use serde::{Deserialize, Serialize};

/// The rhetorical register a rewrite should target.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStyle {
    /// Neutral business language.
    Formal,
    /// Softened, de-escalating language.
    Diplomatic,
    /// Precise language for an engineering audience.
    Technical,
    /// Persuasive, outward-facing language.
    Marketing,
    /// The register of a governance proposal.
    DaoProposal,
}

/// A validated request for rewrite candidates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
    /// The raw message to be rewritten. Non-empty, bounded by
    /// `ProtocolConfig::max_message_length`.
    pub message: String,
    /// The target register.
    pub style: RewriteStyle,
    /// A free-form description of the intended audience.
    pub audience: String,
}

/// One AI-generated rewrite candidate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RewriteCandidate {
    /// Position of this candidate within its set.
    pub index: u32,
    /// The candidate text.
    pub text: String,
    /// Backend-reported confidence in `[0, 1]`.
    pub confidence: f32,
}

/// An opaque token correlating a selection to the candidate set that
/// produced it.
///
/// Because the core is stateless, the token is not a server-side lookup key:
/// it is the content digest of the candidate set, re-derivable by anyone
/// holding the same candidates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub [u8; 32]);

impl AsRef<[u8]> for RequestId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The user's selection of one candidate, echoed back with enough context
/// that no server-side state is needed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SelectionInput {
    /// Digest of the candidate set this selection refers to.
    pub request_id: RequestId,
    /// The index of the chosen candidate.
    pub selected_index: u32,
    /// The identity handle of the selecting user.
    pub user_address: AccountId,
    /// The user's detached signature over the canonical selection preimage.
    pub user_signature: Vec<u8>,
}

/// Computes the content digest identifying a candidate set.
///
/// Only `(index, text)` pairs enter the digest: confidence scores are
/// backend-reported floats and deliberately excluded from identity.
pub fn candidate_set_digest(candidates: &[RewriteCandidate]) -> Result<RequestId, CryptoError> {
    let pairs: Vec<(u32, &str)> = candidates
        .iter()
        .map(|c| (c.index, c.text.as_str()))
        .collect();
    let encoded = codec::to_bytes_canonical(&pairs).map_err(CryptoError::InvalidInput)?;

    let mut preimage = Vec::with_capacity(16 + encoded.len());
    preimage.extend_from_slice(b"POI-CANDIDATES::V1");
    preimage.extend_from_slice(&encoded);

    let hash_bytes = DcryptSha256::digest(&preimage)
        .map_err(|e| CryptoError::OperationFailed(format!("Hashing failed: {}", e)))?
        .to_bytes();
    hash_bytes
        .try_into()
        .map(RequestId)
        .map_err(|v: Vec<u8>| CryptoError::InvalidHashLength {
            expected: 32,
            got: v.len(),
        })
}
