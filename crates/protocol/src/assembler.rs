// Path: crates/protocol/src/assembler.rs

//! The selection pipeline state machine and the proof assembly operations.
//!
//! One pipeline instance serves one rewrite+selection flow. Steps are
//! strictly sequential because each signature's preimage includes the
//! previous step's output; the causal order is enforced by the byte layout,
//! not just by this state machine.

use poi_api::crypto::{SerializableKey, SigningKeyPair, VerifyingKey};
use poi_api::identity::IdentityResolver;
use poi_api::rewrite::{generate_with_timeout, RewriteBackend};
use poi_crypto::sign::eddsa::{Ed25519PublicKey, Ed25519Signature};
use poi_types::app::{
    account_id_from_key_material, candidate_set_digest, AccountId, RequestId, RewriteCandidate,
    RewriteRequest, SelectionInput, SignatureSuite, SignedSelection, PROOF_VERSION,
};
use poi_types::canonical;
use poi_types::config::ProtocolConfig;
use poi_types::error::{
    AssemblyError, CryptoError, ErrorCode, SigningError, ValidationError,
};
use std::time::Duration;

/// The lifecycle states of one selection flow.
///
/// `Rejected` is terminal and reachable from every non-complete state; a
/// rejected pipeline never holds a partially constructed proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Waiting for the external rewrite backend.
    PendingAi,
    /// Candidates exist; waiting for the user to pick one.
    PendingSelection,
    /// A candidate is picked; waiting for the user's signature.
    PendingUserSignature,
    /// The user's commitment verified; waiting for node attestation.
    PendingNodeAttestation,
    /// A `SignedSelection` was produced.
    Complete,
    /// The flow was rejected; no proof exists.
    Rejected,
}

impl PipelineState {
    /// The state's stable name, used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PendingAi => "PENDING_AI",
            Self::PendingSelection => "PENDING_SELECTION",
            Self::PendingUserSignature => "PENDING_USER_SIGNATURE",
            Self::PendingNodeAttestation => "PENDING_NODE_ATTESTATION",
            Self::Complete => "COMPLETE",
            Self::Rejected => "REJECTED",
        }
    }
}

/// The user commitment captured between signature verification and proof
/// construction.
#[derive(Debug, Clone)]
struct UserCommitment {
    user_address: AccountId,
    user_signature: Vec<u8>,
    timestamp: u64,
}

/// Drives one rewrite+selection flow from raw message to `SignedSelection`.
///
/// Abandoning a pipeline at any point has no side effects to clean up:
/// nothing is persisted anywhere.
#[derive(Debug)]
pub struct SelectionPipeline {
    config: ProtocolConfig,
    state: PipelineState,
    request: RewriteRequest,
    original_hash: [u8; 32],
    candidates: Vec<RewriteCandidate>,
    request_id: Option<RequestId>,
    selected_index: Option<u32>,
    commitment: Option<UserCommitment>,
}

impl SelectionPipeline {
    /// Validates the request and opens a pipeline in `PendingAi`.
    pub fn new(request: RewriteRequest, config: ProtocolConfig) -> Result<Self, AssemblyError> {
        if request.message.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }
        if request.message.len() > config.max_message_length {
            return Err(ValidationError::MessageTooLong {
                max: config.max_message_length,
                got: request.message.len(),
            }
            .into());
        }
        let original_hash = canonical::message_hash(&request.message)?;
        Ok(Self {
            config,
            state: PipelineState::PendingAi,
            request,
            original_hash,
            candidates: Vec::new(),
            request_id: None,
            selected_index: None,
            commitment: None,
        })
    }

    /// The pipeline's current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The content hash of the raw input message.
    pub fn original_hash(&self) -> [u8; 32] {
        self.original_hash
    }

    /// The digest identifying the current candidate set, once one exists.
    pub fn request_id(&self) -> Option<RequestId> {
        self.request_id
    }

    /// Moves to `Rejected` and propagates the error.
    fn reject<T>(&mut self, err: AssemblyError) -> Result<T, AssemblyError> {
        log::debug!(
            "Pipeline rejected in state {}: {}",
            self.state.name(),
            err.code()
        );
        self.state = PipelineState::Rejected;
        Err(err)
    }

    fn expect_state(
        &self,
        expected: PipelineState,
        operation: &'static str,
    ) -> Result<(), AssemblyError> {
        if self.state == expected {
            Ok(())
        } else {
            // A wrong-state call is a caller bug, not a protocol rejection:
            // the pipeline stays in its current state.
            Err(AssemblyError::InvalidTransition {
                operation,
                state: self.state.name(),
            })
        }
    }

    fn accept_candidates(&mut self, candidates: Vec<RewriteCandidate>) -> Result<(), AssemblyError> {
        if candidates.is_empty() {
            return self.reject(ValidationError::EmptyCandidateSet.into());
        }
        for candidate in &candidates {
            if !(0.0..=1.0).contains(&candidate.confidence) {
                return self.reject(
                    ValidationError::ConfidenceOutOfRange {
                        index: candidate.index,
                        confidence: candidate.confidence,
                    }
                    .into(),
                );
            }
        }
        let request_id = match candidate_set_digest(&candidates) {
            Ok(id) => id,
            Err(e) => return self.reject(e.into()),
        };
        self.candidates = candidates;
        self.request_id = Some(request_id);
        self.state = PipelineState::PendingSelection;
        Ok(())
    }

    /// Calls the external rewrite backend under a timeout and enters
    /// `PendingSelection` on success.
    ///
    /// Backend failure or timeout rejects the pipeline; it never hangs and
    /// never leaves partial state behind.
    pub async fn generate(
        &mut self,
        backend: &dyn RewriteBackend,
        timeout: Duration,
    ) -> Result<&[RewriteCandidate], AssemblyError> {
        self.expect_state(PipelineState::PendingAi, "generate")?;
        match generate_with_timeout(backend, &self.request, timeout).await {
            Ok(candidates) => {
                self.accept_candidates(candidates)?;
                Ok(&self.candidates)
            }
            Err(e) => self.reject(e.into()),
        }
    }

    /// Supplies an externally generated candidate set instead of calling the
    /// backend, entering `PendingSelection`.
    pub fn supply_candidates(
        &mut self,
        candidates: Vec<RewriteCandidate>,
    ) -> Result<(), AssemblyError> {
        self.expect_state(PipelineState::PendingAi, "supply_candidates")?;
        self.accept_candidates(candidates)
    }

    /// Records the user's choice and returns the ground-truth selected text.
    ///
    /// The candidate text at `selected_index` is the ground truth. If the
    /// caller also echoes the text it believes it selected, a mismatch is a
    /// rejection; the pipeline never silently substitutes.
    pub fn select(
        &mut self,
        selected_index: u32,
        claimed_text: Option<&str>,
    ) -> Result<&str, AssemblyError> {
        self.expect_state(PipelineState::PendingSelection, "select")?;
        let text_matches = match self.candidates.get(selected_index as usize) {
            Some(candidate) => claimed_text.map_or(true, |claimed| claimed == candidate.text),
            None => {
                let len = self.candidates.len();
                return self.reject(
                    ValidationError::IndexOutOfRange {
                        index: selected_index,
                        len,
                    }
                    .into(),
                );
            }
        };
        if !text_matches {
            return self.reject(ValidationError::TextMismatch.into());
        }
        self.selected_index = Some(selected_index);
        self.state = PipelineState::PendingUserSignature;
        self.selected_text()
    }

    fn selected_text(&self) -> Result<&str, AssemblyError> {
        self.selected_index
            .and_then(|i| self.candidates.get(i as usize))
            .map(|c| c.text.as_str())
            .ok_or(AssemblyError::InvalidTransition {
                operation: "selected_text",
                state: self.state.name(),
            })
    }

    /// Verifies the user's detached signature over the canonical selection
    /// preimage and enters `PendingNodeAttestation`.
    ///
    /// The claimed identity must resolve to a public key, the signature must
    /// parse, it must verify for exactly `(selected_text, timestamp)`, and
    /// the timestamp must be fresh.
    pub fn attach_user_signature(
        &mut self,
        user_address: AccountId,
        user_signature: Vec<u8>,
        timestamp: u64,
        resolver: &dyn IdentityResolver,
        now: u64,
    ) -> Result<(), AssemblyError> {
        self.expect_state(PipelineState::PendingUserSignature, "attach_user_signature")?;

        if let Err(e) = self.config.check_freshness(timestamp, now) {
            return self.reject(e.into());
        }

        let selected_text = self.selected_text()?.to_owned();
        let preimage = match canonical::selection_preimage(&selected_text, timestamp) {
            Ok(p) => p,
            Err(e) => return self.reject(e.into()),
        };
        if let Err(e) = verify_detached(
            SignatureSuite::ED25519,
            &user_address,
            resolver,
            &preimage,
            &user_signature,
        ) {
            return self.reject(e.into());
        }

        self.commitment = Some(UserCommitment {
            user_address,
            user_signature,
            timestamp,
        });
        self.state = PipelineState::PendingNodeAttestation;
        Ok(())
    }

    fn build_proof(
        &self,
        commitment: &UserCommitment,
        node_address: Option<AccountId>,
        node_signature: Option<Vec<u8>>,
    ) -> Result<SignedSelection, AssemblyError> {
        let selected_text = self.selected_text()?.to_owned();
        let mut proof = SignedSelection {
            version: PROOF_VERSION,
            original_hash: self.original_hash,
            selected_text,
            user_address: commitment.user_address,
            user_signature: commitment.user_signature.clone(),
            node_address,
            node_signature,
            timestamp: commitment.timestamp,
            proof_hash: [0u8; 32],
        };
        proof.proof_hash = proof.compute_proof_hash()?;
        Ok(proof)
    }

    /// Signs the attestation preimage with the serving node's key, assembles
    /// the dual-attested proof, and completes the pipeline.
    pub fn attest<K: SigningKeyPair>(
        &mut self,
        node_keypair: &K,
        suite: SignatureSuite,
    ) -> Result<SignedSelection, AssemblyError> {
        self.expect_state(PipelineState::PendingNodeAttestation, "attest")?;
        let commitment = self.commitment.clone().ok_or(AssemblyError::InvalidTransition {
            operation: "attest",
            state: self.state.name(),
        })?;

        let selected_text = self.selected_text()?.to_owned();
        let preimage = match canonical::attestation_preimage(
            &self.original_hash,
            &selected_text,
            &commitment.user_signature,
        ) {
            Ok(p) => p,
            Err(e) => return self.reject(e.into()),
        };

        let node_public = node_keypair.public_key().to_bytes();
        let node_address = match account_id_from_key_material(suite, &node_public) {
            Ok(a) => a,
            Err(e) => return self.reject(e.into()),
        };
        let signature = match node_keypair.sign(&preimage) {
            Ok(s) => s.to_bytes(),
            Err(e) => return self.reject(e.into()),
        };

        let proof = self.build_proof(&commitment, Some(node_address), Some(signature))?;
        self.state = PipelineState::Complete;
        log::debug!(
            "Pipeline complete: proof {} attested by node {}",
            hex::encode(proof.proof_hash),
            hex::encode(node_address.as_ref())
        );
        Ok(proof)
    }

    /// Completes the pipeline without node attestation (pure-client mode).
    ///
    /// The resulting proof is user-attested only; verification exposes the
    /// absent node attestation explicitly.
    pub fn finish_unattested(&mut self) -> Result<SignedSelection, AssemblyError> {
        self.expect_state(PipelineState::PendingNodeAttestation, "finish_unattested")?;
        let commitment = self.commitment.clone().ok_or(AssemblyError::InvalidTransition {
            operation: "finish_unattested",
            state: self.state.name(),
        })?;
        let proof = self.build_proof(&commitment, None, None)?;
        self.state = PipelineState::Complete;
        Ok(proof)
    }
}

/// Resolves a signer's public key and verifies a detached signature.
///
/// Distinguishes malformed material (`InvalidKey`/`InvalidSignature`) from a
/// well-formed signature that does not verify (`VerificationFailed`).
pub(crate) fn verify_detached(
    suite: SignatureSuite,
    address: &AccountId,
    resolver: &dyn IdentityResolver,
    message: &[u8],
    signature: &[u8],
) -> Result<(), CryptoError> {
    let key_bytes = resolver
        .public_key_of(address)
        .ok_or_else(|| CryptoError::UnknownIdentity(hex::encode(address.as_ref())))?;

    match suite {
        SignatureSuite::ED25519 => {
            let public_key = Ed25519PublicKey::from_bytes(&key_bytes)?;
            let signature = Ed25519Signature::from_bytes(signature)?;
            public_key.verify(message, &signature)
        }
        other => Err(CryptoError::OperationFailed(format!(
            "Unsupported signature suite: {}",
            other.0
        ))),
    }
}

/// Assembles a user-attested `SignedSelection` from a candidate set and the
/// user's echoed selection, with no server-side state.
///
/// The echoed `request_id` must match the digest of the supplied candidate
/// set, proving the selection refers to exactly these candidates. The
/// returned proof carries no node attestation; [`attest_node`] adds one.
#[allow(clippy::too_many_arguments)]
pub fn assemble_selection(
    request: &RewriteRequest,
    candidates: &[RewriteCandidate],
    input: &SelectionInput,
    claimed_text: Option<&str>,
    timestamp: u64,
    resolver: &dyn IdentityResolver,
    config: &ProtocolConfig,
    now: u64,
) -> Result<SignedSelection, AssemblyError> {
    let mut pipeline = SelectionPipeline::new(request.clone(), config.clone())?;
    pipeline.supply_candidates(candidates.to_vec())?;

    let expected_id = pipeline.request_id().ok_or(AssemblyError::InvalidTransition {
        operation: "assemble_selection",
        state: pipeline.state().name(),
    })?;
    if input.request_id != expected_id {
        return pipeline.reject(ValidationError::RequestIdMismatch.into());
    }

    pipeline.select(input.selected_index, claimed_text)?;
    pipeline.attach_user_signature(
        input.user_address,
        input.user_signature.clone(),
        timestamp,
        resolver,
        now,
    )?;
    pipeline.finish_unattested()
}

/// Adds (or refreshes) a node attestation on an existing proof.
///
/// Refuses to attest a proof that fails its own integrity check. The
/// returned value is a new proof: the node signature chains over the user's
/// signature, and the fingerprint is recomputed over the new field set.
pub fn attest_node<K: SigningKeyPair>(
    proof: &SignedSelection,
    node_keypair: &K,
    suite: SignatureSuite,
) -> Result<SignedSelection, SigningError> {
    let recomputed = proof.compute_proof_hash()?;
    if recomputed != proof.proof_hash {
        return Err(poi_types::error::IntegrityError::ProofHashMismatch {
            embedded: hex::encode(proof.proof_hash),
            recomputed: hex::encode(recomputed),
        }
        .into());
    }

    let preimage = proof.node_sign_bytes()?;
    let node_public = node_keypair.public_key().to_bytes();
    let node_address = account_id_from_key_material(suite, &node_public)?;
    let signature = node_keypair.sign(&preimage)?.to_bytes();

    let mut attested = SignedSelection {
        node_address: Some(node_address),
        node_signature: Some(signature),
        ..proof.clone()
    };
    attested.proof_hash = attested.compute_proof_hash()?;
    Ok(attested)
}
