// Path: crates/types/src/app/mod.rs

//! Core application-level data structures for the PoI Kernel.

/// The canonical `AccountId`, `SignatureSuite`, and identity derivation.
pub mod identity;
/// The `SignedSelection` proof and per-node reputation record.
pub mod proof;
/// Rewrite requests, candidates, and the user's selection input.
pub mod rewrite;

pub use identity::{account_id_from_key_material, AccountId, SignatureSuite};
pub use proof::{suite_for_version, unix_time_now, NodeReputation, SignedSelection, PROOF_VERSION};
pub use rewrite::{
    candidate_set_digest, RequestId, RewriteCandidate, RewriteRequest, RewriteStyle,
    SelectionInput,
};
