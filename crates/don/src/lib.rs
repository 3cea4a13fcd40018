// Path: crates/don/src/lib.rs

//! # PoI Kernel DON Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # PoI Kernel DON Layer
//!
//! Support for a decentralized set of untrusted node operators: the
//! in-memory reputation tracker fed by verification outcomes, and ranking of
//! independent attestations over the same selection.
//!
//! Nothing here is a correctness gate; every attestation stays
//! independently verifiable. Reputation is a weighting signal for consumers
//! choosing between several valid attestations, and it deliberately resets
//! with the process.

pub mod attestation;
pub mod reputation;

pub use attestation::{rank_attestations, RankedAttestation};
pub use reputation::ReputationTracker;
