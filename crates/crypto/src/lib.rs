// Path: crates/crypto/src/lib.rs
//! # PoI Kernel Crypto Crate Lints
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
        clippy::indexing_slicing
    )
)]
//! # PoI Kernel Cryptography
//!
//! Concrete cryptographic primitives for the PoI Kernel: the Ed25519
//! signing engine and the SHA-256 hasher behind `original_hash` and
//! `proof_hash`. Everything here implements the scheme-agnostic traits from
//! `poi-api`.

pub mod error;
pub mod hash;
pub mod sign;
