// Path: crates/api/src/lib.rs

//! # PoI Kernel API Crate Lints
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
//! # PoI Kernel API
//!
//! Core traits and interfaces for the PoI Kernel. This crate defines the
//! stable contract between the protocol core and its pluggable components:
//! signature schemes, identity resolution, the rewrite-generation backend,
//! and the reputation sink.

/// Defines unified traits for cryptographic primitives.
pub mod crypto;
/// Re-exports all core error types from the central `poi-types` crate.
pub mod error;
/// Defines the `IdentityResolver` trait for decoupled public-key lookups.
pub mod identity;
/// Defines the `ReputationSink` trait for recording verification outcomes.
pub mod reputation;
/// The rewrite-generation capability interface and its adapters.
pub mod rewrite;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::crypto::{
        SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey,
    };
    pub use crate::identity::{IdentityResolver, StaticResolver};
    pub use crate::reputation::ReputationSink;
    pub use crate::rewrite::{generate_with_timeout, RewriteBackend};
    pub use poi_types::app::{
        AccountId, RewriteCandidate, RewriteRequest, RewriteStyle, SignedSelection,
    };
}
