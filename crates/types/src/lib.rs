// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # PoI Kernel Types
//!
//! This crate is the foundational library for the PoI Kernel, containing all
//! core data structures, error types, canonical byte encodings, and
//! configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `poi-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This structure prevents
//! circular dependencies and provides a stable, canonical definition for
//! shared types like `SignedSelection`, `RewriteCandidate`, `AccountId`, and
//! the error enums.

/// The byte length of every content digest used by the protocol.
pub const DIGEST_BYTES: usize = 32;

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::AssemblyError> = std::result::Result<T, E>;

/// Core application-level data structures like `SignedSelection` and `RewriteRequest`.
pub mod app;
/// Canonical, domain-separated byte preimages for everything hashed or signed.
pub mod canonical;
/// The canonical, deterministic binary codec for structured data.
pub mod codec;
/// Shared configuration structures (e.g. `ProtocolConfig`).
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
