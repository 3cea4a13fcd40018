// Path: crates/crypto/src/sign/mod.rs
//! Signature scheme implementations.
//!
//! Proof version 1 uses Ed25519; new suites slot in here under new proof
//! versions without touching the verifier's trait-level logic.

pub mod eddsa;

pub use eddsa::{Ed25519KeyPair, Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature};
