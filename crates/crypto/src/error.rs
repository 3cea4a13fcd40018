// Path: crates/crypto/src/error.rs
//! Local error types for the `poi-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use poi_api::error::CryptoError;
