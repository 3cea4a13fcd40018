// Path: crates/types/src/error/mod.rs
//! Core error types for the PoI Kernel.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors for bad input shape, rejected before any cryptographic work.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The raw input message was empty.
    #[error("Message is empty")]
    EmptyMessage,
    /// The raw input message exceeded the configured maximum length.
    #[error("Message too long: {got} bytes, maximum is {max}")]
    MessageTooLong {
        /// The configured maximum length in bytes.
        max: usize,
        /// The actual length in bytes.
        got: usize,
    },
    /// The rewrite backend produced (or the caller supplied) no candidates.
    #[error("Candidate set is empty")]
    EmptyCandidateSet,
    /// A candidate's confidence was outside the `[0, 1]` range.
    #[error("Candidate {index} has confidence {confidence} outside [0, 1]")]
    ConfidenceOutOfRange {
        /// The index of the offending candidate.
        index: u32,
        /// The out-of-range confidence value.
        confidence: f32,
    },
    /// The selected index does not refer to any candidate.
    #[error("Selected index {index} out of range for {len} candidates")]
    IndexOutOfRange {
        /// The index the caller selected.
        index: u32,
        /// The number of candidates in the set.
        len: usize,
    },
    /// The caller-supplied text does not match the candidate at the selected index.
    #[error("Claimed selection text does not match the candidate at the selected index")]
    TextMismatch,
    /// The echoed request id does not match the digest of the supplied candidate set.
    #[error("Request id does not correlate to the supplied candidate set")]
    RequestIdMismatch,
}

impl ErrorCode for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "VALIDATION_EMPTY_MESSAGE",
            Self::MessageTooLong { .. } => "VALIDATION_MESSAGE_TOO_LONG",
            Self::EmptyCandidateSet => "VALIDATION_EMPTY_CANDIDATE_SET",
            Self::ConfidenceOutOfRange { .. } => "VALIDATION_CONFIDENCE_OUT_OF_RANGE",
            Self::IndexOutOfRange { .. } => "VALIDATION_INDEX_OUT_OF_RANGE",
            Self::TextMismatch => "VALIDATION_TEXT_MISMATCH",
            Self::RequestIdMismatch => "VALIDATION_REQUEST_ID_MISMATCH",
        }
    }
}

/// Errors from cryptographic operations.
///
/// `InvalidKey`/`InvalidSignature` report *malformed* material and are kept
/// distinct from `VerificationFailed`, which reports well-formed material
/// that does not verify. Callers use the distinction to tell a broken proof
/// from garbage input.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The signature failed cryptographic verification.
    #[error("Signature verification failed")]
    VerificationFailed,
    /// The provided key material is malformed or invalid for the specified algorithm.
    #[error("Invalid cryptographic key: {0}")]
    InvalidKey(String),
    /// The provided signature material is malformed or invalid for the specified algorithm.
    #[error("Invalid signature format: {0}")]
    InvalidSignature(String),
    /// A hash digest had an unexpected length.
    #[error("Invalid hash length: expected {expected}, got {got}")]
    InvalidHashLength {
        /// The expected length in bytes.
        expected: usize,
        /// The actual length in bytes.
        got: usize,
    },
    /// An input to a cryptographic operation was invalid.
    #[error("Invalid input for operation: {0}")]
    InvalidInput(String),
    /// No public key could be resolved for an identity handle.
    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),
    /// A generic failure in an underlying cryptographic library.
    #[error("Cryptographic operation failed: {0}")]
    OperationFailed(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::VerificationFailed => "CRYPTO_VERIFICATION_FAILED",
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::InvalidHashLength { .. } => "CRYPTO_INVALID_HASH_LENGTH",
            Self::InvalidInput(_) => "CRYPTO_INVALID_INPUT",
            Self::UnknownIdentity(_) => "CRYPTO_UNKNOWN_IDENTITY",
            Self::OperationFailed(_) => "CRYPTO_OPERATION_FAILED",
        }
    }
}

impl From<dcrypt::Error> for CryptoError {
    fn from(e: dcrypt::Error) -> Self {
        CryptoError::OperationFailed(e.to_string())
    }
}

/// Errors for timestamps outside the configured tolerance window.
///
/// Carries `PartialEq` so verification reports embedding a staleness
/// indicator stay directly comparable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalenessError {
    /// The timestamp lies in the future beyond the clock-skew tolerance.
    #[error("Timestamp {timestamp} is {} seconds ahead of now ({now}), tolerance is {tolerance_secs}", timestamp.saturating_sub(*now))]
    FromFuture {
        /// The suspect timestamp (unix seconds).
        timestamp: u64,
        /// The verifier's current time (unix seconds).
        now: u64,
        /// The configured clock-skew tolerance in seconds.
        tolerance_secs: u64,
    },
    /// The timestamp is older than the configured maximum proof age.
    #[error("Timestamp {timestamp} is {} seconds old at now ({now}), maximum age is {max_age_secs}", now.saturating_sub(*timestamp))]
    Expired {
        /// The suspect timestamp (unix seconds).
        timestamp: u64,
        /// The verifier's current time (unix seconds).
        now: u64,
        /// The configured maximum proof age in seconds.
        max_age_secs: u64,
    },
}

impl ErrorCode for StalenessError {
    fn code(&self) -> &'static str {
        match self {
            Self::FromFuture { .. } => "STALE_FROM_FUTURE",
            Self::Expired { .. } => "STALE_EXPIRED",
        }
    }
}

/// Errors from the external rewrite-generation backend.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// The backend did not respond within the caller-supplied timeout.
    #[error("Rewrite backend timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },
    /// The backend reported a failure.
    #[error("Rewrite backend error: {0}")]
    Backend(String),
    /// The backend returned a success with zero candidates, which the
    /// contract forbids.
    #[error("Rewrite backend returned an empty candidate set")]
    EmptyCandidateSet,
    /// The backend's response could not be parsed into candidates.
    #[error("Malformed rewrite backend response: {0}")]
    MalformedResponse(String),
}

impl ErrorCode for RewriteError {
    fn code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "REWRITE_TIMEOUT",
            Self::Backend(_) => "REWRITE_BACKEND_ERROR",
            Self::EmptyCandidateSet => "REWRITE_EMPTY_CANDIDATE_SET",
            Self::MalformedResponse(_) => "REWRITE_MALFORMED_RESPONSE",
        }
    }
}

/// A fatal integrity failure on a supplied proof.
///
/// A proof whose recomputed hash does not match its embedded `proof_hash` is
/// simply invalid. There is no recovery path for this class.
#[derive(Error, Debug)]
pub enum IntegrityError {
    /// The recomputed proof hash does not match the embedded one.
    #[error("Proof hash mismatch: embedded {embedded}, recomputed {recomputed}")]
    ProofHashMismatch {
        /// Hex encoding of the hash embedded in the proof.
        embedded: String,
        /// Hex encoding of the recomputed hash.
        recomputed: String,
    },
}

impl ErrorCode for IntegrityError {
    fn code(&self) -> &'static str {
        match self {
            Self::ProofHashMismatch { .. } => "INTEGRITY_PROOF_HASH_MISMATCH",
        }
    }
}

/// The composite error returned by the proof assembler.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// Input validation failed.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// A cryptographic step failed.
    #[error("Crypto failure: {0}")]
    Crypto(#[from] CryptoError),
    /// The selection timestamp is outside the tolerance window.
    #[error("Stale selection: {0}")]
    Stale(#[from] StalenessError),
    /// The rewrite backend failed or timed out.
    #[error("Rewrite failure: {0}")]
    Rewrite(#[from] RewriteError),
    /// An operation was invoked in a pipeline state that does not permit it.
    #[error("Operation '{operation}' is not valid in state {state}")]
    InvalidTransition {
        /// The operation that was attempted.
        operation: &'static str,
        /// The pipeline state the operation was attempted in.
        state: &'static str,
    },
}

impl ErrorCode for AssemblyError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.code(),
            Self::Crypto(e) => e.code(),
            Self::Stale(e) => e.code(),
            Self::Rewrite(e) => e.code(),
            Self::InvalidTransition { .. } => "ASSEMBLY_INVALID_TRANSITION",
        }
    }
}

/// Errors from the node attestation step.
#[derive(Error, Debug)]
pub enum SigningError {
    /// A cryptographic step failed.
    #[error("Crypto failure: {0}")]
    Crypto(#[from] CryptoError),
    /// The proof being attested failed its own integrity check.
    #[error("Refusing to attest: {0}")]
    Integrity(#[from] IntegrityError),
}

impl ErrorCode for SigningError {
    fn code(&self) -> &'static str {
        match self {
            Self::Crypto(e) => e.code(),
            Self::Integrity(e) => e.code(),
        }
    }
}

/// Errors from decoding the versioned JSON wire format.
#[derive(Error, Debug)]
pub enum WireError {
    /// The envelope declared a version this implementation does not know.
    #[error("Unsupported proof version: {0}")]
    UnsupportedVersion(u16),
    /// A hex field could not be decoded.
    #[error("Malformed hex in field '{field}': {reason}")]
    BadHex {
        /// The wire field name.
        field: &'static str,
        /// Why decoding failed.
        reason: String,
    },
    /// A fixed-width field had the wrong byte length.
    #[error("Invalid length for field '{field}': expected {expected} bytes, got {got}")]
    BadLength {
        /// The wire field name.
        field: &'static str,
        /// The expected byte length.
        expected: usize,
        /// The actual byte length.
        got: usize,
    },
    /// The envelope carried a node address without a node signature, or the
    /// reverse.
    #[error("Node attestation fields must be both present or both absent")]
    PartialAttestation,
    /// The envelope was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for WireError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion(_) => "WIRE_UNSUPPORTED_VERSION",
            Self::BadHex { .. } => "WIRE_BAD_HEX",
            Self::BadLength { .. } => "WIRE_BAD_LENGTH",
            Self::PartialAttestation => "WIRE_PARTIAL_ATTESTATION",
            Self::Json(_) => "WIRE_BAD_JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ValidationError::TextMismatch.code(), "VALIDATION_TEXT_MISMATCH");
        assert_eq!(CryptoError::VerificationFailed.code(), "CRYPTO_VERIFICATION_FAILED");
        assert_eq!(
            StalenessError::Expired {
                timestamp: 0,
                now: 100,
                max_age_secs: 10,
            }
            .code(),
            "STALE_EXPIRED"
        );
        assert_eq!(RewriteError::EmptyCandidateSet.code(), "REWRITE_EMPTY_CANDIDATE_SET");
    }

    #[test]
    fn assembly_error_code_passes_through_source() {
        let err = AssemblyError::from(ValidationError::EmptyMessage);
        assert_eq!(err.code(), "VALIDATION_EMPTY_MESSAGE");
    }
}
