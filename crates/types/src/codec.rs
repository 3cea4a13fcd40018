// Path: crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for structured data.
//!
//! This module provides simple wrappers around `parity-scale-codec` (SCALE).
//! By centralizing the codec logic here in the base `types` crate, we ensure
//! that all components use the exact same serialization format for any
//! structure that is digested or exchanged, preventing verification failures
//! due to different binary representations of the same data.
//!
//! Note that the byte preimages that are *signed* are built in
//! [`crate::canonical`], which specifies its own explicit layout; SCALE is
//! used for structure-level encoding such as candidate-set digests and proof
//! transport between processes.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into a deterministic, canonical byte representation using
/// SCALE codec.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from a canonical byte representation using SCALE codec.
///
/// Fails fast on any decoding error, including trailing bytes, returning a
/// descriptive string. This prevents malformed data from being processed as
/// if it were canonical.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Encode, Decode, Debug, PartialEq, Eq)]
    struct TestStruct {
        id: u32,
        text: String,
        payload: Vec<u8>,
    }

    #[test]
    fn test_canonical_codec_roundtrip() {
        let original = TestStruct {
            id: 42,
            text: "selected-text".to_string(),
            payload: vec![1, 2, 3],
        };

        let encoded = to_bytes_canonical(&original).unwrap();
        assert!(!encoded.is_empty());

        let decoded = from_bytes_canonical::<TestStruct>(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_canonical_decode_failure() {
        let original = TestStruct {
            id: 99,
            text: "another".to_string(),
            payload: vec![10, 20, 30],
        };

        let mut encoded = to_bytes_canonical(&original).unwrap();
        encoded.pop();
        encoded.pop();

        let result = from_bytes_canonical::<TestStruct>(&encoded);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("canonical decode failed"));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let original = TestStruct {
            id: 7,
            text: "t".to_string(),
            payload: vec![],
        };
        let mut encoded = to_bytes_canonical(&original).unwrap();
        encoded.push(0xff);
        assert!(from_bytes_canonical::<TestStruct>(&encoded).is_err());
    }
}
