// Path: crates/crypto/src/sign/eddsa/tests/mod.rs
use super::*;
use poi_types::canonical;

#[test]
fn test_keypair_generation() {
    let keypair = Ed25519KeyPair::generate().unwrap();
    let message = b"Test message";

    let signature = keypair.sign(message).unwrap();

    let public_key = keypair.public_key();
    assert!(public_key.verify(message, &signature).is_ok());
}

#[test]
fn test_serialization_roundtrip() {
    let keypair = Ed25519KeyPair::generate().unwrap();

    let public_bytes = keypair.public_key().to_bytes();
    let private_bytes = keypair.private_key().to_bytes();

    assert_eq!(public_bytes.len(), 32);
    assert_eq!(private_bytes.len(), 32); // Just the seed

    let public_key = Ed25519PublicKey::from_bytes(&public_bytes).unwrap();
    let private_key = Ed25519PrivateKey::from_bytes(&private_bytes).unwrap();

    // Deriving from the loaded private key must give back the same public key
    let derived_public = private_key.public_key().unwrap();
    assert_eq!(public_key.to_bytes(), derived_public.to_bytes());
}

#[test]
fn test_deterministic_signing() {
    // Ed25519 signing is deterministic: the same key and message always
    // produce the same signature, so proofs are reproducible.
    let keypair = Ed25519KeyPair::generate().unwrap();
    let message = canonical::selection_preimage("chosen text", 1_735_632_000).unwrap();

    let a = keypair.sign(&message).unwrap();
    let b = keypair.sign(&message).unwrap();
    assert_eq!(a.to_bytes(), b.to_bytes());
}

#[test]
fn test_wrong_signature_fails() {
    let keypair1 = Ed25519KeyPair::generate().unwrap();
    let keypair2 = Ed25519KeyPair::generate().unwrap();

    let message = b"Test message";

    let signature = keypair1.sign(message).unwrap();

    // Verify with keypair2's public key should fail
    let public_key2 = keypair2.public_key();
    assert!(matches!(
        public_key2.verify(message, &signature),
        Err(CryptoError::VerificationFailed)
    ));
}

#[test]
fn test_tampered_message_fails() {
    let keypair = Ed25519KeyPair::generate().unwrap();
    let message = canonical::selection_preimage("original", 7).unwrap();
    let tampered = canonical::selection_preimage("0riginal", 7).unwrap();

    let signature = keypair.sign(&message).unwrap();

    let public_key = keypair.public_key();
    assert!(public_key.verify(&message, &signature).is_ok());
    assert!(public_key.verify(&tampered, &signature).is_err());
}

#[test]
fn test_truncated_signature_is_malformed_not_mismatched() {
    let keypair = Ed25519KeyPair::generate().unwrap();
    let signature = keypair.sign(b"msg").unwrap();

    let mut bytes = signature.to_bytes();
    bytes.pop();
    let err = Ed25519Signature::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidSignature(_)));

    bytes.push(0);
    bytes.push(0);
    let err = Ed25519Signature::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidSignature(_)));
}
