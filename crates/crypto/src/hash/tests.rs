// Path: crates/crypto/src/hash/tests.rs
use super::*;

#[test]
fn sha256_known_vector() {
    // SHA-256("abc")
    let digest = sha256(b"abc").unwrap();
    assert_eq!(
        hex::encode(digest),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn sha256_is_deterministic_and_input_sensitive() {
    let a = sha256(b"message").unwrap();
    let b = sha256(b"message").unwrap();
    let c = sha256(b"messagf").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn digest_size_matches_output() {
    let hasher = Sha256Hash;
    let digest = hasher.hash(b"x").unwrap();
    assert_eq!(digest.len(), hasher.digest_size());
    assert_eq!(hasher.name(), "SHA-256");
}
