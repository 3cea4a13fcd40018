// Path: crates/api/src/identity/mod.rs

//! Defines the `IdentityResolver` trait for decoupled public-key lookups.

use poi_types::app::{account_id_from_key_material, AccountId, SignatureSuite};
use poi_types::error::CryptoError;
use std::collections::HashMap;

/// A read-only mapping from identity handles to public key material.
///
/// Implemented by whatever directory the deployment uses (an on-chain
/// registry, a wallet connector, a static map) and consumed by the verifier
/// to look up keys without a direct dependency. Returning `None` is a
/// verification failure for the caller, never a crash.
pub trait IdentityResolver: Send + Sync {
    /// Fetches the raw public key bytes for an identity handle, if known.
    fn public_key_of(&self, address: &AccountId) -> Option<Vec<u8>>;
}

/// An in-memory resolver backed by a static map.
///
/// Suitable for tests and single-process deployments where the set of
/// participants is known up front.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    keys: HashMap<AccountId, Vec<u8>>,
}

impl StaticResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a public key, deriving and returning its canonical
    /// `AccountId`.
    pub fn register(
        &mut self,
        suite: SignatureSuite,
        public_key: &[u8],
    ) -> Result<AccountId, CryptoError> {
        let account_id = account_id_from_key_material(suite, public_key)?;
        self.keys.insert(account_id, public_key.to_vec());
        Ok(account_id)
    }
}

impl IdentityResolver for StaticResolver {
    fn public_key_of(&self, address: &AccountId) -> Option<Vec<u8>> {
        self.keys.get(address).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_resolve() {
        let mut resolver = StaticResolver::new();
        let key = [9u8; 32];
        let id = resolver.register(SignatureSuite::ED25519, &key).unwrap();
        assert_eq!(resolver.public_key_of(&id), Some(key.to_vec()));
        assert_eq!(resolver.public_key_of(&AccountId([0u8; 32])), None);
    }
}
