// Path: crates/api/src/rewrite/mod.rs

//! The rewrite-generation capability interface.
//!
//! The AI backend is an external collaborator reached through this narrow,
//! latency-bounded, fallible interface. The protocol core depends only on
//! the trait; concrete adapters live alongside it.

use async_trait::async_trait;
use poi_types::app::{RewriteCandidate, RewriteRequest};
use poi_types::error::RewriteError;
use std::time::Duration;

pub mod http_adapter;
pub mod mock;

pub use http_adapter::HttpRewriteBackend;
pub use mock::MockRewriteBackend;

/// A backend capable of producing rewrite candidates for a message.
#[async_trait]
pub trait RewriteBackend: Send + Sync {
    /// Generates rewrite candidates for the given request.
    ///
    /// A successful result carries at least one candidate; an empty set is
    /// a contract violation and is normalized to
    /// [`RewriteError::EmptyCandidateSet`] by [`generate_with_timeout`].
    async fn generate(&self, request: &RewriteRequest)
        -> Result<Vec<RewriteCandidate>, RewriteError>;
}

/// Runs a backend under a caller-supplied timeout.
///
/// The only operation in a proof's lifecycle that may suspend for
/// non-trivial time is this call; exceeding the timeout yields
/// [`RewriteError::Timeout`] rather than hanging the pipeline.
pub async fn generate_with_timeout(
    backend: &dyn RewriteBackend,
    request: &RewriteRequest,
    timeout: Duration,
) -> Result<Vec<RewriteCandidate>, RewriteError> {
    let candidates = tokio::time::timeout(timeout, backend.generate(request))
        .await
        .map_err(|_| RewriteError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        })??;

    if candidates.is_empty() {
        return Err(RewriteError::EmptyCandidateSet);
    }
    log::debug!(
        "Rewrite backend produced {} candidates for a {}-byte message",
        candidates.len(),
        request.message.len()
    );
    Ok(candidates)
}
