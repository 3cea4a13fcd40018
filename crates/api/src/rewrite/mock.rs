// Path: crates/api/src/rewrite/mock.rs

use super::RewriteBackend;
use async_trait::async_trait;
use poi_types::app::{RewriteCandidate, RewriteRequest, RewriteStyle};
use poi_types::canonical;
use poi_types::error::RewriteError;
use std::time::Duration;

/// A deterministic in-process backend for tests and offline mode.
///
/// Candidates are derived from the request content only, so the same request
/// always yields the same candidate set (and therefore the same request id).
#[derive(Debug, Default, Clone)]
pub struct MockRewriteBackend {
    /// Artificial latency injected before responding, for timeout tests.
    pub latency: Option<Duration>,
    /// When set, every call fails with a backend error.
    pub fail: bool,
}

impl MockRewriteBackend {
    fn prefix(style: RewriteStyle) -> &'static str {
        match style {
            RewriteStyle::Formal => "To whom it may concern:",
            RewriteStyle::Diplomatic => "I appreciate the situation, and",
            RewriteStyle::Technical => "Observed condition:",
            RewriteStyle::Marketing => "Here is the exciting part:",
            RewriteStyle::DaoProposal => "Proposal:",
        }
    }
}

#[async_trait]
impl RewriteBackend for MockRewriteBackend {
    async fn generate(
        &self,
        request: &RewriteRequest,
    ) -> Result<Vec<RewriteCandidate>, RewriteError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail {
            return Err(RewriteError::Backend("mock backend set to fail".into()));
        }

        let fingerprint = canonical::message_hash(&request.message)
            .map_err(|e| RewriteError::Backend(e.to_string()))?;
        log::info!(
            "MockRewrite: generating candidates for message {}",
            hex::encode(fingerprint)
        );

        let prefix = Self::prefix(request.style);
        Ok((0..3u32)
            .map(|i| RewriteCandidate {
                index: i,
                text: format!(
                    "{} variant {} for {}: {}",
                    prefix, i, request.audience, request.message
                ),
                confidence: 0.9 - 0.1 * i as f32,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poi_types::app::candidate_set_digest;

    fn request() -> RewriteRequest {
        RewriteRequest {
            message: "need this yesterday".into(),
            style: RewriteStyle::Formal,
            audience: "management".into(),
        }
    }

    #[tokio::test]
    async fn mock_is_deterministic() {
        let backend = MockRewriteBackend::default();
        let a = backend.generate(&request()).await.unwrap();
        let b = backend.generate(&request()).await.unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(
            candidate_set_digest(&a).unwrap(),
            candidate_set_digest(&b).unwrap()
        );
    }

    #[tokio::test]
    async fn mock_failure_is_typed() {
        let backend = MockRewriteBackend {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(
            backend.generate(&request()).await,
            Err(RewriteError::Backend(_))
        ));
    }
}
