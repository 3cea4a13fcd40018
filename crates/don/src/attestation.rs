// Path: crates/don/src/attestation.rs

//! Ranking of independent node attestations over the same selection.
//!
//! In a DON setting several nodes may each attest to one user selection. No
//! cross-node consensus is needed for a single proof to be valid; a consumer
//! simply wants the highest-reputation attestation among the valid ones.
//! Every verification outcome observed here is also fed back into the
//! tracker, so ranking and reputation stay one loop.

use crate::reputation::ReputationTracker;
use poi_api::identity::IdentityResolver;
use poi_protocol::{verify_proof, VerificationReport};
use poi_types::app::{AccountId, SignedSelection};
use poi_types::config::ProtocolConfig;
use std::cmp::Ordering;

/// One node's attestation of a selection, weighted by reputation.
#[derive(Debug, Clone)]
pub struct RankedAttestation {
    /// The attesting node.
    pub node_id: AccountId,
    /// The node's reputation score after this round of outcomes.
    pub score: f64,
    /// The attested proof.
    pub proof: SignedSelection,
    /// The full verification report behind the ranking decision.
    pub report: VerificationReport,
}

/// Verifies a batch of independently attested proofs, records each outcome
/// in the tracker, and returns the valid attestations ordered by node
/// reputation, highest first.
///
/// Proofs without node attestation are skipped: there is no node to rank.
/// Invalid attestations are recorded as failures but not returned.
pub fn rank_attestations(
    proofs: &[SignedSelection],
    resolver: &dyn IdentityResolver,
    config: &ProtocolConfig,
    tracker: &ReputationTracker,
    now: u64,
) -> Vec<RankedAttestation> {
    let mut ranked = Vec::new();

    for proof in proofs {
        let node_id = match proof.node_address {
            Some(node_id) => node_id,
            None => continue,
        };
        let report = verify_proof(proof, resolver, config, now);
        let valid = report.is_fully_valid(true);
        tracker.record_at(&node_id, valid, now);

        if valid {
            ranked.push(RankedAttestation {
                node_id,
                score: 0.0,
                proof: proof.clone(),
                report,
            });
        } else {
            log::debug!(
                "Attestation by node {} failed verification and was dropped from ranking",
                hex::encode(node_id.as_ref())
            );
        }
    }

    // Scores are read after all outcomes in this batch are recorded.
    for attestation in &mut ranked {
        attestation.score = tracker.score_at(&attestation.node_id, now);
    }
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use poi_api::crypto::{SerializableKey, SigningKeyPair};
    use poi_api::identity::StaticResolver;
    use poi_crypto::sign::eddsa::Ed25519KeyPair;
    use poi_protocol::{assemble_selection, attest_node};
    use poi_types::app::{
        candidate_set_digest, RewriteCandidate, RewriteRequest, RewriteStyle, SelectionInput,
        SignatureSuite,
    };
    use poi_types::canonical;
    use poi_types::config::DecayPolicy;

    const NOW: u64 = 1_735_632_000;

    fn candidates() -> Vec<RewriteCandidate> {
        vec![
            RewriteCandidate {
                index: 0,
                text: "Could we revisit the timeline?".into(),
                confidence: 0.92,
            },
            RewriteCandidate {
                index: 1,
                text: "I have concerns about the schedule.".into(),
                confidence: 0.81,
            },
        ]
    }

    fn user_attested_proof(
        user: &Ed25519KeyPair,
        user_address: AccountId,
        resolver: &StaticResolver,
        config: &ProtocolConfig,
    ) -> SignedSelection {
        let request = RewriteRequest {
            message: "The schedule is unworkable".into(),
            style: RewriteStyle::Diplomatic,
            audience: "leads".into(),
        };
        let set = candidates();
        let text = set[0].text.clone();
        let preimage = canonical::selection_preimage(&text, NOW).unwrap();
        let input = SelectionInput {
            request_id: candidate_set_digest(&set).unwrap(),
            selected_index: 0,
            user_address,
            user_signature: user.sign(&preimage).unwrap().to_bytes(),
        };
        assemble_selection(&request, &set, &input, None, NOW, resolver, config, NOW).unwrap()
    }

    #[test]
    fn ranking_orders_by_reputation_and_records_outcomes() {
        let config = ProtocolConfig::default();
        let user = Ed25519KeyPair::generate().unwrap();
        let good_node = Ed25519KeyPair::generate().unwrap();
        let better_node = Ed25519KeyPair::generate().unwrap();

        let mut resolver = StaticResolver::new();
        let user_address = resolver
            .register(SignatureSuite::ED25519, &user.public_key().to_bytes())
            .unwrap();
        let good_id = resolver
            .register(SignatureSuite::ED25519, &good_node.public_key().to_bytes())
            .unwrap();
        let better_id = resolver
            .register(SignatureSuite::ED25519, &better_node.public_key().to_bytes())
            .unwrap();

        let tracker = ReputationTracker::new(DecayPolicy::Disabled);
        // Seed history: `good` has one failure on record, `better` none.
        tracker.record_at(&good_id, false, NOW);
        tracker.record_at(&good_id, true, NOW);
        tracker.record_at(&better_id, true, NOW);

        let base = user_attested_proof(&user, user_address, &resolver, &config);
        let by_good = attest_node(&base, &good_node, SignatureSuite::ED25519).unwrap();
        let by_better = attest_node(&base, &better_node, SignatureSuite::ED25519).unwrap();

        // A tampered attestation from `good` should be dropped and counted
        // against it.
        let mut tampered = by_good.clone();
        tampered.timestamp += 1;

        let ranked = rank_attestations(
            &[by_good.clone(), by_better.clone(), tampered],
            &resolver,
            &config,
            &tracker,
            NOW,
        );

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].node_id, better_id);
        assert_eq!(ranked[1].node_id, good_id);
        assert!(ranked[0].score > ranked[1].score);

        let good_snapshot = tracker.snapshot_at(&good_id, NOW);
        // Seeded 1 success + 1 failure, then one valid and one tampered
        // attestation in the batch.
        assert_eq!(good_snapshot.verified_count, 2);
        assert_eq!(good_snapshot.failed_count, 2);
    }

    #[test]
    fn unattested_proofs_are_skipped() {
        let config = ProtocolConfig::default();
        let user = Ed25519KeyPair::generate().unwrap();
        let mut resolver = StaticResolver::new();
        let user_address = resolver
            .register(SignatureSuite::ED25519, &user.public_key().to_bytes())
            .unwrap();
        let tracker = ReputationTracker::new(DecayPolicy::Disabled);

        let proof = user_attested_proof(&user, user_address, &resolver, &config);
        let ranked = rank_attestations(&[proof], &resolver, &config, &tracker, NOW);
        assert!(ranked.is_empty());
        assert!(tracker.all_at(NOW).is_empty());
    }
}
