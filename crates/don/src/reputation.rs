// Path: crates/don/src/reputation.rs

//! The in-memory, per-node reputation tracker.
//!
//! The tracker is an injected, explicitly-owned component: whoever
//! orchestrates verification holds it (typically behind an `Arc`) and passes
//! it down. Counter updates are atomic per node, so concurrent reporters
//! never lose an update; an undercounted failure would let a misbehaving
//! node look better than it is.

use dashmap::DashMap;
use poi_api::reputation::ReputationSink;
use poi_types::app::{unix_time_now, AccountId, NodeReputation};
use poi_types::config::DecayPolicy;
use std::sync::atomic::{AtomicU64, Ordering};

/// The neutral prior for a node with no recorded history.
const NEUTRAL_SCORE: f64 = 0.5;

#[derive(Debug, Default)]
struct NodeCounters {
    verified: AtomicU64,
    failed: AtomicU64,
    /// Unix seconds of the most recent recorded outcome.
    last_event_secs: AtomicU64,
}

/// Aggregates verification outcomes into per-node scores.
///
/// `score = verified / (verified + failed)`, pulled toward the neutral prior
/// by the configured decay policy. State lives only in process memory;
/// restart resets every node to neutral. That is a deliberate trade-off of
/// the stateless design, not an oversight.
#[derive(Debug)]
pub struct ReputationTracker {
    decay: DecayPolicy,
    nodes: DashMap<AccountId, NodeCounters>,
}

impl ReputationTracker {
    /// Creates a tracker with the given decay policy.
    pub fn new(decay: DecayPolicy) -> Self {
        Self {
            decay,
            nodes: DashMap::new(),
        }
    }

    /// Records one verification outcome at an explicit time.
    pub fn record_at(&self, node_id: &AccountId, verified: bool, now: u64) {
        let entry = self.nodes.entry(*node_id).or_default();
        if verified {
            entry.verified.fetch_add(1, Ordering::Relaxed);
        } else {
            entry.failed.fetch_add(1, Ordering::Relaxed);
        }
        entry.last_event_secs.fetch_max(now, Ordering::Relaxed);
        log::debug!(
            "Reputation: node {} recorded verified={}",
            hex::encode(node_id.as_ref()),
            verified
        );
    }

    /// The decay multiplier for a node idle since `last_event`, in `[0, 1]`.
    ///
    /// Monotonically non-increasing in elapsed time; `1.0` keeps the raw
    /// score, `0.0` collapses it to the neutral prior.
    fn decay_factor(&self, last_event: u64, now: u64) -> f64 {
        match self.decay {
            DecayPolicy::Disabled => 1.0,
            DecayPolicy::Halflife { secs } => {
                if secs == 0 {
                    return 0.0;
                }
                let elapsed = now.saturating_sub(last_event) as f64;
                0.5_f64.powf(elapsed / secs as f64)
            }
        }
    }

    /// Computes a score from raw counter values.
    fn score_from(&self, verified: u64, failed: u64, last_event: u64, now: u64) -> f64 {
        let total = verified + failed;
        if total == 0 {
            return NEUTRAL_SCORE;
        }
        let raw = verified as f64 / total as f64;
        NEUTRAL_SCORE + (raw - NEUTRAL_SCORE) * self.decay_factor(last_event, now)
    }

    /// The node's score at an explicit time.
    ///
    /// A node with no history scores the neutral prior.
    pub fn score_at(&self, node_id: &AccountId, now: u64) -> f64 {
        match self.nodes.get(node_id) {
            None => NEUTRAL_SCORE,
            Some(counters) => self.score_from(
                counters.verified.load(Ordering::Relaxed),
                counters.failed.load(Ordering::Relaxed),
                counters.last_event_secs.load(Ordering::Relaxed),
                now,
            ),
        }
    }

    /// The node's score at the current wall-clock time.
    pub fn score(&self, node_id: &AccountId) -> f64 {
        self.score_at(node_id, unix_time_now())
    }

    fn snapshot_counters(&self, node_id: AccountId, counters: &NodeCounters, now: u64) -> NodeReputation {
        let verified_count = counters.verified.load(Ordering::Relaxed);
        let failed_count = counters.failed.load(Ordering::Relaxed);
        let last_event = counters.last_event_secs.load(Ordering::Relaxed);
        NodeReputation {
            node_id,
            verified_count,
            failed_count,
            score: self.score_from(verified_count, failed_count, last_event, now),
        }
    }

    /// A snapshot of one node's reputation at an explicit time.
    pub fn snapshot_at(&self, node_id: &AccountId, now: u64) -> NodeReputation {
        match self.nodes.get(node_id) {
            None => NodeReputation {
                node_id: *node_id,
                verified_count: 0,
                failed_count: 0,
                score: NEUTRAL_SCORE,
            },
            Some(counters) => self.snapshot_counters(*node_id, counters.value(), now),
        }
    }

    /// Snapshots every tracked node, highest score first.
    pub fn all_at(&self, now: u64) -> Vec<NodeReputation> {
        // Snapshot from the iteration guard itself: re-entering the map per
        // node could contend with a queued writer on the same shard.
        let mut all: Vec<NodeReputation> = self
            .nodes
            .iter()
            .map(|entry| self.snapshot_counters(*entry.key(), entry.value(), now))
            .collect();
        all.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        all
    }
}

impl ReputationSink for ReputationTracker {
    fn record(&self, node_id: &AccountId, verified: bool) {
        self.record_at(node_id, verified, unix_time_now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn node(byte: u8) -> AccountId {
        AccountId([byte; 32])
    }

    #[test]
    fn score_is_verified_over_total() {
        let tracker = ReputationTracker::new(DecayPolicy::Disabled);
        let n = node(1);
        for _ in 0..7 {
            tracker.record_at(&n, true, 100);
        }
        for _ in 0..3 {
            tracker.record_at(&n, false, 100);
        }
        assert_eq!(tracker.score_at(&n, 100), 0.7);

        let snapshot = tracker.snapshot_at(&n, 100);
        assert_eq!(snapshot.verified_count, 7);
        assert_eq!(snapshot.failed_count, 3);
    }

    #[test]
    fn unseen_node_scores_neutral() {
        let tracker = ReputationTracker::new(DecayPolicy::Disabled);
        assert_eq!(tracker.score_at(&node(9), 0), 0.5);
    }

    #[test]
    fn concurrent_reporters_lose_no_updates() {
        let tracker = Arc::new(ReputationTracker::new(DecayPolicy::Disabled));
        let n = node(2);

        let mut handles = Vec::new();
        for reporter in 0..10u64 {
            let tracker = Arc::clone(&tracker);
            handles.push(thread::spawn(move || {
                for i in 0..100u64 {
                    // Alternate outcomes per reporter so both counters race.
                    tracker.record_at(&n, (reporter + i) % 2 == 0, 50);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = tracker.snapshot_at(&n, 50);
        assert_eq!(snapshot.verified_count + snapshot.failed_count, 1000);
        assert_eq!(snapshot.verified_count, 500);
        assert_eq!(snapshot.failed_count, 500);
    }

    #[test]
    fn halflife_decay_is_monotonic_toward_neutral() {
        let tracker = ReputationTracker::new(DecayPolicy::Halflife { secs: 3600 });
        let n = node(3);
        for _ in 0..10 {
            tracker.record_at(&n, true, 1_000);
        }

        let fresh = tracker.score_at(&n, 1_000);
        let after_one = tracker.score_at(&n, 1_000 + 3600);
        let after_two = tracker.score_at(&n, 1_000 + 7200);
        assert_eq!(fresh, 1.0);
        assert!((after_one - 0.75).abs() < 1e-9);
        assert!((after_two - 0.625).abs() < 1e-9);
        assert!(fresh > after_one && after_one > after_two);
        assert!(after_two > 0.5);

        // A bad node decays upward toward neutral instead.
        let bad = node(4);
        for _ in 0..10 {
            tracker.record_at(&bad, false, 1_000);
        }
        assert_eq!(tracker.score_at(&bad, 1_000), 0.0);
        assert!((tracker.score_at(&bad, 1_000 + 3600) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn all_at_ranks_highest_first() {
        let tracker = ReputationTracker::new(DecayPolicy::Disabled);
        tracker.record_at(&node(1), false, 0);
        tracker.record_at(&node(2), true, 0);
        let all = tracker.all_at(0);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].node_id, node(2));
        assert_eq!(all[1].node_id, node(1));
    }
}
