// Path: crates/api/src/reputation/mod.rs

//! Defines the `ReputationSink` trait for recording verification outcomes.

use poi_types::app::AccountId;

/// A sink for the stream of per-node verification outcomes.
///
/// The tracker behind this trait is an injected, explicitly-owned
/// component, never a process-wide singleton. Implementations must not lose
/// updates under concurrent reporting: an undercounted failure would let a
/// misbehaving node's score look better than it is.
pub trait ReputationSink: Send + Sync {
    /// Records one verification outcome for the given node.
    fn record(&self, node_id: &AccountId, verified: bool);
}
