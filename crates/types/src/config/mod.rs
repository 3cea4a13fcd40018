// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for core PoI Kernel components.

use crate::error::StalenessError;
use serde::{Deserialize, Serialize};

/// Selects whether and how node reputation scores decay toward neutral.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum DecayPolicy {
    /// Scores accumulate without decay.
    #[default]
    Disabled,
    /// Scores decay exponentially toward the neutral prior with the given
    /// half-life.
    Halflife {
        /// The half-life of the decay, in seconds.
        secs: u64,
    },
}

/// The recognized configuration surface of the protocol core.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProtocolConfig {
    /// Maximum accepted length of a raw input message, in bytes.
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    /// How far into the future a timestamp may lie before it is rejected.
    #[serde(default = "default_clock_skew_tolerance_secs")]
    pub clock_skew_tolerance_secs: u64,
    /// How old a proof may be before verification reports it stale.
    #[serde(default = "default_max_proof_age_secs")]
    pub max_proof_age_secs: u64,
    /// When set, a proof with no node attestation fails the node check
    /// instead of reporting the explicit absent status.
    #[serde(default)]
    pub require_node_attestation: bool,
    /// Whether and how reputation scores decay toward neutral.
    #[serde(default)]
    pub reputation_decay: DecayPolicy,
}

fn default_max_message_length() -> usize {
    4096
}
fn default_clock_skew_tolerance_secs() -> u64 {
    300
}
fn default_max_proof_age_secs() -> u64 {
    86_400
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_message_length: default_max_message_length(),
            clock_skew_tolerance_secs: default_clock_skew_tolerance_secs(),
            max_proof_age_secs: default_max_proof_age_secs(),
            require_node_attestation: false,
            reputation_decay: DecayPolicy::default(),
        }
    }
}

impl ProtocolConfig {
    /// Checks a selection timestamp against the tolerance window.
    ///
    /// Rejects timestamps from the future beyond the clock-skew tolerance
    /// and timestamps older than the maximum proof age.
    pub fn check_freshness(&self, timestamp: u64, now: u64) -> Result<(), StalenessError> {
        if timestamp > now.saturating_add(self.clock_skew_tolerance_secs) {
            return Err(StalenessError::FromFuture {
                timestamp,
                now,
                tolerance_secs: self.clock_skew_tolerance_secs,
            });
        }
        if now.saturating_sub(timestamp) > self.max_proof_age_secs {
            return Err(StalenessError::Expired {
                timestamp,
                now,
                max_age_secs: self.max_proof_age_secs,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: ProtocolConfig = toml::from_str("").unwrap();
        assert_eq!(config, ProtocolConfig::default());
        assert_eq!(config.max_message_length, 4096);
        assert!(!config.require_node_attestation);
        assert_eq!(config.reputation_decay, DecayPolicy::Disabled);
    }

    #[test]
    fn decay_policy_parses_from_toml() {
        let config: ProtocolConfig = toml::from_str(
            r#"
            max_proof_age_secs = 600

            [reputation_decay.Halflife]
            secs = 3600
            "#,
        )
        .unwrap();
        assert_eq!(config.max_proof_age_secs, 600);
        assert_eq!(config.reputation_decay, DecayPolicy::Halflife { secs: 3600 });
    }

    #[test]
    fn freshness_window_bounds() {
        let config = ProtocolConfig {
            clock_skew_tolerance_secs: 10,
            max_proof_age_secs: 100,
            ..ProtocolConfig::default()
        };
        let now = 1_000u64;
        assert!(config.check_freshness(now, now).is_ok());
        assert!(config.check_freshness(now + 10, now).is_ok());
        assert!(matches!(
            config.check_freshness(now + 11, now),
            Err(StalenessError::FromFuture { .. })
        ));
        assert!(config.check_freshness(now - 100, now).is_ok());
        assert!(matches!(
            config.check_freshness(now - 101, now),
            Err(StalenessError::Expired { .. })
        ));
    }
}
