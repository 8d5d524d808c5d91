// crates/folio-ledger/src/config.rs
//
// Genesis parameters for a ledger.
//
// Loaded as the `[ledger]` table of the CLI configuration file. Every field
// has a default so a partial table is accepted.

use serde::{Deserialize, Serialize};

use folio_core::principal::Principal;
use folio_core::{Amount, Timestamp};
use folio_economics::{RewardCurve, DEFAULT_INITIAL_GRANT};

/// Default minimum time between distributions: 30 days.
pub const DEFAULT_DISTRIBUTION_PERIOD_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Principals seeded with the `Admin` role.
    #[serde(default)]
    pub admins: Vec<Principal>,

    /// Balance credited to every newly registered author (motes).
    #[serde(default = "default_initial_grant")]
    pub initial_grant: Amount,

    /// Reward paid to a cited author per received citation.
    #[serde(default)]
    pub reward_curve: RewardCurve,

    /// Minimum elapsed ledger time between two distributions.
    #[serde(default = "default_distribution_period_secs")]
    pub distribution_period_secs: u64,

    /// Ledger time at creation. The first distribution is measured from here.
    #[serde(default)]
    pub genesis_time: Timestamp,
}

fn default_initial_grant() -> Amount {
    DEFAULT_INITIAL_GRANT
}

fn default_distribution_period_secs() -> u64 {
    DEFAULT_DISTRIBUTION_PERIOD_SECS
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            admins: Vec::new(),
            initial_grant: default_initial_grant(),
            reward_curve: RewardCurve::default(),
            distribution_period_secs: default_distribution_period_secs(),
            genesis_time: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert!(config.admins.is_empty());
        assert_eq!(config.initial_grant, 10 * folio_economics::MOTES_PER_FOLIO);
        assert_eq!(config.distribution_period_secs, 2_592_000);
        assert_eq!(config.genesis_time, 0);
    }

    #[test]
    fn test_partial_table_fills_defaults() {
        let config: LedgerConfig =
            serde_json::from_str(r#"{"reward_curve": {"kind": "halving", "base": 8, "half_life": 2}}"#)
                .unwrap();
        assert_eq!(config.reward_curve, RewardCurve::Halving { base: 8, half_life: 2 });
        assert_eq!(config.initial_grant, DEFAULT_INITIAL_GRANT);
        assert_eq!(config.distribution_period_secs, DEFAULT_DISTRIBUTION_PERIOD_SECS);
    }
}
