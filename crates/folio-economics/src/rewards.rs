// crates/folio-economics/src/rewards.rs
//
// Citation reward curve.
//
// Each reward-minting citation credits the cited author with
// `curve.reward(n)`, where n is the author's citation count *before* the new
// citation. Every curve is non-increasing in n, so an author's marginal reward
// shrinks as they accumulate citations.

use serde::{Deserialize, Serialize};

use crate::token::MOTES_PER_FOLIO;

/// Reward for a first citation: 1 FOLIO.
pub const DEFAULT_CITATION_REWARD: u64 = MOTES_PER_FOLIO;

/// Diminishing-return reward curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardCurve {
    /// reward(n) = floor(base / (1 + n)).
    InverseLinear {
        /// Reward for the first citation, in motes.
        base: u64,
    },
    /// reward(n) = base >> (n / half_life). Halves every `half_life` citations.
    Halving {
        /// Reward for the first citation, in motes.
        base: u64,
        /// Citations per halving step. Zero pays `base` once and nothing after.
        half_life: u64,
    },
}

impl Default for RewardCurve {
    fn default() -> Self {
        RewardCurve::InverseLinear {
            base: DEFAULT_CITATION_REWARD,
        }
    }
}

impl RewardCurve {
    /// Reward in motes for a citation received by an author who already has
    /// `prior_citations` citations.
    pub fn reward(&self, prior_citations: u64) -> u64 {
        match *self {
            RewardCurve::InverseLinear { base } => base / prior_citations.saturating_add(1),
            RewardCurve::Halving { base, half_life } => {
                if half_life == 0 {
                    return if prior_citations == 0 { base } else { 0 };
                }
                let halvings = prior_citations / half_life;
                if halvings >= 64 {
                    0
                } else {
                    base >> halvings
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_non_increasing(curve: RewardCurve) {
        let mut prev = curve.reward(0);
        for n in 1..500 {
            let r = curve.reward(n);
            assert!(r <= prev, "{:?} increased at n={}", curve, n);
            prev = r;
        }
    }

    #[test]
    fn inverse_linear_values() {
        let curve = RewardCurve::InverseLinear { base: 1_000 };
        assert_eq!(curve.reward(0), 1_000);
        assert_eq!(curve.reward(1), 500);
        assert_eq!(curve.reward(3), 250);
        assert_eq!(curve.reward(u64::MAX), 0);
    }

    #[test]
    fn halving_values() {
        let curve = RewardCurve::Halving { base: 1_024, half_life: 2 };
        assert_eq!(curve.reward(0), 1_024);
        assert_eq!(curve.reward(1), 1_024);
        assert_eq!(curve.reward(2), 512);
        assert_eq!(curve.reward(5), 256);
        assert_eq!(curve.reward(1_000), 0);
    }

    #[test]
    fn zero_half_life_pays_once() {
        let curve = RewardCurve::Halving { base: 10, half_life: 0 };
        assert_eq!(curve.reward(0), 10);
        assert_eq!(curve.reward(1), 0);
    }

    #[test]
    fn curves_are_non_increasing() {
        assert_non_increasing(RewardCurve::default());
        assert_non_increasing(RewardCurve::Halving { base: DEFAULT_CITATION_REWARD, half_life: 3 });
    }

    #[test]
    fn first_reward_beats_average_of_next_ten() {
        let curve = RewardCurve::default();
        let first = curve.reward(0);
        let next_ten: u64 = (1..=10).map(|n| curve.reward(n)).sum();
        assert!(next_ten / 10 < first);
    }

    #[test]
    fn curve_config_parses_from_json() {
        let curve: RewardCurve =
            serde_json::from_str(r#"{"kind":"halving","base":100,"half_life":4}"#).unwrap();
        assert_eq!(curve, RewardCurve::Halving { base: 100, half_life: 4 });
    }
}
