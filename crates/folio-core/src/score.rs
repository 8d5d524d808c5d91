// crates/folio-core/src/score.rs
//
// Fixed-point reputation score.
//
// Scores are scaled integers: SCORE_SCALE units represent 1.0. All scoring
// arithmetic is integer-only so that independent replays produce bit-identical
// results. Display renders six fixed decimal places.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of score units in 1.0.
pub const SCORE_SCALE: u64 = 1_000_000;

/// A non-negative fixed-point reputation score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(pub u64);

impl Score {
    pub const ZERO: Score = Score(0);

    /// Raw scaled value.
    pub fn units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.0 / SCORE_SCALE, self.0 % SCORE_SCALE)
    }
}
