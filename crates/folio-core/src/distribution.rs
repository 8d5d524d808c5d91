// crates/folio-core/src/distribution.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::principal::Principal;
use crate::score::Score;
use crate::{Amount, Timestamp};

/// One author's share of a distribution period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorShare {
    /// Integer percentage in 0..=100.
    pub percentage: u8,
    /// `pool_amount * percentage / 100`, truncated.
    pub amount: Amount,
    pub withdrawn: bool,
}

/// A snapshot of reputation at distribution time and the resulting shares.
///
/// Immutable once created except for the per-share `withdrawn` flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionPeriod {
    /// Starts at 1 and increases by one per distribution.
    pub id: u64,
    pub snapshot_time: Timestamp,
    /// Pool balance available at snapshot time.
    pub pool_amount: Amount,
    /// Scores used to compute the shares, keyed by author.
    pub score_snapshot: BTreeMap<Principal, Score>,
    pub shares: BTreeMap<Principal, AuthorShare>,
}

impl DistributionPeriod {
    /// Share of `author`, or a zero-valued share if the author had no
    /// recorded score in this period.
    pub fn share_of(&self, author: &Principal) -> AuthorShare {
        self.shares.get(author).copied().unwrap_or_default()
    }

    /// Sum of all recorded percentages.
    pub fn total_percentage(&self) -> u32 {
        self.shares.values().map(|s| s.percentage as u32).sum()
    }

    /// Sum of all allocated amounts.
    pub fn total_allocated(&self) -> Amount {
        self.shares.values().map(|s| s.amount).sum()
    }
}
