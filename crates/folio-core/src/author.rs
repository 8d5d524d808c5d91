// crates/folio-core/src/author.rs

use serde::{Deserialize, Serialize};

use crate::principal::Principal;
use crate::score::Score;
use crate::{Amount, Timestamp};

/// A registered author.
///
/// Created once on registration and never deleted. `citation_count` and
/// `balance` are mutated by the author registry; `reputation_score` only by an
/// explicit PageRank recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Owning principal (unique).
    pub principal: Principal,
    /// Always true for stored records; kept for parity with external views.
    pub registered: bool,
    /// Number of reward-minting citations received.
    pub citation_count: u64,
    /// Last computed reputation score.
    pub reputation_score: Score,
    /// Token balance in the smallest unit.
    pub balance: Amount,
    /// 0-based registration order. Used as the deterministic tie-break order.
    pub registration_seq: u64,
    /// Ledger time of registration.
    pub registered_at: Timestamp,
}

impl Author {
    /// A freshly registered author holding `initial_grant`.
    pub fn new(principal: Principal, registration_seq: u64, initial_grant: Amount, now: Timestamp) -> Self {
        Self {
            principal,
            registered: true,
            citation_count: 0,
            reputation_score: Score::ZERO,
            balance: initial_grant,
            registration_seq,
            registered_at: now,
        }
    }
}
