// crates/folio-economics/src/lib.rs
//
// folio-economics: token units, citation reward curve, revenue pool and
// exact-sum share allocation for the Folio citation ledger.
//
// All monetary values are tracked in motes (the smallest unit of FOLIO).
// 1 FOLIO = 1,000,000,000 motes (10^9).

pub mod allocation;
pub mod pool;
pub mod rewards;
pub mod token;

// Re-export key types for ergonomic access from downstream crates.
pub use allocation::{allocate_percentages, share_amount};
pub use pool::RevenuePool;
pub use rewards::{RewardCurve, DEFAULT_CITATION_REWARD};
pub use token::{Tokens, DEFAULT_INITIAL_GRANT, MOTES_PER_FOLIO};
