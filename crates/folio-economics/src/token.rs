// crates/folio-economics/src/token.rs
//
// FOLIO token type and supply constants.
//
// The smallest unit of FOLIO is the "mote". 1 FOLIO = 10^9 motes. All ledger
// accounting uses motes to avoid floating-point precision issues.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of motes in one FOLIO.
pub const MOTES_PER_FOLIO: u64 = 1_000_000_000;

/// Balance granted to every author on registration: 10 FOLIO.
pub const DEFAULT_INITIAL_GRANT: u64 = 10 * MOTES_PER_FOLIO;

/// A FOLIO token amount, held in motes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tokens {
    pub motes: u64,
}

impl Tokens {
    /// Whole FOLIO amount.
    pub fn from_folio(amount: u64) -> Self {
        Self {
            motes: amount.saturating_mul(MOTES_PER_FOLIO),
        }
    }

    pub fn from_motes(motes: u64) -> Self {
        Self { motes }
    }

    pub fn zero() -> Self {
        Self { motes: 0 }
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.motes / MOTES_PER_FOLIO;
        let frac = self.motes % MOTES_PER_FOLIO;
        if frac == 0 {
            write!(f, "{} FOLIO", whole)
        } else {
            // Up to 9 decimal places, trailing zeros trimmed
            let frac_str = format!("{:09}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}.{} FOLIO", whole, trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_grant_is_ten_folio() {
        assert_eq!(DEFAULT_INITIAL_GRANT, 10 * MOTES_PER_FOLIO);
        assert_eq!(Tokens::from_motes(DEFAULT_INITIAL_GRANT), Tokens::from_folio(10));
    }

    #[test]
    fn test_display_whole() {
        assert_eq!(Tokens::from_folio(42).to_string(), "42 FOLIO");
    }

    #[test]
    fn test_display_fractional() {
        assert_eq!(Tokens::from_motes(1_500_000_000).to_string(), "1.5 FOLIO");
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(Tokens::zero().to_string(), "0 FOLIO");
    }
}
