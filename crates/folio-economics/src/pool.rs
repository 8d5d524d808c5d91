// crates/folio-economics/src/pool.rs
//
// Revenue pool for profit distribution.
//
// Revenue deposited into the ledger accumulates in `available`. A
// distribution moves the amounts it allocates from `available` into
// `reserved`, and each withdrawal releases its amount from `reserved`. The
// truncation leftover of a distribution stays in `available` and rolls into
// the next period, so a later snapshot never re-allocates funds that are
// already owed to someone.

use serde::{Deserialize, Serialize};

use folio_core::error::FolioError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePool {
    /// Unallocated balance in motes.
    available: u64,
    /// Allocated to period shares but not yet withdrawn.
    reserved: u64,
}

impl RevenuePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance a new distribution may allocate.
    pub fn available(&self) -> u64 {
        self.available
    }

    /// Balance owed to unclaimed shares.
    pub fn reserved(&self) -> u64 {
        self.reserved
    }

    /// Everything held by the pool.
    pub fn total(&self) -> u64 {
        self.available.saturating_add(self.reserved)
    }

    /// Deposit revenue.
    ///
    /// # Errors
    /// Returns `FolioError::Overflow` if the pool would exceed `u64::MAX`.
    pub fn deposit(&mut self, amount: u64) -> Result<(), FolioError> {
        if self.total().checked_add(amount).is_none() {
            return Err(FolioError::Overflow("revenue pool deposit".to_string()));
        }
        self.available += amount;
        Ok(())
    }

    /// Move `amount` from available to reserved.
    ///
    /// # Errors
    /// Returns `FolioError::InsufficientBalance` if `amount` exceeds the
    /// available balance.
    pub fn reserve(&mut self, amount: u64) -> Result<(), FolioError> {
        if amount > self.available {
            return Err(FolioError::InsufficientBalance {
                requested: amount,
                available: self.available,
            });
        }
        self.available -= amount;
        self.reserved += amount;
        Ok(())
    }

    /// Pay `amount` out of the reserve.
    ///
    /// # Errors
    /// Returns `FolioError::InsufficientBalance` if `amount` exceeds the
    /// reserved balance.
    pub fn release(&mut self, amount: u64) -> Result<(), FolioError> {
        if amount > self.reserved {
            return Err(FolioError::InsufficientBalance {
                requested: amount,
                available: self.reserved,
            });
        }
        self.reserved -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MOTES_PER_FOLIO;

    fn funded(available: u64) -> RevenuePool {
        let mut pool = RevenuePool::new();
        pool.deposit(available).unwrap();
        pool
    }

    #[test]
    fn test_new_pool_is_empty() {
        let pool = RevenuePool::new();
        assert_eq!(pool.total(), 0);
    }

    #[test]
    fn test_deposit_accumulates() {
        let mut pool = RevenuePool::new();
        pool.deposit(50 * MOTES_PER_FOLIO).unwrap();
        pool.deposit(30 * MOTES_PER_FOLIO).unwrap();
        assert_eq!(pool.available(), 80 * MOTES_PER_FOLIO);
    }

    #[test]
    fn test_deposit_overflow() {
        let mut pool = funded(u64::MAX);
        assert!(matches!(pool.deposit(1), Err(FolioError::Overflow(_))));
        assert_eq!(pool.available(), u64::MAX);
    }

    #[test]
    fn test_reserve_and_release() {
        let mut pool = funded(100);
        pool.reserve(70).unwrap();
        assert_eq!(pool.available(), 30);
        assert_eq!(pool.reserved(), 70);
        pool.release(70).unwrap();
        assert_eq!(pool.reserved(), 0);
        assert_eq!(pool.total(), 30);
    }

    #[test]
    fn test_reserve_more_than_available_leaves_pool_unchanged() {
        let mut pool = funded(10);
        assert!(pool.reserve(11).is_err());
        assert_eq!(pool, funded(10));
    }

    #[test]
    fn test_release_more_than_reserved_fails() {
        let mut pool = funded(10);
        pool.reserve(5).unwrap();
        assert!(pool.release(6).is_err());
        assert_eq!(pool.reserved(), 5);
    }
}
