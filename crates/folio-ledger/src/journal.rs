// crates/folio-ledger/src/journal.rs
//
// Token transaction journal.
//
// Every change to an author balance is recorded with its cause, so an
// author's balance can be audited as the sum of their journal entries.

use serde::{Deserialize, Serialize};

use folio_core::principal::Principal;
use folio_core::{Amount, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    /// Initial grant on registration.
    Grant,
    CitationReward,
    Burn,
    /// Claimed revenue share.
    ShareWithdrawal,
}

impl TxKind {
    /// True for kinds that decrease the balance.
    pub fn is_debit(&self) -> bool {
        matches!(self, TxKind::Burn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransaction {
    pub author: Principal,
    pub amount: Amount,
    pub kind: TxKind,
    pub reason: String,
    pub at: Timestamp,
}

impl TokenTransaction {
    /// Signed effect of this entry on the author's balance.
    pub fn delta(&self) -> i128 {
        if self.kind.is_debit() {
            -(self.amount as i128)
        } else {
            self.amount as i128
        }
    }
}
