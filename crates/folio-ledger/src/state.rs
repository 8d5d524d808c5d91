// crates/folio-ledger/src/state.rs
//
// The ledger state store.
//
// One `LedgerState` holds every table the components read and write. All
// collections are ordered maps or sets, so the canonical JSON encoding, and
// therefore the state digest, depends only on content and never on
// insertion order. The event journal is transient and excluded from both
// serialization and the digest.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use folio_core::author::Author;
use folio_core::citation::{CitationEdge, CitationId};
use folio_core::distribution::DistributionPeriod;
use folio_core::error::FolioError;
use folio_core::identity::Identity;
use folio_core::principal::Principal;
use folio_core::{Amount, Hash32, Timestamp};
use folio_economics::{RevenuePool, RewardCurve};

use crate::access::RoleTable;
use crate::config::LedgerConfig;
use crate::events::LedgerEvent;
use crate::journal::{TokenTransaction, TxKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerState {
    pub(crate) authors: BTreeMap<Principal, Author>,
    pub(crate) citations: BTreeMap<CitationId, CitationEdge>,
    /// "u cited v" pairs from both registry citations and graph edges.
    pub(crate) links: BTreeSet<(Principal, Principal)>,
    pub(crate) integrity_root: Hash32,
    pub(crate) periods: BTreeMap<u64, DistributionPeriod>,
    pub(crate) identities: BTreeMap<Principal, Identity>,
    pub(crate) roles: RoleTable,
    pub(crate) pool: RevenuePool,
    pub(crate) initial_grant: Amount,
    pub(crate) reward_curve: RewardCurve,
    pub(crate) distribution_period: u64,
    pub(crate) last_distribution: Timestamp,
    pub(crate) next_period_id: u64,
    pub(crate) now: Timestamp,
    /// Sum of all author balances.
    pub(crate) circulating_supply: Amount,
    pub(crate) transactions: Vec<TokenTransaction>,
    #[serde(skip)]
    pub(crate) events: Vec<LedgerEvent>,
}

impl LedgerState {
    /// Empty genesis state.
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            authors: BTreeMap::new(),
            citations: BTreeMap::new(),
            links: BTreeSet::new(),
            integrity_root: [0u8; 32],
            periods: BTreeMap::new(),
            identities: BTreeMap::new(),
            roles: RoleTable::with_admins(&config.admins),
            pool: RevenuePool::new(),
            initial_grant: config.initial_grant,
            reward_curve: config.reward_curve,
            distribution_period: config.distribution_period_secs,
            last_distribution: config.genesis_time,
            next_period_id: 1,
            now: config.genesis_time,
            circulating_supply: 0,
            transactions: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Registered author or `NotRegistered`.
    pub fn author(&self, principal: &Principal) -> Result<&Author, FolioError> {
        self.authors
            .get(principal)
            .ok_or(FolioError::NotRegistered(*principal))
    }

    pub(crate) fn author_mut(&mut self, principal: &Principal) -> Result<&mut Author, FolioError> {
        self.authors
            .get_mut(principal)
            .ok_or(FolioError::NotRegistered(*principal))
    }

    /// Authors sorted by registration sequence.
    pub fn authors_in_registration_order(&self) -> Vec<&Author> {
        let mut authors: Vec<&Author> = self.authors.values().collect();
        authors.sort_by_key(|a| a.registration_seq);
        authors
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Move the clock forward to `at`. Earlier times are ignored.
    pub(crate) fn advance_clock(&mut self, at: Timestamp) -> Timestamp {
        self.now = self.now.max(at);
        self.now
    }

    pub(crate) fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn record_tx(&mut self, author: Principal, amount: Amount, kind: TxKind, reason: &str) {
        let at = self.now;
        self.transactions.push(TokenTransaction {
            author,
            amount,
            kind,
            reason: reason.to_string(),
            at,
        });
    }

    /// New (balance, circulating supply) after crediting `amount` to `who`.
    ///
    /// Pure check; callers apply the values once every other validation has
    /// passed.
    pub(crate) fn checked_credit(&self, who: &Principal, amount: Amount) -> Result<(Amount, Amount), FolioError> {
        let author = self.author(who)?;
        let balance = author
            .balance
            .checked_add(amount)
            .ok_or_else(|| FolioError::Overflow(format!("balance of {}", who.short())))?;
        let supply = self
            .circulating_supply
            .checked_add(amount)
            .ok_or_else(|| FolioError::Overflow("circulating supply".to_string()))?;
        Ok((balance, supply))
    }

    /// SHA-256 over the canonical JSON encoding of the state.
    pub fn digest(&self) -> Result<Hash32, FolioError> {
        let canonical = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_state() {
        let config = LedgerConfig {
            genesis_time: 500,
            ..LedgerConfig::default()
        };
        let state = LedgerState::new(&config);
        assert_eq!(state.now(), 500);
        assert_eq!(state.last_distribution, 500);
        assert_eq!(state.next_period_id, 1);
        assert_eq!(state.integrity_root, [0u8; 32]);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut state = LedgerState::new(&LedgerConfig::default());
        assert_eq!(state.advance_clock(100), 100);
        assert_eq!(state.advance_clock(50), 100);
        assert_eq!(state.now(), 100);
    }

    #[test]
    fn test_digest_ignores_event_journal() {
        let mut state = LedgerState::new(&LedgerConfig::default());
        let before = state.digest().unwrap();
        state.emit(LedgerEvent::DistributionPeriodSet { duration: 1 });
        assert_eq!(state.digest().unwrap(), before);
        state.advance_clock(1);
        assert_ne!(state.digest().unwrap(), before);
    }
}
