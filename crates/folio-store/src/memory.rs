// crates/folio-store/src/memory.rs
//
// In-memory `LedgerStore` backed by `RwLock<BTreeMap>` tables.
//
// Used for tests and for replays that do not ask for persistence. Ordering
// of the `list_*` results follows the map keys, so listings are stable.

use std::collections::BTreeMap;
use std::sync::RwLock;

use folio_core::author::Author;
use folio_core::citation::{CitationEdge, CitationId};
use folio_core::distribution::DistributionPeriod;
use folio_core::error::FolioError;
use folio_core::identity::Identity;
use folio_core::principal::Principal;
use folio_core::traits::LedgerStore;

#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    authors: RwLock<BTreeMap<Principal, Author>>,
    citations: RwLock<BTreeMap<CitationId, CitationEdge>>,
    periods: RwLock<BTreeMap<u64, DistributionPeriod>>,
    identities: RwLock<BTreeMap<Principal, Identity>>,
    meta: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> FolioError {
    FolioError::Storage("Lock poisoned".to_string())
}

impl LedgerStore for MemoryLedgerStore {
    fn save_author(&self, author: &Author) -> Result<(), FolioError> {
        self.authors
            .write()
            .map_err(poisoned)?
            .insert(author.principal, author.clone());
        Ok(())
    }

    fn get_author(&self, principal: &Principal) -> Result<Option<Author>, FolioError> {
        Ok(self.authors.read().map_err(poisoned)?.get(principal).cloned())
    }

    fn list_authors(&self) -> Result<Vec<Author>, FolioError> {
        Ok(self.authors.read().map_err(poisoned)?.values().cloned().collect())
    }

    fn save_citation(&self, edge: &CitationEdge) -> Result<(), FolioError> {
        self.citations
            .write()
            .map_err(poisoned)?
            .insert(edge.id, edge.clone());
        Ok(())
    }

    fn get_citation(&self, id: &CitationId) -> Result<Option<CitationEdge>, FolioError> {
        Ok(self.citations.read().map_err(poisoned)?.get(id).cloned())
    }

    fn list_citations(&self) -> Result<Vec<CitationEdge>, FolioError> {
        Ok(self.citations.read().map_err(poisoned)?.values().cloned().collect())
    }

    fn save_period(&self, period: &DistributionPeriod) -> Result<(), FolioError> {
        self.periods
            .write()
            .map_err(poisoned)?
            .insert(period.id, period.clone());
        Ok(())
    }

    fn get_period(&self, id: u64) -> Result<Option<DistributionPeriod>, FolioError> {
        Ok(self.periods.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn list_periods(&self) -> Result<Vec<DistributionPeriod>, FolioError> {
        Ok(self.periods.read().map_err(poisoned)?.values().cloned().collect())
    }

    fn save_identity(&self, identity: &Identity) -> Result<(), FolioError> {
        self.identities
            .write()
            .map_err(poisoned)?
            .insert(identity.principal, identity.clone());
        Ok(())
    }

    fn get_identity(&self, principal: &Principal) -> Result<Option<Identity>, FolioError> {
        Ok(self.identities.read().map_err(poisoned)?.get(principal).cloned())
    }

    fn list_identities(&self) -> Result<Vec<Identity>, FolioError> {
        Ok(self.identities.read().map_err(poisoned)?.values().cloned().collect())
    }

    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), FolioError> {
        self.meta
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, FolioError> {
        Ok(self.meta.read().map_err(poisoned)?.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authors_listed_in_key_order() {
        let store = MemoryLedgerStore::new();
        store.save_author(&Author::new(Principal([2; 32]), 1, 10, 0)).unwrap();
        store.save_author(&Author::new(Principal([1; 32]), 0, 10, 0)).unwrap();
        let listed: Vec<Principal> = store.list_authors().unwrap().iter().map(|a| a.principal).collect();
        assert_eq!(listed, vec![Principal([1; 32]), Principal([2; 32])]);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryLedgerStore::new();
        let mut author = Author::new(Principal([1; 32]), 0, 10, 0);
        store.save_author(&author).unwrap();
        author.balance = 3;
        store.save_author(&author).unwrap();
        assert_eq!(store.get_author(&Principal([1; 32])).unwrap().unwrap().balance, 3);
        assert_eq!(store.list_authors().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_entries_are_none() {
        let store = MemoryLedgerStore::new();
        assert!(store.get_period(1).unwrap().is_none());
        assert!(store.get_identity(&Principal([9; 32])).unwrap().is_none());
        assert!(store.get_meta("x").unwrap().is_none());
    }
}
