// crates/folio-store/src/rocks.rs
//
// RocksDB-backed persistent storage for the ledger tables.
//
// Key format:
//   - `author:{principal_hex}`                 -> JSON Author
//   - `citation:{citation_id_hex}`             -> JSON CitationEdge
//   - `period:{id:020}`                        -> JSON PeriodHeader
//   - `share:{id:020}:{principal_hex}`         -> JSON AuthorShare
//   - `identity:{principal_hex}`               -> JSON Identity
//   - `meta:{key}`                             -> opaque bytes
//
// Period ids are zero-padded so that lexicographic key order matches numeric
// order. Shares live in their own prefix so that a period's share sub-table
// can be scanned without decoding the header.

use std::collections::BTreeMap;

use rocksdb::{DBWithThreadMode, MultiThreaded, Options, WriteBatch};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use folio_core::author::Author;
use folio_core::citation::{CitationEdge, CitationId};
use folio_core::distribution::{AuthorShare, DistributionPeriod};
use folio_core::error::FolioError;
use folio_core::identity::Identity;
use folio_core::principal::Principal;
use folio_core::score::Score;
use folio_core::traits::LedgerStore;

/// Period record without its share sub-table.
#[derive(Debug, Serialize, Deserialize)]
struct PeriodHeader {
    id: u64,
    snapshot_time: u64,
    pool_amount: u64,
    score_snapshot: BTreeMap<Principal, Score>,
}

/// RocksDB wrapper implementing the `LedgerStore` trait.
#[derive(Debug)]
pub struct RocksLedgerStore {
    db: DBWithThreadMode<MultiThreaded>,
}

impl RocksLedgerStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, FolioError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path)
            .map_err(|e| FolioError::Storage(format!("Failed to open RocksDB at {}: {}", path, e)))?;

        Ok(Self { db })
    }

    fn author_key(principal: &Principal) -> Vec<u8> {
        format!("author:{}", principal.to_hex()).into_bytes()
    }

    fn citation_key(id: &CitationId) -> Vec<u8> {
        format!("citation:{}", id.to_hex()).into_bytes()
    }

    fn period_key(id: u64) -> Vec<u8> {
        format!("period:{:020}", id).into_bytes()
    }

    fn share_prefix(id: u64) -> String {
        format!("share:{:020}:", id)
    }

    fn identity_key(principal: &Principal) -> Vec<u8> {
        format!("identity:{}", principal.to_hex()).into_bytes()
    }

    fn meta_key(key: &str) -> Vec<u8> {
        format!("meta:{}", key).into_bytes()
    }

    /// Put raw bytes into RocksDB, mapping errors to FolioError::Storage.
    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), FolioError> {
        self.db
            .put(key, value)
            .map_err(|e| FolioError::Storage(format!("RocksDB put failed: {}", e)))
    }

    /// Get raw bytes from RocksDB, mapping errors to FolioError::Storage.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, FolioError> {
        self.db
            .get(key)
            .map_err(|e| FolioError::Storage(format!("RocksDB get failed: {}", e)))
    }

    fn get_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, FolioError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Scan every entry whose key starts with `prefix`, returning (key suffix, value).
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, FolioError> {
        let prefix = prefix.as_bytes();
        let mut out = Vec::new();
        for item in self.db.prefix_iterator(prefix) {
            let (key, value) = item
                .map_err(|e| FolioError::Storage(format!("RocksDB iteration error: {}", e)))?;
            // Stop when the prefix no longer matches.
            if !key.starts_with(prefix) {
                break;
            }
            let suffix = String::from_utf8_lossy(&key[prefix.len()..]).into_owned();
            out.push((suffix, value.to_vec()));
        }
        Ok(out)
    }

    fn list_json<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>, FolioError> {
        self.scan_prefix(prefix)?
            .into_iter()
            .map(|(_, bytes)| serde_json::from_slice(&bytes).map_err(FolioError::from))
            .collect()
    }

    fn load_shares(&self, period_id: u64) -> Result<BTreeMap<Principal, AuthorShare>, FolioError> {
        let mut shares = BTreeMap::new();
        for (suffix, bytes) in self.scan_prefix(&Self::share_prefix(period_id))? {
            let principal: Principal = suffix.parse()?;
            let share: AuthorShare = serde_json::from_slice(&bytes)?;
            shares.insert(principal, share);
        }
        Ok(shares)
    }

    fn assemble_period(&self, header: PeriodHeader) -> Result<DistributionPeriod, FolioError> {
        let shares = self.load_shares(header.id)?;
        Ok(DistributionPeriod {
            id: header.id,
            snapshot_time: header.snapshot_time,
            pool_amount: header.pool_amount,
            score_snapshot: header.score_snapshot,
            shares,
        })
    }
}

impl LedgerStore for RocksLedgerStore {
    fn save_author(&self, author: &Author) -> Result<(), FolioError> {
        let json = serde_json::to_vec(author)?;
        self.put_raw(&Self::author_key(&author.principal), &json)
    }

    fn get_author(&self, principal: &Principal) -> Result<Option<Author>, FolioError> {
        self.get_json(&Self::author_key(principal))
    }

    fn list_authors(&self) -> Result<Vec<Author>, FolioError> {
        self.list_json("author:")
    }

    fn save_citation(&self, edge: &CitationEdge) -> Result<(), FolioError> {
        let json = serde_json::to_vec(edge)?;
        self.put_raw(&Self::citation_key(&edge.id), &json)
    }

    fn get_citation(&self, id: &CitationId) -> Result<Option<CitationEdge>, FolioError> {
        self.get_json(&Self::citation_key(id))
    }

    fn list_citations(&self) -> Result<Vec<CitationEdge>, FolioError> {
        self.list_json("citation:")
    }

    /// Header and all shares are written in one batch so a reader never sees
    /// a period without its share sub-table.
    fn save_period(&self, period: &DistributionPeriod) -> Result<(), FolioError> {
        let header = PeriodHeader {
            id: period.id,
            snapshot_time: period.snapshot_time,
            pool_amount: period.pool_amount,
            score_snapshot: period.score_snapshot.clone(),
        };
        let mut batch = WriteBatch::default();
        batch.put(Self::period_key(period.id), serde_json::to_vec(&header)?);
        let prefix = Self::share_prefix(period.id);
        for (principal, share) in &period.shares {
            let key = format!("{}{}", prefix, principal.to_hex());
            batch.put(key.as_bytes(), serde_json::to_vec(share)?);
        }
        self.db
            .write(batch)
            .map_err(|e| FolioError::Storage(format!("RocksDB batch write failed: {}", e)))
    }

    fn get_period(&self, id: u64) -> Result<Option<DistributionPeriod>, FolioError> {
        match self.get_json::<PeriodHeader>(&Self::period_key(id))? {
            Some(header) => Ok(Some(self.assemble_period(header)?)),
            None => Ok(None),
        }
    }

    fn list_periods(&self) -> Result<Vec<DistributionPeriod>, FolioError> {
        self.list_json::<PeriodHeader>("period:")?
            .into_iter()
            .map(|header| self.assemble_period(header))
            .collect()
    }

    fn save_identity(&self, identity: &Identity) -> Result<(), FolioError> {
        let json = serde_json::to_vec(identity)?;
        self.put_raw(&Self::identity_key(&identity.principal), &json)
    }

    fn get_identity(&self, principal: &Principal) -> Result<Option<Identity>, FolioError> {
        self.get_json(&Self::identity_key(principal))
    }

    fn list_identities(&self) -> Result<Vec<Identity>, FolioError> {
        self.list_json("identity:")
    }

    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), FolioError> {
        self.put_raw(&Self::meta_key(key), value)
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, FolioError> {
        self.get_raw(&Self::meta_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_db_path(label: &str) -> String {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("folio_test_{}_{}", label, Uuid::now_v7()));
        path.to_string_lossy().to_string()
    }

    fn p(b: u8) -> Principal {
        Principal([b; 32])
    }

    #[test]
    fn test_period_keys_sort_numerically() {
        assert!(RocksLedgerStore::period_key(9) < RocksLedgerStore::period_key(10));
    }

    #[test]
    fn test_author_round_trip() {
        let path = temp_db_path("author");
        let store = RocksLedgerStore::open(&path).unwrap();
        let author = Author::new(p(1), 0, 10, 5);
        store.save_author(&author).unwrap();
        assert_eq!(store.get_author(&p(1)).unwrap(), Some(author));
        assert_eq!(store.get_author(&p(2)).unwrap(), None);
        assert_eq!(store.list_authors().unwrap().len(), 1);
        let _ = std::fs::remove_dir_all(&path);
    }

    #[test]
    fn test_period_with_shares_round_trip() {
        let path = temp_db_path("period");
        let store = RocksLedgerStore::open(&path).unwrap();

        let mut shares = BTreeMap::new();
        shares.insert(p(1), AuthorShare { percentage: 60, amount: 6, withdrawn: false });
        shares.insert(p(2), AuthorShare { percentage: 40, amount: 4, withdrawn: true });
        let mut score_snapshot = BTreeMap::new();
        score_snapshot.insert(p(1), Score(600_000));
        score_snapshot.insert(p(2), Score(400_000));
        let period = DistributionPeriod {
            id: 1,
            snapshot_time: 100,
            pool_amount: 10,
            score_snapshot,
            shares,
        };
        store.save_period(&period).unwrap();

        // A second period must not leak shares into the first.
        let other = DistributionPeriod {
            id: 2,
            snapshot_time: 200,
            pool_amount: 0,
            score_snapshot: BTreeMap::new(),
            shares: BTreeMap::new(),
        };
        store.save_period(&other).unwrap();

        assert_eq!(store.get_period(1).unwrap(), Some(period));
        assert_eq!(store.get_period(2).unwrap(), Some(other));
        assert_eq!(store.list_periods().unwrap().len(), 2);
        let _ = std::fs::remove_dir_all(&path);
    }

    #[test]
    fn test_meta_round_trip() {
        let path = temp_db_path("meta");
        let store = RocksLedgerStore::open(&path).unwrap();
        assert_eq!(store.get_meta("ledger").unwrap(), None);
        store.put_meta("ledger", b"{}").unwrap();
        assert_eq!(store.get_meta("ledger").unwrap(), Some(b"{}".to_vec()));
        let _ = std::fs::remove_dir_all(&path);
    }
}
