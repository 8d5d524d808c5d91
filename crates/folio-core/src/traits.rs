// crates/folio-core/src/traits.rs

use crate::author::Author;
use crate::citation::{CitationEdge, CitationId};
use crate::distribution::DistributionPeriod;
use crate::error::FolioError;
use crate::identity::Identity;
use crate::principal::Principal;
use crate::Hash32;

/// Trait for persistent ledger storage.
///
/// The logical model is four keyed tables (authors by principal, citation
/// edges by id, distribution periods by id with their share sub-tables,
/// identities by principal) plus opaque metadata blobs for the remaining
/// ledger-wide state.
///
/// Implemented by folio-store (RocksDB and in-memory backends).
pub trait LedgerStore: Send + Sync {
    /// Save an author. Overwrites if the principal already exists.
    fn save_author(&self, author: &Author) -> Result<(), FolioError>;

    /// Retrieve an author by principal.
    fn get_author(&self, principal: &Principal) -> Result<Option<Author>, FolioError>;

    /// List all authors (any order).
    fn list_authors(&self) -> Result<Vec<Author>, FolioError>;

    /// Save a citation edge. Overwrites if the id already exists.
    fn save_citation(&self, edge: &CitationEdge) -> Result<(), FolioError>;

    /// Retrieve a citation edge by id.
    fn get_citation(&self, id: &CitationId) -> Result<Option<CitationEdge>, FolioError>;

    /// List all citation edges (any order).
    fn list_citations(&self) -> Result<Vec<CitationEdge>, FolioError>;

    /// Save a distribution period together with its shares.
    fn save_period(&self, period: &DistributionPeriod) -> Result<(), FolioError>;

    /// Retrieve a distribution period by id.
    fn get_period(&self, id: u64) -> Result<Option<DistributionPeriod>, FolioError>;

    /// List all distribution periods (any order).
    fn list_periods(&self) -> Result<Vec<DistributionPeriod>, FolioError>;

    /// Save an identity record.
    fn save_identity(&self, identity: &Identity) -> Result<(), FolioError>;

    /// Retrieve an identity by principal.
    fn get_identity(&self, principal: &Principal) -> Result<Option<Identity>, FolioError>;

    /// List all identities (any order).
    fn list_identities(&self) -> Result<Vec<Identity>, FolioError>;

    /// Store an opaque metadata value under `key`.
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), FolioError>;

    /// Retrieve a metadata value by key.
    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, FolioError>;
}

/// Trait for the external signature primitive.
///
/// The ledger never signs; it only asks whether `signature` over
/// `message_hash` was produced by `expected`.
///
/// Implemented by `crypto::Ed25519Verifier`.
pub trait SignatureVerifier: Send + Sync {
    /// Returns `Ok(true)` if the signer recovered from `signature` is `expected`.
    ///
    /// Malformed signatures are reported as `Err(FolioError::Crypto)`.
    fn signed_by(
        &self,
        expected: &Principal,
        message_hash: &Hash32,
        signature: &[u8],
    ) -> Result<bool, FolioError>;
}
