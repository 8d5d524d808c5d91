// crates/folio-core/src/lib.rs
//
// folio-core: Core types, traits, and crypto primitives for the Folio
// citation ledger.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the ledger records (authors, citation edges, distribution
// periods, identities), the fixed-point score type, the error type, the
// hashing and signature helpers, and the storage/verification seams.

pub mod author;
pub mod citation;
pub mod crypto;
pub mod distribution;
pub mod error;
pub mod identity;
pub mod integrity;
pub mod principal;
pub mod score;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use folio_core::Principal;`

pub use author::Author;
pub use citation::{CitationEdge, CitationId};
pub use distribution::{AuthorShare, DistributionPeriod};
pub use identity::Identity;
pub use integrity::MerkleTree;
pub use principal::Principal;
pub use score::{Score, SCORE_SCALE};

// Error type
pub use error::FolioError;

// Traits
pub use traits::{LedgerStore, SignatureVerifier};

/// Smallest-unit token amount. All balances and pools are tracked in this unit.
pub type Amount = u64;

/// Ledger-assigned logical time (seconds).
pub type Timestamp = u64;

/// A 32-byte SHA-256 digest.
pub type Hash32 = [u8; 32];
