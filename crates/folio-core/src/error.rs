use thiserror::Error;

use crate::principal::Principal;

/// Ledger-wide error types for Folio.
///
/// The first group are validation failures raised by ledger operations. They
/// are never retried inside the ledger and leave state unchanged. The second
/// group covers the ambient layers (storage, serialization, crypto, config).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// The principal already has a record in this namespace.
    #[error("Already registered: {0}")]
    AlreadyRegistered(Principal),

    /// The principal has no record in this namespace.
    #[error("Not registered: {0}")]
    NotRegistered(Principal),

    /// An author attempted to cite themselves.
    #[error("Cannot cite yourself")]
    SelfCitation,

    /// A citation edge with the same id already exists.
    #[error("Citation already exists: {0}")]
    DuplicateCitation(String),

    /// PageRank iteration count must be greater than zero.
    #[error("Iterations must be greater than 0")]
    InvalidIterations,

    /// Damping percentage must be within 0..=100.
    #[error("Damping factor must be <= 100, got {0}")]
    InvalidDamping(u32),

    /// Caller lacks the capability required by the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The configured distribution period has not elapsed.
    #[error("Too early: next distribution allowed at {next_allowed}, now {now}")]
    TooEarly { now: u64, next_allowed: u64 },

    /// The share for this period has already been claimed.
    #[error("Already withdrawn: period {period_id}")]
    AlreadyWithdrawn { period_id: u64 },

    /// The caller holds no positive share in the period.
    #[error("Not eligible for period {period_id}")]
    NotEligible { period_id: u64 },

    /// The Merkle proof does not authenticate the citation.
    #[error("Invalid proof for citation {0}")]
    InvalidProof(String),

    /// The balance does not cover the requested amount.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u64, available: u64 },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Integer arithmetic would overflow.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// Storage layer error (RocksDB, in-memory store).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Cryptographic error (malformed key or signature).
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Invalid configuration value.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        FolioError::Serialization(e.to_string())
    }
}

impl From<ed25519_dalek::SignatureError> for FolioError {
    fn from(e: ed25519_dalek::SignatureError) -> Self {
        FolioError::Crypto(e.to_string())
    }
}
