// crates/folio-core/src/identity.rs

use serde::{Deserialize, Serialize};

use crate::principal::Principal;
use crate::{Hash32, Timestamp};

/// Public-key binding for a principal.
///
/// Registered by the principal itself; `verified` and the key fields are
/// changed only by a holder of the identity-verifier capability. Consumed by
/// off-ledger layers for message verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub principal: Principal,
    /// Hash of the principal's published public key.
    pub public_key_hash: Hash32,
    /// Content-addressed pointer to profile metadata (e.g. "ipfs://author/1").
    pub metadata_locator: String,
    pub verified: bool,
    pub registered_at: Timestamp,
}
