// crates/folio-core/src/citation.rs

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::FolioError;
use crate::principal::Principal;
use crate::Timestamp;

/// Domain tag mixed into every citation id so ids never collide with other
/// hashes computed by the ledger.
const CITATION_ID_DOMAIN: &[u8] = b"folio:citation:v1";

/// Deterministic identifier of a logical citation.
///
/// Derived from (citing, cited, resource locator), so inserting the same
/// logical citation twice always yields the same id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CitationId(pub [u8; 32]);

impl CitationId {
    /// Derive the id for a citation.
    ///
    /// Each field is length-prefixed (u64 big-endian) before hashing, so no two
    /// distinct (citing, cited, locator) triples share an encoding.
    pub fn derive(citing: &Principal, cited: &Principal, resource_locator: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(CITATION_ID_DOMAIN);
        for field in [
            citing.as_bytes().as_slice(),
            cited.as_bytes().as_slice(),
            resource_locator.as_bytes(),
        ] {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field);
        }
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for CitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for CitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CitationId({}..)", &self.to_hex()[..12])
    }
}

impl FromStr for CitationId {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)
            .map_err(|e| FolioError::Serialization(format!("Invalid citation id hex: {}", e)))?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            FolioError::Serialization("Citation id must be exactly 32 bytes".to_string())
        })?;
        Ok(Self(arr))
    }
}

impl Serialize for CitationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CitationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = CitationId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 64-character hex citation id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<CitationId, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IdVisitor)
    }
}

/// A directed citation: `citing_author` references `cited_author`'s work
/// located at `resource_locator`.
///
/// Edges are immutable once recorded except for `verified`, which flips to
/// true after a successful integrity proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEdge {
    pub id: CitationId,
    pub citing_author: Principal,
    pub cited_author: Principal,
    /// Content-addressed pointer (e.g. "ipfs://..."). Opaque to the ledger.
    pub resource_locator: String,
    /// Ledger time at insertion.
    pub timestamp: Timestamp,
    pub verified: bool,
}

impl CitationEdge {
    /// Build an unverified edge with its derived id.
    pub fn new(
        citing_author: Principal,
        cited_author: Principal,
        resource_locator: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        let resource_locator = resource_locator.into();
        Self {
            id: CitationId::derive(&citing_author, &cited_author, &resource_locator),
            citing_author,
            cited_author,
            resource_locator,
            timestamp,
            verified: false,
        }
    }
}
