// crates/folio-core/src/principal.rs

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FolioError;

/// An authenticated caller identity on the ledger.
///
/// A principal is the 32-byte ed25519 verifying key of the caller. The same
/// principal keys both the author table and the identity table, which are
/// independent namespaces.
///
/// Serialized as a lowercase hex string so that principals can be used as
/// JSON map keys and written by hand in operation logs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Principal(pub [u8; 32]);

impl Principal {
    /// Build a principal from raw key bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short form used in log lines: first 8 hex characters.
    pub fn short(&self) -> String {
        let mut s = self.to_hex();
        s.truncate(8);
        s
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.short())
    }
}

impl FromStr for Principal {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)
            .map_err(|e| FolioError::Serialization(format!("Invalid principal hex: {}", e)))?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            FolioError::Serialization("Principal must be exactly 32 bytes".to_string())
        })?;
        Ok(Self(arr))
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PrincipalVisitor;

        impl<'de> Visitor<'de> for PrincipalVisitor {
            type Value = Principal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 64-character hex principal")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Principal, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(PrincipalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let p = Principal([7u8; 32]);
        let parsed: Principal = p.to_hex().parse().unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn accepts_0x_prefix() {
        let p = Principal([0xab; 32]);
        let parsed: Principal = format!("0x{}", p.to_hex()).parse().unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!("abcd".parse::<Principal>().is_err());
        assert!("zz".repeat(32).parse::<Principal>().is_err());
    }

    #[test]
    fn works_as_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(Principal([1u8; 32]), 5u64);
        let json = serde_json::to_string(&map).unwrap();
        let back: std::collections::BTreeMap<Principal, u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
