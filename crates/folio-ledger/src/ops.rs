// crates/folio-ledger/src/ops.rs
//
// Serializable ledger operations.
//
// An operation log is a sequence of `OpRecord`s, one JSON object per line:
//
//   {"at": 1700000000, "op": {"type": "register_author", "caller": "<hex>"}}
//
// `at` advances the ledger clock before the operation runs. Hashes are hex
// strings on the wire.

use serde::{Deserialize, Serialize};

use folio_core::citation::CitationId;
use folio_core::principal::Principal;
use folio_core::{Amount, Hash32, Timestamp};

use crate::access::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerOp {
    RegisterAuthor {
        caller: Principal,
    },
    AddCitation {
        caller: Principal,
        cited: Principal,
    },
    BurnTokens {
        caller: Principal,
        amount: Amount,
    },
    UpdatePageRanks {
        caller: Principal,
        iterations: u32,
        damping_percent: u32,
    },
    AddCitationEdge {
        caller: Principal,
        cited: Principal,
        resource_locator: String,
    },
    UpdateMerkleRoot {
        caller: Principal,
        #[serde(with = "hex_hash")]
        root: Hash32,
    },
    VerifyCitation {
        caller: Principal,
        edge_id: CitationId,
        #[serde(with = "hex_hash_list", default)]
        proof: Vec<Hash32>,
    },
    DepositRevenue {
        caller: Principal,
        amount: Amount,
    },
    SetDistributionPeriod {
        caller: Principal,
        duration: u64,
    },
    DistributeProfits,
    WithdrawShare {
        caller: Principal,
        period_id: u64,
    },
    RegisterIdentity {
        caller: Principal,
        #[serde(with = "hex_hash")]
        public_key_hash: Hash32,
        metadata_locator: String,
    },
    VerifyIdentity {
        caller: Principal,
        target: Principal,
    },
    RevokeIdentity {
        caller: Principal,
        target: Principal,
    },
    SetIdentity {
        caller: Principal,
        target: Principal,
        #[serde(with = "hex_hash")]
        public_key_hash: Hash32,
        metadata_locator: String,
        verified: bool,
    },
    GrantRole {
        caller: Principal,
        target: Principal,
        role: Role,
    },
    RevokeRole {
        caller: Principal,
        target: Principal,
        role: Role,
    },
}

impl LedgerOp {
    /// Snake-case operation name, matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerOp::RegisterAuthor { .. } => "register_author",
            LedgerOp::AddCitation { .. } => "add_citation",
            LedgerOp::BurnTokens { .. } => "burn_tokens",
            LedgerOp::UpdatePageRanks { .. } => "update_page_ranks",
            LedgerOp::AddCitationEdge { .. } => "add_citation_edge",
            LedgerOp::UpdateMerkleRoot { .. } => "update_merkle_root",
            LedgerOp::VerifyCitation { .. } => "verify_citation",
            LedgerOp::DepositRevenue { .. } => "deposit_revenue",
            LedgerOp::SetDistributionPeriod { .. } => "set_distribution_period",
            LedgerOp::DistributeProfits => "distribute_profits",
            LedgerOp::WithdrawShare { .. } => "withdraw_share",
            LedgerOp::RegisterIdentity { .. } => "register_identity",
            LedgerOp::VerifyIdentity { .. } => "verify_identity",
            LedgerOp::RevokeIdentity { .. } => "revoke_identity",
            LedgerOp::SetIdentity { .. } => "set_identity",
            LedgerOp::GrantRole { .. } => "grant_role",
            LedgerOp::RevokeRole { .. } => "revoke_role",
        }
    }
}

/// One line of an operation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpRecord {
    /// Ledger time to advance to before applying `op`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<Timestamp>,
    pub op: LedgerOp,
}

/// Result of a successfully applied operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OpOutcome {
    Done,
    Registered(Principal),
    /// Reward credited to the cited author.
    Rewarded(Amount),
    CitationRecorded(CitationId),
    /// Number of authors whose scores were recomputed.
    Scored(usize),
    PeriodCreated(u64),
    Withdrawn(Amount),
}

mod hex_hash {
    use serde::{Deserialize, Deserializer, Serializer};

    use folio_core::Hash32;

    pub fn serialize<S: Serializer>(hash: &Hash32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hash32, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse(s: &str) -> Result<Hash32, String> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| format!("invalid hex hash: {}", e))?;
        bytes
            .try_into()
            .map_err(|_| "hash must be exactly 32 bytes".to_string())
    }
}

mod hex_hash_list {
    use serde::{Deserialize, Deserializer, Serializer};

    use folio_core::Hash32;

    pub fn serialize<S: Serializer>(hashes: &[Hash32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(hashes.iter().map(hex::encode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Hash32>, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| super::hex_hash::parse(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
