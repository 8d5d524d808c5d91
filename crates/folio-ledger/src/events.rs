// crates/folio-ledger/src/events.rs
//
// Notifications emitted by ledger operations.
//
// Every successful mutating operation appends one event to the ledger's
// event journal. External indexers drain the journal with
// `Ledger::drain_events`. Events are never part of the ledger state digest.

use serde::{Deserialize, Serialize};

use folio_core::citation::CitationId;
use folio_core::principal::Principal;
use folio_core::{Amount, Timestamp};

use crate::access::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    AuthorRegistered {
        author: Principal,
        grant: Amount,
    },
    /// A registry citation minted a reward for the cited author.
    CitationRewarded {
        citing: Principal,
        cited: Principal,
        reward: Amount,
        /// Cited author's citation count after this citation.
        citation_count: u64,
    },
    TokensBurned {
        author: Principal,
        amount: Amount,
    },
    PageRanksUpdated {
        iterations: u32,
        damping_percent: u32,
        author_count: usize,
    },
    CitationAdded {
        id: CitationId,
        citing: Principal,
        cited: Principal,
        resource_locator: String,
        timestamp: Timestamp,
    },
    IntegrityRootUpdated {
        /// Hex-encoded root.
        root: String,
    },
    CitationVerified {
        id: CitationId,
    },
    RevenueDeposited {
        from: Principal,
        amount: Amount,
    },
    DistributionPeriodSet {
        duration: u64,
    },
    ProfitsDistributed {
        period_id: u64,
        pool_amount: Amount,
        allocated: Amount,
        author_count: usize,
    },
    ShareWithdrawn {
        period_id: u64,
        author: Principal,
        amount: Amount,
    },
    IdentityRegistered {
        principal: Principal,
    },
    IdentityVerified {
        principal: Principal,
    },
    IdentityRevoked {
        principal: Principal,
    },
    IdentityUpdated {
        principal: Principal,
        verified: bool,
    },
    RoleGranted {
        principal: Principal,
        role: Role,
    },
    RoleRevoked {
        principal: Principal,
        role: Role,
    },
}

impl LedgerEvent {
    /// Short event name, matching the serialized `event` tag.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::AuthorRegistered { .. } => "author_registered",
            LedgerEvent::CitationRewarded { .. } => "citation_rewarded",
            LedgerEvent::TokensBurned { .. } => "tokens_burned",
            LedgerEvent::PageRanksUpdated { .. } => "page_ranks_updated",
            LedgerEvent::CitationAdded { .. } => "citation_added",
            LedgerEvent::IntegrityRootUpdated { .. } => "integrity_root_updated",
            LedgerEvent::CitationVerified { .. } => "citation_verified",
            LedgerEvent::RevenueDeposited { .. } => "revenue_deposited",
            LedgerEvent::DistributionPeriodSet { .. } => "distribution_period_set",
            LedgerEvent::ProfitsDistributed { .. } => "profits_distributed",
            LedgerEvent::ShareWithdrawn { .. } => "share_withdrawn",
            LedgerEvent::IdentityRegistered { .. } => "identity_registered",
            LedgerEvent::IdentityVerified { .. } => "identity_verified",
            LedgerEvent::IdentityRevoked { .. } => "identity_revoked",
            LedgerEvent::IdentityUpdated { .. } => "identity_updated",
            LedgerEvent::RoleGranted { .. } => "role_granted",
            LedgerEvent::RoleRevoked { .. } => "role_revoked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_serialized_tag() {
        let events = vec![
            LedgerEvent::AuthorRegistered { author: Principal([1; 32]), grant: 10 },
            LedgerEvent::CitationVerified { id: CitationId([2; 32]) },
            LedgerEvent::RoleGranted { principal: Principal([1; 32]), role: Role::Treasurer },
        ];
        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["event"], event.name());
        }
    }
}
