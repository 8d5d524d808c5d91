// crates/folio-ledger/src/ledger.rs
//
// The `Ledger` facade.
//
// Owns the ledger state and the signature verifier and exposes every ledger
// operation as a method. Mutating methods take `&mut self`, so operations
// are applied strictly one at a time.

use std::sync::Arc;

use serde::Serialize;

use folio_core::author::Author;
use folio_core::citation::{CitationEdge, CitationId};
use folio_core::crypto::Ed25519Verifier;
use folio_core::distribution::{AuthorShare, DistributionPeriod};
use folio_core::error::FolioError;
use folio_core::identity::Identity;
use folio_core::principal::Principal;
use folio_core::score::Score;
use folio_core::traits::{LedgerStore, SignatureVerifier};
use folio_core::{Amount, Hash32, Timestamp};
use folio_economics::RevenuePool;

use crate::access::Role;
use crate::config::LedgerConfig;
use crate::events::LedgerEvent;
use crate::journal::TokenTransaction;
use crate::ops::{LedgerOp, OpOutcome, OpRecord};
use crate::state::LedgerState;
use crate::{distribution, graph, identity, persist, registry};

/// Aggregate counters over the ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    pub now: Timestamp,
    pub authors: usize,
    pub citation_edges: usize,
    pub verified_edges: usize,
    pub links: usize,
    pub identities: usize,
    pub verified_identities: usize,
    pub periods: usize,
    pub next_period_id: u64,
    pub circulating_supply: Amount,
    pub pool_available: Amount,
    pub pool_reserved: Amount,
    pub distribution_period: u64,
    pub transactions: usize,
}

pub struct Ledger {
    state: LedgerState,
    verifier: Arc<dyn SignatureVerifier>,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger").field("state", &self.state).finish_non_exhaustive()
    }
}

impl Ledger {
    /// Fresh ledger with the ed25519 signature verifier.
    pub fn new(config: &LedgerConfig) -> Self {
        Self::with_verifier(config, Arc::new(Ed25519Verifier))
    }

    pub fn with_verifier(config: &LedgerConfig, verifier: Arc<dyn SignatureVerifier>) -> Self {
        Self {
            state: LedgerState::new(config),
            verifier,
        }
    }

    /// Load a ledger from `store`, or start fresh from `config` if the store
    /// holds no ledger yet.
    pub fn restore(store: &dyn LedgerStore, config: &LedgerConfig) -> Result<Self, FolioError> {
        let state = match persist::load_state(store)? {
            Some(state) => {
                tracing::info!(
                    "Restored ledger: {} authors, {} citations, {} periods",
                    state.authors.len(),
                    state.citations.len(),
                    state.periods.len()
                );
                state
            }
            None => {
                tracing::info!("No persisted ledger found, starting from genesis");
                LedgerState::new(config)
            }
        };
        Ok(Self {
            state,
            verifier: Arc::new(Ed25519Verifier),
        })
    }

    pub fn persist(&self, store: &dyn LedgerStore) -> Result<(), FolioError> {
        persist::save_state(&self.state, store)
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    // --- clock ---

    pub fn now(&self) -> Timestamp {
        self.state.now()
    }

    /// Move the ledger clock to `max(now, at)`. Returns the new time.
    pub fn advance_clock(&mut self, at: Timestamp) -> Timestamp {
        self.state.advance_clock(at)
    }

    // --- author registry ---

    pub fn register_author(&mut self, caller: Principal) -> Result<Author, FolioError> {
        registry::register_author(&mut self.state, caller)
    }

    pub fn add_citation(&mut self, caller: Principal, cited: Principal) -> Result<Amount, FolioError> {
        registry::add_citation(&mut self.state, caller, cited)
    }

    pub fn burn_tokens(&mut self, caller: Principal, amount: Amount) -> Result<(), FolioError> {
        registry::burn_tokens(&mut self.state, caller, amount)
    }

    pub fn update_page_ranks(
        &mut self,
        caller: Principal,
        iterations: u32,
        damping_percent: u32,
    ) -> Result<Vec<(Principal, Score)>, FolioError> {
        registry::update_page_ranks(&mut self.state, caller, iterations, damping_percent)
    }

    pub fn get_author(&self, principal: &Principal) -> Option<&Author> {
        registry::get_author(&self.state, principal)
    }

    /// Registered authors in registration order.
    pub fn authors(&self) -> Vec<&Author> {
        self.state.authors_in_registration_order()
    }

    pub fn balance_of(&self, principal: &Principal) -> Amount {
        registry::balance_of(&self.state, principal)
    }

    pub fn get_cited_authors(&self, principal: &Principal) -> Vec<Principal> {
        registry::get_cited_authors(&self.state, principal)
    }

    pub fn token_history(&self, principal: &Principal) -> Vec<&TokenTransaction> {
        registry::token_history(&self.state, principal)
    }

    // --- citation graph ---

    pub fn add_citation_edge(
        &mut self,
        caller: Principal,
        cited: Principal,
        resource_locator: &str,
    ) -> Result<CitationId, FolioError> {
        graph::add_citation_edge(&mut self.state, caller, cited, resource_locator)
    }

    pub fn get_direct_citers(&self, author: &Principal) -> Vec<Principal> {
        graph::get_direct_citers(&self.state, author)
    }

    pub fn get_author_lineage(&self, author: &Principal) -> Vec<Principal> {
        graph::get_author_lineage(&self.state, author)
    }

    pub fn update_merkle_root(&mut self, caller: Principal, root: Hash32) -> Result<(), FolioError> {
        graph::update_merkle_root(&mut self.state, caller, root)
    }

    pub fn verify_citation(
        &mut self,
        caller: Principal,
        edge_id: &CitationId,
        proof: &[Hash32],
    ) -> Result<(), FolioError> {
        graph::verify_citation(&mut self.state, caller, edge_id, proof)
    }

    pub fn get_citation(&self, edge_id: &CitationId) -> Result<&CitationEdge, FolioError> {
        graph::get_citation(&self.state, edge_id)
    }

    pub fn integrity_root(&self) -> Hash32 {
        self.state.integrity_root
    }

    // --- profit distribution ---

    pub fn deposit_revenue(&mut self, caller: Principal, amount: Amount) -> Result<(), FolioError> {
        distribution::deposit_revenue(&mut self.state, caller, amount)
    }

    pub fn set_distribution_period(&mut self, caller: Principal, duration: u64) -> Result<(), FolioError> {
        distribution::set_distribution_period(&mut self.state, caller, duration)
    }

    pub fn distribute_profits(&mut self) -> Result<u64, FolioError> {
        distribution::distribute_profits(&mut self.state)
    }

    pub fn get_author_share(&self, period_id: u64, author: &Principal) -> AuthorShare {
        distribution::get_author_share(&self.state, period_id, author)
    }

    pub fn withdraw_share(&mut self, caller: Principal, period_id: u64) -> Result<Amount, FolioError> {
        distribution::withdraw_share(&mut self.state, caller, period_id)
    }

    pub fn current_distribution_id(&self) -> u64 {
        distribution::current_distribution_id(&self.state)
    }

    pub fn get_period(&self, period_id: u64) -> Option<&DistributionPeriod> {
        distribution::get_period(&self.state, period_id)
    }

    pub fn revenue_pool(&self) -> RevenuePool {
        distribution::revenue_pool(&self.state)
    }

    // --- identity registry ---

    pub fn register_identity(
        &mut self,
        caller: Principal,
        public_key_hash: Hash32,
        metadata_locator: &str,
    ) -> Result<(), FolioError> {
        identity::register_identity(&mut self.state, caller, public_key_hash, metadata_locator)
    }

    pub fn verify_identity(&mut self, caller: Principal, target: Principal) -> Result<(), FolioError> {
        identity::verify_identity(&mut self.state, caller, target)
    }

    pub fn revoke_identity(&mut self, caller: Principal, target: Principal) -> Result<(), FolioError> {
        identity::revoke_identity(&mut self.state, caller, target)
    }

    pub fn set_identity(
        &mut self,
        caller: Principal,
        target: Principal,
        public_key_hash: Hash32,
        metadata_locator: &str,
        verified: bool,
    ) -> Result<(), FolioError> {
        identity::set_identity(&mut self.state, caller, target, public_key_hash, metadata_locator, verified)
    }

    pub fn verify_signature(&self, caller: &Principal, message_hash: &Hash32, signature: &[u8]) -> bool {
        identity::verify_signature(self.verifier.as_ref(), caller, message_hash, signature)
    }

    pub fn get_identity(&self, principal: &Principal) -> Option<&Identity> {
        identity::get_identity(&self.state, principal)
    }

    // --- access control ---

    pub fn has_role(&self, who: &Principal, role: Role) -> bool {
        self.state.roles.has_role(who, role)
    }

    pub fn grant_role(&mut self, caller: Principal, target: Principal, role: Role) -> Result<(), FolioError> {
        self.state.roles.require(&caller, Role::Admin)?;
        if self.state.roles.grant(target, role) {
            self.state.emit(LedgerEvent::RoleGranted {
                principal: target,
                role,
            });
            tracing::info!("Role {} granted to {} by {}", role, target.short(), caller.short());
        }
        Ok(())
    }

    pub fn revoke_role(&mut self, caller: Principal, target: Principal, role: Role) -> Result<(), FolioError> {
        self.state.roles.require(&caller, Role::Admin)?;
        if self.state.roles.revoke(&target, role) {
            self.state.emit(LedgerEvent::RoleRevoked {
                principal: target,
                role,
            });
            tracing::info!("Role {} revoked from {} by {}", role, target.short(), caller.short());
        }
        Ok(())
    }

    // --- operation log ---

    /// Apply one serialized operation.
    pub fn apply(&mut self, op: &LedgerOp) -> Result<OpOutcome, FolioError> {
        let outcome = match op {
            LedgerOp::RegisterAuthor { caller } => {
                OpOutcome::Registered(self.register_author(*caller)?.principal)
            }
            LedgerOp::AddCitation { caller, cited } => OpOutcome::Rewarded(self.add_citation(*caller, *cited)?),
            LedgerOp::BurnTokens { caller, amount } => {
                self.burn_tokens(*caller, *amount)?;
                OpOutcome::Done
            }
            LedgerOp::UpdatePageRanks {
                caller,
                iterations,
                damping_percent,
            } => OpOutcome::Scored(self.update_page_ranks(*caller, *iterations, *damping_percent)?.len()),
            LedgerOp::AddCitationEdge {
                caller,
                cited,
                resource_locator,
            } => OpOutcome::CitationRecorded(self.add_citation_edge(*caller, *cited, resource_locator)?),
            LedgerOp::UpdateMerkleRoot { caller, root } => {
                self.update_merkle_root(*caller, *root)?;
                OpOutcome::Done
            }
            LedgerOp::VerifyCitation { caller, edge_id, proof } => {
                self.verify_citation(*caller, edge_id, proof)?;
                OpOutcome::Done
            }
            LedgerOp::DepositRevenue { caller, amount } => {
                self.deposit_revenue(*caller, *amount)?;
                OpOutcome::Done
            }
            LedgerOp::SetDistributionPeriod { caller, duration } => {
                self.set_distribution_period(*caller, *duration)?;
                OpOutcome::Done
            }
            LedgerOp::DistributeProfits => OpOutcome::PeriodCreated(self.distribute_profits()?),
            LedgerOp::WithdrawShare { caller, period_id } => {
                OpOutcome::Withdrawn(self.withdraw_share(*caller, *period_id)?)
            }
            LedgerOp::RegisterIdentity {
                caller,
                public_key_hash,
                metadata_locator,
            } => {
                self.register_identity(*caller, *public_key_hash, metadata_locator)?;
                OpOutcome::Done
            }
            LedgerOp::VerifyIdentity { caller, target } => {
                self.verify_identity(*caller, *target)?;
                OpOutcome::Done
            }
            LedgerOp::RevokeIdentity { caller, target } => {
                self.revoke_identity(*caller, *target)?;
                OpOutcome::Done
            }
            LedgerOp::SetIdentity {
                caller,
                target,
                public_key_hash,
                metadata_locator,
                verified,
            } => {
                self.set_identity(*caller, *target, *public_key_hash, metadata_locator, *verified)?;
                OpOutcome::Done
            }
            LedgerOp::GrantRole { caller, target, role } => {
                self.grant_role(*caller, *target, *role)?;
                OpOutcome::Done
            }
            LedgerOp::RevokeRole { caller, target, role } => {
                self.revoke_role(*caller, *target, *role)?;
                OpOutcome::Done
            }
        };
        Ok(outcome)
    }

    /// Advance the clock to the record's time, then apply its operation.
    ///
    /// The clock moves even when the operation is rejected, so a failed
    /// record still changes `now` and the state digest.
    pub fn apply_record(&mut self, record: &OpRecord) -> Result<OpOutcome, FolioError> {
        if let Some(at) = record.at {
            self.advance_clock(at);
        }
        self.apply(&record.op)
    }

    /// Hand the pending events to the caller, emptying the journal.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        self.state.take_events()
    }

    /// Hex SHA-256 of the canonical state encoding.
    pub fn state_digest(&self) -> Result<String, FolioError> {
        Ok(hex::encode(self.state.digest()?))
    }

    pub fn stats(&self) -> LedgerStats {
        let state = &self.state;
        LedgerStats {
            now: state.now,
            authors: state.authors.len(),
            citation_edges: state.citations.len(),
            verified_edges: state.citations.values().filter(|e| e.verified).count(),
            links: state.links.len(),
            identities: state.identities.len(),
            verified_identities: state.identities.values().filter(|i| i.verified).count(),
            periods: state.periods.len(),
            next_period_id: state.next_period_id,
            circulating_supply: state.circulating_supply,
            pool_available: state.pool.available(),
            pool_reserved: state.pool.reserved(),
            distribution_period: state.distribution_period,
            transactions: state.transactions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(b: u8) -> Principal {
        Principal([b; 32])
    }

    #[test]
    fn test_failed_op_emits_nothing() {
        let mut ledger = Ledger::new(&LedgerConfig::default());
        ledger.register_author(p(1)).unwrap();
        ledger.drain_events();
        assert!(ledger.register_author(p(1)).is_err());
        assert!(ledger.drain_events().is_empty());
    }

    #[test]
    fn test_role_management_requires_admin() {
        let config = LedgerConfig {
            admins: vec![p(0xAA)],
            ..LedgerConfig::default()
        };
        let mut ledger = Ledger::new(&config);
        assert!(matches!(
            ledger.grant_role(p(1), p(1), Role::Treasurer),
            Err(FolioError::Unauthorized(_))
        ));
        ledger.grant_role(p(0xAA), p(1), Role::Treasurer).unwrap();
        assert!(ledger.has_role(&p(1), Role::Treasurer));
        assert_eq!(
            ledger.drain_events(),
            vec![LedgerEvent::RoleGranted {
                principal: p(1),
                role: Role::Treasurer
            }]
        );
        ledger.set_distribution_period(p(1), 10).unwrap();
        ledger.revoke_role(p(0xAA), p(1), Role::Treasurer).unwrap();
        assert!(ledger.set_distribution_period(p(1), 20).is_err());
    }

    #[test]
    fn test_apply_record_advances_clock() {
        let mut ledger = Ledger::new(&LedgerConfig::default());
        let record = OpRecord {
            at: Some(50),
            op: LedgerOp::RegisterAuthor { caller: p(1) },
        };
        assert_eq!(ledger.apply_record(&record), Ok(OpOutcome::Registered(p(1))));
        assert_eq!(ledger.now(), 50);
        assert_eq!(ledger.get_author(&p(1)).unwrap().registered_at, 50);
    }

    #[test]
    fn test_rejected_record_still_advances_clock() {
        let mut ledger = Ledger::new(&LedgerConfig::default());
        ledger.register_author(p(1)).unwrap();
        ledger.drain_events();
        let before = ledger.state_digest();
        let record = OpRecord {
            at: Some(50),
            op: LedgerOp::RegisterAuthor { caller: p(1) },
        };
        assert_eq!(
            ledger.apply_record(&record),
            Err(FolioError::AlreadyRegistered(p(1)))
        );
        assert_eq!(ledger.now(), 50);
        assert_ne!(ledger.state_digest(), before);
        assert!(ledger.drain_events().is_empty());
    }

    #[test]
    fn test_stats_counts() {
        let mut ledger = Ledger::new(&LedgerConfig::default());
        ledger.register_author(p(1)).unwrap();
        ledger.register_author(p(2)).unwrap();
        ledger.add_citation_edge(p(1), p(2), "ipfs://x").unwrap();
        ledger.deposit_revenue(p(3), 7).unwrap();
        let stats = ledger.stats();
        assert_eq!(stats.authors, 2);
        assert_eq!(stats.citation_edges, 1);
        assert_eq!(stats.verified_edges, 0);
        assert_eq!(stats.links, 1);
        assert_eq!(stats.pool_available, 7);
        assert_eq!(stats.next_period_id, 1);
        assert_eq!(stats.transactions, 2);
    }
}
