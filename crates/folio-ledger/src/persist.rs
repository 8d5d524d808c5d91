// crates/folio-ledger/src/persist.rs
//
// Mapping between `LedgerState` and a `LedgerStore`.
//
// The four record tables go to their keyed store tables. Everything else
// (links, roles, clock, pool, integrity root, counters, token journal) is
// written as a single JSON metadata record under `META_KEY`. A store without
// that record holds no ledger.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use folio_core::error::FolioError;
use folio_core::principal::Principal;
use folio_core::traits::LedgerStore;
use folio_core::{Amount, Hash32, Timestamp};
use folio_economics::{RevenuePool, RewardCurve};

use crate::access::RoleTable;
use crate::journal::TokenTransaction;
use crate::state::LedgerState;

/// Metadata key of the ledger-wide record.
pub const META_KEY: &str = "ledger";

#[derive(Debug, Serialize, Deserialize)]
struct LedgerMeta {
    links: BTreeSet<(Principal, Principal)>,
    integrity_root: Hash32,
    roles: RoleTable,
    pool: RevenuePool,
    initial_grant: Amount,
    reward_curve: RewardCurve,
    distribution_period: u64,
    last_distribution: Timestamp,
    next_period_id: u64,
    now: Timestamp,
    circulating_supply: Amount,
    transactions: Vec<TokenTransaction>,
}

/// Write the full state to `store`.
///
/// Records are written before the metadata record, so an interrupted save
/// never exposes metadata that refers to missing records.
pub fn save_state(state: &LedgerState, store: &dyn LedgerStore) -> Result<(), FolioError> {
    for author in state.authors.values() {
        store.save_author(author)?;
    }
    for edge in state.citations.values() {
        store.save_citation(edge)?;
    }
    for period in state.periods.values() {
        store.save_period(period)?;
    }
    for identity in state.identities.values() {
        store.save_identity(identity)?;
    }

    let meta = LedgerMeta {
        links: state.links.clone(),
        integrity_root: state.integrity_root,
        roles: state.roles.clone(),
        pool: state.pool,
        initial_grant: state.initial_grant,
        reward_curve: state.reward_curve,
        distribution_period: state.distribution_period,
        last_distribution: state.last_distribution,
        next_period_id: state.next_period_id,
        now: state.now,
        circulating_supply: state.circulating_supply,
        transactions: state.transactions.clone(),
    };
    store.put_meta(META_KEY, &serde_json::to_vec(&meta)?)?;

    tracing::info!(
        "Persisted ledger: {} authors, {} citations, {} periods, {} identities",
        state.authors.len(),
        state.citations.len(),
        state.periods.len(),
        state.identities.len()
    );
    Ok(())
}

/// Read a state back from `store`. Returns `None` if nothing was persisted.
pub fn load_state(store: &dyn LedgerStore) -> Result<Option<LedgerState>, FolioError> {
    let Some(bytes) = store.get_meta(META_KEY)? else {
        return Ok(None);
    };
    let meta: LedgerMeta = serde_json::from_slice(&bytes)?;

    let authors: BTreeMap<_, _> = store
        .list_authors()?
        .into_iter()
        .map(|a| (a.principal, a))
        .collect();
    let citations: BTreeMap<_, _> = store
        .list_citations()?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();
    let periods: BTreeMap<_, _> = store
        .list_periods()?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let identities: BTreeMap<_, _> = store
        .list_identities()?
        .into_iter()
        .map(|i| (i.principal, i))
        .collect();

    Ok(Some(LedgerState {
        authors,
        citations,
        links: meta.links,
        integrity_root: meta.integrity_root,
        periods,
        identities,
        roles: meta.roles,
        pool: meta.pool,
        initial_grant: meta.initial_grant,
        reward_curve: meta.reward_curve,
        distribution_period: meta.distribution_period,
        last_distribution: meta.last_distribution,
        next_period_id: meta.next_period_id,
        now: meta.now,
        circulating_supply: meta.circulating_supply,
        transactions: meta.transactions,
        events: Vec::new(),
    }))
}
