// crates/folio-ledger/src/graph.rs
//
// Citation graph: content-addressed edges between authors, lineage queries
// and integrity verification against a published Merkle root.
//
// Edges are identified by `CitationId::derive(citing, cited, locator)`, so
// the same citation can only be recorded once. Every edge also joins the
// PageRank link relation.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use folio_core::citation::{CitationEdge, CitationId};
use folio_core::error::FolioError;
use folio_core::integrity::verify_proof;
use folio_core::principal::Principal;
use folio_core::Hash32;

use crate::access::Role;
use crate::events::LedgerEvent;
use crate::state::LedgerState;

/// Record the edge `caller -> cited` for `resource_locator`.
pub fn add_citation_edge(
    state: &mut LedgerState,
    caller: Principal,
    cited: Principal,
    resource_locator: &str,
) -> Result<CitationId, FolioError> {
    if caller == cited {
        return Err(FolioError::SelfCitation);
    }
    state.author(&cited)?;
    state.author(&caller)?;

    let edge = CitationEdge::new(caller, cited, resource_locator.to_string(), state.now);
    let id = edge.id;
    if state.citations.contains_key(&id) {
        return Err(FolioError::DuplicateCitation(id.to_hex()));
    }

    let timestamp = edge.timestamp;
    state.citations.insert(id, edge);
    state.links.insert((caller, cited));
    state.emit(LedgerEvent::CitationAdded {
        id,
        citing: caller,
        cited,
        resource_locator: resource_locator.to_string(),
        timestamp,
    });

    tracing::info!(
        "Citation edge {} recorded: {} -> {} ({})",
        id,
        caller.short(),
        cited.short(),
        resource_locator
    );
    Ok(id)
}

/// Distinct authors with an edge to `author`, sorted by principal.
pub fn get_direct_citers(state: &LedgerState, author: &Principal) -> Vec<Principal> {
    state
        .citations
        .values()
        .filter(|edge| edge.cited_author == *author)
        .map(|edge| edge.citing_author)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every author reachable from `author` along citation edges, excluding
/// `author` itself. Sorted by principal.
pub fn get_author_lineage(state: &LedgerState, author: &Principal) -> Vec<Principal> {
    let mut adjacency: BTreeMap<Principal, Vec<Principal>> = BTreeMap::new();
    for edge in state.citations.values() {
        adjacency
            .entry(edge.citing_author)
            .or_default()
            .push(edge.cited_author);
    }

    let mut visited: BTreeSet<Principal> = BTreeSet::new();
    visited.insert(*author);
    let mut queue: VecDeque<Principal> = VecDeque::new();
    queue.push_back(*author);

    while let Some(current) = queue.pop_front() {
        let Some(next) = adjacency.get(&current) else {
            continue;
        };
        for cited in next {
            if visited.insert(*cited) {
                queue.push_back(*cited);
            }
        }
    }

    visited.remove(author);
    visited.into_iter().collect()
}

/// Publish a new integrity root. Requires `IntegrityOracle`.
pub fn update_merkle_root(state: &mut LedgerState, caller: Principal, root: Hash32) -> Result<(), FolioError> {
    state.roles.require(&caller, Role::IntegrityOracle)?;

    state.integrity_root = root;
    let root_hex = hex::encode(root);
    tracing::info!("Integrity root updated by {}: {}", caller.short(), root_hex);
    state.emit(LedgerEvent::IntegrityRootUpdated { root: root_hex });
    Ok(())
}

/// Mark an edge verified if `proof` authenticates it against the current
/// integrity root.
pub fn verify_citation(
    state: &mut LedgerState,
    caller: Principal,
    edge_id: &CitationId,
    proof: &[Hash32],
) -> Result<(), FolioError> {
    if !state.citations.contains_key(edge_id) {
        return Err(FolioError::NotFound(format!("citation {}", edge_id)));
    }
    if !verify_proof(edge_id, proof, &state.integrity_root) {
        return Err(FolioError::InvalidProof(edge_id.to_hex()));
    }

    if let Some(edge) = state.citations.get_mut(edge_id) {
        edge.verified = true;
    }
    state.emit(LedgerEvent::CitationVerified { id: *edge_id });

    tracing::info!(
        "Citation {} verified by {} ({} proof steps)",
        edge_id,
        caller.short(),
        proof.len()
    );
    Ok(())
}

pub fn get_citation<'a>(state: &'a LedgerState, edge_id: &CitationId) -> Result<&'a CitationEdge, FolioError> {
    state
        .citations
        .get(edge_id)
        .ok_or_else(|| FolioError::NotFound(format!("citation {}", edge_id)))
}
