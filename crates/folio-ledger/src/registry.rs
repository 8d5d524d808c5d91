// crates/folio-ledger/src/registry.rs
//
// Author registry: registration, citation rewards, burns and reputation
// recomputation.
//
// A registry citation ("caller cites author") mints a reward for the cited
// author from the configured diminishing curve and records a link for
// PageRank. It never touches reputation scores; those only change through
// `update_page_ranks`.

use std::collections::BTreeMap;

use folio_core::author::Author;
use folio_core::error::FolioError;
use folio_core::principal::Principal;
use folio_core::score::Score;
use folio_core::Amount;
use folio_reputation::{compute_pagerank, LinkSet, PageRankConfig};

use crate::events::LedgerEvent;
use crate::journal::{TokenTransaction, TxKind};
use crate::state::LedgerState;

/// Register `caller` as an author holding the initial grant.
pub fn register_author(state: &mut LedgerState, caller: Principal) -> Result<Author, FolioError> {
    if state.authors.contains_key(&caller) {
        return Err(FolioError::AlreadyRegistered(caller));
    }
    let grant = state.initial_grant;
    let supply = state
        .circulating_supply
        .checked_add(grant)
        .ok_or_else(|| FolioError::Overflow("circulating supply".to_string()))?;

    let seq = state.authors.len() as u64;
    let author = Author::new(caller, seq, grant, state.now);
    state.authors.insert(caller, author.clone());
    state.circulating_supply = supply;
    state.record_tx(caller, grant, TxKind::Grant, "registration grant");
    state.emit(LedgerEvent::AuthorRegistered {
        author: caller,
        grant,
    });

    tracing::info!("Registered author {} (seq {})", caller.short(), seq);
    Ok(author)
}

/// `caller` cites `cited`. Returns the reward credited to `cited`.
pub fn add_citation(state: &mut LedgerState, caller: Principal, cited: Principal) -> Result<Amount, FolioError> {
    if caller == cited {
        return Err(FolioError::SelfCitation);
    }
    let prior = state.author(&cited)?.citation_count;
    state.author(&caller)?;

    let reward = state.reward_curve.reward(prior);
    let (balance, supply) = state.checked_credit(&cited, reward)?;

    let author = state.author_mut(&cited)?;
    author.balance = balance;
    author.citation_count = prior.saturating_add(1);
    let citation_count = author.citation_count;
    state.circulating_supply = supply;
    state.links.insert((caller, cited));
    state.record_tx(cited, reward, TxKind::CitationReward, "citation reward");
    state.emit(LedgerEvent::CitationRewarded {
        citing: caller,
        cited,
        reward,
        citation_count,
    });

    tracing::info!(
        "Citation {} -> {} rewarded {} motes (count {})",
        caller.short(),
        cited.short(),
        reward,
        citation_count
    );
    Ok(reward)
}

/// Destroy `amount` of the caller's balance.
pub fn burn_tokens(state: &mut LedgerState, caller: Principal, amount: Amount) -> Result<(), FolioError> {
    let available = state.author(&caller)?.balance;
    if amount > available {
        return Err(FolioError::InsufficientBalance {
            requested: amount,
            available,
        });
    }

    state.author_mut(&caller)?.balance = available - amount;
    state.circulating_supply = state.circulating_supply.saturating_sub(amount);
    state.record_tx(caller, amount, TxKind::Burn, "burn");
    state.emit(LedgerEvent::TokensBurned {
        author: caller,
        amount,
    });

    tracing::info!("Author {} burned {} motes", caller.short(), amount);
    Ok(())
}

/// Recompute every author's reputation score.
///
/// Authors are indexed in registration order; the link relation is every
/// recorded "u cited v" pair. Returns the new scores in registration order.
pub fn update_page_ranks(
    state: &mut LedgerState,
    caller: Principal,
    iterations: u32,
    damping_percent: u32,
) -> Result<Vec<(Principal, Score)>, FolioError> {
    if !state.authors.contains_key(&caller) {
        return Err(FolioError::Unauthorized(format!(
            "{} is not a registered author",
            caller.short()
        )));
    }
    let config = PageRankConfig {
        iterations,
        damping_percent,
    };
    config.validate()?;

    let order: Vec<Principal> = state
        .authors_in_registration_order()
        .into_iter()
        .map(|a| a.principal)
        .collect();
    let index: BTreeMap<Principal, usize> = order.iter().enumerate().map(|(i, p)| (*p, i)).collect();

    let mut links = LinkSet::new(order.len());
    for (from, to) in &state.links {
        if let (Some(&u), Some(&v)) = (index.get(from), index.get(to)) {
            links.add_link(u, v);
        }
    }

    let scores = compute_pagerank(&links, &config);
    let results: Vec<(Principal, Score)> = order.into_iter().zip(scores).collect();
    for (principal, score) in &results {
        state.author_mut(principal)?.reputation_score = *score;
        tracing::debug!("Score {} = {}", principal.short(), score);
    }

    state.emit(LedgerEvent::PageRanksUpdated {
        iterations,
        damping_percent,
        author_count: results.len(),
    });
    tracing::info!(
        "Updated page ranks for {} authors ({} links, {} rounds, d={}%)",
        results.len(),
        links.link_count(),
        iterations,
        damping_percent
    );
    Ok(results)
}

pub fn get_author<'a>(state: &'a LedgerState, principal: &Principal) -> Option<&'a Author> {
    state.authors.get(principal)
}

/// Balance of `principal`; zero for unknown principals.
pub fn balance_of(state: &LedgerState, principal: &Principal) -> Amount {
    state.authors.get(principal).map(|a| a.balance).unwrap_or(0)
}

/// Authors `principal` has cited, sorted by principal.
pub fn get_cited_authors(state: &LedgerState, principal: &Principal) -> Vec<Principal> {
    state
        .links
        .iter()
        .filter(|(from, _)| from == principal)
        .map(|(_, to)| *to)
        .collect()
}

/// Journal entries touching `principal`, oldest first.
pub fn token_history<'a>(state: &'a LedgerState, principal: &Principal) -> Vec<&'a TokenTransaction> {
    state
        .transactions
        .iter()
        .filter(|tx| tx.author == *principal)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use folio_core::SCORE_SCALE;

    fn p(b: u8) -> Principal {
        Principal([b; 32])
    }

    fn state_with(authors: &[u8]) -> LedgerState {
        let mut state = LedgerState::new(&LedgerConfig::default());
        for &b in authors {
            register_author(&mut state, p(b)).unwrap();
        }
        state
    }

    #[test]
    fn test_register_grants_initial_balance() {
        let state = state_with(&[1]);
        let author = state.author(&p(1)).unwrap();
        assert_eq!(author.balance, folio_economics::DEFAULT_INITIAL_GRANT);
        assert_eq!(author.citation_count, 0);
        assert_eq!(author.reputation_score, Score::ZERO);
        assert_eq!(state.circulating_supply, author.balance);
    }

    #[test]
    fn test_register_twice_fails() {
        let mut state = state_with(&[1]);
        assert_eq!(
            register_author(&mut state, p(1)),
            Err(FolioError::AlreadyRegistered(p(1)))
        );
        assert_eq!(state.authors.len(), 1);
    }

    #[test]
    fn test_citation_check_order() {
        let mut state = state_with(&[1]);
        // Self-citation is reported even for an unregistered caller.
        assert_eq!(add_citation(&mut state, p(9), p(9)), Err(FolioError::SelfCitation));
        assert_eq!(add_citation(&mut state, p(9), p(8)), Err(FolioError::NotRegistered(p(8))));
        assert_eq!(add_citation(&mut state, p(9), p(1)), Err(FolioError::NotRegistered(p(9))));
    }

    #[test]
    fn test_citation_credits_cited_author() {
        let mut state = state_with(&[1, 2]);
        let before = balance_of(&state, &p(2));
        let reward = add_citation(&mut state, p(1), p(2)).unwrap();
        assert!(reward > 0);
        assert_eq!(balance_of(&state, &p(2)), before + reward);
        assert_eq!(state.author(&p(2)).unwrap().citation_count, 1);
        assert_eq!(state.author(&p(2)).unwrap().reputation_score, Score::ZERO);
        assert_eq!(get_cited_authors(&state, &p(1)), vec![p(2)]);
    }

    #[test]
    fn test_burn_insufficient_leaves_balance() {
        let mut state = state_with(&[1]);
        let balance = balance_of(&state, &p(1));
        assert_eq!(
            burn_tokens(&mut state, p(1), balance + 1),
            Err(FolioError::InsufficientBalance {
                requested: balance + 1,
                available: balance
            })
        );
        burn_tokens(&mut state, p(1), balance).unwrap();
        assert_eq!(balance_of(&state, &p(1)), 0);
        assert_eq!(state.circulating_supply, 0);
    }

    #[test]
    fn test_burn_unknown_caller() {
        let mut state = state_with(&[]);
        assert_eq!(burn_tokens(&mut state, p(1), 0), Err(FolioError::NotRegistered(p(1))));
    }

    #[test]
    fn test_page_ranks_single_author() {
        let mut state = state_with(&[1]);
        let scores = update_page_ranks(&mut state, p(1), 3, 85).unwrap();
        assert_eq!(scores, vec![(p(1), Score(SCORE_SCALE))]);
    }

    #[test]
    fn test_page_ranks_validation_leaves_scores() {
        let mut state = state_with(&[1, 2]);
        assert!(matches!(
            update_page_ranks(&mut state, p(3), 5, 85),
            Err(FolioError::Unauthorized(_))
        ));
        assert_eq!(update_page_ranks(&mut state, p(1), 0, 85), Err(FolioError::InvalidIterations));
        assert_eq!(update_page_ranks(&mut state, p(1), 5, 101), Err(FolioError::InvalidDamping(101)));
        assert!(state.authors.values().all(|a| a.reputation_score.is_zero()));
    }

    #[test]
    fn test_token_history_tracks_balance() {
        let mut state = state_with(&[1, 2]);
        add_citation(&mut state, p(1), p(2)).unwrap();
        add_citation(&mut state, p(1), p(2)).unwrap();
        burn_tokens(&mut state, p(2), 5).unwrap();
        let history = token_history(&state, &p(2));
        assert_eq!(history.len(), 4);
        let sum: i128 = history.iter().map(|tx| tx.delta()).sum();
        assert_eq!(sum, balance_of(&state, &p(2)) as i128);
    }
}
