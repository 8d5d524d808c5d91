// crates/folio-ledger/src/distribution.rs
//
// Profit distribution: revenue deposits, periodic snapshots of reputation
// into exact-sum percentage shares, and one-time share withdrawals.
//
// A distribution reserves everything it allocates from the revenue pool.
// Withdrawals release from that reserve, and the truncation leftover stays
// available for the next period.

use std::collections::BTreeMap;

use folio_core::distribution::{AuthorShare, DistributionPeriod};
use folio_core::error::FolioError;
use folio_core::principal::Principal;
use folio_core::score::Score;
use folio_core::Amount;
use folio_economics::{allocate_percentages, share_amount, RevenuePool};

use crate::access::Role;
use crate::events::LedgerEvent;
use crate::journal::TxKind;
use crate::state::LedgerState;

/// Add external revenue to the pool.
pub fn deposit_revenue(state: &mut LedgerState, caller: Principal, amount: Amount) -> Result<(), FolioError> {
    state.pool.deposit(amount)?;
    state.emit(LedgerEvent::RevenueDeposited {
        from: caller,
        amount,
    });

    tracing::info!(
        "Revenue deposit of {} motes from {} (pool available {})",
        amount,
        caller.short(),
        state.pool.available()
    );
    Ok(())
}

/// Set the minimum ledger time between distributions. Requires `Treasurer`.
pub fn set_distribution_period(state: &mut LedgerState, caller: Principal, duration: u64) -> Result<(), FolioError> {
    state.roles.require(&caller, Role::Treasurer)?;

    state.distribution_period = duration;
    state.emit(LedgerEvent::DistributionPeriodSet { duration });
    tracing::info!("Distribution period set to {}s by {}", duration, caller.short());
    Ok(())
}

/// Snapshot reputation into a new distribution period. Returns its id.
pub fn distribute_profits(state: &mut LedgerState) -> Result<u64, FolioError> {
    let elapsed = state.now.saturating_sub(state.last_distribution);
    if elapsed < state.distribution_period {
        return Err(FolioError::TooEarly {
            now: state.now,
            next_allowed: state.last_distribution.saturating_add(state.distribution_period),
        });
    }

    let snapshot: Vec<(Principal, Score)> = state
        .authors_in_registration_order()
        .into_iter()
        .map(|a| (a.principal, a.reputation_score))
        .collect();
    let weights: Vec<u64> = snapshot.iter().map(|(_, score)| score.units()).collect();
    let percentages = allocate_percentages(&weights);

    let pool_amount = state.pool.available();
    let mut shares = BTreeMap::new();
    let mut allocated: Amount = 0;
    for ((principal, _), percentage) in snapshot.iter().zip(&percentages) {
        let amount = share_amount(pool_amount, *percentage);
        // sum of floored shares never exceeds the pool
        allocated += amount;
        tracing::debug!("Share {} = {}% ({} motes)", principal.short(), percentage, amount);
        shares.insert(
            *principal,
            AuthorShare {
                percentage: *percentage,
                amount,
                withdrawn: false,
            },
        );
    }
    state.pool.reserve(allocated)?;

    let period_id = state.next_period_id;
    let author_count = shares.len();
    state.periods.insert(
        period_id,
        DistributionPeriod {
            id: period_id,
            snapshot_time: state.now,
            pool_amount,
            score_snapshot: snapshot.into_iter().collect(),
            shares,
        },
    );
    state.next_period_id += 1;
    state.last_distribution = state.now;
    state.emit(LedgerEvent::ProfitsDistributed {
        period_id,
        pool_amount,
        allocated,
        author_count,
    });

    tracing::info!(
        "Distributed period {}: {} of {} motes to {} authors",
        period_id,
        allocated,
        pool_amount,
        author_count
    );
    Ok(period_id)
}

/// Share of `author` in `period_id`; a zero share if either is unknown.
pub fn get_author_share(state: &LedgerState, period_id: u64, author: &Principal) -> AuthorShare {
    state
        .periods
        .get(&period_id)
        .map(|period| period.share_of(author))
        .unwrap_or_default()
}

/// Claim the caller's share of `period_id` into their balance. Only a share
/// with a positive amount can be claimed.
pub fn withdraw_share(state: &mut LedgerState, caller: Principal, period_id: u64) -> Result<Amount, FolioError> {
    let share = state
        .periods
        .get(&period_id)
        .and_then(|period| period.shares.get(&caller))
        .copied()
        .filter(|share| share.amount > 0)
        .ok_or(FolioError::NotEligible { period_id })?;
    if share.withdrawn {
        return Err(FolioError::AlreadyWithdrawn { period_id });
    }
    let (balance, supply) = state.checked_credit(&caller, share.amount)?;

    state.pool.release(share.amount)?;
    if let Some(entry) = state
        .periods
        .get_mut(&period_id)
        .and_then(|period| period.shares.get_mut(&caller))
    {
        entry.withdrawn = true;
    }
    state.author_mut(&caller)?.balance = balance;
    state.circulating_supply = supply;
    state.record_tx(caller, share.amount, TxKind::ShareWithdrawal, &format!("period {}", period_id));
    state.emit(LedgerEvent::ShareWithdrawn {
        period_id,
        author: caller,
        amount: share.amount,
    });

    tracing::info!(
        "Author {} withdrew {} motes from period {}",
        caller.short(),
        share.amount,
        period_id
    );
    Ok(share.amount)
}

/// Id the next distribution will receive.
pub fn current_distribution_id(state: &LedgerState) -> u64 {
    state.next_period_id
}

pub fn get_period(state: &LedgerState, period_id: u64) -> Option<&DistributionPeriod> {
    state.periods.get(&period_id)
}

pub fn revenue_pool(state: &LedgerState) -> RevenuePool {
    state.pool
}
