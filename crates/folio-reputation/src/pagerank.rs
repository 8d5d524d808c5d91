// crates/folio-reputation/src/pagerank.rs
//
// Fixed-point PageRank over the citation link set.
//
// Scores live in units of 1 / SCORE_SCALE. Every division floors. Products
// are taken in u128 so no intermediate can overflow for any realistic author
// count. Mass held by authors who cite nobody (dangling authors) is spread
// evenly over all authors each round, which keeps total mass at SCORE_SCALE
// up to the flooring loss.

use serde::{Deserialize, Serialize};

use folio_core::error::FolioError;
use folio_core::score::{Score, SCORE_SCALE};

use crate::link_set::LinkSet;

/// Parameters for a PageRank run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Exact number of rounds. No convergence check is performed.
    pub iterations: u32,
    /// Damping factor as a percentage (85 means d = 0.85).
    pub damping_percent: u32,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            damping_percent: 85,
        }
    }
}

impl PageRankConfig {
    /// Reject zero iterations and damping above 100%.
    pub fn validate(&self) -> Result<(), FolioError> {
        if self.iterations == 0 {
            return Err(FolioError::InvalidIterations);
        }
        if self.damping_percent > 100 {
            return Err(FolioError::InvalidDamping(self.damping_percent));
        }
        Ok(())
    }
}

/// Compute one score per author, indexed like `links`.
///
/// Round update, with d = damping_percent, N = node count, S = SCORE_SCALE:
///
/// ```text
/// base      = floor((100 - d) * S / (100 * N))
/// in[v]     = sum over u -> v of floor(score[u] / out(u))
/// dangling  = floor(sum over out(u) = 0 of score[u] / N)
/// score'[v] = base + floor(d * (in[v] + dangling) / 100)
/// ```
///
/// Scores start at floor(S / N). Exactly `config.iterations` rounds run.
/// Returns an empty vector for zero authors, and floor(S / N) for every
/// author when there are no links. The config is assumed valid; callers
/// run `PageRankConfig::validate` first.
pub fn compute_pagerank(links: &LinkSet, config: &PageRankConfig) -> Vec<Score> {
    let n = links.node_count();
    if n == 0 {
        return Vec::new();
    }
    // The per-round floors would otherwise drift below S / N when N does
    // not divide the scale.
    if links.link_count() == 0 {
        return vec![Score(SCORE_SCALE / n as u64); n];
    }
    let n128 = n as u128;
    let scale = SCORE_SCALE as u128;
    let d = config.damping_percent.min(100) as u128;

    let mut scores = vec![scale / n128; n];
    let base = (100 - d) * scale / (100 * n128);

    for _ in 0..config.iterations {
        let mut incoming = vec![0u128; n];
        let mut dangling_sum = 0u128;

        for (u, &score) in scores.iter().enumerate() {
            let out = links.out_degree(u) as u128;
            if out == 0 {
                dangling_sum += score;
                continue;
            }
            let share = score / out;
            for v in links.targets(u) {
                incoming[v] += share;
            }
        }

        let dangling_share = dangling_sum / n128;
        for (v, score) in scores.iter_mut().enumerate() {
            *score = base + d * (incoming[v] + dangling_share) / 100;
        }
    }

    scores
        .into_iter()
        .map(|s| Score(u64::try_from(s).unwrap_or(u64::MAX)))
        .collect()
}
