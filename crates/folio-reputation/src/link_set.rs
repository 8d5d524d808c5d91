// crates/folio-reputation/src/link_set.rs
//
// Sparse citation links: L(u, v) means author u has cited author v at least
// once. Links are unweighted; repeated citations collapse into one link.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Directed, deduplicated link set over authors `0..node_count`.
///
/// Authors are addressed by index (registration order), not principal, so the
/// engine stays independent of identity types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSet {
    /// out[u] = set of authors u links to.
    out: Vec<BTreeSet<usize>>,
}

impl LinkSet {
    /// Create a link set with `node_count` authors and no links.
    pub fn new(node_count: usize) -> Self {
        Self {
            out: vec![BTreeSet::new(); node_count],
        }
    }

    /// Number of authors.
    pub fn node_count(&self) -> usize {
        self.out.len()
    }

    /// Record that `from` cited `to`.
    ///
    /// Self-links and out-of-range indices are ignored and return `false`.
    pub fn add_link(&mut self, from: usize, to: usize) -> bool {
        let n = self.out.len();
        if from == to || from >= n || to >= n {
            return false;
        }
        self.out[from].insert(to);
        true
    }

    /// Distinct authors `from` links to.
    pub fn out_degree(&self, from: usize) -> usize {
        self.out.get(from).map(|s| s.len()).unwrap_or(0)
    }

    /// Iterate the targets of `from` in ascending index order.
    pub fn targets(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        self.out.get(from).into_iter().flat_map(|s| s.iter().copied())
    }

    /// Total number of distinct links.
    pub fn link_count(&self) -> usize {
        self.out.iter().map(|s| s.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_links_collapse() {
        let mut links = LinkSet::new(2);
        assert!(links.add_link(0, 1));
        assert!(links.add_link(0, 1));
        assert_eq!(links.out_degree(0), 1);
        assert_eq!(links.link_count(), 1);
    }

    #[test]
    fn self_and_out_of_range_links_are_ignored() {
        let mut links = LinkSet::new(2);
        assert!(!links.add_link(1, 1));
        assert!(!links.add_link(0, 5));
        assert!(!links.add_link(5, 0));
        assert_eq!(links.link_count(), 0);
    }

    #[test]
    fn targets_are_sorted() {
        let mut links = LinkSet::new(4);
        links.add_link(0, 3);
        links.add_link(0, 1);
        links.add_link(0, 2);
        assert_eq!(links.targets(0).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(links.targets(2).count(), 0);
    }
}
