// crates/folio-core/src/integrity.rs
//
// Merkle accumulator for citation integrity anchoring.
//
// Leaves are `sha256(0x00 || citation_id)`, inner nodes are
// `sha256(0x01 || min(a, b) || max(a, b))`. Sorting the pair before hashing
// means a proof is just the list of sibling hashes from leaf to root, with no
// left/right direction bits. An odd node at the end of a level is promoted to
// the next level unchanged.

use sha2::{Digest, Sha256};

use crate::citation::CitationId;
use crate::Hash32;

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

/// Leaf hash for a citation id.
pub fn leaf_hash(id: &CitationId) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(id.as_bytes());
    hasher.finalize().into()
}

/// Inner node hash over an unordered pair.
pub fn node_hash(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(lo);
    hasher.update(hi);
    hasher.finalize().into()
}

/// Fold `proof` over the leaf of `id` and compare against `root`.
///
/// An empty proof is valid only when the leaf hash equals the root.
pub fn verify_proof(id: &CitationId, proof: &[Hash32], root: &Hash32) -> bool {
    let computed = proof
        .iter()
        .fold(leaf_hash(id), |acc, sibling| node_hash(&acc, sibling));
    computed == *root
}

/// Off-ledger builder for the citation accumulator.
///
/// Integrity oracles use this to compute the root they publish and the proofs
/// they hand to verifiers.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// levels[0] are the leaves, the last level holds the root.
    levels: Vec<Vec<Hash32>>,
}

impl MerkleTree {
    /// Build a tree over the given citations, in the given order.
    pub fn from_citations(ids: &[CitationId]) -> Self {
        let leaves: Vec<Hash32> = ids.iter().map(leaf_hash).collect();
        let mut levels = vec![leaves];

        while levels.last().map(|l| l.len() > 1).unwrap_or(false) {
            let current = &levels[levels.len() - 1];
            let next: Vec<Hash32> = current
                .chunks(2)
                .map(|chunk| match chunk {
                    [a, b] => node_hash(a, b),
                    [a] => *a,
                    _ => unreachable!("chunks(2) yields one or two items"),
                })
                .collect();
            levels.push(next);
        }

        Self { levels }
    }

    /// Root hash, or all zeros for an empty tree.
    pub fn root(&self) -> Hash32 {
        self.levels
            .last()
            .and_then(|l| l.first())
            .copied()
            .unwrap_or([0u8; 32])
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels.first().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sibling path for the leaf at `index`, or None if out of range.
    pub fn proof(&self, index: usize) -> Option<Vec<Hash32>> {
        if index >= self.len() {
            return None;
        }
        let mut path = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = idx ^ 1;
            if sibling < level.len() {
                path.push(level[sibling]);
            }
            idx /= 2;
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::Principal;

    fn ids(n: u8) -> Vec<CitationId> {
        (0..n)
            .map(|i| CitationId::derive(&Principal([i; 32]), &Principal([i + 100; 32]), "ipfs://x"))
            .collect()
    }

    #[test]
    fn single_leaf_root_is_leaf_and_empty_proof_verifies() {
        let ids = ids(1);
        let tree = MerkleTree::from_citations(&ids);
        assert_eq!(tree.root(), leaf_hash(&ids[0]));
        assert_eq!(tree.proof(0).unwrap(), Vec::<Hash32>::new());
        assert!(verify_proof(&ids[0], &[], &tree.root()));
    }

    #[test]
    fn every_leaf_verifies_for_odd_and_even_sizes() {
        for n in 2..=9u8 {
            let ids = ids(n);
            let tree = MerkleTree::from_citations(&ids);
            for (i, id) in ids.iter().enumerate() {
                let proof = tree.proof(i).unwrap();
                assert!(verify_proof(id, &proof, &tree.root()), "n={} i={}", n, i);
            }
        }
    }

    #[test]
    fn proof_for_other_leaf_fails() {
        let ids = ids(4);
        let tree = MerkleTree::from_citations(&ids);
        let proof = tree.proof(0).unwrap();
        assert!(!verify_proof(&ids[1], &proof, &tree.root()));
    }

    #[test]
    fn empty_proof_fails_against_non_leaf_root() {
        let ids = ids(3);
        let tree = MerkleTree::from_citations(&ids);
        assert!(!verify_proof(&ids[0], &[], &tree.root()));
    }

    #[test]
    fn empty_tree_has_zero_root() {
        let tree = MerkleTree::from_citations(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), [0u8; 32]);
        assert!(tree.proof(0).is_none());
    }
}
