use crate::{hasher::HashWriter, Hash};
use std::io::Write;

/// Merkle tree over transaction ids, hashed pairwise with SHA256d.
///
/// Odd-length levels pair their last node with itself. A level where two
/// adjacent nodes are already equal marks the tree as `mutated`, since such
/// a list has the same root as a shorter one.
pub struct MerkleTree {
    levels: Vec<Vec<Hash>>,
    mutated: bool,
}

impl MerkleTree {
    /// Create a Merkle tree directly from leaf hashes
    pub fn from_leaves(leaves: Vec<Hash>) -> Self {
        let mut tree = Self { levels: vec![leaves], mutated: false };
        tree.build_tree();
        tree
    }

    fn build_tree(&mut self) {
        let mut current_level = self.levels[0].clone();
        while current_level.len() > 1 {
            let mut next_level = Vec::with_capacity(current_level.len().div_ceil(2));
            for chunk in current_level.chunks(2) {
                let (left, right) = match chunk {
                    [left, right] => {
                        if left == right {
                            self.mutated = true;
                        }
                        (left, right)
                    }
                    [single] => (single, single),
                    _ => unreachable!(),
                };
                next_level.push(hash_pair(left, right));
            }
            self.levels.push(next_level.clone());
            current_level = next_level;
        }
    }

    /// Get the Merkle root hash (zero for an empty tree)
    pub fn root(&self) -> Hash {
        self.levels.last().and_then(|level| level.first().copied()).unwrap_or(Hash::ZERO)
    }

    pub fn mutated(&self) -> bool {
        self.mutated
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }
}

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut writer = HashWriter::new();
    // Writes into a hasher never fail
    let _ = writer.write_all(left.as_bytes());
    let _ = writer.write_all(right.as_bytes());
    writer.finalize_double()
}

/// Root of the tree built from `hashes`
pub fn merkle_root(hashes: &[Hash]) -> Hash {
    MerkleTree::from_leaves(hashes.to_vec()).root()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::double_sha256;
    use hex_literal::hex;

    #[test]
    fn test_empty_tree() {
        let tree = MerkleTree::from_leaves(vec![]);
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.root(), Hash::ZERO);
    }

    #[test]
    fn test_single_leaf() {
        let hash = Hash::from_bytes(hex!("0000000000000000000000000000000000000000000000000000000000000001"));
        let tree = MerkleTree::from_leaves(vec![hash]);
        assert_eq!(tree.root(), hash);
        assert!(!tree.mutated());
    }

    #[test]
    fn test_two_leaves() {
        let hash1 = Hash::from_bytes(hex!("0000000000000000000000000000000000000000000000000000000000000001"));
        let hash2 = Hash::from_bytes(hex!("0000000000000000000000000000000000000000000000000000000000000002"));
        let tree = MerkleTree::from_leaves(vec![hash1, hash2]);

        let mut combined = Vec::with_capacity(64);
        combined.extend_from_slice(hash1.as_bytes());
        combined.extend_from_slice(hash2.as_bytes());

        assert_eq!(tree.root(), double_sha256(&combined));
    }

    #[test]
    fn test_odd_level_duplicates_last() {
        let a = Hash::from_bytes([1u8; 32]);
        let b = Hash::from_bytes([2u8; 32]);
        let c = Hash::from_bytes([3u8; 32]);
        assert_eq!(merkle_root(&[a, b, c]), merkle_root(&[a, b, c, c]));
        assert!(!MerkleTree::from_leaves(vec![a, b, c]).mutated());
        assert!(MerkleTree::from_leaves(vec![a, b, c, c]).mutated());
    }
}
