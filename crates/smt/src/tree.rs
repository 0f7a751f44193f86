//! Sparse Merkle Tree implementation

use std::{collections::HashMap, marker::PhantomData};

use tracing::{debug, trace};

use crate::{
    address::NodeAddress,
    bits::{clear_bit, flip_bit, is_bit_set, set_bit},
    error::Result,
    hasher::{CkbBlake2bHasher, Hasher},
    proof::{check_proof_length, compute_root, mask_bit, SmtProof},
    utils::{format_hash_hex, is_zero, to_h256},
    H256, TREE_DEPTH, ZERO_HASH,
};

/// Sparse Merkle Tree with 256-level depth
///
/// Only non-empty subtrees have a cached hash. A subtree holding a single leaf
/// hashes to that leaf's hash at every depth, and a branch with one empty
/// child takes the other child's hash unchanged, so empty regions of the key
/// space cost nothing in storage or in proofs.
#[derive(Clone, Debug)]
pub struct SparseMerkleTree<H = CkbBlake2bHasher> {
    /// Leaf nodes: key -> non-zero value
    leaves: HashMap<H256, H256>,
    /// Hashes of non-empty subtrees, keyed by (depth, prefix)
    branches: HashMap<NodeAddress, H256>,
    /// Root hash
    root: H256,
    _hasher: PhantomData<H>,
}

impl<H: Hasher> SparseMerkleTree<H> {
    /// Create a new empty SMT
    pub fn new() -> Self {
        Self {
            leaves: HashMap::new(),
            branches: HashMap::new(),
            root: ZERO_HASH,
            _hasher: PhantomData,
        }
    }

    /// Get the root hash
    pub const fn root(&self) -> H256 {
        self.root
    }

    /// Current root hash; all zero for an empty tree.
    pub const fn current_root_hash(&self) -> &H256 {
        &self.root
    }

    /// Number of stored leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether no leaves are stored.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Set `key` to `value`. An all-zero value deletes the key.
    ///
    /// Both inputs must be exactly 32 bytes; on error the tree is unchanged.
    pub fn update(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        let key = to_h256(key.as_ref(), "key")?;
        let value = to_h256(value.as_ref(), "value")?;
        if is_zero(&value) {
            self.remove(key);
        } else {
            self.insert(key, value);
        }
        Ok(())
    }

    /// Remove `key`. Removing an absent key is a no-op.
    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> Result<()> {
        let key = to_h256(key.as_ref(), "key")?;
        self.remove(key);
        Ok(())
    }

    /// Get value by key
    pub fn fetch(&self, key: impl AsRef<[u8]>) -> Result<Option<H256>> {
        let key = to_h256(key.as_ref(), "key")?;
        Ok(self.leaves.get(&key).copied())
    }

    /// Build a proof for `key` against the current root.
    ///
    /// Works whether or not `key` is present: verified with its value it
    /// proves membership, verified with a zero value it proves absence.
    pub fn proof(&self, key: impl AsRef<[u8]>) -> Result<SmtProof> {
        let key = to_h256(key.as_ref(), "key")?;
        let mut mask = ZERO_HASH;
        let mut siblings = Vec::new();

        let mut prefix = key;
        for depth in (0..TREE_DEPTH).rev() {
            let sibling = NodeAddress::new(flip_bit(prefix, depth), depth + 1);
            if let Some(hash) = self.branches.get(&sibling) {
                siblings.push(*hash);
                mask = set_bit(mask, mask_bit(depth));
            }
            prefix = clear_bit(prefix, depth);
        }

        trace!(
            target: "smt",
            key = %format_hash_hex(&key),
            siblings = siblings.len(),
            "built proof"
        );
        Ok(SmtProof::from_parts(mask, &siblings))
    }

    /// Verify `key -> value` against `root` using only the proof bytes.
    ///
    /// A zero `value` checks non-membership. Returns `Ok(false)` on mismatch;
    /// errors are reserved for inputs of the wrong length.
    pub fn verify(
        key: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
        proof: impl AsRef<[u8]>,
        root: impl AsRef<[u8]>,
    ) -> Result<bool> {
        let key = to_h256(key.as_ref(), "key")?;
        let value = to_h256(value.as_ref(), "value")?;
        let root = to_h256(root.as_ref(), "root")?;
        let proof = proof.as_ref();
        check_proof_length(proof)?;

        let computed = compute_root::<H>(&key, &value, proof);
        if computed != root {
            debug!(
                target: "smt",
                key = %format_hash_hex(&key),
                expected = %format_hash_hex(&root),
                computed = %format_hash_hex(&computed),
                "proof does not match root"
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// [`Self::verify`] against this tree's current root.
    pub fn verify_current(
        &self,
        key: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
        proof: impl AsRef<[u8]>,
    ) -> Result<bool> {
        Self::verify(key, value, proof, self.root)
    }

    /// Store a non-zero value and rehash its path from leaf to root.
    fn insert(&mut self, key: H256, value: H256) {
        self.leaves.insert(key, value);

        let mut current = H::hash_leaf(&key, &value);
        let mut prefix = key;
        for depth in (0..TREE_DEPTH).rev() {
            self.branches.insert(NodeAddress::new(prefix, depth + 1), current);

            let sibling = NodeAddress::new(flip_bit(prefix, depth), depth + 1);
            if let Some(sibling_hash) = self.branches.get(&sibling) {
                current = if is_bit_set(&key, depth) {
                    H::hash_branch(sibling_hash, &current)
                } else {
                    H::hash_branch(&current, sibling_hash)
                };
            }
            prefix = clear_bit(prefix, depth);
        }
        self.root = current;

        trace!(
            target: "smt",
            key = %format_hash_hex(&key),
            root = %format_hash_hex(&self.root),
            leaves = self.leaves.len(),
            "updated leaf"
        );
    }

    /// Drop `key` and rehash its path, purging entries for subtrees that
    /// became empty.
    fn remove(&mut self, key: H256) {
        if self.leaves.remove(&key).is_none() {
            trace!(target: "smt", key = %format_hash_hex(&key), "delete of absent key");
            return;
        }

        let mut current: Option<H256> = None;
        let mut prefix = key;
        for depth in (0..TREE_DEPTH).rev() {
            let address = NodeAddress::new(prefix, depth + 1);
            match current {
                Some(hash) => {
                    self.branches.insert(address, hash);
                }
                None => {
                    self.branches.remove(&address);
                }
            }

            let sibling = NodeAddress::new(flip_bit(prefix, depth), depth + 1);
            current = match (current, self.branches.get(&sibling)) {
                (Some(hash), Some(sibling_hash)) if is_bit_set(&key, depth) => {
                    Some(H::hash_branch(sibling_hash, &hash))
                }
                (Some(hash), Some(sibling_hash)) => Some(H::hash_branch(&hash, sibling_hash)),
                (None, Some(sibling_hash)) => Some(*sibling_hash),
                (current, None) => current,
            };
            prefix = clear_bit(prefix, depth);
        }
        self.root = current.unwrap_or(ZERO_HASH);

        debug!(
            target: "smt",
            key = %format_hash_hex(&key),
            root = %format_hash_hex(&self.root),
            leaves = self.leaves.len(),
            "deleted leaf"
        );
    }

    #[cfg(test)]
    pub(crate) fn branch_count(&self) -> usize {
        self.branches.len()
    }
}

impl<H: Hasher> Default for SparseMerkleTree<H> {
    fn default() -> Self {
        Self::new()
    }
}
