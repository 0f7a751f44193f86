//! Sparse Merkle Tree (SMT) with compact bitmask proofs
//!
//! An authenticated map from 32-byte keys to 32-byte values committed to by a
//! single 32-byte root. Key features:
//! - Fixed depth: each key is a 256-bit path, most significant bit first
//! - Sparse: empty subtrees are never stored and never appear in proofs
//! - CKB hashing: BLAKE2b-256 personalized with `ckb-default-hash`
//!
//! An all-zero value means "absent": updating a key to zero deletes it, and
//! verifying a proof with a zero value checks non-membership.
//!
//! ```
//! use ckb_smt::{SparseMerkleTree, ZERO_HASH};
//!
//! let mut tree: SparseMerkleTree = SparseMerkleTree::new();
//! tree.update([1u8; 32], [2u8; 32]).unwrap();
//!
//! let proof = tree.proof([1u8; 32]).unwrap();
//! assert!(SparseMerkleTree::<ckb_smt::CkbBlake2bHasher>::verify(
//!     [1u8; 32],
//!     [2u8; 32],
//!     &proof,
//!     tree.root(),
//! )
//! .unwrap());
//!
//! tree.update([1u8; 32], ZERO_HASH).unwrap();
//! assert_eq!(tree.root(), ZERO_HASH);
//! ```

mod address;
pub mod bits;
mod error;
mod hasher;
mod proof;
mod tree;
mod utils;

pub use address::{NodeAddress, ADDRESS_LEN};
pub use error::{Result, SmtError};
pub use hasher::{CkbBlake2bHasher, Hasher, Keccak256Hasher, CKB_HASH_PERSONALIZATION};
pub use proof::{check_proof_length, verify_proof_length, SmtProof, MASK_LEN};
pub use tree::SparseMerkleTree;
pub use utils::{decode_hex, format_hash_hex, parse_hash_hex};

/// 32-byte key, value or hash.
pub type H256 = [u8; 32];

/// Byte length of keys, values and hashes.
pub const HASH_LEN: usize = 32;

/// Root of an empty tree, and the value that marks a key as absent.
pub const ZERO_HASH: H256 = [0u8; HASH_LEN];

/// SMT tree depth (256 bits per key)
pub const TREE_DEPTH: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        let tree: SparseMerkleTree = SparseMerkleTree::new();
        assert_eq!(tree.root(), ZERO_HASH);
    }

    #[test]
    fn test_insert_and_proof() {
        let mut tree: SparseMerkleTree = SparseMerkleTree::new();

        let key = [1u8; 32];
        let value = [2u8; 32];

        tree.update(key, value).unwrap();

        let proof = tree.proof(key).unwrap();
        assert!(proof.verify::<CkbBlake2bHasher>(&tree.root(), &key, &value));
        assert!(tree.verify_current(key, value, proof).unwrap());
    }
}
