//! Hash backends for the SMT
//!
//! The tree only ever calls [`Hasher::hash_leaf`] and [`Hasher::hash_branch`],
//! both of which feed raw 32-byte chunks into a single digest with no length
//! prefixes or domain tags. Swapping the backend changes every root.

use blake2b_rs::{Blake2b, Blake2bBuilder};
use tiny_keccak::{Hasher as _, Keccak};

use crate::{HASH_LEN, H256};

/// Blake2b personalization used by CKB for all default hashing.
pub const CKB_HASH_PERSONALIZATION: &[u8; 16] = b"ckb-default-hash";

/// A 32-byte digest over an ordered sequence of byte chunks.
pub trait Hasher {
    /// Hash `chunks` as if they were concatenated.
    fn digest<'a, I>(chunks: I) -> H256
    where
        I: IntoIterator<Item = &'a [u8]>;

    /// Leaf hash: `digest(key || value)`.
    fn hash_leaf(key: &H256, value: &H256) -> H256 {
        Self::digest([key.as_slice(), value.as_slice()])
    }

    /// Internal node hash: `digest(left || right)`.
    fn hash_branch(left: &H256, right: &H256) -> H256 {
        Self::digest([left.as_slice(), right.as_slice()])
    }
}

/// BLAKE2b-256 personalized with `ckb-default-hash`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CkbBlake2bHasher;

impl CkbBlake2bHasher {
    fn new_blake2b() -> Blake2b {
        Blake2bBuilder::new(HASH_LEN).personal(CKB_HASH_PERSONALIZATION).build()
    }
}

impl Hasher for CkbBlake2bHasher {
    fn digest<'a, I>(chunks: I) -> H256
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut hasher = Self::new_blake2b();
        for chunk in chunks {
            hasher.update(chunk);
        }
        let mut output = [0u8; HASH_LEN];
        hasher.finalize(&mut output);
        output
    }
}

/// Keccak256 backend
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl Hasher for Keccak256Hasher {
    fn digest<'a, I>(chunks: I) -> H256
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut hasher = Keccak::v256();
        for chunk in chunks {
            hasher.update(chunk);
        }
        let mut output = [0u8; HASH_LEN];
        hasher.finalize(&mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_hash_hex;

    #[test]
    fn test_ckb_blank_hash() {
        let expected =
            parse_hash_hex("0x44f4c69744d5f8c55d642062949dcae49bc4e7ef43d388c5a12f42b5633d163e")
                .unwrap();
        assert_eq!(CkbBlake2bHasher::digest(std::iter::empty()), expected);
    }

    #[test]
    fn test_keccak_empty_hash() {
        let expected =
            parse_hash_hex("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
                .unwrap();
        assert_eq!(Keccak256Hasher::digest(std::iter::empty()), expected);
    }

    #[test]
    fn test_chunks_hash_as_concatenation() {
        let left = [1u8; 32];
        let right = [2u8; 32];
        let mut joined = left.to_vec();
        joined.extend_from_slice(&right);

        let pair = CkbBlake2bHasher::hash_branch(&left, &right);
        assert_eq!(pair, CkbBlake2bHasher::digest([joined.as_slice()]));
        assert_eq!(pair, CkbBlake2bHasher::hash_leaf(&left, &right));
        assert_ne!(pair, CkbBlake2bHasher::hash_branch(&right, &left));
    }

    #[test]
    fn test_backends_differ() {
        let left = [1u8; 32];
        let right = [2u8; 32];
        assert_ne!(
            CkbBlake2bHasher::hash_branch(&left, &right),
            Keccak256Hasher::hash_branch(&left, &right)
        );
    }
}
