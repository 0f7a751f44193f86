//! Node cache addresses.

use std::fmt;

use crate::{bits::truncate_bits, utils::format_hash_hex, H256, HASH_LEN, TREE_DEPTH};

/// Encoded length of a [`NodeAddress`]: 4-byte depth followed by the prefix.
pub const ADDRESS_LEN: usize = 4 + HASH_LEN;

/// Location of a subtree in the 256-level trie.
///
/// `depth` is the number of leading key bits that select the subtree
/// (256 for a single leaf). Bits of `prefix` at positions `>= depth` are
/// always zero, so two addresses are equal exactly when their encodings are.
/// Field order makes the derived `Ord` agree with [`NodeAddress::to_bytes`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeAddress {
    depth: u32,
    prefix: H256,
}

impl NodeAddress {
    /// Address of the depth-`depth` subtree containing `path`.
    ///
    /// # Panics
    ///
    /// Panics if `depth > 256`.
    pub fn new(path: H256, depth: usize) -> Self {
        assert!(depth <= TREE_DEPTH, "depth must be 0..=256, got {depth}");
        Self { depth: depth as u32, prefix: truncate_bits(path, depth) }
    }

    /// Subtree depth (prefix length in bits).
    pub const fn depth(&self) -> usize {
        self.depth as usize
    }

    /// Zero-padded prefix bits.
    pub const fn prefix(&self) -> &H256 {
        &self.prefix
    }

    /// Canonical byte encoding: big-endian depth, then prefix.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        let mut out = [0u8; ADDRESS_LEN];
        out[..4].copy_from_slice(&self.depth.to_be_bytes());
        out[4..].copy_from_slice(&self.prefix);
        out
    }
}

impl fmt::Debug for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeAddress")
            .field("depth", &self.depth)
            .field("prefix", &format_hash_hex(&self.prefix))
            .finish()
    }
}
