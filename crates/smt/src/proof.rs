//! SMT proof encoding and verification
//!
//! A proof is `mask || sibling_0 || sibling_1 || ...`. The 32-byte mask has
//! MSB-first bit `255 - d` set when the subtree next to the key's path at
//! depth `d + 1` is non-empty, and the siblings follow in the order their
//! mask bits appear (leaf-adjacent first). Clear bits mean the sibling
//! subtree is empty and the running hash passes through unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    bits::{count_ones, is_bit_set},
    error::{Result, SmtError},
    hasher::Hasher,
    utils::{decode_hex, is_zero},
    H256, HASH_LEN, TREE_DEPTH, ZERO_HASH,
};

/// Length of the proof mask in bytes.
pub const MASK_LEN: usize = HASH_LEN;

/// Mask bit recording a sibling at depth `depth` (0 = root-adjacent).
pub(crate) const fn mask_bit(depth: usize) -> usize {
    TREE_DEPTH - 1 - depth
}

/// Check that `proof` carries exactly one sibling per set mask bit.
pub fn check_proof_length(proof: &[u8]) -> Result<()> {
    let Some(mask) = proof.first_chunk::<MASK_LEN>() else {
        return Err(SmtError::MalformedProof(format!(
            "{} bytes is shorter than the {MASK_LEN}-byte mask",
            proof.len()
        )));
    };
    let expected = MASK_LEN + HASH_LEN * count_ones(mask);
    if proof.len() != expected {
        return Err(SmtError::InvalidProofLength { expected, actual: proof.len() });
    }
    Ok(())
}

/// Returns whether `proof` is well-formed.
pub fn verify_proof_length(proof: &[u8]) -> bool {
    check_proof_length(proof).is_ok()
}

/// Replay `proof` from the leaf up, returning the implied root.
///
/// `value == ZERO_HASH` starts from an empty leaf, which is how non-membership
/// is proven. The caller must have validated the proof length.
pub(crate) fn compute_root<H: Hasher>(key: &H256, value: &H256, proof: &[u8]) -> H256 {
    let (mask, siblings) = proof.split_at(MASK_LEN);
    let mut mask_bytes = ZERO_HASH;
    mask_bytes.copy_from_slice(mask);

    let mut siblings = siblings.chunks_exact(HASH_LEN);
    let mut current = (!is_zero(value)).then(|| H::hash_leaf(key, value));

    for bit in 0..TREE_DEPTH {
        if !is_bit_set(&mask_bytes, bit) {
            continue;
        }
        let Some(chunk) = siblings.next() else {
            break;
        };
        let mut sibling = ZERO_HASH;
        sibling.copy_from_slice(chunk);

        let depth = mask_bit(bit);
        current = Some(match current {
            Some(hash) if is_bit_set(key, depth) => H::hash_branch(&sibling, &hash),
            Some(hash) => H::hash_branch(&hash, &sibling),
            None => sibling,
        });
    }

    current.unwrap_or(ZERO_HASH)
}

/// A compact membership / non-membership proof for a single key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SmtProof {
    bytes: Vec<u8>,
}

impl SmtProof {
    /// Encode a mask and its siblings (leaf-adjacent first).
    pub(crate) fn from_parts(mask: H256, siblings: &[H256]) -> Self {
        let mut bytes = Vec::with_capacity(MASK_LEN + siblings.len() * HASH_LEN);
        bytes.extend_from_slice(&mask);
        for sibling in siblings {
            bytes.extend_from_slice(sibling);
        }
        Self { bytes }
    }

    /// Wrap raw proof bytes, validating their length against the mask.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        check_proof_length(&bytes)?;
        Ok(Self { bytes })
    }

    /// Parse a proof from hex (either case, optional `0x`).
    pub fn from_hex(input: &str) -> Result<Self> {
        Self::from_bytes(decode_hex(input)?)
    }

    /// `0x`-prefixed lowercase hex of the encoded proof.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }

    /// The encoded proof.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the proof, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The 32-byte depth mask.
    pub fn mask(&self) -> H256 {
        let mut mask = ZERO_HASH;
        mask.copy_from_slice(&self.bytes[..MASK_LEN]);
        mask
    }

    /// Sibling hashes, leaf-adjacent first.
    pub fn siblings(&self) -> impl Iterator<Item = H256> + '_ {
        self.bytes[MASK_LEN..].chunks_exact(HASH_LEN).map(|chunk| {
            let mut sibling = ZERO_HASH;
            sibling.copy_from_slice(chunk);
            sibling
        })
    }

    /// Number of non-empty siblings carried.
    pub fn sibling_count(&self) -> usize {
        (self.bytes.len() - MASK_LEN) / HASH_LEN
    }

    /// Root implied by this proof for `key` holding `value`.
    pub fn compute_root<H: Hasher>(&self, key: &H256, value: &H256) -> H256 {
        compute_root::<H>(key, value, &self.bytes)
    }

    /// Check `key -> value` against `root`. A zero `value` checks absence.
    pub fn verify<H: Hasher>(&self, root: &H256, key: &H256, value: &H256) -> bool {
        self.compute_root::<H>(key, value) == *root
    }
}

impl AsRef<[u8]> for SmtProof {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SmtProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SmtProof").field(&self.to_hex()).finish()
    }
}

impl TryFrom<Vec<u8>> for SmtProof {
    type Error = SmtError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<String> for SmtProof {
    type Error = SmtError;

    fn try_from(input: String) -> Result<Self> {
        Self::from_hex(&input)
    }
}

impl From<SmtProof> for String {
    fn from(proof: SmtProof) -> Self {
        proof.to_hex()
    }
}
