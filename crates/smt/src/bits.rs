//! Bit addressing over 256-bit keys.
//!
//! Bit `0` is the most significant bit of byte `0`; bit `255` is the least
//! significant bit of byte `31`. Every mutator takes its input by value and
//! returns a fresh copy, so a prefix that was stored as a map key is never
//! changed underneath it.

use crate::H256;

const BYTE_SIZE: usize = 8;

#[inline]
const fn locate(index: usize) -> (usize, u8) {
    (index / BYTE_SIZE, 0x80 >> (index % BYTE_SIZE))
}

/// Returns whether bit `index` of `buf` is set.
#[inline]
pub const fn is_bit_set(buf: &H256, index: usize) -> bool {
    let (byte, mask) = locate(index);
    buf[byte] & mask != 0
}

/// Returns `buf` with bit `index` set.
#[inline]
pub const fn set_bit(mut buf: H256, index: usize) -> H256 {
    let (byte, mask) = locate(index);
    buf[byte] |= mask;
    buf
}

/// Returns `buf` with bit `index` cleared.
#[inline]
pub const fn clear_bit(mut buf: H256, index: usize) -> H256 {
    let (byte, mask) = locate(index);
    buf[byte] &= !mask;
    buf
}

/// Returns `buf` with bit `index` inverted.
#[inline]
pub const fn flip_bit(mut buf: H256, index: usize) -> H256 {
    let (byte, mask) = locate(index);
    buf[byte] ^= mask;
    buf
}

/// Keeps the leading `len` bits of `buf` and zeroes the rest.
pub fn truncate_bits(mut buf: H256, len: usize) -> H256 {
    if len >= buf.len() * BYTE_SIZE {
        return buf;
    }
    let (byte, _) = locate(len);
    let keep = len % BYTE_SIZE;
    // `keep` is in 0..8, so the shift never overflows a u16.
    buf[byte] &= (0xff00u16 >> keep) as u8;
    buf[byte + 1..].fill(0);
    buf
}

/// Number of set bits in `buf`.
pub fn count_ones(buf: &H256) -> usize {
    buf.iter().map(|byte| byte.count_ones() as usize).sum()
}
