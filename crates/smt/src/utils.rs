//! Hex helpers for the byte boundary.

use crate::{
    error::{Result, SmtError},
    H256,
};

/// Format a 32-byte hash as hexadecimal string with 0x prefix
pub fn format_hash_hex(hash: &H256) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Decode hex of either case, with or without a leading `0x`.
pub fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    Ok(hex::decode(digits)?)
}

/// Parse a 32-byte hash from hex.
pub fn parse_hash_hex(input: &str) -> Result<H256> {
    let bytes = decode_hex(input)?;
    to_h256(&bytes, "hash")
}

/// Copy `bytes` into a fixed-size hash, rejecting any other length.
pub(crate) fn to_h256(bytes: &[u8], field: &'static str) -> Result<H256> {
    bytes.try_into().map_err(|_| SmtError::invalid_length(field, bytes.len()))
}

/// Returns whether every byte is zero.
pub(crate) fn is_zero(hash: &H256) -> bool {
    hash.iter().all(|byte| *byte == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HASH_LEN;

    #[test]
    fn test_hex_round_trip() {
        let hash = [0xabu8; HASH_LEN];
        let encoded = format_hash_hex(&hash);
        assert!(encoded.starts_with("0xabab"));
        assert_eq!(parse_hash_hex(&encoded).unwrap(), hash);
    }

    #[test]
    fn test_prefix_and_case_are_optional() {
        let lower = parse_hash_hex(&"ab".repeat(32)).unwrap();
        let upper = parse_hash_hex(&format!("0X{}", "AB".repeat(32))).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = parse_hash_hex("0x1234").unwrap_err();
        assert_eq!(err, SmtError::InvalidLength { field: "hash", expected: 32, actual: 2 });
    }

    #[test]
    fn test_parse_rejects_bad_digits() {
        assert!(matches!(parse_hash_hex("0xzz"), Err(SmtError::InvalidHex(_))));
        assert!(matches!(decode_hex("0x123"), Err(SmtError::InvalidHex(_))));
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(&[0u8; HASH_LEN]));
        let mut hash = [0u8; HASH_LEN];
        hash[31] = 1;
        assert!(!is_zero(&hash));
    }
}
