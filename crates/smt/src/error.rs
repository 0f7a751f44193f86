//! Error types for the SMT crate.

use thiserror::Error;

/// SMT error type.
///
/// Every variant is an input-validation failure raised before any state is
/// touched. A proof that simply does not match a root is not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmtError {
    /// A key, value or root was not exactly 32 bytes.
    #[error("invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Which input was rejected.
        field: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// Proof length disagrees with the number of set bits in its mask.
    #[error("invalid proof length: mask requires {expected} bytes, got {actual}")]
    InvalidProofLength {
        /// `32 + 32 * popcount(mask)`.
        expected: usize,
        /// Length of the supplied proof.
        actual: usize,
    },

    /// Proof cannot even be parsed (e.g. shorter than its mask).
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// Hex input at the boundary could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Result type alias for SmtError.
pub type Result<T> = std::result::Result<T, SmtError>;

impl SmtError {
    pub(crate) const fn invalid_length(field: &'static str, actual: usize) -> Self {
        Self::InvalidLength { field, expected: crate::HASH_LEN, actual }
    }
}
