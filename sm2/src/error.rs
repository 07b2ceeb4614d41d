//! Error types.

use crate::der;
use num_bigint::BigUint;
use thiserror::Error;

/// Result type with the `sm2` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// SM2 errors.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The coordinates do not satisfy the curve equation.
    #[error("({x:#x}, {y:#x}) not on the elliptic curve")]
    InvalidPoint {
        /// x-coordinate of the rejected point.
        x: BigUint,
        /// y-coordinate of the rejected point.
        y: BigUint,
    },

    /// Malformed point, key, signature or ciphertext bytes.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// A compressed x-coordinate has no matching y-coordinate on the curve.
    #[error(transparent)]
    NotASquare(#[from] primefp::NotASquare),

    /// The supplied public key does not match the private key.
    #[error("public key does not match the private key")]
    KeyMismatch,

    /// Encryption was requested for an empty message.
    #[error("plaintext is empty")]
    EmptyPlaintext,

    /// Ciphertext mode outside the supported set.
    #[error("unknown ciphertext mode")]
    UnknownMode,

    /// The ciphertext hash check failed.
    #[error("ciphertext hash check failed")]
    HashMismatch,

    /// ASN.1 structure violation.
    #[error("ASN.1: {0}")]
    Asn1(#[from] der::Error),
}
