//! Error types.

use thiserror::Error;

/// Error returned when a square root is requested for a value that is not a
/// quadratic residue modulo the prime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("value is not a quadratic residue modulo p")]
pub struct NotASquare;
