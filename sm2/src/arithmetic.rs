//! Curve point arithmetic.

pub(crate) mod affine;
pub(crate) mod projective;
pub(crate) mod table;

pub use self::{affine::AffinePoint, table::BasePointTable};
pub(crate) use self::projective::ProjectivePoint;

use crate::{FIELD_BYTE_SIZE, SM2};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

/// Draw a uniform scalar from `[2, n)` by rejection sampling.
pub(crate) fn random_scalar(rng: &mut impl CryptoRngCore) -> BigUint {
    let span = &SM2.order - 2u32;
    loop {
        let mut bytes = [0u8; FIELD_BYTE_SIZE];
        rng.fill_bytes(&mut bytes);
        let candidate = BigUint::from_bytes_be(&bytes);
        if candidate < span {
            return candidate + 2u32;
        }
    }
}

/// Fixed-width big-endian serialization of a reduced field element or scalar.
pub(crate) fn to_fixed_bytes(value: &BigUint) -> [u8; FIELD_BYTE_SIZE] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; FIELD_BYTE_SIZE];
    out[FIELD_BYTE_SIZE - bytes.len()..].copy_from_slice(&bytes);
    out
}
