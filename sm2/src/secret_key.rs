//! Secret keys.

use crate::{
    arithmetic::{self, ProjectivePoint},
    Error, PublicKey, Result, FIELD_BYTE_SIZE, SM2,
};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

/// SM2 secret key: a scalar in `[2, n)`.
#[derive(Clone, Eq, PartialEq)]
pub struct SecretKey {
    secret_scalar: BigUint,
}

impl SecretKey {
    /// Generate a random secret key.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        Self {
            secret_scalar: arithmetic::random_scalar(rng),
        }
    }

    /// Parse a secret key from a big endian-encoded scalar.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.is_empty() || slice.len() > FIELD_BYTE_SIZE {
            return Err(Error::InvalidEncoding);
        }
        let secret_scalar = BigUint::from_bytes_be(slice);
        if secret_scalar < BigUint::from(2u32) || secret_scalar >= SM2.order {
            return Err(Error::InvalidEncoding);
        }
        Ok(Self { secret_scalar })
    }

    /// Serialize as fixed-width big-endian bytes.
    pub fn to_bytes(&self) -> [u8; FIELD_BYTE_SIZE] {
        arithmetic::to_fixed_bytes(&self.secret_scalar)
    }

    /// Derive the public key `d·G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_affine(ProjectivePoint::mul_by_generator(&self.secret_scalar))
            .expect("scalar in range never yields the identity")
    }

    /// Borrow the secret scalar.
    pub(crate) fn as_scalar(&self) -> &BigUint {
        &self.secret_scalar
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}
