//! SM2 Digital Signature Algorithm (SM2DSA).
//!
//! ## Usage
//!
//! ```
//! # fn example() -> sm2::Result<()> {
//! use rand_core::OsRng;
//! use sm2::{dsa::SigningKey, SecretKey, DEFAULT_DIST_ID};
//!
//! // Signing
//! let secret_key = SecretKey::random(&mut OsRng);
//! let signing_key = SigningKey::new(DEFAULT_DIST_ID, &secret_key)?;
//! let message = b"test message";
//! let signature = signing_key.sign(&mut OsRng, message);
//!
//! // Verifying
//! use sm2::dsa::VerifyingKey;
//!
//! let verifying_key_bytes = signing_key.verifying_key().public_key().to_sec1_bytes(false);
//! let verifying_key = VerifyingKey::from_sec1_bytes(DEFAULT_DIST_ID, &verifying_key_bytes)?;
//! assert!(verifying_key.verify(message, &signature));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod signing;
mod verifying;

pub use self::{signing::SigningKey, verifying::VerifyingKey};

use crate::{der, Error, Result, SM2};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use num_traits::Zero;

/// SM2DSA signature: the scalar pair `(r, s)`, both in `[1, n − 1]`.
///
/// The wire form is the ASN.1 `SEQUENCE { INTEGER r, INTEGER s }` produced
/// by [`Signature::to_der`].
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Create a signature from its `r` and `s` scalars, rejecting values
    /// outside `[1, n − 1]`.
    pub fn from_scalars(r: BigUint, s: BigUint) -> Result<Self> {
        if r.is_zero() || s.is_zero() || r >= SM2.order || s >= SM2.order {
            return Err(Error::InvalidEncoding);
        }
        Ok(Self { r, s })
    }

    /// Parse a signature from its ASN.1 encoding.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let (body, rest) = der::decode_sequence(bytes)?;
        if body.is_empty() || !rest.is_empty() {
            return Err(Error::InvalidEncoding);
        }
        let (r, body) = der::decode_integer(body)?;
        let (s, body) = der::decode_integer(body)?;
        if !body.is_empty() {
            return Err(Error::InvalidEncoding);
        }
        Self::from_scalars(r, s)
    }

    /// Encode as `SEQUENCE { INTEGER r, INTEGER s }`.
    pub fn to_der(&self) -> Vec<u8> {
        let r = der::encode_integer(&self.r);
        let s = der::encode_integer(&self.s);
        der::encode_sequence(&[&r, &s])
    }

    /// The `r` component.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &BigUint {
        &self.s
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(r: {:x}, s: {:x})", self.r, self.s)
    }
}
