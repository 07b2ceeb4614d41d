//! SM2DSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! A1: set M~=ZA || M
//! A2: calculate e=Hv(M~)
//! A3: pick a random number k in [1, n-1] via a random number generator
//! A4: calculate the elliptic curve point (x1, y1)=[k]G
//! A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
//! A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
//! A7: the digital signature of M is (r, s)
//! ```

use super::{Signature, VerifyingKey};
use crate::{
    arithmetic::{self, ProjectivePoint},
    Error, PublicKey, Result, SecretKey, SM2,
};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;

/// SM2DSA secret key used for signing messages.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret scalar.
    secret_scalar: BigUint,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create a signing key from a signer's distinguishing identifier and
    /// secret key.
    pub fn new(distid: &[u8], secret_key: &SecretKey) -> Result<Self> {
        let verifying_key = VerifyingKey::new(distid, secret_key.public_key())?;
        Ok(Self {
            secret_scalar: secret_key.as_scalar().clone(),
            verifying_key,
        })
    }

    /// Create a signing key from an existing keypair, verifying that the
    /// public half matches `d·G`.
    pub fn from_keypair(
        distid: &[u8],
        secret_key: &SecretKey,
        public_key: PublicKey,
    ) -> Result<Self> {
        if secret_key.public_key() != public_key {
            return Err(Error::KeyMismatch);
        }
        let verifying_key = VerifyingKey::new(distid, public_key)?;
        Ok(Self {
            secret_scalar: secret_key.as_scalar().clone(),
            verifying_key,
        })
    }

    /// Get the [`VerifyingKey`] which corresponds to this signing key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Sign a message: `e = SM3(Z || msg)` followed by the signing loop.
    pub fn sign(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Signature {
        let digest = self.verifying_key.hash_msg(msg);
        self.sign_prehash(rng, &digest)
    }

    /// Sign a precomputed 32-byte digest of `Z || msg`.
    ///
    /// Retries with a fresh `k` whenever the attempt produces a degenerate
    /// `r` or `s`; the conditions occur with negligible probability for
    /// honest random scalars.
    pub fn sign_prehash(&self, rng: &mut impl CryptoRngCore, prehash: &[u8; 32]) -> Signature {
        let e = BigUint::from_bytes_be(prehash);
        loop {
            let k = arithmetic::random_scalar(rng);
            if let Some(signature) = sign_attempt(&e, &self.secret_scalar, &k) {
                return signature;
            }
        }
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

/// One iteration of the signing loop. `None` means the caller must retry
/// with a fresh `k`.
fn sign_attempt(e: &BigUint, d: &BigUint, k: &BigUint) -> Option<Signature> {
    let n = &SM2.order;

    // A4: calculate the elliptic curve point (x1, y1)=[k]G
    let point = ProjectivePoint::mul_by_generator(k);
    let (x1, _) = point.coordinates()?;

    // A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
    let r = (e + x1) % n;
    if r.is_zero() || (&r + k) == SM2.order {
        return None;
    }

    // A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
    let k_minus_rd = (k + n - &r * d % n) % n;
    let s = primefp::divide(n, &k_minus_rd, &(d + 1u32));
    if s.is_zero() {
        return None;
    }

    // A7: the digital signature of M is (r, s)
    Some(Signature { r, s })
}
