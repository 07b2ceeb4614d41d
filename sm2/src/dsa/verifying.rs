//! SM2DSA verification.
//!
//! ## Algorithm
//!
//! ```text
//! B1: verify whether r' in [1,n-1], verification failed if not
//! B2: verify whether s' in [1,n-1], verification failed if not
//! B3: set M'~=ZA || M'
//! B4: calculate e'=Hv(M'~)
//! B5: calculate t = (r' + s') modn, verification failed if t=0
//! B6: calculate the point (x1', y1')=[s']G + [t]PA
//! B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
//! ```

use super::Signature;
use crate::{arithmetic::table, distid::hash_z, PublicKey, Result, SM2};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use num_traits::Zero;
use sm3::{Digest, Sm3};

/// SM2DSA public key used for verifying signatures over messages.
///
/// Algebraic rejection is reported as `false` from [`VerifyingKey::verify`];
/// errors are reserved for structurally malformed inputs, which fail
/// earlier, at [`Signature::from_der`].
#[derive(Clone)]
pub struct VerifyingKey {
    /// Signer's public key.
    public_key: PublicKey,

    /// Signer's user information hash `Z`.
    identity_hash: [u8; 32],

    /// Distinguishing identifier used to compute `Z`.
    distid: Vec<u8>,
}

impl VerifyingKey {
    /// Create a verifying key from a signer's distinguishing identifier and
    /// public key.
    pub fn new(distid: &[u8], public_key: PublicKey) -> Result<Self> {
        let identity_hash = hash_z(distid, &public_key)?;
        Ok(Self {
            public_key,
            identity_hash,
            distid: distid.to_vec(),
        })
    }

    /// Create a verifying key from a distinguishing identifier and a
    /// SEC1-encoded public key.
    pub fn from_sec1_bytes(distid: &[u8], bytes: &[u8]) -> Result<Self> {
        Self::new(distid, PublicKey::from_sec1_bytes(bytes)?)
    }

    /// The distinguishing identifier for this key.
    pub fn distid(&self) -> &[u8] {
        &self.distid
    }

    /// The user information hash `Z` for this key.
    pub fn identity_hash(&self) -> &[u8; 32] {
        &self.identity_hash
    }

    /// The signer's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Attach a precomputed multiplication table to the public key,
    /// accelerating the `[t]PA` term of every subsequent verification.
    pub fn precompute(mut self) -> Self {
        self.public_key = self.public_key.precompute();
        self
    }

    /// Digest `Z || msg` with SM3.
    pub(crate) fn hash_msg(&self, msg: &[u8]) -> [u8; 32] {
        Sm3::new_with_prefix(self.identity_hash)
            .chain_update(msg)
            .finalize()
            .into()
    }

    /// Verify a signature over a message.
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> bool {
        let digest = self.hash_msg(msg);
        self.verify_prehash(&digest, signature)
    }

    /// Verify a signature over a precomputed digest of `Z || msg`.
    pub fn verify_prehash(&self, prehash: &[u8; 32], signature: &Signature) -> bool {
        let n = &SM2.order;

        // B1, B2: r and s must lie in [1, n-1]
        let (r, s) = (signature.r(), signature.s());
        if r.is_zero() || s.is_zero() || r >= n || s >= n {
            return false;
        }

        // B5: calculate t = (r' + s') modn, verification failed if t=0
        let t = (r + s) % n;
        if t.is_zero() {
            return false;
        }

        // B4: calculate e'=Hv(M'~)
        let e = BigUint::from_bytes_be(prehash);

        // B6: calculate the point (x1', y1')=[s']G + [t]PA
        let mut point = self.public_key.mul_projective(&t);
        point += &table::GENERATOR_TABLE.mul_projective(s);

        // B7: calculate R=(e'+x1') modn, verification pass if yes
        match point.to_affine().coordinates() {
            None => false,
            Some((x1, _)) => (e + x1) % n == *r,
        }
    }
}

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl AsRef<PublicKey> for VerifyingKey {
    fn as_ref(&self) -> &PublicKey {
        &self.public_key
    }
}
