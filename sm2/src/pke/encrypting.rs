//! SM2 encryption.
//!
//! ## Algorithm
//!
//! ```text
//! A1: generate a random number k in [1, n-1] with the random number generator
//! A2: compute point C1 = [k]G = (x1, y1)
//! A3: compute point [k]PB = (x2, y2)
//! A4: compute t = KDF(x2 || y2, klen); if t is all zero, go to A1
//! A5: compute C2 = M xor t
//! A6: compute C3 = Hash(x2 || M || y2)
//! ```

use super::{hash_c3, kdf, xor, Cipher};
use crate::{
    arithmetic::{self, ProjectivePoint},
    Error, PublicKey, Result,
};
use rand_core::CryptoRngCore;

/// SM2 public key used for encrypting messages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptingKey {
    public_key: PublicKey,
}

impl EncryptingKey {
    /// Create an encrypting key from a public key.
    pub fn new(public_key: PublicKey) -> Self {
        Self { public_key }
    }

    /// Create an encrypting key from a SEC1-encoded public key.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(PublicKey::from_sec1_bytes(bytes)?))
    }

    /// The recipient's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Attach a precomputed multiplication table to the public key,
    /// accelerating the `[k]PB` term of every subsequent encryption.
    pub fn precompute(mut self) -> Self {
        self.public_key = self.public_key.precompute();
        self
    }

    /// Encrypt a message.
    ///
    /// A fresh ephemeral scalar is drawn per attempt, and re-drawn whenever
    /// the derived key stream comes out all zero (a GB/T 32918.4
    /// requirement; the condition is vanishingly rare in practice).
    pub fn encrypt(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<Cipher> {
        if msg.is_empty() {
            return Err(Error::EmptyPlaintext);
        }
        loop {
            let k = arithmetic::random_scalar(rng);
            let c1 = ProjectivePoint::mul_by_generator(&k);
            let shared = self.public_key.mul(&k);
            let x2 = shared.x_bytes();
            let y2 = shared.y_bytes();

            let key = kdf(&[x2, y2].concat(), msg.len());
            if key.iter().all(|&byte| byte == 0) {
                continue;
            }

            let c2 = xor(msg, &key);
            let c3 = hash_c3(&x2, msg, &y2);
            return Ok(Cipher {
                c1,
                c2,
                c3: Some(c3),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SecretKey;
    use rand_core::OsRng;

    #[test]
    fn empty_plaintext_rejected() {
        let encrypting_key = EncryptingKey::new(SecretKey::random(&mut OsRng).public_key());
        assert_eq!(
            encrypting_key.encrypt(&mut OsRng, b"").unwrap_err(),
            Error::EmptyPlaintext
        );
    }

    #[test]
    fn ephemeral_point_is_on_curve() {
        let encrypting_key = EncryptingKey::new(SecretKey::random(&mut OsRng).public_key());
        let cipher = encrypting_key.encrypt(&mut OsRng, b"msg").unwrap();
        assert!(!cipher.c1().is_identity());
        assert_eq!(cipher.c2().len(), 3);
        assert!(cipher.c3().is_some());
    }

    #[test]
    fn fresh_scalars_give_distinct_ciphertexts() {
        let encrypting_key = EncryptingKey::new(SecretKey::random(&mut OsRng).public_key());
        let a = encrypting_key.encrypt(&mut OsRng, b"msg").unwrap();
        let b = encrypting_key.encrypt(&mut OsRng, b"msg").unwrap();
        assert_ne!(a.c1(), b.c1());
    }
}
