//! SM2 decryption.
//!
//! ## Algorithm
//!
//! ```text
//! B1: get C1 from C and verify it satisfies the curve equation
//! B2: compute [dB]C1 = (x2, y2)
//! B3: compute t = KDF(x2 || y2, klen)
//! B4: compute M' = C2 xor t
//! B5: compute u = Hash(x2 || M' || y2); if u != C3, output ERROR
//! ```

use super::{hash_c3, kdf, xor, Cipher, EncryptingKey, Mode};
use crate::{Error, PublicKey, Result, SecretKey};
use core::fmt::{self, Debug};
use num_bigint::BigUint;

/// SM2 secret key used for decrypting messages.
#[derive(Clone)]
pub struct DecryptingKey {
    secret_scalar: BigUint,
    encrypting_key: EncryptingKey,
}

impl DecryptingKey {
    /// Create a decrypting key from a secret key, deriving the matching
    /// public half.
    pub fn new(secret_key: &SecretKey) -> Self {
        Self {
            secret_scalar: secret_key.as_scalar().clone(),
            encrypting_key: EncryptingKey::new(secret_key.public_key()),
        }
    }

    /// Create a decrypting key from an existing keypair, verifying that the
    /// public half matches `d·G`.
    pub fn from_keypair(secret_key: &SecretKey, public_key: PublicKey) -> Result<Self> {
        if secret_key.public_key() != public_key {
            return Err(Error::KeyMismatch);
        }
        Ok(Self {
            secret_scalar: secret_key.as_scalar().clone(),
            encrypting_key: EncryptingKey::new(public_key),
        })
    }

    /// The matching encryption key.
    pub fn encrypting_key(&self) -> &EncryptingKey {
        &self.encrypting_key
    }

    /// Decrypt a parsed ciphertext.
    ///
    /// When the ciphertext carries a hash, decryption fails with
    /// [`Error::HashMismatch`] unless `SM3(x2 || M' || y2)` matches it.
    pub fn decrypt(&self, cipher: &Cipher) -> Result<Vec<u8>> {
        let shared = cipher.c1.mul(&self.secret_scalar);
        let x2 = shared.x_bytes();
        let y2 = shared.y_bytes();

        let key = kdf(&[x2, y2].concat(), cipher.c2.len());
        let msg = xor(&cipher.c2, &key);

        if let Some(c3) = &cipher.c3 {
            if hash_c3(&x2, &msg, &y2) != *c3 {
                return Err(Error::HashMismatch);
            }
        }
        Ok(msg)
    }

    /// Parse ciphertext bytes in the given mode, then decrypt them.
    pub fn decrypt_slice(&self, bytes: &[u8], mode: Mode) -> Result<Vec<u8>> {
        self.decrypt(&Cipher::from_slice(bytes, mode)?)
    }
}

impl Debug for DecryptingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptingKey")
            .field("encrypting_key", &self.encrypting_key)
            .finish_non_exhaustive()
    }
}
