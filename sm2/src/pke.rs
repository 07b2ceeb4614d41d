//! SM2 public key encryption.
//!
//! ## Usage
//!
//! ```
//! # fn example() -> sm2::Result<()> {
//! use rand_core::OsRng;
//! use sm2::{pke::{Cipher, DecryptingKey, Mode}, SecretKey};
//!
//! // Encrypting
//! let secret_key = SecretKey::random(&mut OsRng);
//! let decrypting_key = DecryptingKey::new(&secret_key);
//! let plaintext = b"plaintext";
//! let cipher = decrypting_key.encrypting_key().encrypt(&mut OsRng, plaintext)?;
//! let ciphertext = cipher.to_bytes(Mode::C1C3C2)?;
//!
//! // Decrypting
//! let cipher = Cipher::from_slice(&ciphertext, Mode::C1C3C2)?;
//! assert_eq!(decrypting_key.decrypt(&cipher)?, plaintext);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod decrypting;
mod encrypting;

pub use self::{decrypting::DecryptingKey, encrypting::EncryptingKey};

use crate::{arithmetic::AffinePoint, der, Error, Result, FIELD_BYTE_SIZE};
use core::str::FromStr;
use num_bigint::BigUint;
use sm3::{Digest, Sm3};

/// Ciphertext component orderings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// ASN.1 `SEQUENCE { INTEGER x1, INTEGER y1, OCTET STRING hash,
    /// OCTET STRING cipher }` (the canonical encoding).
    #[default]
    Asn1,

    /// `C1 || C3 || C2` concatenation (GM/T 0009 order).
    C1C3C2,

    /// `C1 || C2 || C3` concatenation (legacy order).
    C1C2C3,

    /// `C1 || C2` concatenation without the message hash. Accepted for
    /// interoperability; offers no integrity protection.
    C1C2,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asn1" => Ok(Self::Asn1),
            "c1c3c2" => Ok(Self::C1C3C2),
            "c1c2c3" => Ok(Self::C1C2C3),
            "c1c2" => Ok(Self::C1C2),
            _ => Err(Error::UnknownMode),
        }
    }
}

/// SM2 ciphertext: the ephemeral point `C1`, the masked message `C2` and
/// the SM3 hash `C3` (absent when parsed from `C1C2` bytes).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cipher {
    c1: AffinePoint,
    c2: Vec<u8>,
    c3: Option<[u8; 32]>,
}

impl Cipher {
    /// The ephemeral point `C1`.
    pub fn c1(&self) -> &AffinePoint {
        &self.c1
    }

    /// The masked message bytes `C2`.
    pub fn c2(&self) -> &[u8] {
        &self.c2
    }

    /// The message hash `C3`, when present.
    pub fn c3(&self) -> Option<&[u8; 32]> {
        self.c3.as_ref()
    }

    /// Serialize in the given mode.
    ///
    /// `C1` is always uncompressed in the concatenated modes. Modes that
    /// carry `C3` fail with [`Error::InvalidEncoding`] when the hash is
    /// absent, i.e. when this value was parsed from `C1C2` bytes.
    pub fn to_bytes(&self, mode: Mode) -> Result<Vec<u8>> {
        let c1 = self.c1.encode(false);
        match mode {
            Mode::C1C2 => Ok([c1.as_slice(), self.c2.as_slice()].concat()),
            Mode::C1C2C3 => {
                let c3 = self.c3.ok_or(Error::InvalidEncoding)?;
                Ok([c1.as_slice(), self.c2.as_slice(), c3.as_slice()].concat())
            }
            Mode::C1C3C2 => {
                let c3 = self.c3.ok_or(Error::InvalidEncoding)?;
                Ok([c1.as_slice(), c3.as_slice(), self.c2.as_slice()].concat())
            }
            Mode::Asn1 => {
                let c3 = self.c3.ok_or(Error::InvalidEncoding)?;
                let x1 = der::encode_integer(&BigUint::from_bytes_be(&self.c1.x_bytes()));
                let y1 = der::encode_integer(&BigUint::from_bytes_be(&self.c1.y_bytes()));
                let hash = der::encode_octet_string(&c3);
                let cipher = der::encode_octet_string(&self.c2);
                Ok(der::encode_sequence(&[&x1, &y1, &hash, &cipher]))
            }
        }
    }

    /// Parse ciphertext bytes in the given mode, validating that `C1` lies
    /// on the curve.
    pub fn from_slice(bytes: &[u8], mode: Mode) -> Result<Self> {
        if let Mode::Asn1 = mode {
            return Self::from_asn1(bytes);
        }

        let point_len = 1 + 2 * FIELD_BYTE_SIZE;
        let min_len = match mode {
            Mode::C1C2 => point_len + 1,
            _ => point_len + 32 + 1,
        };
        if bytes.len() < min_len || bytes[0] != 0x04 {
            return Err(Error::InvalidEncoding);
        }

        let c1 = AffinePoint::decode(&bytes[..point_len])?;
        let body = &bytes[point_len..];
        let (c2, c3) = match mode {
            Mode::C1C2 => (body.to_vec(), None),
            Mode::C1C3C2 => {
                let (c3, c2) = body.split_at(32);
                (c2.to_vec(), Some(hash_array(c3)?))
            }
            _ => {
                let (c2, c3) = body.split_at(body.len() - 32);
                (c2.to_vec(), Some(hash_array(c3)?))
            }
        };
        Ok(Self { c1, c2, c3 })
    }

    fn from_asn1(bytes: &[u8]) -> Result<Self> {
        let (body, rest) = der::decode_sequence(bytes)?;
        if body.is_empty() || !rest.is_empty() {
            return Err(Error::InvalidEncoding);
        }
        let (x1, body) = der::decode_integer(body)?;
        let (y1, body) = der::decode_integer(body)?;
        let (c3, body) = der::decode_octet_string(body)?;
        let (c2, body) = der::decode_octet_string(body)?;
        if !body.is_empty() {
            return Err(Error::InvalidEncoding);
        }
        Ok(Self {
            c1: AffinePoint::new(x1, y1)?,
            c2: c2.to_vec(),
            c3: Some(hash_array(c3)?),
        })
    }
}

fn hash_array(bytes: &[u8]) -> Result<[u8; 32]> {
    bytes.try_into().map_err(|_| Error::InvalidEncoding)
}

/// Counter-mode key derivation over SM3: `SM3(z || 1) || SM3(z || 2) || …`
/// truncated to `klen` bytes. The counter is big-endian in four bytes.
pub(crate) fn kdf(z: &[u8], klen: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(klen + 32);
    let mut counter: u32 = 1;
    while out.len() < klen {
        let digest = Sm3::new_with_prefix(z)
            .chain_update(counter.to_be_bytes())
            .finalize();
        out.extend_from_slice(&digest);
        counter += 1;
    }
    out.truncate(klen);
    out
}

pub(crate) fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter().zip(key).map(|(a, b)| a ^ b).collect()
}

/// `C3 = SM3(x2 || msg || y2)`.
pub(crate) fn hash_c3(x2: &[u8; 32], msg: &[u8], y2: &[u8; 32]) -> [u8; 32] {
    Sm3::new_with_prefix(x2)
        .chain_update(msg)
        .chain_update(y2)
        .finalize()
        .into()
}
