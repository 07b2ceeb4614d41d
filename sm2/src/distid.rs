//! Distinguishing identifier support.

use crate::{arithmetic::to_fixed_bytes, Error, PublicKey, Result, SM2};
use sm3::{Digest, Sm3};

/// Default distinguishing identifier defined by the SM2 standard.
pub const DEFAULT_DIST_ID: &[u8] = b"1234567812345678";

/// Compute the user information hash `Z`:
///
/// ```text
/// Z = SM3(ENTL || id || a || b || xG || yG || xA || yA)
/// ```
///
/// where `ENTL` is the identifier's length in bits as two big-endian bytes.
/// Identifiers longer than 8191 bytes do not fit in `ENTL` and are rejected.
pub(crate) fn hash_z(distid: &[u8], public_key: &PublicKey) -> Result<[u8; 32]> {
    let entl: u16 = distid
        .len()
        .checked_mul(8)
        .and_then(|bits| bits.try_into().ok())
        .ok_or(Error::InvalidEncoding)?;

    let mut sm3 = Sm3::new();
    sm3.update(entl.to_be_bytes());
    sm3.update(distid);
    sm3.update(to_fixed_bytes(&SM2.equation_a));
    sm3.update(to_fixed_bytes(&SM2.equation_b));
    sm3.update(to_fixed_bytes(&SM2.generator.0));
    sm3.update(to_fixed_bytes(&SM2.generator.1));
    sm3.update(public_key.as_affine().x_bytes());
    sm3.update(public_key.as_affine().y_bytes());
    Ok(sm3.finalize().into())
}
