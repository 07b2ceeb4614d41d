//! Public keys.

use crate::{
    arithmetic::{AffinePoint, BasePointTable, ProjectivePoint},
    Error, Result,
};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use num_traits::Zero;
use std::sync::Arc;

/// SM2 public key: a validated, non-identity point on the curve.
///
/// A key may carry a precomputed multiplication table (see
/// [`PublicKey::precompute`]); the table is shared by clones and used
/// transparently by signature verification and encryption.
#[derive(Clone)]
pub struct PublicKey {
    point: AffinePoint,
    table: Option<Arc<BasePointTable>>,
}

impl PublicKey {
    /// Create a public key from an affine point, rejecting the identity.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if point.is_identity() {
            return Err(Error::InvalidPoint {
                x: BigUint::zero(),
                y: BigUint::zero(),
            });
        }
        Ok(Self { point, table: None })
    }

    /// Create a public key from raw coordinates, verifying the curve
    /// equation.
    pub fn from_coordinates(x: BigUint, y: BigUint) -> Result<Self> {
        Self::from_affine(AffinePoint::new(x, y)?)
    }

    /// Parse a public key from a SEC1-encoded point.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_affine(AffinePoint::decode(bytes)?)
    }

    /// Serialize as a SEC1-encoded point.
    pub fn to_sec1_bytes(&self, compress: bool) -> Vec<u8> {
        self.point.encode(compress)
    }

    /// Borrow the inner point.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// Attach a 32×256 multiplication table for this key.
    ///
    /// Verification's `t·Q` and encryption's `k·Q` then cost one projective
    /// addition per scalar byte instead of a full double-and-add walk, in
    /// exchange for a one-time table construction.
    pub fn precompute(mut self) -> Self {
        if self.table.is_none() {
            self.table = Some(Arc::new(BasePointTable::new(&self.point)));
        }
        self
    }

    /// Multiply this key's point by a scalar, through the table when one has
    /// been precomputed.
    pub(crate) fn mul(&self, k: &BigUint) -> AffinePoint {
        match &self.table {
            Some(table) => table.mul(k),
            None => self.point.mul(k),
        }
    }

    /// As [`mul`](Self::mul), staying in projective coordinates.
    pub(crate) fn mul_projective(&self, k: &BigUint) -> ProjectivePoint {
        match &self.table {
            Some(table) => table.mul_projective(k),
            None => ProjectivePoint::from(self.point.mul(k)),
        }
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("point", &self.point)
            .finish_non_exhaustive()
    }
}

impl Eq for PublicKey {}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl AsRef<AffinePoint> for PublicKey {
    fn as_ref(&self) -> &AffinePoint {
        &self.point
    }
}
