//! Affine curve points.

use crate::{
    arithmetic::{to_fixed_bytes, ProjectivePoint},
    Error, Result, FIELD_BYTE_SIZE, SM2,
};
use core::ops::{Add, Mul, Neg, Sub};
use num_bigint::BigUint;
use num_traits::Zero;

/// Point on the SM2 curve in affine coordinates.
///
/// The point at infinity is an explicit variant rather than a coordinate
/// sentinel; finite coordinates are always reduced modulo the field prime.
/// This is the canonical form points take at API boundaries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AffinePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    Identity,

    /// A finite point with both coordinates in `[0, p)`.
    Affine {
        /// x-coordinate.
        x: BigUint,
        /// y-coordinate.
        y: BigUint,
    },
}

impl AffinePoint {
    /// The point at infinity.
    pub fn identity() -> Self {
        Self::Identity
    }

    /// Base point of the curve.
    pub fn generator() -> Self {
        let (gx, gy) = &SM2.generator;
        Self::Affine {
            x: gx.clone(),
            y: gy.clone(),
        }
    }

    /// Construct a point from coordinates, verifying the curve equation.
    ///
    /// `(0, 0)` is the conventional infinity sentinel and normalizes to
    /// [`AffinePoint::Identity`].
    pub fn new(x: BigUint, y: BigUint) -> Result<Self> {
        if !Self::is_on_curve(&x, &y) {
            return Err(Error::InvalidPoint { x, y });
        }
        Ok(Self::from_coordinates(x, y))
    }

    /// Construct a point from coordinates already known to satisfy the curve
    /// equation, skipping verification.
    pub(crate) fn from_coordinates(x: BigUint, y: BigUint) -> Self {
        if x.is_zero() && y.is_zero() {
            Self::Identity
        } else {
            Self::Affine { x, y }
        }
    }

    /// Whether `(x, y)` satisfies `y² = x³ + ax + b`, with `(0, 0)` accepted
    /// as the infinity sentinel.
    pub fn is_on_curve(x: &BigUint, y: &BigUint) -> bool {
        if x.is_zero() && y.is_zero() {
            return true;
        }
        let p = &SM2.modulus;
        if x.is_zero() || y.is_zero() || x >= p || y >= p {
            return false;
        }
        let rhs = ((x * x + &SM2.equation_a) * x + &SM2.equation_b) % p;
        (y * y) % p == rhs
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Finite coordinates, or `None` for the point at infinity.
    pub(crate) fn coordinates(&self) -> Option<(&BigUint, &BigUint)> {
        match self {
            Self::Identity => None,
            Self::Affine { x, y } => Some((x, y)),
        }
    }

    /// x-coordinate as fixed-width big-endian bytes (zero at infinity).
    pub fn x_bytes(&self) -> [u8; FIELD_BYTE_SIZE] {
        match self {
            Self::Identity => [0; FIELD_BYTE_SIZE],
            Self::Affine { x, .. } => to_fixed_bytes(x),
        }
    }

    /// y-coordinate as fixed-width big-endian bytes (zero at infinity).
    pub fn y_bytes(&self) -> [u8; FIELD_BYTE_SIZE] {
        match self {
            Self::Identity => [0; FIELD_BYTE_SIZE],
            Self::Affine { y, .. } => to_fixed_bytes(y),
        }
    }

    /// Recover the point with the given x-coordinate whose y-coordinate has
    /// the parity in `parity`'s low bit.
    pub fn decompress(x: &BigUint, parity: u8) -> Result<Self> {
        let p = &SM2.modulus;
        let rhs = ((x * x + &SM2.equation_a) * x + &SM2.equation_b) % p;
        let y = primefp::sqrt_mod(p, &rhs, parity)?;
        Self::new(x.clone(), y)
    }

    /// Serialize in SEC1 form.
    ///
    /// Infinity is the single byte `0x00`; compressed points are
    /// `(0x02 | y₀) || x`; uncompressed points are `0x04 || x || y`.
    pub fn encode(&self, compress: bool) -> Vec<u8> {
        let (x, y) = match self.coordinates() {
            None => return vec![0x00],
            Some(coordinates) => coordinates,
        };
        if compress {
            let mut out = Vec::with_capacity(1 + FIELD_BYTE_SIZE);
            out.push(0x02 | y.bit(0) as u8);
            out.extend_from_slice(&to_fixed_bytes(x));
            out
        } else {
            let mut out = Vec::with_capacity(1 + 2 * FIELD_BYTE_SIZE);
            out.push(0x04);
            out.extend_from_slice(&to_fixed_bytes(x));
            out.extend_from_slice(&to_fixed_bytes(y));
            out
        }
    }

    /// Parse a point from any of the encodings [`encode`](Self::encode)
    /// produces, plus the raw `x || y` form and the legacy `0x06`/`0x07`
    /// uncompressed prefixes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes == [0x00] {
            return Ok(Self::Identity);
        }
        if bytes.len() == 2 * FIELD_BYTE_SIZE {
            return Self::from_raw_coordinates(bytes);
        }
        if bytes.len() == FIELD_BYTE_SIZE + 1 && matches!(bytes[0], 0x02 | 0x03) {
            return Self::decompress(&BigUint::from_bytes_be(&bytes[1..]), bytes[0] & 1);
        }
        if bytes.len() == 2 * FIELD_BYTE_SIZE + 1 && matches!(bytes[0], 0x04 | 0x06 | 0x07) {
            return Self::from_raw_coordinates(&bytes[1..]);
        }
        Err(Error::InvalidEncoding)
    }

    fn from_raw_coordinates(coordinates: &[u8]) -> Result<Self> {
        let (x, y) = coordinates.split_at(FIELD_BYTE_SIZE);
        Self::new(BigUint::from_bytes_be(x), BigUint::from_bytes_be(y))
    }

    /// Scalar multiplication `[k]P`.
    ///
    /// `k` is reduced modulo the group order, then the accumulator walks the
    /// bits of `h = 3k` and `k` in lock-step (GB/T 32918.1 A.3.2,
    /// algorithm 2): one doubling per position, an addition of `P` where
    /// only `h` has a set bit and of `−P` where only `k` does.
    pub fn mul(&self, k: &BigUint) -> AffinePoint {
        let k = k % &SM2.order;
        if k.is_zero() || self.is_identity() {
            return AffinePoint::Identity;
        }
        let h = &k * 3u32;
        let base = ProjectivePoint::from(self);
        let base_neg = ProjectivePoint::from(&-self);
        let mut acc = base.clone();
        let top = h.bits() - 1;
        for i in (1..top).rev() {
            acc.double_assign();
            match (h.bit(i), k.bit(i)) {
                (true, false) => acc += &base,
                (false, true) => acc += &base_neg,
                _ => {}
            }
        }
        acc.to_affine()
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        match self {
            AffinePoint::Identity => AffinePoint::Identity,
            AffinePoint::Affine { x, y } => AffinePoint::Affine {
                x: x.clone(),
                y: &SM2.modulus - y,
            },
        }
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        -&self
    }
}

impl Add<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: &AffinePoint) -> AffinePoint {
        let p = &SM2.modulus;
        let ((x1, y1), (x2, y2)) = match (self.coordinates(), other.coordinates()) {
            (None, _) => return other.clone(),
            (_, None) => return self.clone(),
            (Some(lhs), Some(rhs)) => (lhs, rhs),
        };

        if x1 == x2 && ((y1 + y2) % p).is_zero() {
            return AffinePoint::Identity;
        }

        let slope = if x1 == x2 && y1 == y2 {
            let numerator = (x1 * x1 * 3u32 + &SM2.equation_a) % p;
            primefp::divide(p, &numerator, &(y1 * 2u32 % p))
        } else {
            let dy = (p + y2 - y1) % p;
            let dx = (p + x2 - x1) % p;
            primefp::divide(p, &dy, &dx)
        };

        let x3 = (&slope * &slope + p * 2u32 - x1 - x2) % p;
        let y3 = (slope * ((p + x1 - &x3) % p) + p - y1) % p;
        AffinePoint::from_coordinates(x3, y3)
    }
}

impl Add for AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: AffinePoint) -> AffinePoint {
        &self + &other
    }
}

impl Sub<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn sub(self, other: &AffinePoint) -> AffinePoint {
        self + &-other
    }
}

impl Sub for AffinePoint {
    type Output = AffinePoint;

    fn sub(self, other: AffinePoint) -> AffinePoint {
        &self - &other
    }
}

impl Mul<&BigUint> for &AffinePoint {
    type Output = AffinePoint;

    fn mul(self, k: &BigUint) -> AffinePoint {
        AffinePoint::mul(self, k)
    }
}
