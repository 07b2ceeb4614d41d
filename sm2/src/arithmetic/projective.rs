//! Projective curve points.

use crate::{arithmetic::AffinePoint, SM2};
use core::ops::AddAssign;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Point on the SM2 curve in standard projective coordinates.
///
/// `(X, Y, Z)` with `Z ≠ 0` represents the affine point `(X/Z, Y/Z)`;
/// `Z = 0` or `X = Y = 0` represents the point at infinity. This is the
/// working representation inside scalar multiplication and the basepoint
/// tables; it never crosses the crate's API boundary.
#[derive(Clone, Debug)]
pub struct ProjectivePoint {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl ProjectivePoint {
    /// The point at infinity.
    pub fn identity() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::zero(),
            z: BigUint::one(),
        }
    }

    /// Base point of the curve.
    pub fn generator() -> Self {
        Self::from(&AffinePoint::generator())
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero() || (self.x.is_zero() && self.y.is_zero())
    }

    /// Convert to affine coordinates by dividing through `Z`.
    pub fn to_affine(&self) -> AffinePoint {
        if self.is_identity() {
            return AffinePoint::Identity;
        }
        let p = &SM2.modulus;
        let z_inv = primefp::invert(p, &self.z);
        AffinePoint::from_coordinates(&self.x * &z_inv % p, &self.y * &z_inv % p)
    }

    /// Multiply the curve's base point by `k` through the shared
    /// precomputed table.
    pub fn mul_by_generator(k: &BigUint) -> AffinePoint {
        super::table::GENERATOR_TABLE.mul(k)
    }

    /// In-place point doubling with the standard projective formulas.
    pub fn double_assign(&mut self) {
        let p = &SM2.modulus;
        let t1 = (&self.x * &self.x * 3u32 + &SM2.equation_a * &self.z % p * &self.z) % p;
        let t2 = (&self.y * &self.z * 2u32) % p;
        let t3 = (&self.y * &self.y) % p;
        let t4 = (&t3 * &self.x % p) * &self.z % p;
        let t5 = (&t2 * &t2) % p;
        let t6 = (&t1 * &t1 + p * 8u32 - &t4 * 8u32) % p;
        let x3 = (&t2 * &t6) % p;
        let y3 = {
            let u = (&t4 * 4u32 + p - &t6) % p * &t1 % p;
            let v = (&t3 * &t5 * 2u32) % p;
            (u + p - v) % p
        };
        let z3 = (&t2 * &t5) % p;
        self.x = x3;
        self.y = y3;
        self.z = z3;
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(point: &AffinePoint) -> Self {
        match point.coordinates() {
            None => Self::identity(),
            Some((x, y)) => Self {
                x: x.clone(),
                y: y.clone(),
                z: BigUint::one(),
            },
        }
    }
}

impl From<AffinePoint> for ProjectivePoint {
    fn from(point: AffinePoint) -> Self {
        Self::from(&point)
    }
}

/// In-place projective addition.
///
/// Either operand at infinity short-circuits to the other; the formulas
/// assume distinct finite inputs, which every caller in this crate
/// guarantees (doubling goes through [`ProjectivePoint::double_assign`]).
impl AddAssign<&ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, other: &ProjectivePoint) {
        if self.is_identity() {
            self.x = other.x.clone();
            self.y = other.y.clone();
            self.z = other.z.clone();
            return;
        }
        if other.is_identity() {
            return;
        }

        let p = &SM2.modulus;
        let t1 = (&self.x * &other.z) % p;
        let t2 = (&other.x * &self.z) % p;
        let t3 = (&t1 + p - &t2) % p;
        let t2 = (&t1 + &t2) % p;
        let t4 = (&self.y * &other.z) % p;
        let t5 = (&t4 + p - &other.y * &self.z % p) % p;
        let t6 = (&self.z * &other.z) % p;
        let t7 = (&t3 * &t3) % p;
        let t8 = (&t3 * &t7) % p;
        let t9 = (&t6 * &t5 % p * &t5 + p - &t2 * &t7 % p) % p;
        let x3 = (&t3 * &t9) % p;
        let y3 = {
            let u = (&t7 * &t1 + p - &t9) % p;
            let v = (&t4 * &t8) % p;
            (&t5 * &u + p - v) % p
        };
        let z3 = (&t8 * &t6) % p;
        self.x = x3;
        self.y = y3;
        self.z = z3;
    }
}
