#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod der;
pub mod dsa;
pub mod pke;

mod arithmetic;
mod distid;
mod error;
mod public_key;
mod secret_key;

pub use crate::{
    arithmetic::{AffinePoint, BasePointTable},
    distid::DEFAULT_DIST_ID,
    error::{Error, Result},
    public_key::PublicKey,
    secret_key::SecretKey,
};
pub use num_bigint::{self, BigUint};
pub use primefp;

use std::sync::LazyLock;

/// Prime modulus of SM2's base field serialized as hexadecimal.
const MODULUS_HEX: &str = "fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff";

/// Coefficient `a` of the curve equation serialized as hexadecimal.
const EQUATION_A_HEX: &str = "fffffffeffffffffffffffffffffffffffffffff00000000fffffffffffffffc";

/// Coefficient `b` of the curve equation serialized as hexadecimal.
const EQUATION_B_HEX: &str = "28e9fa9e9d9f5e344d5a9e4bcf6509a7f39789f515ab8f92ddbcbd414d940e93";

/// Order of SM2's elliptic curve group (i.e. scalar modulus) serialized as
/// hexadecimal.
const ORDER_HEX: &str = "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123";

/// x-coordinate of the base point serialized as hexadecimal.
const GENERATOR_X_HEX: &str = "32c4ae2c1f1981195f9904466a39c9948fe30bbff2660be1715a4589334c74c7";

/// y-coordinate of the base point serialized as hexadecimal.
const GENERATOR_Y_HEX: &str = "bc3736a2f4f6779c59bdcee36b692153d0a9877cc62a474002df32e52139f0a0";

/// Number of bytes in a serialized field element or point coordinate.
pub const FIELD_BYTE_SIZE: usize = 32;

/// Parameters of a short Weierstrass curve `y² = x³ + ax + b` over a prime
/// field.
#[derive(Clone, Debug)]
pub struct CurveParams {
    /// Prime modulus of the base field.
    pub modulus: BigUint,

    /// Coefficient `a` of the curve equation.
    pub equation_a: BigUint,

    /// Coefficient `b` of the curve equation.
    pub equation_b: BigUint,

    /// Order of the group generated by the base point.
    pub order: BigUint,

    /// Base point's affine coordinates: (x, y).
    pub generator: (BigUint, BigUint),
}

/// Parameters of the GB/T 32918 recommended curve, initialized on first use
/// and shared process-wide.
pub static SM2: LazyLock<CurveParams> = LazyLock::new(|| CurveParams {
    modulus: biguint_from_hex(MODULUS_HEX),
    equation_a: biguint_from_hex(EQUATION_A_HEX),
    equation_b: biguint_from_hex(EQUATION_B_HEX),
    order: biguint_from_hex(ORDER_HEX),
    generator: (
        biguint_from_hex(GENERATOR_X_HEX),
        biguint_from_hex(GENERATOR_Y_HEX),
    ),
});

fn biguint_from_hex(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).expect("valid hex constant")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_parse() {
        assert_eq!(SM2.modulus.bits(), 256);
        assert_eq!(SM2.order.bits(), 256);
        assert!(SM2.order < SM2.modulus);
    }

    #[test]
    fn generator_satisfies_curve_equation() {
        let (x, y) = &SM2.generator;
        assert!(AffinePoint::is_on_curve(x, y));
    }

    #[test]
    fn modulus_is_three_mod_four() {
        // The compressed-point decoder relies on the single-exponentiation
        // square root branch.
        assert!(SM2.modulus.bit(0) && SM2.modulus.bit(1));
    }
}
