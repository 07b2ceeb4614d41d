#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

mod error;
mod sqrt;

pub use crate::{error::NotASquare, sqrt::sqrt_mod};
pub use num_bigint;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Modular inverse of `a` modulo the prime `p`.
///
/// `a ∈ {0, 1}` is returned unchanged. When `gcd(a, p) ≠ 1` there is no
/// inverse and zero is returned; with a prime modulus and a reduced non-zero
/// argument this does not occur.
pub fn invert(p: &BigUint, a: &BigUint) -> BigUint {
    if a.is_zero() || a.is_one() {
        return a.clone();
    }

    let modulus = BigInt::from(p.clone());
    let gcd = BigInt::from(a.clone()).extended_gcd(&modulus);
    if !gcd.gcd.is_one() {
        return BigUint::zero();
    }

    gcd.x
        .mod_floor(&modulus)
        .to_biguint()
        .expect("residue mod p is non-negative")
}

/// Modular division `a / b` modulo the prime `p`.
pub fn divide(p: &BigUint, a: &BigUint, b: &BigUint) -> BigUint {
    a * invert(p, b) % p
}

/// Modular exponentiation `a^e` modulo `p`, by left-to-right
/// square-and-multiply.
///
/// `a ∈ {0, 1}` is returned unchanged without touching the exponent.
pub fn pow_mod(p: &BigUint, a: &BigUint, e: &BigUint) -> BigUint {
    if a.is_zero() || a.is_one() {
        return a.clone();
    }
    a.modpow(e, p)
}

/// Legendre (Jacobi) symbol of `a` modulo the odd prime `p`, computed by
/// quadratic reciprocity.
///
/// Returns 1 for quadratic residues, −1 for non-residues and 0 when `p`
/// divides `a`.
pub fn legendre(p: &BigUint, a: &BigUint) -> i32 {
    let mut num = a.clone();
    let mut den = p.clone();
    let mut result = 1;

    while !num.is_one() {
        if num.is_zero() {
            return 0;
        }
        let twos = num.trailing_zeros().unwrap_or(0);
        if twos == 0 {
            // Both odd here: reciprocity flips the sign when both are
            // 3 (mod 4).
            if num.bit(1) && den.bit(1) {
                result = -result;
            }
            let rem = &den % &num;
            den = core::mem::replace(&mut num, rem);
        } else {
            num >>= twos;
            // (2/p) = −1 exactly when p ≡ ±3 (mod 8).
            if twos & 1 == 1 && (den.bit(1) ^ den.bit(2)) {
                result = -result;
            }
        }
    }

    result
}

/// Whether `a` is a square modulo the odd prime `p`.
///
/// 0 and 1 are squares; everything else goes through [`legendre`].
pub fn is_square(p: &BigUint, a: &BigUint) -> bool {
    a.is_zero() || a.is_one() || legendre(p, a) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Base field prime of the SM2 recommended curve, `p ≡ 3 (mod 4)`.
    const SM2_PRIME_HEX: &str =
        "fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff";

    fn sm2_prime() -> BigUint {
        BigUint::parse_bytes(SM2_PRIME_HEX.as_bytes(), 16).unwrap()
    }

    #[test]
    fn invert_fixed_points() {
        let p = sm2_prime();
        assert_eq!(invert(&p, &BigUint::zero()), BigUint::zero());
        assert_eq!(invert(&p, &BigUint::one()), BigUint::one());
    }

    #[test]
    fn invert_non_coprime_is_zero() {
        let n = BigUint::from(12u32);
        assert_eq!(invert(&n, &BigUint::from(8u32)), BigUint::zero());
    }

    #[test]
    fn divide_round_trips() {
        let p = BigUint::from(101u32);
        let a = BigUint::from(37u32);
        let b = BigUint::from(59u32);
        let q = divide(&p, &a, &b);
        assert_eq!((q * b) % p, a);
    }

    #[test]
    fn legendre_small_prime() {
        let p = BigUint::from(17u32);
        // Squares mod 17: {1, 2, 4, 8, 9, 13, 15, 16}.
        for square in [1u32, 2, 4, 8, 9, 13, 15, 16] {
            assert_eq!(legendre(&p, &BigUint::from(square)), 1, "{square}");
        }
        for nonsquare in [3u32, 5, 6, 7, 10, 11, 12, 14] {
            assert_eq!(legendre(&p, &BigUint::from(nonsquare)), -1, "{nonsquare}");
        }
        assert_eq!(legendre(&p, &BigUint::zero()), 0);
        assert_eq!(legendre(&p, &(p.clone() * 3u32)), 0);
    }

    proptest! {
        #[test]
        fn invert_is_inverse(bytes in any::<[u8; 32]>()) {
            let p = sm2_prime();
            let a = BigUint::from_bytes_be(&bytes) % &p;
            prop_assume!(!a.is_zero());
            let inv = invert(&p, &a);
            prop_assert_eq!((a * inv) % p, BigUint::one());
        }

        #[test]
        fn pow_mod_matches_repeated_multiplication(a in 2u64..1000, e in 0u32..24) {
            let p = sm2_prime();
            let a = BigUint::from(a);
            let mut expected = BigUint::one();
            for _ in 0..e {
                expected = expected * &a % &p;
            }
            prop_assert_eq!(pow_mod(&p, &a, &BigUint::from(e)), expected);
        }

        #[test]
        fn legendre_of_squares(bytes in any::<[u8; 32]>()) {
            let p = sm2_prime();
            let a = BigUint::from_bytes_be(&bytes) % &p;
            prop_assume!(!a.is_zero() && !a.is_one());
            let square = &a * &a % &p;
            prop_assert!(is_square(&p, &square));
        }
    }
}
