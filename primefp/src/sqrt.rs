//! Modular square root implementations, adapted from <https://eprint.iacr.org/2012/685.pdf>.

use crate::{invert, is_square, pow_mod, NotASquare};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
};

/// Square root algorithms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Algorithm {
    /// Atkins algorithm for `p ≡ 5 (mod 8)`.
    Atkins,

    /// Shanks algorithm for `p ≡ 3 (mod 4)`.
    Shanks,

    /// Tonelli-Shanks algorithm for any odd prime.
    TonelliShanks,
}

impl Algorithm {
    /// Determine the best algorithm to use with a particular modulus.
    fn for_modulus(p: &BigUint) -> Self {
        if (p % 4u32).to_u8() == Some(3) {
            Self::Shanks
        } else if (p % 8u32).to_u8() == Some(5) {
            Self::Atkins
        } else {
            Self::TonelliShanks
        }
    }
}

/// `2^((p−1)/4) mod p` for each `p ≡ 5 (mod 8)` seen so far.
static TWO_POW_QUARTER: LazyLock<Mutex<HashMap<BigUint, BigUint>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Factorization `p − 1 = s·2^t` with `s` odd, for each `p` seen so far.
static ODD_FACTORS: LazyLock<Mutex<HashMap<BigUint, (BigUint, u64)>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Square root of `a` modulo the odd prime `p`.
///
/// The returned root `r` satisfies `r² ≡ a (mod p)` and `r & 1 == parity & 1`
/// (the other root is `p − r`, of opposite parity). `a ∈ {0, 1}` is returned
/// unchanged. Fails with [`NotASquare`] when `a` is not a quadratic residue.
pub fn sqrt_mod(p: &BigUint, a: &BigUint, parity: u8) -> Result<BigUint, NotASquare> {
    if a.is_zero() || a.is_one() {
        return Ok(a.clone());
    }
    match Algorithm::for_modulus(p) {
        Algorithm::Atkins => sqrt_atkins(p, a, parity),
        Algorithm::Shanks => sqrt_shanks(p, a, parity),
        Algorithm::TonelliShanks => sqrt_tonelli_shanks(p, a, parity),
    }
}

/// Shanks algorithm for `p ≡ 3 (mod 4)`: a single exponentiation by
/// `(p + 1)/4`.
fn sqrt_shanks(p: &BigUint, a: &BigUint, parity: u8) -> Result<BigUint, NotASquare> {
    let exponent = (p >> 2u32) + 1u32;
    let root = pow_mod(p, a, &exponent);
    if (&root * &root) % p == *a {
        return Ok(with_parity(p, root, parity));
    }
    Err(NotASquare)
}

/// Atkins algorithm for `p ≡ 5 (mod 8)`: exponentiation by `(p + 3)/8`,
/// corrected by the fourth root of unity `2^((p−1)/4)` when the candidate
/// squares to `−a`.
fn sqrt_atkins(p: &BigUint, a: &BigUint, parity: u8) -> Result<BigUint, NotASquare> {
    let exponent = (p >> 3u32) + 1u32;
    let root = pow_mod(p, a, &exponent);
    let square = (&root * &root) % p;
    if square == *a {
        return Ok(with_parity(p, root, parity));
    }
    if square == p - a {
        let unity = {
            let mut cache = TWO_POW_QUARTER.lock().expect("cache lock poisoned");
            cache
                .entry(p.clone())
                .or_insert_with(|| pow_mod(p, &BigUint::from(2u32), &(p >> 2u32)))
                .clone()
        };
        return Ok(with_parity(p, root * unity % p, parity));
    }
    Err(NotASquare)
}

/// Tonelli-Shanks works for every odd prime.
fn sqrt_tonelli_shanks(p: &BigUint, a: &BigUint, parity: u8) -> Result<BigUint, NotASquare> {
    let (s, t) = odd_factor(p);

    // Smallest quadratic non-residue; found quickly in practice.
    let mut c = BigUint::from(2u32);
    while is_square(p, &c) {
        c += 1u32;
    }

    let inverse = invert(p, a);
    let mut root = pow_mod(p, a, &((&s + 1u32) >> 1u32));
    let mut correction = pow_mod(p, &c, &s);
    let mut exponent = BigUint::one() << (t - 1);
    let mut rounds = t - 1;
    while rounds > 0 {
        exponent >>= 1;
        let check = (&inverse * &root % p) * &root % p;
        if !pow_mod(p, &check, &exponent).is_one() {
            root = root * &correction % p;
        }
        rounds -= 1;
        if rounds > 0 {
            correction = (&correction * &correction) % p;
        }
    }

    if (&root * &root) % p == *a {
        Ok(with_parity(p, root, parity))
    } else {
        Err(NotASquare)
    }
}

/// Factor `p − 1 = s·2^t`, memoized per prime.
fn odd_factor(p: &BigUint) -> (BigUint, u64) {
    let mut cache = ODD_FACTORS.lock().expect("cache lock poisoned");
    cache
        .entry(p.clone())
        .or_insert_with(|| {
            let even = p - 1u32;
            let t = even.trailing_zeros().unwrap_or(0);
            (even >> t, t)
        })
        .clone()
}

/// Select the root whose low bit matches `parity`.
fn with_parity(p: &BigUint, root: BigUint, parity: u8) -> BigUint {
    if root.bit(0) == (parity & 1 == 1) {
        root
    } else {
        p - root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Check the fundamental property for small perfect squares.
    fn sqrt_test(p: &BigUint) {
        for n in [1u64, 4, 9, 16, 25, 36, 49, 64] {
            let a = BigUint::from(n) % p;
            for parity in [0, 1] {
                let root = sqrt_mod(p, &a, parity).unwrap();
                assert_eq!((&root * &root) % p, a, "sqrt of {n} mod {p}");
                if !a.is_zero() && !a.is_one() {
                    assert_eq!(root.bit(0), parity == 1, "parity of sqrt({n})");
                }
            }
        }
    }

    #[test]
    fn shanks() {
        // SM2 base field, p ≡ 3 (mod 4).
        let p = BigUint::parse_bytes(
            b"fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff",
            16,
        )
        .unwrap();
        assert_eq!(Algorithm::for_modulus(&p), Algorithm::Shanks);
        sqrt_test(&p);
    }

    #[test]
    fn atkins() {
        // brainpoolP384 scalar field, p ≡ 5 (mod 8).
        let p = BigUint::parse_bytes(
            b"8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b31f166e6cac0425a7cf3ab6af6b7fc3103b883202e9046565",
            16,
        )
        .unwrap();
        assert_eq!(Algorithm::for_modulus(&p), Algorithm::Atkins);
        sqrt_test(&p);
    }

    #[test]
    fn tonelli_shanks() {
        // P-192 scalar field, p ≡ 1 (mod 8).
        let p = BigUint::parse_bytes(b"ffffffffffffffffffffffff99def836146bc9b1b4d22831", 16)
            .unwrap();
        assert_eq!(Algorithm::for_modulus(&p), Algorithm::TonelliShanks);
        sqrt_test(&p);
    }

    #[test]
    fn tonelli_shanks_small_prime() {
        let p = BigUint::from(41u32);
        assert_eq!(Algorithm::for_modulus(&p), Algorithm::TonelliShanks);
        for a in 2u32..41 {
            let a = BigUint::from(a);
            match sqrt_mod(&p, &a, 0) {
                Ok(root) => {
                    assert!(is_square(&p, &a));
                    assert_eq!((&root * &root) % &p, a);
                }
                Err(NotASquare) => assert!(!is_square(&p, &a)),
            }
        }
    }

    #[test]
    fn non_residue_fails() {
        let p = BigUint::parse_bytes(
            b"fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff",
            16,
        )
        .unwrap();
        let mut hit = false;
        for a in 2u32..20 {
            let a = BigUint::from(a);
            if !is_square(&p, &a) {
                assert_eq!(sqrt_mod(&p, &a, 0), Err(NotASquare));
                hit = true;
            }
        }
        assert!(hit, "expected at least one non-residue below 20");
    }

    #[test]
    fn fixed_points() {
        let p = BigUint::from(13u32);
        assert_eq!(sqrt_mod(&p, &BigUint::zero(), 1), Ok(BigUint::zero()));
        assert_eq!(sqrt_mod(&p, &BigUint::one(), 0), Ok(BigUint::one()));
    }
}
