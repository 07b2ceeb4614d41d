//! Precomputed multiples of fixed base points.

use crate::{
    arithmetic::{AffinePoint, ProjectivePoint},
    SM2,
};
use num_bigint::BigUint;
use std::sync::LazyLock;

/// Number of byte-sized windows in a 256-bit scalar.
const WINDOWS: usize = 32;

/// Entries per window: one per value of the corresponding scalar byte.
const WINDOW_SIZE: usize = 256;

/// Precomputed multiplication table for a fixed base point.
///
/// `windows[i][j]` holds `(j · 256^i) · base`, so multiplying the base point
/// by an arbitrary scalar costs one projective addition per scalar byte.
/// The table is immutable once built and safe to share across threads.
pub struct BasePointTable {
    windows: Vec<Vec<ProjectivePoint>>,
}

impl BasePointTable {
    /// Build the table for a base point.
    ///
    /// Each window starts from the running point left by the previous
    /// window's doubling chain: eight successive doublings produce the
    /// points `2^b · 256^i · base`, and every window entry is the subset sum
    /// of those selected by the bits of its index.
    pub fn new(base: &AffinePoint) -> Self {
        let mut running = ProjectivePoint::from(base);
        let mut windows = Vec::with_capacity(WINDOWS);
        for _ in 0..WINDOWS {
            let mut doublings = Vec::with_capacity(8);
            for _ in 0..8 {
                doublings.push(running.clone());
                running.double_assign();
            }
            let mut entries = Vec::with_capacity(WINDOW_SIZE);
            for index in 0..WINDOW_SIZE {
                let mut sum = ProjectivePoint::identity();
                for (bit, point) in doublings.iter().enumerate() {
                    if index >> bit & 1 == 1 {
                        sum += point;
                    }
                }
                entries.push(sum);
            }
            windows.push(entries);
        }
        Self { windows }
    }

    /// Multiply the table's base point by `k`.
    pub fn mul(&self, k: &BigUint) -> AffinePoint {
        self.mul_projective(k).to_affine()
    }

    /// As [`mul`](Self::mul), without the final affine conversion, for
    /// callers that keep accumulating.
    pub(crate) fn mul_projective(&self, k: &BigUint) -> ProjectivePoint {
        let k = k % &SM2.order;
        let bytes = k.to_bytes_le();
        let mut acc = ProjectivePoint::identity();
        for (window, entries) in self.windows.iter().enumerate() {
            let byte = bytes.get(window).copied().unwrap_or(0);
            acc += &entries[byte as usize];
        }
        acc
    }
}

/// Table for the curve generator, built on first use and shared
/// process-wide.
pub(crate) static GENERATOR_TABLE: LazyLock<BasePointTable> =
    LazyLock::new(|| BasePointTable::new(&AffinePoint::generator()));
