//! Common functionality shared between tests.

// Different tests may use only a subset of the available functionality
#![allow(dead_code)]

use ct_decompose::{Decomposition, GAMMA2_32, GAMMA2_88};
use num_bigint::BigInt;

/// Both supported `gamma2` values.
pub const GAMMA2: [u32; 2] = [GAMMA2_32, GAMMA2_88];

/// `r1 * 2 * gamma2 + r0` evaluated without any wraparound.
pub fn recompose_exact(d: &Decomposition, gamma2: u32) -> BigInt {
    BigInt::from(d.r1) * BigInt::from(2 * u64::from(gamma2)) + BigInt::from(d.r0)
}

/// Checks the decomposition identity and the centered range of `r0`.
pub fn assert_decomposition(r: u32, gamma2: u32, d: &Decomposition) {
    assert_eq!(
        recompose_exact(d, gamma2),
        BigInt::from(r),
        "identity failed for r = {r}, gamma2 = {gamma2}: {d:?}"
    );
    assert!(
        -(gamma2 as i64) < i64::from(d.r0) && i64::from(d.r0) <= i64::from(gamma2),
        "r0 out of range for r = {r}, gamma2 = {gamma2}: {d:?}"
    );
}
