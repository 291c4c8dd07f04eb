//! Variable-time reference implementations.
//!
//! These use hardware division and branch on the low part and the hint. They
//! are the correctness oracle for the constant-time engine and the known-leaky
//! fixture for timing analysis. **Never** use them on secret data.
//!
//! Inputs are signed, so the two implementations agree on `[0, i32::MAX]`.
//! `gamma2 == 0` divides by zero and panics.

use crate::Q;

/// Variable-time [`decompose`][crate::decompose] returning `(r1, r0)`.
#[inline(never)]
pub fn decompose_vartime(r: i32, gamma2: i32) -> (i32, i32) {
    let two_gamma2 = 2 * gamma2;

    let mut r1 = r / two_gamma2;
    let mut r0 = r % two_gamma2;

    if r0 > gamma2 {
        r0 -= two_gamma2;
        r1 += 1;
    }

    (r1, r0)
}

/// Variable-time [`use_hint`][crate::use_hint].
#[inline(never)]
pub fn use_hint_vartime(r: i32, hint: i32, gamma2: i32) -> i32 {
    let (r1, r0) = decompose_vartime(r, gamma2);
    let m = (Q as i32 - 1) / (2 * gamma2);

    if hint == 0 {
        return r1;
    }

    if r0 > 0 {
        (r1 + 1) % (m + 1)
    } else {
        (r1 - 1 + m + 1) % (m + 1)
    }
}
