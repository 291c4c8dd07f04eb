//! Constant-time `Decompose` and `UseHint`.
//!
//! Both operations are division-free: the quotient by `2 * gamma2` is a
//! Barrett estimate `(r * mu) >> 32` with `mu = ceil(2^32 / (2 * gamma2))`.
//! For `r < 2^32` that estimate is either exact or one too large, and the
//! correction, the centering and the hint logic all run as predicate, mask,
//! blend sequences with no data-dependent branch.

use crate::{ConstChoice, Gamma2, Q, RoundingParams};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A coefficient split into a high part and a centered low part.
///
/// For `(r1, r0) = decompose(r, gamma2)`:
/// `r == r1 * 2 * gamma2 + r0` and `-gamma2 < r0 <= gamma2`.
#[derive(Clone, Copy, Debug, Default, Eq)]
pub struct Decomposition {
    /// High part: `r` divided by `2 * gamma2`, rounded to nearest with ties
    /// going down.
    pub r1: u32,

    /// Low part, in `(-gamma2, gamma2]`.
    pub r0: i32,
}

impl Decomposition {
    /// Recombine the two parts: `r1 * 2 * gamma2 + r0`, wrapping modulo `2^32`.
    pub const fn recompose(&self, gamma2: u32) -> u32 {
        self.r1
            .wrapping_mul(gamma2.wrapping_mul(2))
            .wrapping_add(self.r0 as u32)
    }
}

impl ConstantTimeEq for Decomposition {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        ConstChoice::from_u32_eq(self.r1, other.r1)
            .and(ConstChoice::from_u32_eq(self.r0 as u32, other.r0 as u32))
            .into()
    }
}

impl ConditionallySelectable for Decomposition {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let choice = ConstChoice::from(choice);
        Self {
            r1: choice.select_u32(a.r1, b.r1),
            r0: choice.select_i32(a.r0, b.r0),
        }
    }
}

impl PartialEq for Decomposition {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Decomposition {}

/// Split `r` into `(r1, r0)` with `r == r1 * 2 * gamma2 + r0` and
/// `-gamma2 < r0 <= gamma2`.
///
/// Defined for every `u32` input, not only reduced coefficients. `gamma2`
/// must be [`GAMMA2_32`][crate::GAMMA2_32] or [`GAMMA2_88`][crate::GAMMA2_88];
/// the result for any other value is unspecified.
///
/// Kept out of line so the compiled body can be inspected as a unit.
#[inline(never)]
pub const fn decompose(r: u32, gamma2: u32) -> Decomposition {
    decompose_with(r, &RoundingParams::lookup(gamma2))
}

/// [`decompose`] with the parameter row already selected.
#[inline]
const fn decompose_with(r: u32, params: &RoundingParams) -> Decomposition {
    let two_gamma2 = params.two_gamma2;

    // r * mu < 2^32 * 2^15, no overflow
    let mut q = ((r as u64 * params.mu) >> 32) as u32;

    // True remainder lies in [-two_gamma2, two_gamma2), so its two's
    // complement bit pattern is exact even though the product may wrap.
    let mut r0 = r.wrapping_sub(q.wrapping_mul(two_gamma2));

    // Quotient one too large: remainder is negative.
    let over = ConstChoice::from_u32_msb(r0);
    r0 = over.select_u32(r0, r0.wrapping_add(two_gamma2));
    q = q.wrapping_sub(over.to_u32());

    // Quotient one too small. Unreachable with a ceiling `mu`, kept so a
    // floor multiplier in the table still gives exact results.
    let under = ConstChoice::from_u32_le(two_gamma2, r0);
    r0 = under.select_u32(r0, r0.wrapping_sub(two_gamma2));
    q = q.wrapping_add(under.to_u32());

    // Center: r0 in (gamma2, 2 * gamma2) moves to (-gamma2, 0)
    let center = ConstChoice::from_u32_gt(r0, params.gamma2);
    r0 = center.select_u32(r0, r0.wrapping_sub(two_gamma2));
    q = q.wrapping_add(center.to_u32());

    Decomposition {
        r1: q,
        r0: r0 as i32,
    }
}

/// `HighBits(r)`: the `r1` half of [`decompose`].
#[inline]
pub const fn high_bits(r: u32, gamma2: u32) -> u32 {
    decompose(r, gamma2).r1
}

/// `LowBits(r)`: the `r0` half of [`decompose`].
#[inline]
pub const fn low_bits(r: u32, gamma2: u32) -> i32 {
    decompose(r, gamma2).r0
}

/// Recover the high part of `r` adjusted by a one-bit `hint`.
///
/// With `hint == 0` this is `high_bits(r, gamma2)`. Otherwise the high part
/// steps by one modulo `m + 1` (see [`RoundingParams::m`]): up if the low part
/// is strictly positive, down if it is zero or negative. Neither the hint nor
/// the sign of the low part affects which instructions run.
///
/// `r` must be a reduced coefficient in `[0, q)`. The result for `r >= q` is
/// unspecified and may exceed `m`; debug builds panic on such input.
#[inline(never)]
pub const fn use_hint(r: u32, hint: u32, gamma2: u32) -> u32 {
    use_hint_with(r, hint, &RoundingParams::lookup(gamma2))
}

#[inline]
const fn use_hint_with(r: u32, hint: u32, params: &RoundingParams) -> u32 {
    debug_assert!(r < Q, "coefficient not reduced modulo q");

    let Decomposition { r1, r0 } = decompose_with(r, params);
    let m = params.m;
    let modulus = m.wrapping_add(1);

    let r1_inc = reduce_once(r1.wrapping_add(1), modulus);
    let r1_dec = reduce_once(r1.wrapping_add(m), modulus);

    let adjusted = ConstChoice::from_i32_positive(r0).select_u32(r1_dec, r1_inc);
    ConstChoice::from_u32_nonzero(hint).select_u32(r1, adjusted)
}

/// Subtract `modulus` from `x` if `x >= modulus`.
#[inline]
const fn reduce_once(x: u32, modulus: u32) -> u32 {
    ConstChoice::from_u32_le(modulus, x).select_u32(x, x.wrapping_sub(modulus))
}

/// Apply [`decompose`] to every coefficient of `coeffs`, writing the high
/// parts to `r1` and the low parts to `r0`.
///
/// # Panics
/// If the three slices differ in length.
pub fn decompose_slice(coeffs: &[u32], gamma2: u32, r1: &mut [u32], r0: &mut [i32]) {
    assert_eq!(coeffs.len(), r1.len(), "output length mismatch");
    assert_eq!(coeffs.len(), r0.len(), "output length mismatch");

    let params = RoundingParams::lookup(gamma2);
    for ((r, hi), lo) in coeffs.iter().zip(r1.iter_mut()).zip(r0.iter_mut()) {
        let d = decompose_with(*r, &params);
        *hi = d.r1;
        *lo = d.r0;
    }
}

/// Apply [`use_hint`] coefficient-wise, writing the corrected high parts to
/// `out`.
///
/// # Panics
/// If the three slices differ in length. Debug builds also panic on a
/// coefficient outside `[0, q)`.
pub fn use_hint_slice(coeffs: &[u32], hints: &[u32], gamma2: u32, out: &mut [u32]) {
    assert_eq!(coeffs.len(), hints.len(), "hint length mismatch");
    assert_eq!(coeffs.len(), out.len(), "output length mismatch");

    let params = RoundingParams::lookup(gamma2);
    for ((r, h), o) in coeffs.iter().zip(hints).zip(out.iter_mut()) {
        *o = use_hint_with(*r, *h, &params);
    }
}

impl Gamma2 {
    /// [`decompose`] under this parameter.
    pub const fn decompose(self, r: u32) -> Decomposition {
        decompose_with(r, &self.params())
    }

    /// [`use_hint`] under this parameter.
    pub const fn use_hint(self, r: u32, hint: u32) -> u32 {
        use_hint_with(r, hint, &self.params())
    }
}
