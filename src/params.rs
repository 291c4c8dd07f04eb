//! Supported parameter sets and their precomputed reduction constants.

use crate::ConstChoice;
use subtle::CtOption;

/// The ML-DSA field modulus `q = 2^23 - 2^13 + 1`.
pub const Q: u32 = 8_380_417;

/// `gamma2 = (q - 1) / 32`, used by ML-DSA-65 and ML-DSA-87.
pub const GAMMA2_32: u32 = (Q - 1) / 32;

/// `gamma2 = (q - 1) / 88`, used by ML-DSA-44.
pub const GAMMA2_88: u32 = (Q - 1) / 88;

/// Reduction constants for one supported `gamma2`.
///
/// Rows are computed at compile time and selected at run time by equality
/// mask, so that no division by `2 * gamma2` ever happens on the hot path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundingParams {
    /// The low-part bound `gamma2`.
    pub gamma2: u32,

    /// The decomposition divisor `2 * gamma2`.
    pub two_gamma2: u32,

    /// Barrett multiplier `ceil(2^32 / (2 * gamma2))`.
    pub mu: u64,

    /// Largest high part of a reduced coefficient, `(q - 1) / (2 * gamma2)`.
    /// High parts live in `[0, m]` and [`use_hint`][crate::use_hint] wraps
    /// modulo `m + 1`.
    pub m: u32,
}

impl RoundingParams {
    /// Row produced by [`RoundingParams::lookup`] for an unsupported `gamma2`.
    pub const ZERO: Self = Self {
        gamma2: 0,
        two_gamma2: 0,
        mu: 0,
        m: 0,
    };

    /// Every supported parameter set.
    pub const SUPPORTED: [Self; 2] = [Self::precompute(GAMMA2_32), Self::precompute(GAMMA2_88)];

    /// Derive the row for `gamma2`. Only ever evaluated in `const` context.
    const fn precompute(gamma2: u32) -> Self {
        let two_gamma2 = 2 * gamma2;
        assert!((Q - 1) % two_gamma2 == 0, "2 * gamma2 must divide q - 1");

        // ceil(2^32 / d)
        let mu = ((1u64 << 32) + two_gamma2 as u64 - 1) / two_gamma2 as u64;

        // `mu * d - 2^32 < d` bounds the Barrett error to a single step for every `r < 2^32`
        assert!(mu * (two_gamma2 as u64) - (1u64 << 32) < two_gamma2 as u64);

        Self {
            gamma2,
            two_gamma2,
            mu,
            m: (Q - 1) / two_gamma2,
        }
    }

    /// Select the row for `gamma2` in constant time.
    ///
    /// Every row is read and blended into the result, so neither the control
    /// flow nor the memory access pattern depends on `gamma2`. An unsupported
    /// `gamma2` yields [`RoundingParams::ZERO`].
    #[inline]
    pub const fn lookup(gamma2: u32) -> Self {
        let mut ret = Self::ZERO;
        let mut i = 0;

        while i < Self::SUPPORTED.len() {
            let row = Self::SUPPORTED[i];
            let hit = ConstChoice::from_u32_eq(gamma2, row.gamma2);

            ret.gamma2 |= hit.if_true_u32(row.gamma2);
            ret.two_gamma2 |= hit.if_true_u32(row.two_gamma2);
            ret.mu = hit.select_u64(ret.mu, row.mu);
            ret.m |= hit.if_true_u32(row.m);

            i += 1;
        }

        ret
    }

    /// Is this a row of [`RoundingParams::SUPPORTED`]?
    #[inline]
    pub const fn is_supported(&self) -> ConstChoice {
        ConstChoice::from_u32_nonzero(self.two_gamma2)
    }
}

/// A validated `gamma2` parameter.
///
/// The free functions in this crate take a raw `u32` and leave unsupported
/// values unspecified; this wrapper is for callers that want the check done
/// once, up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gamma2(u32);

impl Gamma2 {
    /// `(q - 1) / 32`.
    pub const GAMMA2_32: Self = Self(GAMMA2_32);

    /// `(q - 1) / 88`.
    pub const GAMMA2_88: Self = Self(GAMMA2_88);

    /// Create a [`Gamma2`] from a raw value, checking in constant time that it
    /// is one of the supported parameter sets.
    pub fn new(gamma2: u32) -> CtOption<Self> {
        let is_supported = RoundingParams::lookup(gamma2).is_supported();

        // Use a supported value as a placeholder when `gamma2` is rejected
        let value = is_supported.select_u32(GAMMA2_32, gamma2);
        CtOption::new(Self(value), is_supported.into())
    }

    /// Returns the raw `gamma2` value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the reduction constants for this parameter.
    pub const fn params(self) -> RoundingParams {
        RoundingParams::lookup(self.0)
    }
}

impl From<Gamma2> for u32 {
    fn from(gamma2: Gamma2) -> Self {
        gamma2.0
    }
}

#[cfg(test)]
mod tests {
    use super::{GAMMA2_32, GAMMA2_88, Gamma2, Q, RoundingParams};

    #[test]
    fn gamma2_values() {
        assert_eq!(GAMMA2_32, 261888);
        assert_eq!(GAMMA2_88, 95232);
    }

    #[test]
    fn precomputed_rows() {
        let [a, b] = RoundingParams::SUPPORTED;

        assert_eq!(a.two_gamma2, 523776);
        assert_eq!(a.mu, 8201);
        assert_eq!(a.m, 16);

        assert_eq!(b.two_gamma2, 190464);
        assert_eq!(b.mu, 22551);
        assert_eq!(b.m, 44);
    }

    #[test]
    fn mu_is_ceiling_reciprocal() {
        for row in RoundingParams::SUPPORTED {
            let d = u64::from(row.two_gamma2);
            assert!(row.mu * d >= 1 << 32);
            assert!((row.mu - 1) * d < 1 << 32);
            assert_eq!(row.m * row.two_gamma2, Q - 1);
        }
    }

    #[test]
    fn lookup_supported() {
        assert_eq!(RoundingParams::lookup(GAMMA2_32), RoundingParams::SUPPORTED[0]);
        assert_eq!(RoundingParams::lookup(GAMMA2_88), RoundingParams::SUPPORTED[1]);
    }

    #[test]
    fn lookup_unsupported() {
        assert_eq!(RoundingParams::lookup(0), RoundingParams::ZERO);
        assert_eq!(RoundingParams::lookup(GAMMA2_32 + 1), RoundingParams::ZERO);
        assert!(!bool::from(RoundingParams::lookup(12345).is_supported()));
    }

    #[test]
    fn gamma2_new() {
        assert_eq!(Gamma2::new(GAMMA2_32).unwrap(), Gamma2::GAMMA2_32);
        assert_eq!(Gamma2::new(GAMMA2_88).unwrap(), Gamma2::GAMMA2_88);
        assert!(bool::from(Gamma2::new(1).is_none()));
        assert_eq!(Gamma2::GAMMA2_88.get(), 95232);
        assert_eq!(u32::from(Gamma2::GAMMA2_32), 261888);
    }
}
