//! Random number generator support

use crate::{ConstChoice, Q};
use rand_core::{CryptoRng, RngCore};

/// Mask down to the bit length of `Q`.
const COEFFICIENT_MASK: u32 = (1 << (u32::BITS - Q.leading_zeros())) - 1;

/// Sample a uniformly random coefficient in `[0, q)`.
///
/// Rejection sampling: the number of draws depends on the RNG output, never on
/// anything the caller passes in.
#[cfg_attr(docsrs, doc(cfg(feature = "rand_core")))]
pub fn random_coefficient<R: CryptoRng + RngCore + ?Sized>(rng: &mut R) -> u32 {
    loop {
        let candidate = rng.next_u32() & COEFFICIENT_MASK;
        if ConstChoice::from_u32_lt(candidate, Q).into() {
            return candidate;
        }
    }
}
