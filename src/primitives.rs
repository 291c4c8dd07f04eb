//! Branchless boolean and selection primitives over `u32`.
//!
//! Predicates return `0` or `1` rather than `bool` so that callers can feed
//! them straight back into arithmetic. Every function here is built from
//! bitwise operators and wrapping arithmetic only: there is no comparison
//! operator, no `if`, and no table lookup whose address depends on an input.

/// Returns `1` if `x != 0` and `0` otherwise.
///
/// The most significant bit of `x | -x` is set iff `x` is nonzero.
#[inline]
#[must_use]
pub const fn is_nonzero(x: u32) -> u32 {
    (x | x.wrapping_neg()) >> (u32::BITS - 1)
}

/// Returns `1` if `x == 0` and `0` otherwise.
#[inline]
#[must_use]
pub const fn is_zero(x: u32) -> u32 {
    1 ^ is_nonzero(x)
}

/// Returns `1` if `x < y` (unsigned) and `0` otherwise.
#[inline]
#[must_use]
pub const fn less_than(x: u32, y: u32) -> u32 {
    // See "Hacker's Delight" 2nd ed, section 2-12 (Comparison predicates)
    (x ^ ((x ^ y) | (x.wrapping_sub(y) ^ y))) >> (u32::BITS - 1)
}

/// Returns `1` if `x > y` (unsigned) and `0` otherwise.
#[inline]
#[must_use]
pub const fn greater_than(x: u32, y: u32) -> u32 {
    less_than(y, x)
}

/// Create a `u32` bitmask from a truth value.
///
/// # Returns
/// - `0` if `bit == 0`
/// - `u32::MAX` otherwise
#[inline]
#[must_use]
pub const fn mask(bit: u32) -> u32 {
    is_nonzero(bit).wrapping_neg()
}

/// Return `x` if `bit != 0`, otherwise return `y`.
#[inline]
#[must_use]
pub const fn select(x: u32, y: u32, bit: u32) -> u32 {
    let m = mask(bit);
    (x & m) | (y & !m)
}

/// Signed variant of [`select`]: the same blend over the two's complement bit
/// patterns of `x` and `y`.
#[inline]
#[must_use]
pub const fn select_signed(x: i32, y: i32, bit: u32) -> i32 {
    select(x as u32, y as u32, bit) as i32
}
