use subtle::Choice;

use crate::primitives;

/// A boolean value returned by constant-time `const fn`s.
///
/// Internally a `u32` mask which is either `0` or `u32::MAX`, so that
/// selection is a single AND/OR blend.
///
/// This is the layer the engine is written against. The constructors and the
/// 32-bit selectors delegate to [`primitives`]; `select_*` take the falsy
/// operand first, the reverse of [`primitives::select`].
// TODO: should be replaced by `subtle::Choice` once `subtle` supports const fns.
#[derive(Debug, Copy, Clone)]
pub struct ConstChoice(u32);

impl ConstChoice {
    /// The falsy value.
    pub const FALSE: Self = Self(0);

    /// The truthy value.
    pub const TRUE: Self = Self(u32::MAX);

    #[inline]
    pub(crate) const fn as_u64_mask(&self) -> u64 {
        ((self.0 as u64) << 32) | (self.0 as u64)
    }

    /// Returns the truthy value if `value == 1`, and the falsy value if `value == 0`.
    /// Panics for other values.
    #[inline]
    pub(crate) const fn from_u32_lsb(value: u32) -> Self {
        debug_assert!(value == 0 || value == 1);
        Self(primitives::mask(value))
    }

    /// Returns the truthy value if the most significant bit of `value` is `1`,
    /// and the falsy value if it equals `0`.
    #[inline]
    pub(crate) const fn from_u32_msb(value: u32) -> Self {
        Self::from_u32_lsb(value >> (u32::BITS - 1))
    }

    /// Returns the truthy value if `value != 0`, and the falsy value otherwise.
    #[inline]
    pub(crate) const fn from_u32_nonzero(value: u32) -> Self {
        Self::from_u32_lsb(primitives::is_nonzero(value))
    }

    /// Returns the truthy value if `x == y`, and the falsy value otherwise.
    #[inline]
    pub(crate) const fn from_u32_eq(x: u32, y: u32) -> Self {
        Self::from_u32_lsb(primitives::is_zero(x ^ y))
    }

    /// Returns the truthy value if `x < y`, and the falsy value otherwise.
    #[inline]
    pub(crate) const fn from_u32_lt(x: u32, y: u32) -> Self {
        Self::from_u32_lsb(primitives::less_than(x, y))
    }

    /// Returns the truthy value if `x > y`, and the falsy value otherwise.
    #[inline]
    pub(crate) const fn from_u32_gt(x: u32, y: u32) -> Self {
        Self::from_u32_lsb(primitives::greater_than(x, y))
    }

    /// Returns the truthy value if `x <= y` and the falsy value otherwise.
    #[inline]
    pub(crate) const fn from_u32_le(x: u32, y: u32) -> Self {
        Self::from_u32_lt(y, x).not()
    }

    /// Returns the truthy value if `x > 0` as a signed integer.
    #[inline]
    pub(crate) const fn from_i32_positive(x: i32) -> Self {
        let bits = x as u32;
        Self::from_u32_nonzero(bits).and(Self::from_u32_msb(bits).not())
    }

    #[inline]
    pub(crate) const fn not(&self) -> Self {
        Self(!self.0)
    }

    #[inline]
    pub(crate) const fn and(&self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Return `b` if `self` is truthy, otherwise return `a`.
    #[inline]
    pub(crate) const fn select_u32(&self, a: u32, b: u32) -> u32 {
        primitives::select(b, a, self.0)
    }

    /// Return `b` if `self` is truthy, otherwise return `a`.
    #[inline]
    pub(crate) const fn select_i32(&self, a: i32, b: i32) -> i32 {
        primitives::select_signed(b, a, self.0)
    }

    /// Return `b` if `self` is truthy, otherwise return `a`.
    #[inline]
    pub(crate) const fn select_u64(&self, a: u64, b: u64) -> u64 {
        a ^ (self.as_u64_mask() & (a ^ b))
    }

    /// Return `x` if `self` is truthy, otherwise return 0.
    #[inline]
    pub(crate) const fn if_true_u32(&self, x: u32) -> u32 {
        x & self.0
    }

    /// Returns `1` if `self` is truthy and `0` otherwise.
    #[inline]
    pub(crate) const fn to_u32(self) -> u32 {
        self.0 & 1
    }

    #[inline]
    pub(crate) const fn to_u8(self) -> u8 {
        (self.0 & 1) as u8
    }

    /// WARNING: this method should only be used in contexts that aren't constant-time critical!
    #[inline]
    pub(crate) const fn to_bool_vartime(self) -> bool {
        self.0 != 0
    }
}

impl From<ConstChoice> for Choice {
    #[inline]
    fn from(choice: ConstChoice) -> Self {
        Choice::from(choice.to_u8())
    }
}

impl From<Choice> for ConstChoice {
    #[inline]
    fn from(choice: Choice) -> Self {
        ConstChoice::from_u32_lsb(choice.unwrap_u8() as u32)
    }
}

impl From<ConstChoice> for bool {
    fn from(choice: ConstChoice) -> Self {
        choice.to_bool_vartime()
    }
}

impl PartialEq for ConstChoice {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
