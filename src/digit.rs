//! The machine word, and the capabilities the arithmetic needs from it.

use core::{fmt, hash::Hash};
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, Shr};

use zeroize::Zeroize;

/// A word on the machine. [`UIntXL`][crate::UIntXL] and [`IntXL`][crate::IntXL]
/// are composed of many digits, and default to this one.
///
/// Feature `u32` forces the digit to be 32-bit even on 64-bit architectures,
/// feature `u64` forces the digit to be 64-bit even on 32-bit architectures.
pub type Digit = digit::Digit;

#[cfg(not(any(feature = "u32", feature = "u64")))]
compile_error!("Either feature u32 or feature u64!");

#[cfg(all(feature = "u32", feature = "u64"))]
compile_error!("Either feature u32 or feature u64, not both!");

#[cfg(feature = "u32")]
mod digit {
    pub type Digit = u32;
}

#[cfg(feature = "u64")]
mod digit {
    pub type Digit = u64;
}

/// Fixed-width unsigned machine integer, the limb of the flexible-width types.
///
/// Everything here reports overflow instead of panicking, and the
/// "full-width" operations work on double words, returned as `(high, low)`
/// pairs.
pub trait Word:
    Copy
    + Default
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::LowerHex
    + fmt::UpperHex
    + Zeroize
    + Send
    + Sync
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + 'static
{
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    fn overflowing_add(self, rhs: Self) -> (Self, bool);
    fn overflowing_sub(self, rhs: Self) -> (Self, bool);
    fn overflowing_mul(self, rhs: Self) -> (Self, bool);
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// `self * rhs` as `(high, low)`.
    fn full_mul(self, rhs: Self) -> (Self, Self);

    /// Divide the double word `(high, low)` by `divisor`, returning
    /// `(quotient, remainder)`.
    ///
    /// The caller must ensure `high < divisor`, so that the quotient fits.
    /// This is Knuth's operation "memorizing the multiplication table in reverse".
    fn full_div(high: Self, low: Self, divisor: Self) -> (Self, Self);

    fn leading_zeros(self) -> u32;
    fn trailing_zeros(self) -> u32;
    fn count_ones(self) -> u32;

    fn from_u128_truncating(value: u128) -> Self;
    fn to_u128(self) -> u128;

    #[inline]
    fn from_bool(bit: bool) -> Self {
        if bit { Self::ONE } else { Self::ZERO }
    }

    #[inline]
    fn most_significant_bit(self) -> bool {
        self >> (Self::BITS - 1) == Self::ONE
    }

    #[inline]
    fn least_significant_bit(self) -> bool {
        self & Self::ONE == Self::ONE
    }

    /// All-zero bits if `self` reads as non-negative in two's complement,
    /// all-one bits otherwise.
    #[inline]
    fn sign_extension(self) -> Self {
        if self.most_significant_bit() { Self::MAX } else { Self::ZERO }
    }
}

macro_rules! impl_word {
    ($word:ty, $double:ty) => {
        impl Word for $word {
            const BITS: u32 = <$word>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$word>::MAX;

            #[inline]
            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                <$word>::overflowing_add(self, rhs)
            }

            #[inline]
            fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
                <$word>::overflowing_sub(self, rhs)
            }

            #[inline]
            fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
                <$word>::overflowing_mul(self, rhs)
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$word>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$word>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn full_mul(self, rhs: Self) -> (Self, Self) {
                let product = (self as $double) * (rhs as $double);
                ((product >> <$word>::BITS) as $word, product as $word)
            }

            #[inline]
            fn full_div(high: Self, low: Self, divisor: Self) -> (Self, Self) {
                debug_assert!(high < divisor);
                let dividend = ((high as $double) << <$word>::BITS) | (low as $double);
                let divisor = divisor as $double;
                ((dividend / divisor) as $word, (dividend % divisor) as $word)
            }

            #[inline]
            fn leading_zeros(self) -> u32 {
                <$word>::leading_zeros(self)
            }

            #[inline]
            fn trailing_zeros(self) -> u32 {
                <$word>::trailing_zeros(self)
            }

            #[inline]
            fn count_ones(self) -> u32 {
                <$word>::count_ones(self)
            }

            #[inline]
            fn from_u128_truncating(value: u128) -> Self {
                value as $word
            }

            #[inline]
            fn to_u128(self) -> u128 {
                self as u128
            }
        }
    };
}

impl_word!(u8, u16);
impl_word!(u16, u32);
impl_word!(u32, u64);
impl_word!(u64, u128);
