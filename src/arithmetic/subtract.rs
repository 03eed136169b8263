use alloc::vec::Vec;
use core::ops::{Neg, Sub, SubAssign};

use super::add::adc;
use crate::numbers::Limbs;
use crate::{IntXL, UIntXL, Word};

/// Subtract with borrow: returns the low word of `a - b - borrow`, and sets
/// `borrow` to whether the difference wrapped.
#[inline]
pub(crate) fn sbb<W: Word>(a: W, b: W, borrow: &mut bool) -> W {
    let (difference, underflow_b) = a.overflowing_sub(b);
    let (difference, underflow_c) = difference.overflowing_sub(W::from_bool(*borrow));
    *borrow = underflow_b || underflow_c;
    difference
}

/// Two argument subtraction of raw slices: `a -= b`, returning the borrow out
/// of the top of `a`.
///
/// The caller _must_ ensure that `a.len() >= b.len()`. On borrow, `a` holds
/// the difference wrapped modulo its width.
pub(crate) fn sub_assign_borrow<W: Word>(a: &mut [W], b: &[W]) -> bool {
    debug_assert!(a.len() >= b.len());

    let mut borrow = false;
    let (a_lo, a_hi) = a.split_at_mut(b.len());

    for (a, b) in a_lo.iter_mut().zip(b) {
        *a = sbb(*a, *b, &mut borrow);
    }

    if borrow {
        for a in a_hi {
            *a = sbb(*a, W::ZERO, &mut borrow);
            if !borrow {
                break;
            }
        }
    }

    borrow
}

/// Unsigned `words -= b << (index * W::BITS)`, returning the borrow.
///
/// `words` is first padded to cover the subtrahend; it never grows beyond
/// that, so on borrow it holds the wrapped difference at that width.
pub(crate) fn sub_assign_at<W: Word>(words: &mut Vec<W>, b: &[W], index: usize) -> bool {
    let b = Limbs::new(b).significant();
    if b.is_empty() {
        return false;
    }
    if words.len() < index + b.len() {
        words.resize(index + b.len(), W::ZERO);
    }
    sub_assign_borrow(&mut words[index..], b)
}

/// Two's-complement `words -= b << (index * W::BITS)`.
///
/// Counterpart of [`signed_add_assign_at`][super::add::signed_add_assign_at];
/// the result needs signed normalization afterwards.
pub(crate) fn signed_sub_assign_at<W: Word>(words: &mut Vec<W>, b: &[W], index: usize) {
    let ext_a = words.last().map_or(W::ZERO, |w| w.sign_extension());
    let ext_b = b.last().map_or(W::ZERO, |w| w.sign_extension());

    let len = words.len().max(index + b.len());
    words.resize(len, ext_a);

    let mut borrow = false;
    for (i, a) in words[index..].iter_mut().enumerate() {
        let b = b.get(i).copied().unwrap_or(ext_b);
        *a = sbb(*a, b, &mut borrow);
    }
    let top = sbb(ext_a, ext_b, &mut borrow);
    words.push(top);
}

/// Two's-complement negation modulo the width of `words`.
pub(crate) fn negate_wrapping<W: Word>(words: &mut [W]) {
    let mut carry = true;
    for word in words.iter_mut() {
        *word = adc(!*word, W::ZERO, &mut carry);
    }
}

/// Exact negation: the flipped words plus one, with one more word for the
/// sign, which normalization removes again unless needed (as for `-MIN`).
fn negate_assign<W: Word>(words: &mut Vec<W>) {
    let ext = words.last().map_or(W::ZERO, |w| w.sign_extension());
    let mut carry = true;
    for word in words.iter_mut() {
        *word = adc(!*word, W::ZERO, &mut carry);
    }
    words.push(adc(!ext, W::ZERO, &mut carry));
}

impl<W: Word> SubAssign<&UIntXL<W>> for UIntXL<W> {
    /// Panics if `subtrahend > self`.
    fn sub_assign(&mut self, subtrahend: &Self) {
        let borrow = sub_assign_at(&mut self.modify(), subtrahend.words(), 0);
        if borrow {
            panic!("attempt to subtract with overflow");
        }
    }
}

impl<W: Word> SubAssign<&IntXL<W>> for IntXL<W> {
    fn sub_assign(&mut self, subtrahend: &Self) {
        signed_sub_assign_at(&mut self.modify(), subtrahend.words(), 0);
    }
}

forward_binop_both!(impl Sub, sub, SubAssign, sub_assign);

impl<W: Word> Neg for IntXL<W> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

impl<W: Word> Neg for &IntXL<W> {
    type Output = IntXL<W>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl<W: Word> UIntXL<W> {
    /// `self - subtrahend`, flagging whether it went below zero.
    ///
    /// On overflow, the difference is wrapped modulo `2^(n * W::BITS)`, where
    /// `n` is the larger word count of the two operands.
    pub fn overflowing_sub(&self, subtrahend: &Self) -> (Self, bool) {
        let mut difference = self.clone();
        let borrow = sub_assign_at(&mut difference.modify(), subtrahend.words(), 0);
        (difference, borrow)
    }

    pub fn checked_sub(&self, subtrahend: &Self) -> Option<Self> {
        match self.overflowing_sub(subtrahend) {
            (difference, false) => Some(difference),
            (_, true) => None,
        }
    }

    /// `self - digit`, flagging whether it went below zero (wrapping as
    /// [`Self::overflowing_sub`] does).
    pub fn overflowing_sub_digit(&self, digit: W) -> (Self, bool) {
        let mut difference = self.clone();
        let borrow = sub_assign_at(&mut difference.modify(), &[digit], 0);
        (difference, borrow)
    }

    /// Panics if `digit > self`.
    pub fn sub_digit(&self, digit: W) -> Self {
        match self.overflowing_sub_digit(digit) {
            (difference, false) => difference,
            (_, true) => panic!("attempt to subtract with overflow"),
        }
    }

    /// `|self - other|`
    pub fn abs_diff(&self, other: &Self) -> Self {
        if self >= other { self - other } else { other - self }
    }
}

impl<W: Word> IntXL<W> {
    /// Never overflows; the flag is always `false`.
    pub fn overflowing_sub(&self, subtrahend: &Self) -> (Self, bool) {
        (self - subtrahend, false)
    }

    /// Always `Some`.
    pub fn checked_sub(&self, subtrahend: &Self) -> Option<Self> {
        Some(self - subtrahend)
    }

    /// Negate in place.
    pub fn negate(&mut self) {
        negate_assign(&mut self.modify());
    }

    /// Subtract the non-negative `digit`.
    pub fn sub_digit(&self, digit: W) -> Self {
        let mut difference = self.clone();
        signed_sub_assign_at(&mut difference.modify(), &[digit, W::ZERO], 0);
        difference
    }

    /// `self -= subtrahend << (index * W::BITS)`
    pub fn sub_assign_shifted(&mut self, subtrahend: &Self, index: usize) {
        signed_sub_assign_at(&mut self.modify(), subtrahend.words(), index);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arithmetic::test::{assert_assign_op, assert_op, big, signed_big, N1, N2};

    #[test]
    fn sbb_reports_both_borrows() {
        let mut borrow = true;
        assert_eq!(sbb(0u8, 0, &mut borrow), 0xFF);
        assert!(borrow);

        let mut borrow = true;
        assert_eq!(sbb(0u8, 0xFF, &mut borrow), 0);
        assert!(borrow);

        let mut borrow = false;
        assert_eq!(sbb(5u8, 3, &mut borrow), 2);
        assert!(!borrow);
    }

    #[test]
    fn borrow_propagates_and_shrinks() {
        let a: UIntXL = UIntXL::from_words(&[0, 0, 1]);
        let b: UIntXL = UIntXL::from_digit(1);
        let difference: UIntXL = UIntXL::from_words(&[N1, N1]);
        assert_op!(a - b == difference);
        assert_assign_op!(a -= b == difference);
        assert!((&a - &b).is_normal());

        let zero: UIntXL = UIntXL::zero();
        assert_op!(a - a == zero);
        assert!((&a - &a).is_normal());
    }

    #[test]
    fn overflowing_sub_wraps() {
        // 1 - 2 = -1, reported and wrapped into one word
        let one = UIntXL::<u8>::from_digit(1);
        let two = UIntXL::<u8>::from_digit(2);
        let (difference, overflow) = one.overflowing_sub(&two);
        assert!(overflow);
        assert_eq!(difference.words(), [0xFF]);

        // wrapped at the width of the longer operand
        let big_one = UIntXL::<u8>::from_words(&[0, 1]);
        let (difference, overflow) = one.overflowing_sub(&big_one);
        assert!(overflow);
        assert_eq!(difference.words(), [0x01, 0xFF]);

        assert_eq!(one.checked_sub(&two), None);
        assert_eq!(two.checked_sub(&one), Some(one.clone()));

        let (difference, overflow) = UIntXL::<u8>::zero().overflowing_sub_digit(1);
        assert!(overflow);
        assert_eq!(difference.words(), [0xFF]);
    }

    #[test]
    #[should_panic(expected = "attempt to subtract with overflow")]
    fn sub_below_zero_traps() {
        let _ = UIntXL::<u32>::from_digit(1) - UIntXL::from_digit(2);
    }

    #[test]
    fn sub_digit_and_abs_diff() {
        let x = UIntXL::<u8>::from_words(&[0, 0, 1]);
        assert_eq!(x.sub_digit(1).words(), [0xFF, 0xFF]);

        let a = UIntXL::<u16>::from_digit(3);
        let b = UIntXL::<u16>::from_words(&[1, 1]);
        assert_eq!(a.abs_diff(&b), b.abs_diff(&a));
        assert_eq!(a.abs_diff(&b).words(), [0xFFFE]);

        assert_eq!(IntXL::<u8>::zero().sub_digit(1), IntXL::minus_one());
        assert_eq!(IntXL::<u8>::from_words(&[0x80]).sub_digit(1).words(), [0x7F, 0xFF]);
    }

    #[test]
    fn signed_differences() {
        // 0 - 1 = -1
        let a = IntXL::<u8>::zero();
        let b = IntXL::<u8>::one();
        assert_op!(a - b == IntXL::<u8>::minus_one());

        // -128 - 1 = -129 needs a second word
        let a = IntXL::<u8>::from_words(&[0x80]);
        let b = IntXL::<u8>::one();
        let difference = IntXL::<u8>::from_words(&[0x7F, 0xFF]);
        assert_op!(a - b == difference);

        // 0x7F - (-1) = 0x80
        let a = IntXL::<u8>::from_words(&[0x7F]);
        let b = IntXL::<u8>::minus_one();
        let difference = IntXL::<u8>::from_words(&[0x80, 0x00]);
        assert_op!(a - b == difference);

        let mut x = IntXL::<u8>::zero();
        x.sub_assign_shifted(&IntXL::one(), 2);
        assert_eq!(x.words(), [0x00, 0x00, 0xFF]);
    }

    #[test]
    fn negation() {
        let x = IntXL::<u8>::from_words(&[0x80]);
        assert_eq!((-&x).words(), [0x80, 0x00]);
        assert_eq!(-(-&x), x);

        let x = IntXL::<u8>::from_words(&[0x00, 0x80]);
        assert_eq!((-x).words(), [0x00, 0x80, 0x00]);

        assert!((-IntXL::<u8>::zero()).is_zero());
        assert_eq!(-IntXL::<u8>::one(), IntXL::minus_one());

        let mut words = [0u8, 1];
        negate_wrapping(&mut words);
        assert_eq!(words, [0x00, 0xFF]);

        let mut words = [N1, N2];
        negate_wrapping(&mut words);
        assert_eq!(words, [1, 1]);
    }

    quickcheck::quickcheck! {
        fn unsigned_overflowing_sub_matches_oracle(a: Vec<u32>, b: Vec<u32>) -> bool {
            let (a, b) = (UIntXL::<u32>::from_words(&a), UIntXL::<u32>::from_words(&b));
            let (difference, overflow) = a.overflowing_sub(&b);
            if big(a.words()) >= big(b.words()) {
                !overflow && difference.is_normal()
                    && big(difference.words()) == big(a.words()) - big(b.words())
            } else {
                overflow && &difference + &b == UIntXL::from_words(&{
                    let mut words = a.words().to_vec();
                    words.resize(a.words().len().max(b.words().len()), 0);
                    words.push(1);
                    words
                })
            }
        }

        fn signed_sub_matches_oracle(a: Vec<u32>, b: Vec<u32>) -> bool {
            let difference = IntXL::<u32>::from_words(&a) - IntXL::from_words(&b);
            difference.is_normal() && signed_big(difference.words()) == signed_big(&a) - signed_big(&b)
        }

        fn additive_inverse(a: Vec<u32>) -> bool {
            let x = IntXL::<u32>::from_words(&a);
            let u = UIntXL::<u32>::from_words(&a);
            (&x + &(-&x)).is_zero() && (&x - &x).is_zero() && (&u - &u).is_zero()
        }

        fn signed_sub_never_overflows(a: Vec<u16>, b: Vec<u16>) -> bool {
            let (x, y) = (IntXL::<u16>::from_words(&a), IntXL::<u16>::from_words(&b));
            let difference = &x - &y;
            x.overflowing_sub(&y) == (difference.clone(), false) && x.checked_sub(&y) == Some(difference)
        }

        fn negation_matches_oracle(a: Vec<u32>) -> bool {
            let negated = -IntXL::<u32>::from_words(&a);
            negated.is_normal() && signed_big(negated.words()) == -signed_big(&a)
        }
    }
}
