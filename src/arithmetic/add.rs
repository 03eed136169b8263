use alloc::vec::Vec;
use core::ops::{Add, AddAssign};

use crate::numbers::Limbs;
use crate::{IntXL, UIntXL, Word};

/// Add with carry: returns the low word of `a + b + carry`, and sets
/// `carry` to whether the sum overflowed the word.
#[inline]
pub(crate) fn adc<W: Word>(a: W, b: W, carry: &mut bool) -> W {
    let (sum, overflow_b) = a.overflowing_add(b);
    let (sum, overflow_c) = sum.overflowing_add(W::from_bool(*carry));
    *carry = overflow_b || overflow_c;
    sum
}

/// Two argument addition of raw slices: `a += b`, returning the carry out of
/// the top of `a`.
///
/// The caller _must_ ensure that `a.len() >= b.len()`.
#[inline]
pub(crate) fn add_assign_carry<W: Word>(a: &mut [W], b: &[W]) -> bool {
    debug_assert!(a.len() >= b.len());

    let mut carry = false;
    let (a_lo, a_hi) = a.split_at_mut(b.len());

    for (a, b) in a_lo.iter_mut().zip(b) {
        *a = adc(*a, *b, &mut carry);
    }

    if carry {
        for a in a_hi {
            *a = adc(*a, W::ZERO, &mut carry);
            if !carry {
                break;
            }
        }
    }

    carry
}

/// Unsigned `words += b << (index * W::BITS)`.
///
/// Grows `words` as needed: first to cover the summand, then by one word for
/// a final carry. High zero words of `b` are ignored.
pub(crate) fn add_assign_at<W: Word>(words: &mut Vec<W>, b: &[W], index: usize) {
    let b = Limbs::new(b).significant();
    if b.is_empty() {
        return;
    }
    if words.len() < index + b.len() {
        words.resize(index + b.len(), W::ZERO);
    }
    if add_assign_carry(&mut words[index..], b) {
        words.push(W::ONE);
    }
}

/// Two's-complement `words += b << (index * W::BITS)`.
///
/// Both operands are sign-extended to the longer length, and one word is
/// appended holding the sum of the two extensions plus the carry; the
/// result needs signed normalization afterwards. An empty `b` reads as zero.
pub(crate) fn signed_add_assign_at<W: Word>(words: &mut Vec<W>, b: &[W], index: usize) {
    let ext_a = words.last().map_or(W::ZERO, |w| w.sign_extension());
    let ext_b = b.last().map_or(W::ZERO, |w| w.sign_extension());

    let len = words.len().max(index + b.len());
    words.resize(len, ext_a);

    let mut carry = false;
    for (i, a) in words[index..].iter_mut().enumerate() {
        let b = b.get(i).copied().unwrap_or(ext_b);
        *a = adc(*a, b, &mut carry);
    }
    let top = adc(ext_a, ext_b, &mut carry);
    words.push(top);
}

impl<W: Word> AddAssign<&UIntXL<W>> for UIntXL<W> {
    fn add_assign(&mut self, summand: &Self) {
        add_assign_at(&mut self.modify(), summand.words(), 0);
    }
}

impl<W: Word> AddAssign<&IntXL<W>> for IntXL<W> {
    fn add_assign(&mut self, summand: &Self) {
        signed_add_assign_at(&mut self.modify(), summand.words(), 0);
    }
}

forward_binop_both!(impl Add, add, AddAssign, add_assign);

impl<W: Word> UIntXL<W> {
    /// Never overflows; present for symmetry with [`Self::overflowing_sub`].
    pub fn overflowing_add(&self, summand: &Self) -> (Self, bool) {
        (self + summand, false)
    }

    pub fn add_digit(&self, digit: W) -> Self {
        let mut sum = self.clone();
        sum.add_digit_assign(digit);
        sum
    }

    pub fn add_digit_assign(&mut self, digit: W) {
        add_assign_at(&mut self.modify(), &[digit], 0);
    }

    /// `self += summand << (index * W::BITS)`
    pub fn add_assign_shifted(&mut self, summand: &Self, index: usize) {
        add_assign_at(&mut self.modify(), summand.words(), index);
    }
}

impl<W: Word> IntXL<W> {
    /// Never overflows; present for symmetry with the other primitives.
    pub fn overflowing_add(&self, summand: &Self) -> (Self, bool) {
        (self + summand, false)
    }

    /// Add the non-negative `digit`.
    pub fn add_digit(&self, digit: W) -> Self {
        let mut sum = self.clone();
        sum.add_digit_assign(digit);
        sum
    }

    /// Add the non-negative `digit`.
    pub fn add_digit_assign(&mut self, digit: W) {
        signed_add_assign_at(&mut self.modify(), &[digit, W::ZERO], 0);
    }

    /// `self += summand << (index * W::BITS)`
    pub fn add_assign_shifted(&mut self, summand: &Self, index: usize) {
        signed_add_assign_at(&mut self.modify(), summand.words(), index);
    }
}
