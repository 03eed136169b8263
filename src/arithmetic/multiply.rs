use alloc::vec::Vec;
use core::ops::{Mul, MulAssign};

use super::add::{adc, add_assign_carry};
use super::subtract::sub_assign_borrow;
use super::KARATSUBA_THRESHOLD;
use crate::numbers::Limbs;
use crate::{IntXL, UIntXL, Word};

/// Multiply-accumulate with carry: returns the low word of
/// `a + b * c + carry`, and sets `carry` to the high word.
///
/// Cannot overflow: `(B - 1) + (B - 1)^2 + (B - 1) = B^2 - 1`.
#[inline]
pub(crate) fn mac_with_carry<W: Word>(a: W, b: W, c: W, carry: &mut W) -> W {
    let (hi, lo) = b.full_mul(c);
    let (lo, overflow_a) = lo.overflowing_add(a);
    let (lo, overflow_c) = lo.overflowing_add(*carry);
    *carry = hi
        .wrapping_add(W::from_bool(overflow_a))
        .wrapping_add(W::from_bool(overflow_c));
    lo
}

/// `words *= digit`, appending the final carry if non-zero.
pub(crate) fn mul_digit_assign<W: Word>(words: &mut Vec<W>, digit: W) {
    let mut carry = W::ZERO;
    for word in words.iter_mut() {
        *word = mac_with_carry(W::ZERO, *word, digit, &mut carry);
    }
    if carry != W::ZERO {
        words.push(carry);
    }
}

/// `acc += b * digit`
///
/// The caller _must_ ensure that `acc` is longer than `b`, and big enough to
/// hold the result.
fn mac_digit<W: Word>(acc: &mut [W], b: &[W], digit: W) {
    if digit == W::ZERO {
        return;
    }

    let mut carry = W::ZERO;
    let (acc_lo, acc_hi) = acc.split_at_mut(b.len());

    for (a, &b) in acc_lo.iter_mut().zip(b) {
        *a = mac_with_carry(*a, b, digit, &mut carry);
    }

    if carry != W::ZERO {
        let overflow = add_assign_carry(acc_hi, &[carry]);
        debug_assert!(!overflow);
    }
}

/// Schoolbook (operand-scanning) product, with `x.len() + y.len()` words.
pub(crate) fn schoolbook_mul<W: Word>(x: &[W], y: &[W]) -> Vec<W> {
    let mut product = alloc::vec![W::ZERO; x.len() + y.len()];
    for (i, &xi) in x.iter().enumerate() {
        mac_digit(&mut product[i..], y, xi);
    }
    product
}

/// Schoolbook square, with `2 * x.len()` words.
///
/// Each cross product `x[i] * x[j]` (for `i < j`) is computed once, the sum
/// of them doubled, and then the diagonal `x[i]^2` added.
pub(crate) fn schoolbook_square<W: Word>(x: &[W]) -> Vec<W> {
    let n = x.len();
    let mut square = alloc::vec![W::ZERO; 2 * n];

    for i in 0..n {
        mac_digit(&mut square[2 * i + 1..], &x[i + 1..], x[i]);
    }

    let mut top = W::ZERO;
    for word in square.iter_mut() {
        let next = *word >> (W::BITS - 1);
        *word = (*word << 1) | top;
        top = next;
    }
    debug_assert!(top == W::ZERO);

    let mut carry = false;
    for (i, &xi) in x.iter().enumerate() {
        let (hi, lo) = xi.full_mul(xi);
        square[2 * i] = adc(square[2 * i], lo, &mut carry);
        square[2 * i + 1] = adc(square[2 * i + 1], hi, &mut carry);
    }
    debug_assert!(!carry);

    square
}

/// `a + b` as new words.
fn sum<W: Word>(a: &[W], b: &[W]) -> Vec<W> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut sum = long.to_vec();
    if add_assign_carry(&mut sum, short) {
        sum.push(W::ONE);
    }
    sum
}

/// `|a - b|` as new words.
fn difference<W: Word>(a: &[W], b: &[W]) -> Vec<W> {
    let (large, small) = if Limbs::new(a) >= Limbs::new(b) { (a, b) } else { (b, a) };
    let small = Limbs::new(small).significant();
    let mut difference = large.to_vec();
    let borrow = sub_assign_borrow(&mut difference, small);
    debug_assert!(!borrow);
    difference
}

/// `product += part << (index * W::BITS)`, where the sum is known to fit.
fn accumulate<W: Word>(product: &mut [W], part: &[W], index: usize) {
    let part = Limbs::new(part).significant();
    if part.is_empty() {
        return;
    }
    let overflow = add_assign_carry(&mut product[index..], part);
    debug_assert!(!overflow);
}

/// Karatsuba product, recursing down to operands shorter than `threshold`.
///
/// Splitting at `k = max(x.len(), y.len()) / 2` words, with
/// `z0 = x0 * y0` and `z2 = x1 * y1`,
/// `x * y = z2 B^2k + ((x0 + x1)(y0 + y1) - z0 - z2) B^k + z0`.
///
/// The result has `x.len() + y.len()` words after trimming high zeros of the
/// operands (no words at all, if either operand is zero).
pub(crate) fn karatsuba_mul<W: Word>(x: &[W], y: &[W], threshold: usize) -> Vec<W> {
    let x = Limbs::new(x).significant();
    let y = Limbs::new(y).significant();
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }
    // the halves must get strictly shorter
    if x.len().min(y.len()) < threshold.max(4) {
        return schoolbook_mul(x, y);
    }

    let k = x.len().max(y.len()) / 2;
    let (x0, x1) = x.split_at(k.min(x.len()));
    let (y0, y1) = y.split_at(k.min(y.len()));

    let z0 = karatsuba_mul(x0, y0, threshold);
    let z2 = karatsuba_mul(x1, y1, threshold);

    let mut z1 = karatsuba_mul(&sum(x0, x1), &sum(y0, y1), threshold);
    let borrow = sub_assign_borrow(&mut z1, Limbs::new(&z0).significant());
    debug_assert!(!borrow);
    let borrow = sub_assign_borrow(&mut z1, Limbs::new(&z2).significant());
    debug_assert!(!borrow);

    let mut product = alloc::vec![W::ZERO; x.len() + y.len()];
    accumulate(&mut product, &z0, 0);
    accumulate(&mut product, &z1, k);
    accumulate(&mut product, &z2, 2 * k);
    product
}

/// Karatsuba square, recursing down to operands shorter than `threshold`.
///
/// Splitting at `k = x.len() / 2` words, with `z0 = x0^2` and `z2 = x1^2`,
/// `x^2 = z2 B^2k + (z0 + z2 - (x1 - x0)^2) B^k + z0`.
pub(crate) fn karatsuba_square<W: Word>(x: &[W], threshold: usize) -> Vec<W> {
    let x = Limbs::new(x).significant();
    if x.is_empty() {
        return Vec::new();
    }
    if x.len() < threshold.max(4) {
        return schoolbook_square(x);
    }

    let k = x.len() / 2;
    let (x0, x1) = x.split_at(k);

    let z0 = karatsuba_square(x0, threshold);
    let z2 = karatsuba_square(x1, threshold);
    let d = karatsuba_square(&difference(x0, x1), threshold);

    let mut z1 = sum(&z0, &z2);
    let borrow = sub_assign_borrow(&mut z1, Limbs::new(&d).significant());
    debug_assert!(!borrow);

    let mut square = alloc::vec![W::ZERO; 2 * x.len()];
    accumulate(&mut square, &z0, 0);
    accumulate(&mut square, &z1, k);
    accumulate(&mut square, &z2, 2 * k);
    square
}

/// Product of two magnitudes, picking the algorithm by size.
pub(crate) fn mul<W: Word>(x: &[W], y: &[W]) -> Vec<W> {
    let scaled = |words: &[W], digit: W| {
        let mut product = words.to_vec();
        mul_digit_assign(&mut product, digit);
        product
    };
    match (x, y) {
        (_, &[digit]) => scaled(x, digit),
        (&[digit], _) => scaled(y, digit),
        _ if x.len().min(y.len()) >= KARATSUBA_THRESHOLD => {
            log::trace!("karatsuba multiplication of {} by {} words", x.len(), y.len());
            karatsuba_mul(x, y, KARATSUBA_THRESHOLD)
        }
        _ => schoolbook_mul(x, y),
    }
}

/// Square of a magnitude, picking the algorithm by size.
pub(crate) fn square<W: Word>(x: &[W]) -> Vec<W> {
    if x.len() >= KARATSUBA_THRESHOLD {
        log::trace!("karatsuba squaring of {} words", x.len());
        karatsuba_square(x, KARATSUBA_THRESHOLD)
    } else {
        schoolbook_square(x)
    }
}

impl<W: Word> MulAssign<&UIntXL<W>> for UIntXL<W> {
    fn mul_assign(&mut self, factor: &Self) {
        if let Some(digit) = factor.to_digit() {
            self.mul_digit_assign(digit);
        } else {
            *self = Self::from_vec(mul(self.words(), factor.words()));
        }
    }
}

impl<W: Word> MulAssign<&IntXL<W>> for IntXL<W> {
    fn mul_assign(&mut self, factor: &Self) {
        let negative = self.is_negative() != factor.is_negative();
        let magnitude = &self.magnitude() * &factor.magnitude();
        *self = Self::from_sign_and_magnitude(negative, magnitude);
    }
}

forward_binop_both!(impl Mul, mul, MulAssign, mul_assign);

impl<W: Word> UIntXL<W> {
    /// Never overflows; present for symmetry with [`Self::overflowing_sub`].
    pub fn overflowing_mul(&self, factor: &Self) -> (Self, bool) {
        (self * factor, false)
    }

    pub fn mul_digit(&self, digit: W) -> Self {
        let mut product = self.clone();
        product.mul_digit_assign(digit);
        product
    }

    pub fn mul_digit_assign(&mut self, digit: W) {
        mul_digit_assign(&mut self.modify(), digit);
    }

    /// `self * self`, cheaper than the general product.
    pub fn squared(&self) -> Self {
        Self::from_vec(square(self.words()))
    }

    /// `self^exponent` by square-and-multiply, with `0^0 = 1`.
    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = Self::one();
        for i in (0..(u32::BITS - exponent.leading_zeros())).rev() {
            result = result.squared();
            if (exponent >> i) & 1 == 1 {
                result *= self;
            }
        }
        result
    }
}

impl<W: Word> IntXL<W> {
    /// Never overflows; present for symmetry with the other primitives.
    pub fn overflowing_mul(&self, factor: &Self) -> (Self, bool) {
        (self * factor, false)
    }

    /// Multiply by the non-negative `digit`.
    pub fn mul_digit(&self, digit: W) -> Self {
        Self::from_sign_and_magnitude(self.is_negative(), self.magnitude().mul_digit(digit))
    }

    pub fn squared(&self) -> Self {
        Self::from(self.magnitude().squared())
    }

    /// `self^exponent`, with `0^0 = 1`.
    pub fn pow(&self, exponent: u32) -> Self {
        let negative = self.is_negative() && exponent & 1 == 1;
        Self::from_sign_and_magnitude(negative, self.magnitude().pow(exponent))
    }
}
