use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::{Div, DivAssign, Rem, RemAssign};

use super::add::add_assign_carry;
use super::multiply::mul_digit_assign;
use super::shift::{shl_bits, shr_bits};
use super::subtract::sub_assign_borrow;
use crate::numbers::Limbs;
use crate::{Error, IntXL, Result, UIntXL, Word};

/// Divides `words` in place by `divisor`, returning the remainder.
///
/// Knuth's algorithm A: run down the words, dividing each (together with the
/// remainder so far as high word) by the divisor.
pub(crate) fn div_rem_assign_digit<W: Word>(words: &mut [W], divisor: W) -> W {
    debug_assert!(divisor != W::ZERO);
    let mut remainder = W::ZERO;

    for digit in words.iter_mut().rev() {
        let (quotient, r) = W::full_div(remainder, *digit, divisor);
        *digit = quotient;
        remainder = r;
    }

    remainder
}

/// Knuth, TAOCP vol 2 section 4.3.1, algorithm D(ivision).
///
/// The caller _must_ ensure that `v` is significant with at least two words,
/// and `u >= v`.
fn div_rem_knuth<W: Word>(u: &[W], v: &[W]) -> (Vec<W>, Vec<W>) {
    let n = v.len();
    debug_assert!(n >= 2 && v[n - 1] != W::ZERO);
    let m = u.len() - n;

    // This shift has no influence on the quotient, and is reverted for the
    // remainder at the end.
    let shift = v[n - 1].leading_zeros();
    let mut v = v.to_vec();
    let overflow = shl_bits(&mut v, shift);
    debug_assert!(overflow == W::ZERO);

    let mut u = u.to_vec();
    let top = shl_bits(&mut u, shift);
    u.push(top);

    let v_top = v[n - 1];
    let mut q = alloc::vec![W::ZERO; m + 1];
    let mut product = Vec::with_capacity(n + 1);

    for j in (0..=m).rev() {
        // the window u[j..=j + n] is below v * B, so u[j + n] <= v_top
        let (u_hi, u_lo) = (u[j + n], u[j + n - 1]);
        let mut q_hat = if u_hi >= v_top {
            W::MAX
        } else {
            W::full_div(u_hi, u_lo, v_top).0
        };

        product.clear();
        product.extend_from_slice(&v);
        mul_digit_assign(&mut product, q_hat);

        // overshoots by at most two
        let window = &mut u[j..=j + n];
        let mut borrow = sub_assign_borrow(window, &product);
        while borrow {
            q_hat = q_hat.wrapping_sub(W::ONE);
            borrow = !add_assign_carry(window, &v);
        }
        q[j] = q_hat;
    }

    u.truncate(n);
    shr_bits(&mut u, shift, W::ZERO);
    (q, u)
}

/// `(u / v, u % v)` on magnitudes; `None` for division by zero.
pub(crate) fn div_rem<W: Word>(u: &[W], v: &[W]) -> Option<(Vec<W>, Vec<W>)> {
    let u = Limbs::new(u).significant();
    let v = Limbs::new(v).significant();

    if v.is_empty() {
        return None;
    }

    match Limbs::new(u).cmp(Limbs::new(v)) {
        Ordering::Less => return Some((Vec::new(), u.to_vec())),
        Ordering::Equal => return Some((alloc::vec![W::ONE], Vec::new())),
        Ordering::Greater => {}
    }

    if let [digit] = *v {
        let mut quotient = u.to_vec();
        let remainder = div_rem_assign_digit(&mut quotient, digit);
        return Some((quotient, alloc::vec![remainder]));
    }

    log::trace!("long division of {} by {} words", u.len(), v.len());
    Some(div_rem_knuth(u, v))
}

impl<W: Word> UIntXL<W> {
    /// `(self / divisor, self % divisor)`, or `None` for a zero divisor.
    pub fn checked_div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        div_rem(self.words(), divisor.words())
            .map(|(quotient, remainder)| (Self::from_vec(quotient), Self::from_vec(remainder)))
    }

    /// Panics if `divisor` is zero.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        match self.checked_div_rem(divisor) {
            Some(pair) => pair,
            None => panic!("attempt to divide by zero"),
        }
    }

    /// Like [`Self::checked_div_rem`], with an error instead of `None`.
    pub fn try_div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        self.checked_div_rem(divisor).ok_or(Error::DivisionByZero)
    }

    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        self.checked_div_rem(divisor).map(|(quotient, _)| quotient)
    }

    pub fn checked_rem(&self, divisor: &Self) -> Option<Self> {
        self.checked_div_rem(divisor).map(|(_, remainder)| remainder)
    }

    /// `self / divisor`, flagging division by zero; then the dividend is
    /// returned as partial result.
    pub fn overflowing_div(&self, divisor: &Self) -> (Self, bool) {
        match self.checked_div(divisor) {
            Some(quotient) => (quotient, false),
            None => (self.clone(), true),
        }
    }

    /// `self % divisor`, flagging division by zero; then the dividend is
    /// returned as partial result.
    pub fn overflowing_rem(&self, divisor: &Self) -> (Self, bool) {
        match self.checked_rem(divisor) {
            Some(remainder) => (remainder, false),
            None => (self.clone(), true),
        }
    }

    pub fn checked_div_rem_digit(&self, divisor: W) -> Option<(Self, W)> {
        if divisor == W::ZERO {
            return None;
        }
        let mut quotient = self.clone();
        let remainder = div_rem_assign_digit(&mut quotient.modify(), divisor);
        Some((quotient, remainder))
    }

    /// Flags a zero divisor, returning the dividend as quotient and a zero
    /// remainder.
    pub fn overflowing_div_rem_digit(&self, divisor: W) -> ((Self, W), bool) {
        match self.checked_div_rem_digit(divisor) {
            Some(pair) => (pair, false),
            None => ((self.clone(), W::ZERO), true),
        }
    }

    /// Panics if `divisor` is zero.
    pub fn div_rem_digit(&self, divisor: W) -> (Self, W) {
        match self.checked_div_rem_digit(divisor) {
            Some(pair) => pair,
            None => panic!("attempt to divide by zero"),
        }
    }
}

impl<W: Word> IntXL<W> {
    /// Truncating division: the quotient rounds towards zero, the remainder
    /// takes the sign of the dividend. `None` for a zero divisor.
    pub fn checked_div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let (quotient, remainder) = self.magnitude().checked_div_rem(&divisor.magnitude())?;
        let negative = self.is_negative() != divisor.is_negative();
        Some((
            Self::from_sign_and_magnitude(negative, quotient),
            Self::from_sign_and_magnitude(self.is_negative(), remainder),
        ))
    }

    /// Panics if `divisor` is zero.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        match self.checked_div_rem(divisor) {
            Some(pair) => pair,
            None => panic!("attempt to divide by zero"),
        }
    }

    pub fn try_div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        self.checked_div_rem(divisor).ok_or(Error::DivisionByZero)
    }

    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        self.checked_div_rem(divisor).map(|(quotient, _)| quotient)
    }

    pub fn checked_rem(&self, divisor: &Self) -> Option<Self> {
        self.checked_div_rem(divisor).map(|(_, remainder)| remainder)
    }

    /// `self / divisor`, flagging division by zero; then the dividend is
    /// returned as partial result.
    pub fn overflowing_div(&self, divisor: &Self) -> (Self, bool) {
        match self.checked_div(divisor) {
            Some(quotient) => (quotient, false),
            None => (self.clone(), true),
        }
    }

    pub fn overflowing_rem(&self, divisor: &Self) -> (Self, bool) {
        match self.checked_rem(divisor) {
            Some(remainder) => (remainder, false),
            None => (self.clone(), true),
        }
    }

    /// Divide by the non-negative `divisor`, truncating; `None` if it is zero.
    pub fn checked_div_rem_digit(&self, divisor: W) -> Option<(Self, Self)> {
        let (quotient, remainder) = self.magnitude().checked_div_rem_digit(divisor)?;
        Some((
            Self::from_sign_and_magnitude(self.is_negative(), quotient),
            Self::from_sign_and_magnitude(self.is_negative(), UIntXL::from_digit(remainder)),
        ))
    }

    /// Flags a zero divisor, returning the dividend as quotient and a zero
    /// remainder.
    pub fn overflowing_div_rem_digit(&self, divisor: W) -> ((Self, Self), bool) {
        match self.checked_div_rem_digit(divisor) {
            Some(pair) => (pair, false),
            None => ((self.clone(), Self::zero()), true),
        }
    }

    /// Panics if `divisor` is zero.
    pub fn div_rem_digit(&self, divisor: W) -> (Self, Self) {
        match self.checked_div_rem_digit(divisor) {
            Some(pair) => pair,
            None => panic!("attempt to divide by zero"),
        }
    }
}

macro_rules! impl_div_rem_assign {
    ($T:ident) => {
        impl<W: Word> DivAssign<&$T<W>> for $T<W> {
            /// Panics if `divisor` is zero.
            fn div_assign(&mut self, divisor: &Self) {
                *self = self.div_rem(divisor).0;
            }
        }

        impl<W: Word> RemAssign<&$T<W>> for $T<W> {
            /// Panics if `divisor` is zero.
            fn rem_assign(&mut self, divisor: &Self) {
                *self = self.div_rem(divisor).1;
            }
        }
    };
}

impl_div_rem_assign!(UIntXL);
impl_div_rem_assign!(IntXL);

forward_binop_both!(impl Div, div, DivAssign, div_assign);
forward_binop_both!(impl Rem, rem, RemAssign, rem_assign);
