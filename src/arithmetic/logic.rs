use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::{IntXL, UIntXL, Word};

/// Word-wise `f` on two's-complement operands, extending the shorter one by
/// its sign.
///
/// The top word of the result reads with the same sign as `f` applied to
/// the two extensions, so no extra word is needed.
fn combine_signed<W: Word>(a: &mut IntXL<W>, b: &IntXL<W>, f: impl Fn(W, W) -> W) {
    let ext_a = a.storage.sign_extension();
    let ext_b = b.storage.sign_extension();
    let b = b.words();

    a.storage.resize_min(b.len(), ext_a);
    let mut words = a.modify();
    for (i, word) in words.iter_mut().enumerate() {
        *word = f(*word, b.get(i).copied().unwrap_or(ext_b));
    }
}

impl<W: Word> BitAndAssign<&UIntXL<W>> for UIntXL<W> {
    fn bitand_assign(&mut self, rhs: &Self) {
        let mut words = self.modify();
        words.truncate(rhs.words().len());
        for (a, &b) in words.iter_mut().zip(rhs.words()) {
            *a &= b;
        }
    }
}

impl<W: Word> BitOrAssign<&UIntXL<W>> for UIntXL<W> {
    fn bitor_assign(&mut self, rhs: &Self) {
        let mut words = self.modify();
        let l = words.len();
        for (a, &b) in words.iter_mut().zip(rhs.words()) {
            *a |= b;
        }
        if rhs.words().len() > l {
            words.extend_from_slice(&rhs.words()[l..]);
        }
    }
}

impl<W: Word> BitXorAssign<&UIntXL<W>> for UIntXL<W> {
    fn bitxor_assign(&mut self, rhs: &Self) {
        let mut words = self.modify();
        let l = words.len();
        for (a, &b) in words.iter_mut().zip(rhs.words()) {
            *a ^= b;
        }
        if rhs.words().len() > l {
            words.extend_from_slice(&rhs.words()[l..]);
        }
    }
}

impl<W: Word> BitAndAssign<&IntXL<W>> for IntXL<W> {
    fn bitand_assign(&mut self, rhs: &Self) {
        combine_signed(self, rhs, |a, b| a & b);
    }
}

impl<W: Word> BitOrAssign<&IntXL<W>> for IntXL<W> {
    fn bitor_assign(&mut self, rhs: &Self) {
        combine_signed(self, rhs, |a, b| a | b);
    }
}

impl<W: Word> BitXorAssign<&IntXL<W>> for IntXL<W> {
    fn bitxor_assign(&mut self, rhs: &Self) {
        combine_signed(self, rhs, |a, b| a ^ b);
    }
}

forward_binop_both!(impl BitAnd, bitand, BitAndAssign, bitand_assign);
forward_binop_both!(impl BitOr, bitor, BitOrAssign, bitor_assign);
forward_binop_both!(impl BitXor, bitxor, BitXorAssign, bitxor_assign);

impl<W: Word> Not for UIntXL<W> {
    type Output = Self;

    /// Inverts the bits within [`UIntXL::bit_width`], so high zeros of the
    /// result drop out again.
    fn not(mut self) -> Self::Output {
        for word in self.modify().iter_mut() {
            *word = !*word;
        }
        self
    }
}

impl<W: Word> Not for &UIntXL<W> {
    type Output = UIntXL<W>;

    fn not(self) -> Self::Output {
        !self.clone()
    }
}

impl<W: Word> Not for IntXL<W> {
    type Output = Self;

    /// `-self - 1`
    fn not(mut self) -> Self::Output {
        for word in self.modify().iter_mut() {
            *word = !*word;
        }
        self
    }
}

impl<W: Word> Not for &IntXL<W> {
    type Output = IntXL<W>;

    fn not(self) -> Self::Output {
        !self.clone()
    }
}
