use core::ops::{Shl, ShlAssign, Shr, ShrAssign};

use crate::numbers::Form;
use crate::{IntXL, UIntXL, Word};

/// Shift left by `bits < W::BITS` within the slice, returning the bits
/// shifted out of the top word (in the low bits of the result).
#[inline]
pub(crate) fn shl_bits<W: Word>(words: &mut [W], bits: u32) -> W {
    debug_assert!(bits < W::BITS);
    if bits == 0 {
        return W::ZERO;
    }
    let mut carry = W::ZERO;
    for word in words.iter_mut() {
        let new_carry = *word >> (W::BITS - bits);
        *word = (*word << bits) | carry;
        carry = new_carry;
    }
    carry
}

/// Shift right by `bits < W::BITS` within the slice, shifting the low bits of
/// `fill` in at the top.
#[inline]
pub(crate) fn shr_bits<W: Word>(words: &mut [W], bits: u32, fill: W) {
    debug_assert!(bits < W::BITS);
    if bits == 0 {
        return;
    }
    let mut borrow = fill << (W::BITS - bits);
    for word in words.iter_mut().rev() {
        let new_borrow = *word << (W::BITS - bits);
        *word = (*word >> bits) | borrow;
        borrow = new_borrow;
    }
}

/// Split a bit distance into whole words and remaining bits.
#[inline]
fn split<W: Word>(distance: usize) -> (usize, u32) {
    (distance / W::BITS as usize, (distance % W::BITS as usize) as u32)
}

/// Prepend `count` zero words, moving the existing ones up.
fn shift_words_up<W: Word>(words: &mut alloc::vec::Vec<W>, count: usize) {
    if count == 0 {
        return;
    }
    let l = words.len();
    words.resize(l + count, W::ZERO);
    words.copy_within(..l, count);
    words[..count].fill(W::ZERO);
}

impl<W: Word> ShlAssign<usize> for UIntXL<W> {
    /// Note that "left" means "higher number"; never loses bits.
    fn shl_assign(&mut self, distance: usize) {
        if self.is_zero() {
            return;
        }
        let (n_words, n_bits) = split::<W>(distance);
        let mut words = self.modify();
        let carry = shl_bits(&mut words, n_bits);
        if carry != W::ZERO {
            words.push(carry);
        }
        shift_words_up(&mut words, n_words);
    }
}

impl<W: Word> ShrAssign<usize> for UIntXL<W> {
    /// Note that "right" means "lower number".
    fn shr_assign(&mut self, distance: usize) {
        let (n_words, n_bits) = split::<W>(distance);
        let mut words = self.modify();
        if n_words >= words.len() {
            words.clear();
            return;
        }
        let l = words.len();
        words.copy_within(n_words.., 0);
        words.truncate(l - n_words);
        shr_bits(&mut words, n_bits, W::ZERO);
    }
}

impl<W: Word> ShlAssign<usize> for IntXL<W> {
    /// Multiplication by `2^distance`; never loses bits.
    fn shl_assign(&mut self, distance: usize) {
        if self.is_zero() {
            return;
        }
        let (n_words, n_bits) = split::<W>(distance);
        // the sign word catches the bits shifted out of the top
        let ext = self.storage.sign_extension();
        self.storage.append(ext);
        let mut words = self.modify();
        shl_bits(&mut words, n_bits);
        shift_words_up(&mut words, n_words);
    }
}

impl<W: Word> ShrAssign<usize> for IntXL<W> {
    /// Arithmetic shift: floor division by `2^distance`.
    fn shr_assign(&mut self, distance: usize) {
        let (n_words, n_bits) = split::<W>(distance);
        let ext = self.storage.sign_extension();
        let mut words = self.modify();
        if n_words >= words.len() {
            words.clear();
            words.push(ext);
            return;
        }
        let l = words.len();
        words.copy_within(n_words.., 0);
        words.truncate(l - n_words);
        shr_bits(&mut words, n_bits, ext);
    }
}

forward_shift!(impl Shl, shl, ShlAssign, shl_assign for UIntXL);
forward_shift!(impl Shr, shr, ShrAssign, shr_assign for UIntXL);
forward_shift!(impl Shl, shl, ShlAssign, shl_assign for IntXL);
forward_shift!(impl Shr, shr, ShrAssign, shr_assign for IntXL);

impl<W: Word> UIntXL<W> {
    /// Rotate left within [`Self::bit_width`].
    ///
    /// The width is that of the normalized storage, so a rotation that
    /// moves zeros into the top word also shrinks the width of the result.
    pub fn rotate_left(&self, distance: usize) -> Self {
        let l = self.words().len();
        let width = self.bit_width();
        let distance = distance % width;
        if distance == 0 {
            return self.clone();
        }

        let mut high = self << distance;
        high.storage.resize_max(l);
        high.storage.normalize(Form::Unsigned);
        let low = self >> (width - distance);
        high | low
    }

    /// Rotate right within [`Self::bit_width`].
    pub fn rotate_right(&self, distance: usize) -> Self {
        let width = self.bit_width();
        self.rotate_left(width - distance % width)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slice_shifts() {
        let mut words = [0x81u8, 0x42];
        assert_eq!(shl_bits(&mut words, 1), 0);
        assert_eq!(words, [0x02, 0x85]);
        assert_eq!(shl_bits(&mut words, 4), 0x08);
        assert_eq!(words, [0x20, 0x50]);

        shr_bits(&mut words, 4, 0xFF);
        assert_eq!(words, [0x02, 0xF5]);
        shr_bits(&mut words, 0, 0xFF);
        assert_eq!(words, [0x02, 0xF5]);
    }

    #[test]
    fn unsigned_shifts() {
        let x = UIntXL::<u8>::from_words(&[0x81, 0x01]);
        assert_eq!(&x << 0, x);
        assert_eq!((&x << 1).words(), [0x02, 0x03]);
        assert_eq!((&x << 8).words(), [0x00, 0x81, 0x01]);
        assert_eq!((&x << 15).words(), [0x00, 0x80, 0xC0]);
        assert_eq!((&x >> 1).words(), [0xC0]);
        assert_eq!((&x >> 8).words(), [0x01]);
        assert_eq!((&x >> 9).words(), [0x00]);
        assert!((&x >> 16).is_zero());
        assert!((&x >> 1000).is_zero());
        assert!((UIntXL::<u8>::zero() << 1000).is_zero());

        let mut y = x.clone();
        y <<= 20;
        y >>= 20;
        assert_eq!(y, x);
        assert!(y.is_normal());
    }

    #[test]
    fn signed_shifts() {
        let minus_three = IntXL::<u8>::from_words(&[0xFD]);
        assert_eq!((&minus_three << 1).words(), [0xFA]);
        assert_eq!((&minus_three << 8).words(), [0x00, 0xFD]);
        assert_eq!((&minus_three << 7).words(), [0x80, 0xFE]);
        // floor(-3 / 2) = -2
        assert_eq!((&minus_three >> 1).words(), [0xFE]);
        assert_eq!((&minus_three >> 100), IntXL::minus_one());

        let x = IntXL::<u8>::from_words(&[0x40]);
        assert_eq!((&x << 1).words(), [0x80, 0x00]);
        assert_eq!((&x >> 7), IntXL::zero());

        let x = IntXL::<u8>::from_words(&[0x00, 0x80]);
        assert_eq!((&x >> 8).words(), [0x80]);
        assert_eq!((&x >> 15).words(), [0xFF]);
        assert_eq!((&x >> 3).words(), [0x00, 0xF0]);
    }

    #[test]
    fn signed_round_trip_through_high_bit() {
        let one = IntXL::<u64>::one();
        let shifted = &one << 255;
        assert_eq!(shifted.words(), [0, 0, 0, 1 << 63, 0]);
        assert_eq!(shifted >> 255, one);
    }

    #[test]
    fn rotation() {
        // Rotate 0x0001_0002 left by 4 bits within 32 bits.
        let x = UIntXL::<u32>::from_digit(0x0001_0002);
        assert_eq!(x.rotate_left(4).words(), [0x0010_0020]);

        let y = UIntXL::<u32>::from_digit(0x8000_0001);
        assert_eq!(y.rotate_left(1).words(), [0x0000_0003]);
        assert_eq!(y.rotate_right(1).words(), [0xC000_0000]);
        assert_eq!(y.rotate_left(32), y);
        assert_eq!(y.rotate_left(33), y.rotate_left(1));

        let z = UIntXL::<u8>::from_words(&[0x01, 0x80]);
        assert_eq!(z.rotate_left(4).words(), [0x18]);
        assert!(z.rotate_left(4).is_normal());
        assert_eq!(z.rotate_right(4).words(), [0x00, 0x18]);
        assert!(UIntXL::<u8>::zero().rotate_left(3).is_zero());
    }

    quickcheck::quickcheck! {
        fn shl_then_shr_is_identity(a: Vec<u32>, distance: u16) -> bool {
            let x = UIntXL::<u32>::from_words(&a);
            let distance = distance as usize;
            let shifted = &x << distance;
            shifted.is_normal() && &shifted >> distance == x
        }

        fn signed_shl_multiplies(a: Vec<u16>, distance: u8) -> bool {
            let x = IntXL::<u16>::from_words(&a);
            let mut power = crate::UIntXL::<u16>::zero();
            power.set_bit(distance as usize);
            &x << distance as usize == &x * &IntXL::from(power)
        }

        fn signed_shr_floors(a: Vec<u32>, distance: u8) -> bool {
            let x = IntXL::<u32>::from_words(&a);
            let shifted = &x >> distance as usize;
            let back = &shifted << distance as usize;
            // back <= x < back + 2^distance
            let mut step = IntXL::<u32>::one();
            step <<= distance as usize;
            shifted.is_normal() && back <= x && x < &back + &step
        }
    }
}
