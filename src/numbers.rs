use alloc::vec::Vec;
use core::{cmp::Ordering, ops::{Deref, DerefMut}};

use ref_cast::RefCast;
use zeroize::Zeroize;

use crate::{Digit, Word};

mod conversion;
mod trait_implementations;

/// Which of the two normal forms a word sequence is kept in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Form {
    /// The most significant word is non-zero, or the value is a single zero word.
    Unsigned,
    /// The most significant word is not just the sign extension of the word below.
    Signed,
}

/// Nonempty sequence of words, least significant first.
///
/// Implementation ***must ensure***:
/// - `self.words.len() >= 1` at every observable boundary
/// - the words are normalized in the [`Form`] of the owning integer
///
/// The owning integer type knows the form; `Storage` itself does not.
#[derive(Clone, Eq, PartialEq, Hash)]
pub(crate) struct Storage<W: Word> {
    words: Vec<W>,
}

/// Exclusive access to the words of a [`Storage`], normalizing when dropped.
///
/// In-place algorithms may leave the words in any state (even empty) while
/// they hold this guard; the invariants are restored on every exit path,
/// including unwinding.
pub(crate) struct Normalizing<'a, W: Word> {
    words: &'a mut Vec<W>,
    form: Form,
}

/// Trim redundant most significant words, keeping at least one.
pub(crate) fn normalize<W: Word>(words: &mut Vec<W>, form: Form) {
    match form {
        Form::Unsigned => {
            while words.len() > 1 && words[words.len() - 1] == W::ZERO {
                words.pop();
            }
        }
        Form::Signed => {
            while words.len() > 1 && words[words.len() - 1] == words[words.len() - 2].sign_extension() {
                words.pop();
            }
        }
    }
    if words.is_empty() {
        words.push(W::ZERO);
    }
}

impl<W: Word> Storage<W> {
    pub(crate) fn zero() -> Self {
        Self { words: alloc::vec![W::ZERO] }
    }

    pub(crate) fn from_digit(digit: W) -> Self {
        Self { words: alloc::vec![digit] }
    }

    /// Takes ownership of the words, then normalizes them.
    pub(crate) fn from_vec(mut words: Vec<W>, form: Form) -> Self {
        normalize(&mut words, form);
        Self { words }
    }

    pub(crate) fn words(&self) -> &[W] {
        &self.words
    }

    pub(crate) fn into_vec(self) -> Vec<W> {
        self.words
    }

    pub(crate) fn len(&self) -> usize {
        self.words.len()
    }

    pub(crate) fn last(&self) -> W {
        self.words[self.words.len() - 1]
    }

    /// The word all further (implicit) words of a two's-complement reading equal.
    pub(crate) fn sign_extension(&self) -> W {
        self.last().sign_extension()
    }

    pub(crate) fn append(&mut self, word: W) {
        self.words.push(word);
    }

    /// Pad with `fill` up to `count` words. Never shrinks.
    pub(crate) fn resize_min(&mut self, count: usize, fill: W) {
        if count > self.words.len() {
            self.words.reserve(count - self.words.len());
            self.words.resize(count, fill);
        }
    }

    /// Truncate down to `count` words (but not below one). Never grows.
    pub(crate) fn resize_max(&mut self, count: usize) {
        self.words.truncate(count.max(1));
    }

    pub(crate) fn normalize(&mut self, form: Form) {
        normalize(&mut self.words, form);
    }

    pub(crate) fn normalize_appending(&mut self, word: W, form: Form) {
        self.words.push(word);
        normalize(&mut self.words, form);
    }

    /// Acquire the words for in-place mutation.
    pub(crate) fn modify(&mut self, form: Form) -> Normalizing<'_, W> {
        Normalizing { words: &mut self.words, form }
    }

    #[cfg(test)]
    pub(crate) fn is_normal(&self, form: Form) -> bool {
        let mut copy = self.words.clone();
        normalize(&mut copy, form);
        copy.len() == self.words.len()
    }
}

impl<W: Word> Deref for Normalizing<'_, W> {
    type Target = Vec<W>;
    fn deref(&self) -> &Self::Target {
        &*self.words
    }
}

impl<W: Word> DerefMut for Normalizing<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.words
    }
}

impl<W: Word> Drop for Normalizing<'_, W> {
    fn drop(&mut self) {
        normalize(&mut *self.words, self.form);
    }
}

// `Vec::zeroize` also wipes the spare capacity left behind by truncations.
impl<W: Word> Zeroize for Storage<W> {
    fn zeroize(&mut self) {
        self.words.zeroize();
        self.words.push(W::ZERO);
    }
}

/// Little-endian word slice, with numeric (not lexicographic) ordering.
///
/// High zero words are insignificant, so this compares windows of a larger
/// number as well as normalized ones.
#[derive(RefCast)]
#[repr(transparent)]
pub(crate) struct Limbs<W: Word>([W]);

impl<W: Word> Limbs<W> {
    pub(crate) fn new(words: &[W]) -> &Self {
        Limbs::ref_cast(words)
    }

    /// The words up to and including the highest non-zero one.
    pub(crate) fn significant(&self) -> &[W] {
        let l = self.0.iter()
            .rposition(|&word| word != W::ZERO)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.0[..l]
    }
}

// Since we store little-endian, comparison needs to start at the last
// digit, instead of at the first as the derived / default implementation would.
impl<W: Word> Ord for Limbs<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        let m = self.significant();
        let n = other.significant();
        match m.len().cmp(&n.len()) {
            Ordering::Equal => {}
            not_equal => return not_equal,
        }
        for (a, b) in m.iter().rev().zip(n.iter().rev()) {
            match a.cmp(b) {
                Ordering::Equal => (),
                not_equal => return not_equal,
            }
        }
        Ordering::Equal
    }
}

impl<W: Word> PartialOrd for Limbs<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Word> PartialEq for Limbs<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Word> Eq for Limbs<W> {}

/// Unsigned integer of flexible width.
///
/// Internal representation as little-endian words, with the most significant
/// word non-zero (or the single word zero).
///
/// Arithmetic grows the storage as needed, so `+` and `*` never overflow.
/// Subtraction below zero and division by zero trap in the operators; use
/// [`UIntXL::overflowing_sub`], [`UIntXL::checked_div`] and friends to handle
/// them.
#[derive(Clone, Eq, PartialEq, Hash, Zeroize)]
pub struct UIntXL<W: Word = Digit> {
    pub(crate) storage: Storage<W>,
}

/// Signed integer of flexible width, in two's complement.
///
/// The stored words are the shortest two's-complement encoding of the
/// value; all words beyond are implicitly equal to the sign extension of the
/// most significant one.
#[derive(Clone, Eq, PartialEq, Hash, Zeroize)]
pub struct IntXL<W: Word = Digit> {
    pub(crate) storage: Storage<W>,
}

// c'tors and such
impl<W: Word> UIntXL<W> {
    pub fn zero() -> Self {
        Self { storage: Storage::zero() }
    }

    pub fn one() -> Self {
        Self::from_digit(W::ONE)
    }

    pub fn from_digit(digit: W) -> Self {
        Self { storage: Storage::from_digit(digit) }
    }

    /// From little-endian words; high zero words are accepted.
    pub fn from_words(words: &[W]) -> Self {
        Self::from_vec(words.to_vec())
    }

    pub(crate) fn from_vec(words: Vec<W>) -> Self {
        Self { storage: Storage::from_vec(words, Form::Unsigned) }
    }

    /// The normalized little-endian words, never empty.
    pub fn words(&self) -> &[W] {
        self.storage.words()
    }

    pub fn into_words(self) -> Vec<W> {
        self.storage.into_vec()
    }

    pub(crate) fn modify(&mut self) -> Normalizing<'_, W> {
        self.storage.modify(Form::Unsigned)
    }

    pub fn is_zero(&self) -> bool {
        self.words() == [W::ZERO]
    }

    pub fn is_one(&self) -> bool {
        self.words() == [W::ONE]
    }

    /// The single word, if the value fits in one.
    pub fn to_digit(&self) -> Option<W> {
        match self.words() {
            [digit] => Some(*digit),
            _ => None,
        }
    }

    /// Width of the storage in bits (a multiple of `W::BITS`).
    pub fn bit_width(&self) -> usize {
        self.storage.len() * W::BITS as usize
    }

    /// Number of significant bits, zero for zero.
    pub fn bits(&self) -> usize {
        self.bit_width() - self.leading_zeros() as usize
    }

    /// Leading zeros within [`Self::bit_width`].
    pub fn leading_zeros(&self) -> u32 {
        self.storage.last().leading_zeros()
    }

    /// Trailing zeros; [`Self::bit_width`] for zero.
    pub fn trailing_zeros(&self) -> usize {
        trailing_zeros(self.words())
    }

    pub fn count_ones(&self) -> usize {
        self.words().iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_power_of_two(&self) -> bool {
        self.count_ones() == 1
    }

    /// Bit `index`, zero beyond the storage.
    pub fn bit(&self, index: usize) -> bool {
        let (word, bit) = split_index::<W>(index);
        self.words().get(word).map_or(false, |&w| (w >> bit).least_significant_bit())
    }

    pub fn set_bit(&mut self, index: usize) {
        let (word, bit) = split_index::<W>(index);
        self.storage.resize_min(word + 1, W::ZERO);
        let mut words = self.modify();
        words[word] |= W::ONE << bit;
    }

    pub fn clear_bit(&mut self, index: usize) {
        let (word, bit) = split_index::<W>(index);
        if word < self.storage.len() {
            let mut words = self.modify();
            words[word] &= !(W::ONE << bit);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_normal(&self) -> bool {
        self.storage.is_normal(Form::Unsigned)
    }
}

impl<W: Word> IntXL<W> {
    pub fn zero() -> Self {
        Self { storage: Storage::zero() }
    }

    pub fn one() -> Self {
        Self { storage: Storage::from_digit(W::ONE) }
    }

    pub fn minus_one() -> Self {
        Self { storage: Storage::from_digit(W::MAX) }
    }

    /// A non-negative digit; the word is *not* read as two's complement.
    pub fn from_digit(digit: W) -> Self {
        let mut storage = Storage::from_digit(digit);
        storage.normalize_appending(W::ZERO, Form::Signed);
        Self { storage }
    }

    /// From little-endian two's-complement words; redundant sign-extension
    /// words are accepted. An empty slice reads as zero.
    pub fn from_words(words: &[W]) -> Self {
        Self::from_vec(words.to_vec())
    }

    pub(crate) fn from_vec(words: Vec<W>) -> Self {
        Self { storage: Storage::from_vec(words, Form::Signed) }
    }

    /// From a sign and a magnitude; `-0` is zero.
    pub fn from_sign_and_magnitude(negative: bool, magnitude: UIntXL<W>) -> Self {
        let mut words = magnitude.into_words();
        if words[words.len() - 1].most_significant_bit() {
            words.push(W::ZERO);
        }
        if negative {
            crate::arithmetic::negate_wrapping(&mut words);
        }
        Self::from_vec(words)
    }

    /// The shortest little-endian two's-complement words, never empty.
    pub fn words(&self) -> &[W] {
        self.storage.words()
    }

    pub fn into_words(self) -> Vec<W> {
        self.storage.into_vec()
    }

    pub(crate) fn modify(&mut self) -> Normalizing<'_, W> {
        self.storage.modify(Form::Signed)
    }

    pub fn is_zero(&self) -> bool {
        self.words() == [W::ZERO]
    }

    pub fn is_one(&self) -> bool {
        self.words() == [W::ONE]
    }

    pub fn is_negative(&self) -> bool {
        self.storage.last().most_significant_bit()
    }

    pub fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    /// `-1`, `0` or `1`.
    pub fn signum(&self) -> Self {
        if self.is_negative() {
            Self::minus_one()
        } else if self.is_zero() {
            Self::zero()
        } else {
            Self::one()
        }
    }

    /// Absolute value, as unsigned integer.
    pub fn magnitude(&self) -> UIntXL<W> {
        let mut words = self.words().to_vec();
        if self.is_negative() {
            crate::arithmetic::negate_wrapping(&mut words);
        }
        UIntXL::from_vec(words)
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() { -self } else { self.clone() }
    }

    /// Width of the storage in bits (a multiple of `W::BITS`).
    pub fn bit_width(&self) -> usize {
        self.storage.len() * W::BITS as usize
    }

    /// The minimal two's-complement width, sign bit included.
    pub fn significant_bits(&self) -> usize {
        let last = self.storage.last();
        let top = if last.most_significant_bit() { !last } else { last };
        self.bit_width() - top.leading_zeros() as usize + 1
    }

    /// Trailing zeros; [`Self::bit_width`] for zero.
    pub fn trailing_zeros(&self) -> usize {
        trailing_zeros(self.words())
    }

    /// Bit `index` of the infinite two's-complement expansion.
    pub fn bit(&self, index: usize) -> bool {
        let (word, bit) = split_index::<W>(index);
        match self.words().get(word) {
            Some(&w) => (w >> bit).least_significant_bit(),
            None => self.is_negative(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_normal(&self) -> bool {
        self.storage.is_normal(Form::Signed)
    }
}

fn split_index<W: Word>(index: usize) -> (usize, u32) {
    (index / W::BITS as usize, (index % W::BITS as usize) as u32)
}

fn trailing_zeros<W: Word>(words: &[W]) -> usize {
    match words.iter().position(|&word| word != W::ZERO) {
        Some(i) => i * W::BITS as usize + words[i].trailing_zeros() as usize,
        None => words.len() * W::BITS as usize,
    }
}
