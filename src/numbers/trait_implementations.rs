use core::{cmp::Ordering, fmt, iter::{Product, Sum}};

use super::{IntXL, Limbs, UIntXL};
use crate::Word;

impl<W: Word> Default for UIntXL<W> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<W: Word> Default for IntXL<W> {
    fn default() -> Self {
        Self::zero()
    }
}

// Since we store little-endian, comparison needs to start at the last
// digit, instead of at the first as the derived / default implementation would.
impl<W: Word> Ord for UIntXL<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        Limbs::new(self.words()).cmp(Limbs::new(other.words()))
    }
}

impl<W: Word> PartialOrd for UIntXL<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Word> Ord for IntXL<W> {
    /// Signs first; for equal signs, the shortest encodings compare like
    /// their word lengths, then like their words from the top.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (negative, _) => {
                let (m, n) = (self.words(), other.words());
                let by_length = m.len().cmp(&n.len());
                if by_length != Ordering::Equal {
                    return if negative { by_length.reverse() } else { by_length };
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
    }
}

impl<W: Word> PartialOrd for IntXL<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(not(feature = "hex-debug"))]
impl<W: Word> fmt::Debug for UIntXL<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UIntXL").field(&self.words()).finish()
    }
}

#[cfg(not(feature = "hex-debug"))]
impl<W: Word> fmt::Debug for IntXL<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntXL").field(&self.words()).finish()
    }
}

#[cfg(feature = "hex-debug")]
impl<W: Word> fmt::Debug for UIntXL<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_be_bytes();
        write!(f, "UIntXL({})", delog::hex_str!(bytes.as_slice()))
    }
}

#[cfg(feature = "hex-debug")]
impl<W: Word> fmt::Debug for IntXL<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_signed_be_bytes();
        write!(f, "IntXL({})", delog::hex_str!(bytes.as_slice()))
    }
}

impl<W: Word> Sum for UIntXL<W> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |sum, x| sum + x)
    }
}

impl<'a, W: Word> Sum<&'a UIntXL<W>> for UIntXL<W> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |sum, x| sum + x)
    }
}

impl<W: Word> Product for UIntXL<W> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |product, x| product * x)
    }
}

impl<'a, W: Word> Product<&'a UIntXL<W>> for UIntXL<W> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |product, x| product * x)
    }
}

impl<W: Word> Sum for IntXL<W> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |sum, x| sum + x)
    }
}

impl<'a, W: Word> Sum<&'a IntXL<W>> for IntXL<W> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |sum, x| sum + x)
    }
}

impl<W: Word> Product for IntXL<W> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |product, x| product * x)
    }
}

impl<'a, W: Word> Product<&'a IntXL<W>> for IntXL<W> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |product, x| product * x)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unsigned_ordering() {
        let a = UIntXL::<u8>::from_words(&[0xFF]);
        let b = UIntXL::<u8>::from_words(&[0x00, 0x01]);
        let c = UIntXL::<u8>::from_words(&[0x01, 0x01]);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(c.cmp(&c.clone()), Ordering::Equal);
        assert_eq!(UIntXL::<u8>::default(), UIntXL::zero());
    }

    #[test]
    fn signed_ordering() {
        let values: &[i64] = &[i64::MIN, -65536, -257, -256, -129, -128, -1, 0, 1, 127, 128, 255, 256, i64::MAX];
        for pair in values.windows(2) {
            let (a, b) = (IntXL::<u8>::from(pair[0]), IntXL::<u8>::from(pair[1]));
            assert!(a < b, "{} < {}", pair[0], pair[1]);
            assert!(b > a);
        }
        assert_eq!(IntXL::<u8>::default(), IntXL::zero());
    }

    #[test]
    fn sums_and_products() {
        let xs: Vec<UIntXL<u8>> = (1u8..=5).map(UIntXL::from).collect();
        assert_eq!(xs.iter().sum::<UIntXL<u8>>(), UIntXL::from(15u8));
        assert_eq!(xs.iter().product::<UIntXL<u8>>(), UIntXL::from(120u8));
        assert_eq!(xs.into_iter().product::<UIntXL<u8>>(), UIntXL::from(120u8));

        let ys: Vec<IntXL<u8>> = (-3i8..=3).filter(|&y| y != 0).map(IntXL::from).collect();
        assert_eq!(ys.iter().sum::<IntXL<u8>>(), IntXL::zero());
        assert_eq!(ys.iter().product::<IntXL<u8>>(), IntXL::from(-36i32));
        assert_eq!(core::iter::empty::<IntXL<u8>>().product::<IntXL<u8>>(), IntXL::one());
    }

    #[cfg(not(feature = "hex-debug"))]
    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", UIntXL::<u8>::from_words(&[1, 2])), "UIntXL([1, 2])");
        assert_eq!(format!("{:?}", IntXL::<u8>::minus_one()), "IntXL([255])");
    }
}
