//! Conversions from and to native integers, bytes and floats.

use alloc::vec::Vec;
use core::convert::TryFrom;

use super::{IntXL, UIntXL};
use crate::{Error, Result, Word};

fn words_from_u128<W: Word>(mut value: u128) -> Vec<W> {
    let mut words = Vec::with_capacity((128 / W::BITS) as usize);
    loop {
        words.push(W::from_u128_truncating(value));
        value = value.checked_shr(W::BITS).unwrap_or(0);
        if value == 0 {
            return words;
        }
    }
}

/// All 128 bits, as two's complement.
fn words_from_i128<W: Word>(value: i128) -> Vec<W> {
    let bits = value as u128;
    (0..128 / W::BITS)
        .map(|i| W::from_u128_truncating(bits >> (i * W::BITS)))
        .collect()
}

/// `None` if more than 128 bits are significant.
fn unsigned_to_u128<W: Word>(words: &[W]) -> Option<u128> {
    if words.len() * W::BITS as usize > 128 && words[128 / W::BITS as usize..].iter().any(|&w| w != W::ZERO) {
        return None;
    }
    Some(words.iter().rev().fold(0u128, |acc, &word| {
        acc.checked_shl(W::BITS).unwrap_or(0) | word.to_u128()
    }))
}

/// `None` if the value needs more than 128 bits of two's complement.
fn signed_to_i128<W: Word>(x: &IntXL<W>) -> Option<i128> {
    if x.significant_bits() > 128 {
        return None;
    }
    let ext = x.storage.sign_extension();
    let bits = (0..128 / W::BITS).fold(0u128, |acc, i| {
        let word = x.words().get(i as usize).copied().unwrap_or(ext);
        acc | (word.to_u128() << (i * W::BITS))
    });
    Some(bits as i128)
}

macro_rules! impl_unsigned_natives {
    ($($native:ty),*) => {$(
        impl<W: Word> From<$native> for UIntXL<W> {
            fn from(value: $native) -> Self {
                Self::from_vec(words_from_u128(value as u128))
            }
        }

        impl<W: Word> From<$native> for IntXL<W> {
            fn from(value: $native) -> Self {
                let mut words = words_from_u128(value as u128);
                words.push(W::ZERO);
                Self::from_vec(words)
            }
        }

        impl<W: Word> TryFrom<&UIntXL<W>> for $native {
            type Error = Error;

            fn try_from(x: &UIntXL<W>) -> Result<$native> {
                let value = unsigned_to_u128(x.words()).ok_or(Error::TooLarge)?;
                <$native>::try_from(value).map_err(|_| Error::TooLarge)
            }
        }

        impl<W: Word> TryFrom<&IntXL<W>> for $native {
            type Error = Error;

            fn try_from(x: &IntXL<W>) -> Result<$native> {
                if x.is_negative() {
                    return Err(Error::Negative);
                }
                <$native>::try_from(&x.magnitude())
            }
        }
    )*};
}

macro_rules! impl_signed_natives {
    ($($native:ty),*) => {$(
        impl<W: Word> TryFrom<$native> for UIntXL<W> {
            type Error = Error;

            fn try_from(value: $native) -> Result<Self> {
                if value < 0 {
                    return Err(Error::Negative);
                }
                Ok(Self::from_vec(words_from_u128(value as u128)))
            }
        }

        impl<W: Word> From<$native> for IntXL<W> {
            fn from(value: $native) -> Self {
                Self::from_vec(words_from_i128(value as i128))
            }
        }

        impl<W: Word> TryFrom<&UIntXL<W>> for $native {
            type Error = Error;

            fn try_from(x: &UIntXL<W>) -> Result<$native> {
                let value = unsigned_to_u128(x.words()).ok_or(Error::TooLarge)?;
                <$native>::try_from(value).map_err(|_| Error::TooLarge)
            }
        }

        impl<W: Word> TryFrom<&IntXL<W>> for $native {
            type Error = Error;

            fn try_from(x: &IntXL<W>) -> Result<$native> {
                let value = signed_to_i128(x).ok_or(Error::TooLarge)?;
                <$native>::try_from(value).map_err(|_| Error::TooLarge)
            }
        }
    )*};
}

impl_unsigned_natives!(u8, u16, u32, u64, u128, usize);
impl_signed_natives!(i8, i16, i32, i64, i128, isize);

impl<W: Word> From<UIntXL<W>> for IntXL<W> {
    fn from(x: UIntXL<W>) -> Self {
        let mut words = x.into_words();
        words.push(W::ZERO);
        Self::from_vec(words)
    }
}

impl<W: Word> From<&UIntXL<W>> for IntXL<W> {
    fn from(x: &UIntXL<W>) -> Self {
        Self::from(x.clone())
    }
}

impl<W: Word> TryFrom<IntXL<W>> for UIntXL<W> {
    type Error = Error;

    fn try_from(x: IntXL<W>) -> Result<Self> {
        if x.is_negative() {
            return Err(Error::Negative);
        }
        Ok(Self::from_vec(x.into_words()))
    }
}

impl<W: Word> TryFrom<&IntXL<W>> for UIntXL<W> {
    type Error = Error;

    fn try_from(x: &IntXL<W>) -> Result<Self> {
        Self::try_from(x.clone())
    }
}

fn words_from_le_bytes<W: Word>(bytes: &[u8], fill: u8) -> Vec<W> {
    let per_word = (W::BITS / 8) as usize;
    bytes
        .chunks(per_word)
        .map(|chunk| {
            let word = (0..per_word).fold(0u128, |acc, i| {
                let byte = chunk.get(i).copied().unwrap_or(fill);
                acc | ((byte as u128) << (8 * i))
            });
            W::from_u128_truncating(word)
        })
        .collect()
}

fn le_bytes_from_words<W: Word>(words: &[W]) -> Vec<u8> {
    let per_word = (W::BITS / 8) as usize;
    let mut bytes = Vec::with_capacity(words.len() * per_word);
    for word in words {
        let word = word.to_u128();
        bytes.extend((0..per_word).map(|i| (word >> (8 * i)) as u8));
    }
    bytes
}

impl<W: Word> UIntXL<W> {
    /// From big-endian bytes; leading zero bytes are accepted.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut bytes = bytes.to_vec();
        bytes.reverse();
        Self::from_le_bytes(&bytes)
    }

    /// From little-endian bytes; trailing zero bytes are accepted.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        Self::from_vec(words_from_le_bytes(bytes, 0))
    }

    /// Minimal big-endian bytes, `[0]` for zero.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut bytes = self.to_le_bytes();
        bytes.reverse();
        bytes
    }

    /// Minimal little-endian bytes, `[0]` for zero.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = le_bytes_from_words(self.words());
        while bytes.len() > 1 && bytes[bytes.len() - 1] == 0 {
            bytes.pop();
        }
        bytes
    }

    /// The integral part of a non-negative, finite `value`.
    ///
    /// `None` for NaN, infinities, and values at or below `-1`.
    pub fn from_f64(value: f64) -> Option<Self> {
        match IntXL::<W>::try_from_f64(value) {
            Ok(x) => Self::try_from(x).ok(),
            Err(_) => None,
        }
    }
}

impl<W: Word> IntXL<W> {
    /// From big-endian two's-complement bytes; the sign is the top bit of
    /// the first byte, and an empty slice reads as zero.
    pub fn from_signed_be_bytes(bytes: &[u8]) -> Self {
        let mut bytes = bytes.to_vec();
        bytes.reverse();
        Self::from_signed_le_bytes(&bytes)
    }

    /// From little-endian two's-complement bytes; the sign is the top bit of
    /// the last byte, and an empty slice reads as zero.
    pub fn from_signed_le_bytes(bytes: &[u8]) -> Self {
        let fill = match bytes.last() {
            Some(&byte) if byte & 0x80 != 0 => 0xFF,
            _ => 0x00,
        };
        Self::from_vec(words_from_le_bytes(bytes, fill))
    }

    /// Minimal big-endian two's-complement bytes.
    pub fn to_signed_be_bytes(&self) -> Vec<u8> {
        let mut bytes = self.to_signed_le_bytes();
        bytes.reverse();
        bytes
    }

    /// Minimal little-endian two's-complement bytes.
    pub fn to_signed_le_bytes(&self) -> Vec<u8> {
        let mut bytes = le_bytes_from_words(self.words());
        while bytes.len() > 1 {
            let top = bytes[bytes.len() - 1];
            let next_sign = if bytes[bytes.len() - 2] & 0x80 != 0 { 0xFF } else { 0x00 };
            if top != next_sign {
                break;
            }
            bytes.pop();
        }
        bytes
    }

    /// The integral part of a finite `value`, rounding towards zero.
    pub fn try_from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::NotFinite);
        }

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let exponent = ((bits >> 52) & 0x7FF) as i64;
        // zeros and subnormals are below one
        if exponent == 0 {
            return Ok(Self::zero());
        }
        let mantissa = (bits & ((1 << 52) - 1)) | (1 << 52);

        // value = mantissa * 2^(exponent - 1075)
        let shift = exponent - 1075;
        let magnitude = if shift >= 0 {
            UIntXL::<W>::from(mantissa) << shift as usize
        } else if shift > -53 {
            UIntXL::from(mantissa >> -shift)
        } else {
            UIntXL::zero()
        };
        Ok(Self::from_sign_and_magnitude(negative, magnitude))
    }

    /// Like [`Self::try_from_f64`], with `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        Self::try_from_f64(value).ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn natives_into_words() {
        assert_eq!(UIntXL::<u8>::from(0x0102_0304u32).words(), [4, 3, 2, 1]);
        assert_eq!(UIntXL::<u64>::from(u128::MAX).words(), [u64::MAX, u64::MAX]);
        assert_eq!(UIntXL::<u16>::from(0u64).words(), [0]);

        assert_eq!(IntXL::<u8>::from(-1i64).words(), [0xFF]);
        assert_eq!(IntXL::<u8>::from(-129i32).words(), [0x7F, 0xFF]);
        assert_eq!(IntXL::<u8>::from(128u8).words(), [0x80, 0x00]);
        assert_eq!(IntXL::<u32>::from(i128::MIN).words(), [0, 0, 0, 0x8000_0000]);

        assert_eq!(UIntXL::<u32>::try_from(-1i8), Err(Error::Negative));
        assert_eq!(UIntXL::<u32>::try_from(7i8), Ok(UIntXL::from_digit(7)));
    }

    #[test]
    fn words_into_natives() {
        let x = UIntXL::<u8>::from_words(&[0x34, 0x12]);
        assert_eq!(u16::try_from(&x), Ok(0x1234));
        assert_eq!(u8::try_from(&x), Err(Error::TooLarge));
        assert_eq!(i16::try_from(&x), Ok(0x1234));

        let big = UIntXL::<u64>::from_words(&[0, 0, 1]);
        assert_eq!(u128::try_from(&big), Err(Error::TooLarge));

        let y = IntXL::<u8>::from(-300i32);
        assert_eq!(i16::try_from(&y), Ok(-300));
        assert_eq!(i8::try_from(&y), Err(Error::TooLarge));
        assert_eq!(u64::try_from(&y), Err(Error::Negative));
        assert_eq!(i128::try_from(&IntXL::<u32>::from(i128::MIN)), Ok(i128::MIN));
        assert_eq!(u128::try_from(&IntXL::<u32>::from(u128::MAX)), Ok(u128::MAX));
        assert_eq!(i128::try_from(&IntXL::<u32>::from(u128::MAX)), Err(Error::TooLarge));
    }

    #[test]
    fn between_signed_and_unsigned() {
        let x = UIntXL::<u8>::from_digit(0xFF);
        let y = IntXL::from(&x);
        assert_eq!(y.words(), [0xFF, 0x00]);
        assert_eq!(UIntXL::<u8>::try_from(&y), Ok(x));
        assert_eq!(UIntXL::<u8>::try_from(IntXL::<u8>::minus_one()), Err(Error::Negative));
    }

    #[test]
    fn bytes() {
        let x = UIntXL::<u32>::from_be_bytes(&hex!("00 00 01 02 03 04 05 06 07 08 09"));
        assert_eq!(x.words(), [0x0607_0809, 0x0203_0405, 0x01]);
        assert_eq!(x.to_be_bytes(), hex!("01 02 03 04 05 06 07 08 09"));
        assert_eq!(UIntXL::<u32>::from_le_bytes(&x.to_le_bytes()), x);
        assert_eq!(UIntXL::<u64>::zero().to_be_bytes(), [0]);
        assert_eq!(UIntXL::<u64>::from_be_bytes(&[]), UIntXL::zero());

        let y = IntXL::<u32>::from_signed_be_bytes(&hex!("FF 7F"));
        assert_eq!(y, IntXL::from(-129i32));
        assert_eq!(y.to_signed_be_bytes(), hex!("FF 7F"));
        assert_eq!(IntXL::<u16>::from(128u8).to_signed_be_bytes(), hex!("00 80"));
        assert_eq!(IntXL::<u16>::from(-128i8).to_signed_be_bytes(), hex!("80"));
        assert_eq!(IntXL::<u16>::minus_one().to_signed_le_bytes(), hex!("FF"));
        assert_eq!(IntXL::<u16>::from_signed_le_bytes(&[]), IntXL::zero());
    }

    #[test]
    fn floats() {
        assert_eq!(UIntXL::<u32>::from_f64(0.0), Some(UIntXL::zero()));
        assert_eq!(UIntXL::<u32>::from_f64(-0.5), Some(UIntXL::zero()));
        assert_eq!(UIntXL::<u32>::from_f64(-1.0), None);
        assert_eq!(UIntXL::<u32>::from_f64(f64::NAN), None);
        assert_eq!(UIntXL::<u32>::from_f64(f64::INFINITY), None);
        assert_eq!(UIntXL::<u32>::from_f64(4294967296.75), Some(UIntXL::from_words(&[0, 1])));

        let mut two_to_the_100 = UIntXL::<u32>::zero();
        two_to_the_100.set_bit(100);
        assert_eq!(UIntXL::from_f64(2f64.powi(100)), Some(two_to_the_100));

        assert_eq!(IntXL::<u8>::try_from_f64(-2.9), Ok(IntXL::from(-2i32)));
        assert_eq!(IntXL::<u8>::try_from_f64(f64::NEG_INFINITY), Err(Error::NotFinite));
        assert_eq!(IntXL::<u8>::from_f64(1e-300), Some(IntXL::zero()));
        assert_eq!(IntXL::<u64>::from_f64(-9007199254740993.0), Some(IntXL::from(-9007199254740992i64)));
    }
}
