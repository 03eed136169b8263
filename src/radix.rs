//! Text in radix 2 to 36.
//!
//! Radices whose digits tile a word exactly (powers of two whose bit count
//! divides `W::BITS`) map digit groups straight onto bits. All others go
//! through the largest power of the radix that fits in a word: decoding
//! multiplies in one such chunk at a time, encoding divides one out.

use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

use crate::arithmetic::{add_assign_at, div_rem_assign_digit, mul_digit_assign};
use crate::{Error, IntXL, Result, UIntXL, Word};

const LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Packing<W: Word> {
    /// `log2` bits per digit, `W::BITS / log2` digits per word.
    Perfect { log2: u32 },
    /// `per_word` digits per chunk, each chunk worth `power = radix^per_word`.
    Imperfect { per_word: usize, power: W },
}

impl<W: Word> Packing<W> {
    fn new(radix: u32) -> Self {
        if radix.is_power_of_two() {
            let log2 = radix.trailing_zeros();
            if W::BITS % log2 == 0 {
                return Packing::Perfect { log2 };
            }
        }

        let max = W::MAX.to_u128();
        let radix = radix as u128;
        let (mut per_word, mut power) = (1, radix);
        while power * radix <= max {
            power *= radix;
            per_word += 1;
        }
        Packing::Imperfect { per_word, power: W::from_u128_truncating(power) }
    }
}

fn check_radix(radix: u32) -> Result<()> {
    if (2..=36).contains(&radix) {
        Ok(())
    } else {
        Err(Error::InvalidRadix(radix))
    }
}

/// Bits needed for one digit, rounded up.
fn ceil_log2(radix: u32) -> usize {
    (u32::BITS - (radix - 1).leading_zeros()) as usize
}

/// Bits carried by one digit at least.
fn floor_log2(radix: u32) -> usize {
    (u32::BITS - 1 - radix.leading_zeros()) as usize
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

/// Digit values, most significant first, without leading zeros.
fn digit_values(text: &str, radix: u32) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(Error::EmptyDigits);
    }
    let mut values = Vec::with_capacity(text.len());
    for c in text.chars() {
        let value = c.to_digit(radix).ok_or(Error::InvalidDigit(c))?;
        if value != 0 || !values.is_empty() {
            values.push(value as u8);
        }
    }
    Ok(values)
}

/// Little-endian magnitude words of the big-endian `digits`.
fn decode_words<W: Word>(digits: &[u8], radix: u32) -> Vec<W> {
    if digits.is_empty() {
        return Vec::new();
    }
    let packing = Packing::<W>::new(radix);
    log::trace!("decoding {} digits in radix {} as {:?}", digits.len(), radix, packing);

    let chunk_value = |chunk: &[u8]| {
        W::from_u128_truncating(chunk.iter().fold(0u128, |value, &digit| value * radix as u128 + digit as u128))
    };

    match packing {
        Packing::Perfect { log2 } => digits
            .rchunks((W::BITS / log2) as usize)
            .map(chunk_value)
            .collect(),
        Packing::Imperfect { per_word, power } => {
            let capacity = (digits.len() * ceil_log2(radix) + W::BITS as usize - 1) / W::BITS as usize;
            let mut words = Vec::with_capacity(capacity);

            let head = match digits.len() % per_word {
                0 => per_word,
                partial => partial,
            };
            let (head, tail) = digits.split_at(head);
            words.push(chunk_value(head));
            for chunk in tail.chunks(per_word) {
                mul_digit_assign(&mut words, power);
                add_assign_at(&mut words, &[chunk_value(chunk)], 0);
            }
            debug_assert!(words.len() <= capacity);
            words
        }
    }
}

/// Appends `value` as exactly `width` digits, or as few as needed if `width`
/// is zero.
fn push_digits(text: &mut String, mut value: u128, radix: u32, width: usize, uppercase: bool) {
    let mut buffer = [0u8; 128];
    let mut start = buffer.len();
    while value != 0 || buffer.len() - start < width {
        start -= 1;
        buffer[start] = (value % radix as u128) as u8;
        value /= radix as u128;
    }
    let alphabet = if uppercase { UPPER } else { LOWER };
    text.extend(buffer[start..].iter().map(|&digit| alphabet[digit as usize] as char));
}

/// Big-endian digits of the significant magnitude `words`.
fn encode_words<W: Word>(words: &[W], radix: u32, uppercase: bool) -> String {
    let Some(&top) = words.last().filter(|&&top| top != W::ZERO) else {
        return String::from("0");
    };
    let bits = words.len() * W::BITS as usize - top.leading_zeros() as usize;
    let packing = Packing::<W>::new(radix);
    log::trace!("encoding {} bits in radix {} as {:?}", bits, radix, packing);

    match packing {
        Packing::Perfect { log2 } => {
            let log2 = log2 as usize;
            let count = (bits + log2 - 1) / log2;
            let mut text = String::with_capacity(count);
            for i in (0..count).rev() {
                let (word, shift) = (i * log2 / W::BITS as usize, (i * log2 % W::BITS as usize) as u32);
                let value = (words[word] >> shift).to_u128() & (radix as u128 - 1);
                push_digits(&mut text, value, radix, 1, uppercase);
            }
            text
        }
        Packing::Imperfect { per_word, power } => {
            let bound = (bits + per_word * floor_log2(radix) - 1) / (per_word * floor_log2(radix));
            let mut chunks = Vec::with_capacity(bound);
            let mut rest = words.to_vec();
            while !rest.is_empty() {
                chunks.push(div_rem_assign_digit(&mut rest, power));
                while rest.last() == Some(&W::ZERO) {
                    rest.pop();
                }
            }
            debug_assert!(chunks.len() <= bound);

            let mut text = String::with_capacity(chunks.len() * per_word);
            let mut chunks = chunks.iter().rev();
            if let Some(top) = chunks.next() {
                push_digits(&mut text, top.to_u128(), radix, 0, uppercase);
            }
            for chunk in chunks {
                push_digits(&mut text, chunk.to_u128(), radix, per_word, uppercase);
            }
            text
        }
    }
}

impl<W: Word> UIntXL<W> {
    /// Parse an optional sign and at least one digit in the given radix,
    /// case-insensitive.
    ///
    /// A minus sign is accepted only on zero.
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Self> {
        check_radix(radix)?;
        let (negative, digits) = split_sign(text);
        let digits = digit_values(digits, radix)?;
        if negative && !digits.is_empty() {
            return Err(Error::Negative);
        }
        Ok(Self::from_vec(decode_words(&digits, radix)))
    }

    /// [`Self::from_str_radix`], dropping the reason of failure.
    pub fn decode(text: &str, radix: u32) -> Option<Self> {
        Self::from_str_radix(text, radix).ok()
    }

    /// Panics if `radix` is not in `2..=36`.
    pub fn to_str_radix(&self, radix: u32, uppercase: bool) -> String {
        assert!(check_radix(radix).is_ok(), "radix {} is not in 2..=36", radix);
        encode_words(self.words(), radix, uppercase)
    }
}

impl<W: Word> IntXL<W> {
    /// Parse an optional sign and at least one digit in the given radix,
    /// case-insensitive.
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Self> {
        check_radix(radix)?;
        let (negative, digits) = split_sign(text);
        let digits = digit_values(digits, radix)?;
        let magnitude = UIntXL::from_vec(decode_words(&digits, radix));
        Ok(Self::from_sign_and_magnitude(negative, magnitude))
    }

    pub fn decode(text: &str, radix: u32) -> Option<Self> {
        Self::from_str_radix(text, radix).ok()
    }

    /// Sign and magnitude, so `-255` in radix 16 is `"-ff"`.
    ///
    /// Panics if `radix` is not in `2..=36`.
    pub fn to_str_radix(&self, radix: u32, uppercase: bool) -> String {
        let mut text = self.magnitude().to_str_radix(radix, uppercase);
        if self.is_negative() {
            text.insert(0, '-');
        }
        text
    }
}

impl<W: Word> FromStr for UIntXL<W> {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::from_str_radix(text, 10)
    }
}

impl<W: Word> FromStr for IntXL<W> {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::from_str_radix(text, 10)
    }
}

macro_rules! impl_fmt {
    ($Trait:ident, $radix:expr, $uppercase:expr, $prefix:expr) => {
        impl<W: Word> fmt::$Trait for UIntXL<W> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad_integral(true, $prefix, &self.to_str_radix($radix, $uppercase))
            }
        }

        impl<W: Word> fmt::$Trait for IntXL<W> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // pad_integral places the sign itself
                let digits = self.magnitude().to_str_radix($radix, $uppercase);
                f.pad_integral(!self.is_negative(), $prefix, &digits)
            }
        }
    };
}

impl_fmt!(Display, 10, false, "");
impl_fmt!(LowerHex, 16, false, "0x");
impl_fmt!(UpperHex, 16, true, "0x");
impl_fmt!(Octal, 8, false, "0o");
impl_fmt!(Binary, 2, false, "0b");

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn packings() {
        assert_eq!(Packing::<u8>::new(16), Packing::Perfect { log2: 4 });
        assert_eq!(Packing::<u32>::new(2), Packing::Perfect { log2: 1 });
        assert_eq!(Packing::<u8>::new(10), Packing::Imperfect { per_word: 2, power: 100 });
        assert_eq!(Packing::<u32>::new(10), Packing::Imperfect { per_word: 9, power: 1_000_000_000 });
        assert_eq!(
            Packing::<u64>::new(10),
            Packing::Imperfect { per_word: 19, power: 10_000_000_000_000_000_000 }
        );
        // three bits do not tile a word
        assert_eq!(Packing::<u32>::new(8), Packing::Imperfect { per_word: 10, power: 1 << 30 });
        assert_eq!(Packing::<u8>::new(32), Packing::Imperfect { per_word: 1, power: 32 });
    }

    #[test]
    fn hex_round_trip() {
        let text = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF";
        let x = UIntXL::<u32>::from_str_radix(text, 16).unwrap();
        assert_eq!(x.words(), [u32::MAX; 4]);
        assert_eq!(x.to_str_radix(16, true), text);
        assert_eq!(x.to_str_radix(16, false), text.to_ascii_lowercase());
        assert_eq!(UIntXL::<u64>::decode(text, 16).unwrap().words(), [u64::MAX; 2]);
    }

    #[test]
    fn decimal() {
        let x: UIntXL<u32> = "340282366920938463463374607431768211456".parse().unwrap();
        let mut expected = UIntXL::<u32>::zero();
        expected.set_bit(128);
        assert_eq!(x, expected);
        assert_eq!(x.to_string(), "340282366920938463463374607431768211456");

        // chunks below the top one keep their zeros
        let y = UIntXL::<u8>::from_str_radix("1000001", 10).unwrap();
        assert_eq!(y, UIntXL::from(1_000_001u32));
        assert_eq!(y.to_string(), "1000001");
    }

    #[test]
    fn zero_and_leading_zeros() {
        assert_eq!(UIntXL::<u8>::decode("0", 10), Some(UIntXL::zero()));
        assert_eq!(UIntXL::<u8>::decode("-0", 10), Some(UIntXL::zero()));
        assert_eq!(UIntXL::<u8>::decode("+000", 7), Some(UIntXL::zero()));
        assert_eq!(UIntXL::<u8>::decode("0000ff", 16), Some(UIntXL::from(255u8)));
        assert_eq!(IntXL::<u8>::decode("-000", 16), Some(IntXL::zero()));
        assert_eq!(UIntXL::<u16>::zero().to_str_radix(36, false), "0");
        assert_eq!(IntXL::<u16>::zero().to_str_radix(3, false), "0");
    }

    #[test]
    fn failures() {
        assert_eq!(UIntXL::<u32>::from_str_radix("12G", 10), Err(Error::InvalidDigit('G')));
        assert_eq!(UIntXL::<u32>::decode("12G", 10), None);
        assert_eq!(UIntXL::<u32>::from_str_radix("", 10), Err(Error::EmptyDigits));
        assert_eq!(IntXL::<u32>::from_str_radix("-", 10), Err(Error::EmptyDigits));
        assert_eq!(IntXL::<u32>::from_str_radix("--1", 10), Err(Error::InvalidDigit('-')));
        assert_eq!(UIntXL::<u32>::from_str_radix("1_000", 10), Err(Error::InvalidDigit('_')));
        assert_eq!(UIntXL::<u32>::from_str_radix("-1", 10), Err(Error::Negative));
        assert_eq!(UIntXL::<u32>::from_str_radix("1", 1), Err(Error::InvalidRadix(1)));
        assert_eq!(UIntXL::<u32>::from_str_radix("1", 37), Err(Error::InvalidRadix(37)));
        assert_eq!(IntXL::<u32>::from_str_radix("z", 35), Err(Error::InvalidDigit('z')));
        assert!("x".parse::<IntXL<u8>>().is_err());
    }

    #[test]
    #[should_panic(expected = "radix 37 is not in 2..=36")]
    fn encode_invalid_radix() {
        UIntXL::<u8>::one().to_str_radix(37, false);
    }

    #[test]
    fn signed() {
        let x = IntXL::<u16>::from_str_radix("-ff", 16).unwrap();
        assert_eq!(x, IntXL::from(-255i32));
        assert_eq!(x.to_str_radix(16, true), "-FF");
        assert_eq!(IntXL::<u16>::from_str_radix("+Zz", 36).unwrap(), IntXL::from(36 * 35 + 35));
        let min: IntXL<u8> = i64::MIN.to_string().parse().unwrap();
        assert_eq!(min, IntXL::from(i64::MIN));
        assert_eq!(min.to_string(), i64::MIN.to_string());
    }

    #[test]
    fn all_radices() {
        let x = UIntXL::<u16>::from(0x0123_4567_89ab_cdef_u64);
        for radix in 2..=36 {
            let text = x.to_str_radix(radix, false);
            assert_eq!(u64::from_str_radix(&text, radix).unwrap(), 0x0123_4567_89ab_cdef);
            assert_eq!(UIntXL::<u16>::from_str_radix(&text, radix).unwrap(), x);
        }
    }

    #[test]
    fn formatting() {
        let x = UIntXL::<u8>::from(0xbeefu16);
        assert_eq!(format!("{}", x), "48879");
        assert_eq!(format!("{:x}", x), "beef");
        assert_eq!(format!("{:#X}", x), "0xBEEF");
        assert_eq!(format!("{:o}", x), "137357");
        assert_eq!(format!("{:#b}", UIntXL::<u8>::from(5u8)), "0b101");
        assert_eq!(format!("{:>8}", x), "   48879");
        assert_eq!(format!("{:08x}", x), "0000beef");

        let y = IntXL::<u8>::from(-42i8);
        assert_eq!(format!("{}", y), "-42");
        assert_eq!(format!("{:+}", IntXL::<u8>::from(42i8)), "+42");
        assert_eq!(format!("{:#x}", y), "-0x2a");
        assert_eq!(format!("{:06}", y), "-00042");
    }

    quickcheck::quickcheck! {
        fn unsigned_round_trip(words: Vec<u32>, radix: u8) -> bool {
            let radix = 2 + radix as u32 % 35;
            let x = UIntXL::<u32>::from_words(&words);
            let text = x.to_str_radix(radix, radix % 2 == 0);
            UIntXL::<u32>::from_str_radix(&text, radix) == Ok(x.clone())
                && UIntXL::<u8>::from_str_radix(&text, radix).map(|y| y.to_be_bytes()) == Ok(x.to_be_bytes())
        }

        fn signed_round_trip(words: Vec<u16>, radix: u8) -> bool {
            let radix = 2 + radix as u32 % 35;
            let x = IntXL::<u16>::from_words(&words);
            IntXL::<u16>::from_str_radix(&x.to_str_radix(radix, false), radix) == Ok(x)
        }

        fn decimal_matches_oracle(words: Vec<u32>) -> bool {
            let x = UIntXL::<u32>::from_words(&words);
            x.to_string() == crate::arithmetic::test::big(&words).to_string()
        }
    }
}
