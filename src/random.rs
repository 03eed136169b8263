//! Random values from any [`RngCore`].
//!
//! Nothing here needs a `CryptoRng`, but nothing prevents passing one
//! either; the values are as good as the generator.

use alloc::vec::Vec;

use rand_core::RngCore;

use crate::{IntXL, UIntXL, Word};

/// `bits` random bits as little-endian bytes.
fn random_bytes(rng: &mut impl RngCore, bits: usize) -> Vec<u8> {
    let mut bytes = alloc::vec![0u8; (bits + 7) / 8];
    rng.fill_bytes(&mut bytes);
    if bits % 8 != 0 {
        if let Some(top) = bytes.last_mut() {
            *top &= (1u8 << (bits % 8)) - 1;
        }
    }
    bytes
}

impl<W: Word> UIntXL<W> {
    /// Uniform in `0..2^bits`.
    pub fn random_bits(mut rng: impl RngCore, bits: usize) -> Self {
        Self::from_le_bytes(&random_bytes(&mut rng, bits))
    }

    /// Uniform in `0..bound`.
    ///
    /// Rejection sampling on `bound.bits()` bits, so on average less than two
    /// draws. Panics if `bound` is zero.
    pub fn random_below(mut rng: impl RngCore, bound: &Self) -> Self {
        assert!(!bound.is_zero(), "empty range");
        let bits = bound.bits();
        loop {
            let candidate = Self::random_bits(&mut rng, bits);
            if &candidate < bound {
                return candidate;
            }
        }
    }
}

impl<W: Word> IntXL<W> {
    /// Uniform in `-2^(bits - 1)..2^(bits - 1)`, zero for `bits == 0`.
    pub fn random_bits(rng: impl RngCore, bits: usize) -> Self {
        let magnitude = UIntXL::<W>::random_bits(rng, bits);
        if bits == 0 || !magnitude.bit(bits - 1) {
            return Self::from(magnitude);
        }
        let mut modulus = UIntXL::<W>::zero();
        modulus.set_bit(bits);
        Self::from(magnitude) - Self::from(modulus)
    }
}
