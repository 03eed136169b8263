#![cfg_attr(not(test), no_std)]
//! Arbitrary-precision integers over growable little-endian word arrays.
//!
//! [`UIntXL`] is an unsigned magnitude, [`IntXL`] a two's-complement signed
//! integer with implicit infinite sign extension. Both are generic over the
//! machine [`Word`] (`u8`, `u16`, `u32` or `u64`), defaulting to [`Digit`],
//! and always kept in their shortest encoding.
//!
//! The arithmetic operators trap like the native ones (unsigned subtraction
//! below zero, division by zero); the `checked_*` and `overflowing_*` methods
//! report instead.
//!
//! ```
//! use intxl::{IntXL, UIntXL};
//!
//! let x: UIntXL = "340282366920938463463374607431768211455".parse().unwrap();
//! assert_eq!(format!("{:X}", x + UIntXL::one()), "100000000000000000000000000000000");
//!
//! let (q, r) = IntXL::<u32>::from(-7).div_rem(&IntXL::from(3));
//! assert_eq!((q, r), (IntXL::from(-2), IntXL::from(-1)));
//! ```

extern crate alloc;

mod arithmetic;
pub use arithmetic::KARATSUBA_THRESHOLD;
mod digit;
pub use digit::{Digit, Word};
mod error;
pub use error::{Error, Result};
mod numbers;
pub use numbers::{IntXL, UIntXL};
mod radix;
mod random;
