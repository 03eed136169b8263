//! Arithmetic on flexible-width integers.
//!
//! Each submodule has two layers:
//! - free functions on raw word slices (or `Vec`s that may grow), generic over
//!   [`Word`], which do the actual work and may leave the words un-normalized;
//! - the operator and method implementations for [`UIntXL`][crate::UIntXL] and
//!   [`IntXL`][crate::IntXL], which call them through the normalizing storage
//!   guard, so every public exit is in normal form.
//!
//! For `IntXL`, the operations reduce to the unsigned algorithms plus sign
//! bookkeeping (sign extension, two's-complement negation).

#[macro_use]
mod impls;

mod add;
mod subtract;
mod multiply;
mod divide;
mod shift;
mod logic;

pub(crate) use add::add_assign_at;
pub(crate) use divide::div_rem_assign_digit;
pub(crate) use multiply::mul_digit_assign;
pub(crate) use subtract::negate_wrapping;

/// Operand size (in words) from which multiplication and squaring switch
/// from the schoolbook method to Karatsuba.
///
/// This is a tuning knob, not part of any contract: both methods produce the
/// same words. Benchmarks on 64-bit targets put the crossover between 24 and
/// 40 words.
pub const KARATSUBA_THRESHOLD: usize = 32;
