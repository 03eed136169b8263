use core::fmt;

/// Everything that can go wrong outside of the trapping operators.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Division or remainder by zero.
    DivisionByZero,
    /// Text without any digits, e.g. `""` or `"-"`.
    EmptyDigits,
    /// A radix outside of `2..=36`.
    InvalidRadix(u32),
    /// A character outside the alphabet of the radix.
    InvalidDigit(char),
    /// A negative value where only non-negative ones fit.
    Negative,
    /// A value that does not fit in the destination type.
    TooLarge,
    /// NaN or an infinity.
    NotFinite,
}

/// [`Error`] or success.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DivisionByZero => f.write_str("division by zero"),
            Error::EmptyDigits => f.write_str("no digits"),
            Error::InvalidRadix(radix) => write!(f, "radix {} is not in 2..=36", radix),
            Error::InvalidDigit(c) => write!(f, "invalid digit {:?}", c),
            Error::Negative => f.write_str("value is negative"),
            Error::TooLarge => f.write_str("value too large"),
            Error::NotFinite => f.write_str("value is not finite"),
        }
    }
}
