//! Operator plumbing.
//!
//! Every binary operator is implemented once, as `OpAssign<&T> for T`, in the
//! module of its algorithm. The macros here derive the by-value and
//! by-reference variants from it.

/// `$Op` for all val/ref combinations, from `$OpAssign<&T> for T`.
macro_rules! forward_binop {
    (impl $Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident for $T:ident) => {
        impl<W: Word> $Op<&$T<W>> for &$T<W> {
            type Output = $T<W>;

            #[inline]
            fn $op(self, rhs: &$T<W>) -> $T<W> {
                let mut result = self.clone();
                <$T<W> as $OpAssign<&$T<W>>>::$op_assign(&mut result, rhs);
                result
            }
        }

        impl<W: Word> $Op<$T<W>> for &$T<W> {
            type Output = $T<W>;

            #[inline]
            fn $op(self, rhs: $T<W>) -> $T<W> {
                let mut result = self.clone();
                <$T<W> as $OpAssign<&$T<W>>>::$op_assign(&mut result, &rhs);
                result
            }
        }

        impl<W: Word> $Op<&$T<W>> for $T<W> {
            type Output = $T<W>;

            #[inline]
            fn $op(mut self, rhs: &$T<W>) -> $T<W> {
                <$T<W> as $OpAssign<&$T<W>>>::$op_assign(&mut self, rhs);
                self
            }
        }

        impl<W: Word> $Op<$T<W>> for $T<W> {
            type Output = $T<W>;

            #[inline]
            fn $op(mut self, rhs: $T<W>) -> $T<W> {
                <$T<W> as $OpAssign<&$T<W>>>::$op_assign(&mut self, &rhs);
                self
            }
        }

        impl<W: Word> $OpAssign<$T<W>> for $T<W> {
            #[inline]
            fn $op_assign(&mut self, rhs: $T<W>) {
                <$T<W> as $OpAssign<&$T<W>>>::$op_assign(self, &rhs);
            }
        }
    };
}

/// `$Op<usize>` for values and references, from `$OpAssign<usize> for T`.
macro_rules! forward_shift {
    (impl $Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident for $T:ident) => {
        impl<W: Word> $Op<usize> for &$T<W> {
            type Output = $T<W>;

            #[inline]
            fn $op(self, distance: usize) -> $T<W> {
                let mut result = self.clone();
                <$T<W> as $OpAssign<usize>>::$op_assign(&mut result, distance);
                result
            }
        }

        impl<W: Word> $Op<usize> for $T<W> {
            type Output = $T<W>;

            #[inline]
            fn $op(mut self, distance: usize) -> $T<W> {
                <$T<W> as $OpAssign<usize>>::$op_assign(&mut self, distance);
                self
            }
        }
    };
}

/// Both integer types, same operator.
macro_rules! forward_binop_both {
    (impl $Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        forward_binop!(impl $Op, $op, $OpAssign, $op_assign for UIntXL);
        forward_binop!(impl $Op, $op, $OpAssign, $op_assign for IntXL);
    };
}
