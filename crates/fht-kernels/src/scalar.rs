//! Element types the butterfly network can run on.
//!
//! The transform only adds and subtracts, so any signed integer type is as
//! valid as a float. Integers need `log2(len)` bits of headroom: every stage
//! can double the magnitude of an element.

use std::fmt::Debug;
use std::ops::{Add, Sub};

/// A real element type closed under exact add/subtract.
pub trait Scalar:
    Copy + Send + Sync + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + 'static
{
    const ZERO: Self;

    /// Divide by a transform length. Truncates toward zero for integers.
    fn div_len(self, len: usize) -> Self;
}

/// Float element types, which additionally support orthonormal scaling.
pub trait FloatScalar: Scalar {
    /// Multiply by `factor` in the element's own precision.
    fn scale(self, factor: f64) -> Self;

    /// Widen to f64 (used for tolerance checks and energy sums).
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = 0;

                #[inline(always)]
                fn div_len(self, len: usize) -> Self {
                    // A length wider than the type still divides `MIN` to -1.
                    match <$t>::try_from(len) {
                        Ok(l) => self / l,
                        Err(_) => (self as i128 / len as i128) as $t,
                    }
                }
            }
        )*
    };
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = 0.0;

                #[inline(always)]
                fn div_len(self, len: usize) -> Self {
                    self / len as $t
                }
            }

            impl FloatScalar for $t {
                #[inline(always)]
                fn scale(self, factor: f64) -> Self {
                    self * factor as $t
                }

                #[inline(always)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_scalar_int!(i8, i16, i32, i64, i128, isize);
impl_scalar_float!(f32, f64);
