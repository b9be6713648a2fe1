//! Numeric type class used by `sum`, `sum_by` and `average`.
//!
//! `Numeric` has a zero, an addition and a lossy view as
//! `f64`. The dynamic [`Value`](crate::value::Value) implements it with
//! coercion (numeric text counts as a number, non-numeric values count as `0`,
//! integer overflow promotes to a float). Primitive integers saturate.

/// Types that can be summed and averaged.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::typeclass::Numeric;
///
/// assert_eq!(i64::zero(), 0);
/// assert_eq!(2_i64.add(&3), 5);
/// assert!((7_i32.to_f64() - 7.0).abs() < f64::EPSILON);
/// ```
pub trait Numeric: Sized {
    /// The additive identity.
    fn zero() -> Self;

    /// Adds two values.
    ///
    /// Integer implementations saturate at the bounds of their type instead of
    /// overflowing.
    #[must_use]
    fn add(&self, other: &Self) -> Self;

    /// The value as a 64-bit float.
    fn to_f64(&self) -> f64;
}

macro_rules! impl_integer_numeric {
    ($($integer:ty),* $(,)?) => {
        $(
            impl Numeric for $integer {
                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn add(&self, other: &Self) -> Self {
                    self.saturating_add(*other)
                }

                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

macro_rules! impl_float_numeric {
    ($($float:ty),* $(,)?) => {
        $(
            impl Numeric for $float {
                #[inline]
                fn zero() -> Self {
                    0.0
                }

                #[inline]
                fn add(&self, other: &Self) -> Self {
                    *self + *other
                }

                #[inline]
                #[allow(clippy::cast_lossless)]
                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_integer_numeric!(i32, i64, u32, u64, usize);
impl_float_numeric!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_integer_sum_from_zero() {
        let total = [1_i64, 2, 3].iter().fold(i64::zero(), |accumulator, value| accumulator.add(value));
        assert_eq!(total, 6);
    }

    #[rstest]
    #[case(i64::MAX, 1, i64::MAX)]
    #[case(i64::MIN, -1, i64::MIN)]
    #[case(40, 2, 42)]
    fn test_integer_add_saturates(#[case] left: i64, #[case] right: i64, #[case] expected: i64) {
        assert_eq!(left.add(&right), expected);
    }

    #[rstest]
    fn test_unsigned_add_saturates() {
        assert_eq!(u32::MAX.add(&7), u32::MAX);
        assert_eq!(usize::MAX.add(&1), usize::MAX);
    }

    #[rstest]
    fn test_float_add() {
        assert!((0.25_f64.add(&0.5) - 0.75).abs() < f64::EPSILON);
    }

    #[rstest]
    fn test_to_f64() {
        assert!((3_u32.to_f64() - 3.0).abs() < f64::EPSILON);
        assert!((1.5_f32.to_f64() - 1.5).abs() < f64::EPSILON);
    }
}
