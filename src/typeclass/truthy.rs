//! Truthy type class - the explicit default predicate of `filter_truthy`.
//!
//! A value is *falsy* when it is one of:
//!
//! | Type                  | Falsy values              |
//! |-----------------------|---------------------------|
//! | `bool`                | `false`                   |
//! | integers              | `0`                       |
//! | floats                | `0.0`, `-0.0`             |
//! | `String`, `&str`      | `""`, `"0"`               |
//! | `Option<T>`           | `None`, `Some(falsy)`     |
//! | `Vec<T>`, `OrderedMap`| empty                     |
//! | `Value`               | `Null` and the falsy cases above; records are always truthy |
//!
//! Everything else is truthy.

/// Types with a truthiness test.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::typeclass::Truthy;
///
/// assert!(1_i32.is_truthy());
/// assert!(!0_i32.is_truthy());
/// assert!(!"0".is_truthy());
/// assert!("00".is_truthy());
/// assert!(!None::<i32>.is_truthy());
/// ```
pub trait Truthy {
    /// Returns `true` unless the value is falsy.
    fn is_truthy(&self) -> bool;
}

/// The truthiness test as a free function, usable as a predicate.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::persistent::OrderedMap;
/// use ordered_mapping::typeclass::is_truthy;
///
/// let mapping = OrderedMap::<usize, i64>::from_values([0, 1, 0, 2]);
/// assert_eq!(mapping.filter(is_truthy).get_values(), vec![1, 2]);
/// ```
#[inline]
pub fn is_truthy<T: Truthy + ?Sized>(value: &T) -> bool {
    value.is_truthy()
}

impl Truthy for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl Truthy for $integer {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthy_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for f64 {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for str {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty() && self != "0"
    }
}

impl Truthy for &str {
    #[inline]
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl Truthy for String {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.as_str().is_truthy()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T> Truthy for Vec<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(-1, true)]
    fn test_integer_truthiness(#[case] value: i64, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    #[case(0.0, false)]
    #[case(-0.0, false)]
    #[case(0.5, true)]
    #[case(f64::NAN, true)]
    fn test_float_truthiness(#[case] value: f64, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    #[case("", false)]
    #[case("0", false)]
    #[case("0.0", true)]
    #[case(" ", true)]
    #[case("false", true)]
    fn test_text_truthiness(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
        assert_eq!(value.to_string().is_truthy(), expected);
    }

    #[rstest]
    fn test_option_truthiness() {
        assert!(!None::<bool>.is_truthy());
        assert!(!Some(false).is_truthy());
        assert!(Some(true).is_truthy());
    }

    #[rstest]
    fn test_vec_truthiness() {
        assert!(!Vec::<i32>::new().is_truthy());
        assert!(vec![0].is_truthy());
    }

    #[rstest]
    fn test_free_function_matches_trait() {
        assert!(is_truthy(&7_u8));
        assert!(!is_truthy(&false));
    }
}
