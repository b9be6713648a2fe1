//! Loose comparison type class.
//!
//! Loose (coercive) comparison may treat values of different representation as
//! equal, for example the number `5` and the text `"5"` of the dynamic
//! [`Value`](crate::value::Value). Strict comparison is plain [`PartialEq`].
//!
//! For statically typed primitives both comparisons coincide, so their
//! implementations defer to `PartialEq` and `PartialOrd`.
//!
//! `loose_cmp` drives the default `sort`, `max`, `min` and
//! `unique(Collation::Regular)`; `loose_eq` drives `Equality::Loose`.

use std::cmp::Ordering;

/// Types with a loose (coercive) comparison.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use ordered_mapping::typeclass::LooseCompare;
///
/// assert_eq!(2_i64.loose_cmp(&3), Some(Ordering::Less));
/// assert!(1.5_f64.loose_eq(&1.5));
/// assert_eq!(f64::NAN.loose_cmp(&1.0), None);
/// ```
pub trait LooseCompare {
    /// Compares two values, or `None` when they are not comparable.
    fn loose_cmp(&self, other: &Self) -> Option<Ordering>;

    /// Loose equality. Defaults to `loose_cmp == Some(Equal)`.
    fn loose_eq(&self, other: &Self) -> bool {
        self.loose_cmp(other) == Some(Ordering::Equal)
    }
}

macro_rules! impl_loose_compare_by_partial_ord {
    ($($primitive:ty),* $(,)?) => {
        $(
            impl LooseCompare for $primitive {
                #[inline]
                fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
                    self.partial_cmp(other)
                }

                #[inline]
                fn loose_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_loose_compare_by_partial_ord!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &str,
);

impl<T: LooseCompare> LooseCompare for Option<T> {
    fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
            (Some(left), Some(right)) => left.loose_cmp(right),
        }
    }
}

/// Sort helper: incomparable pairs are treated as equal so sorting stays total.
#[inline]
pub(crate) fn loose_ordering<T: LooseCompare + ?Sized>(left: &T, right: &T) -> Ordering {
    left.loose_cmp(right).unwrap_or(Ordering::Equal)
}
