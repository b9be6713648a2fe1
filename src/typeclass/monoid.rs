//! Monoid type class - semigroups with an identity element.
//!
//! The identity of [`OrderedMap`](crate::persistent::OrderedMap) under
//! `merge` is the empty mapping.
//!
//! # Laws
//!
//! ```text
//! Monoid::empty().combine(a) == a   // left identity
//! a.combine(Monoid::empty()) == a   // right identity
//! ```
//!
//! Both hold exactly for mappings whose integer keys are already `0..n`;
//! otherwise they hold up to the renumbering `merge` performs.

use super::semigroup::Semigroup;

/// A semigroup with an identity element.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::persistent::OrderedMap;
/// use ordered_mapping::typeclass::Monoid;
///
/// let pieces = vec![
///     OrderedMap::<i64, &str>::from_values(["a", "b"]),
///     OrderedMap::<i64, &str>::from_values(["c"]),
/// ];
/// let combined = OrderedMap::combine_all(pieces);
/// assert_eq!(combined.get_values(), vec!["a", "b", "c"]);
/// ```
pub trait Monoid: Semigroup {
    /// The identity element.
    fn empty() -> Self;

    /// Combines every element of an iterator, starting from `empty()`.
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator.into_iter().fold(Self::empty(), Self::combine)
    }
}
