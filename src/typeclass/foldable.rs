//! Foldable type class - folding over data structures.
//!
//! A `Foldable` structure can be reduced to a single summary value by visiting
//! its elements in order. [`OrderedMap`](crate::persistent::OrderedMap) folds
//! over its values in mapping order; keys are not visited.
//!
//! # Laws
//!
//! ## Consistency between `fold_left` and `fold_right`
//!
//! For an associative operation `f`:
//!
//! ```text
//! fa.fold_left(init, f) == fa.fold_right(init, flip(f))
//! ```
//!
//! ## Consistency with `to_list`
//!
//! ```text
//! fa.fold_left(init, f) == fa.to_list().into_iter().fold(init, f)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use ordered_mapping::persistent::OrderedMap;
//! use ordered_mapping::typeclass::Foldable;
//!
//! let mapping: OrderedMap<&str, i64> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
//! let total = mapping.fold_left(0, |accumulator, element| accumulator + element);
//! assert_eq!(total, 6);
//! ```

use super::higher::TypeConstructor;
use super::monoid::Monoid;

/// A type class for data structures that can be folded to a summary value.
///
/// # Required Methods
///
/// - `fold_left`: Left-associative fold
/// - `fold_right`: Right-associative fold
///
/// # Provided Methods
///
/// `fold_map`, `to_list`, `exists` and `for_all` are derived from
/// `fold_left`. Note that `for_all` is vacuously `true` on an empty structure,
/// unlike [`OrderedMap::is_all_true`](crate::persistent::OrderedMap::is_all_true).
pub trait Foldable: TypeConstructor {
    /// Folds the structure from left to right with an accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    /// use ordered_mapping::typeclass::Foldable;
    ///
    /// let mapping = OrderedMap::<usize, &str>::from_values(["x", "y", "z"]);
    /// let joined = mapping.fold_left(String::new(), |accumulator, element| accumulator + element);
    /// assert_eq!(joined, "xyz");
    /// ```
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, Self::Inner) -> B;

    /// Folds the structure from right to left with an accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    /// use ordered_mapping::typeclass::Foldable;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([1, 2, 3]);
    /// let rendered = mapping.fold_right(String::new(), |element, accumulator| {
    ///     format!("{accumulator}{element}")
    /// });
    /// assert_eq!(rendered, "321");
    /// ```
    fn fold_right<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(Self::Inner, B) -> B;

    /// Maps each element to a `Monoid` and combines the results.
    fn fold_map<M, F>(self, mut function: F) -> M
    where
        M: Monoid,
        F: FnMut(Self::Inner) -> M,
        Self: Sized,
    {
        self.fold_left(M::empty(), |accumulator, element| {
            accumulator.combine(function(element))
        })
    }

    /// Collects the elements into a `Vec` in fold order.
    fn to_list(self) -> Vec<Self::Inner>
    where
        Self: Sized,
    {
        self.fold_left(Vec::new(), |mut accumulator, element| {
            accumulator.push(element);
            accumulator
        })
    }

    /// Checks if any element satisfies the predicate.
    fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Clone,
    {
        self.clone()
            .fold_left(false, |found, element| found || predicate(&element))
    }

    /// Checks if all elements satisfy the predicate (`true` when empty).
    fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Clone,
    {
        !self.exists(|element| !predicate(element))
    }
}
