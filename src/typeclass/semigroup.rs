//! Semigroup type class - types with an associative binary operation.
//!
//! For [`OrderedMap`](crate::persistent::OrderedMap) the operation is
//! [`merge`](crate::persistent::OrderedMap::merge): integer keys are renumbered
//! sequentially and string-key collisions overwrite in place. Renumbering makes
//! the operation associative.
//!
//! # Laws
//!
//! ## Associativity
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```

/// A type class for types with an associative binary operation.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::persistent::OrderedMap;
/// use ordered_mapping::typeclass::Semigroup;
///
/// let left = OrderedMap::<i64, i64>::from_values([1, 2, 3]);
/// let right = OrderedMap::<i64, i64>::from_values([3, 4]);
/// let combined = left.combine(right);
/// assert_eq!(combined.get_values(), vec![1, 2, 3, 3, 4]);
/// ```
pub trait Semigroup {
    /// Combines two values into one. Must be associative.
    #[must_use]
    fn combine(self, other: Self) -> Self;

    /// Combines two values by reference.
    #[must_use]
    fn combine_ref(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        self.clone().combine(other.clone())
    }

    /// Combines every element of an iterator, or `None` when it is empty.
    fn combine_all_option<I>(iterator: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator.into_iter().reduce(Self::combine)
    }
}
