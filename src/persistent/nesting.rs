//! Depth-first descent into nested mappings.
//!
//! Nesting is acyclic by construction: a mapping can only contain mappings
//! that existed before it. Unbounded descent is therefore total, and the
//! bounded variants exist to reject pathologically deep input with a
//! [`RecursionLimitError`].
//!
//! Depth is counted from the receiver: its own entries are at depth `0`, the
//! entries of a mapping nested directly inside it are at depth `1`, and so on.

use std::convert::Infallible;

use super::OrderedMap;
use crate::error::RecursionLimitError;
use crate::typeclass::{MapKey, Nested};

/// A policy deciding how deep a recursive operation may descend.
pub(super) trait DepthGuard: Copy {
    type Error;

    /// Checks that entering `depth` is allowed.
    fn enter(self, depth: usize) -> Result<(), Self::Error>;
}

/// No limit.
#[derive(Clone, Copy)]
pub(super) struct Unbounded;

impl DepthGuard for Unbounded {
    type Error = Infallible;

    #[inline]
    fn enter(self, _depth: usize) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Fails beyond `limit` levels of nesting.
#[derive(Clone, Copy)]
pub(super) struct MaxDepth(pub(super) usize);

impl DepthGuard for MaxDepth {
    type Error = RecursionLimitError;

    fn enter(self, depth: usize) -> Result<(), RecursionLimitError> {
        if depth > self.0 {
            tracing::debug!(limit = self.0, depth, "nesting exceeds the recursion limit");
            return Err(RecursionLimitError { limit: self.0 });
        }
        Ok(())
    }
}

fn collect_leaves<K, V, G>(
    mapping: &OrderedMap<K, V>,
    guard: G,
    depth: usize,
    leaves: &mut Vec<V>,
) -> Result<(), G::Error>
where
    K: MapKey,
    V: Nested<K> + Clone,
    G: DepthGuard,
{
    for (_, value) in mapping {
        match value.as_mapping() {
            Some(child) => {
                guard.enter(depth + 1)?;
                collect_leaves(child, guard, depth + 1, leaves)?;
            }
            None => leaves.push(value.clone()),
        }
    }
    Ok(())
}

impl<K: MapKey, V: Nested<K> + Clone> OrderedMap<K, V> {
    pub(super) fn leaves<G: DepthGuard>(&self, guard: G) -> Result<Vec<V>, G::Error> {
        let mut leaves = Vec::with_capacity(self.len());
        collect_leaves(self, guard, 0, &mut leaves)?;
        Ok(leaves)
    }

    /// The leaf values of every nested mapping, depth-first and left to right,
    /// re-indexed.
    ///
    /// Records are leaves; only nested mappings are descended into.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::{list, mapping};
    /// use ordered_mapping::value::Value;
    ///
    /// let nested = mapping! {
    ///     "a" => 1,
    ///     "b" => 2,
    ///     "c" => mapping! { "d" => 3, 0 => "4", 1 => Value::Null, 2 => false },
    ///     3 => 5,
    /// };
    /// assert_eq!(
    ///     nested.values_flat(),
    ///     list![1, 2, 3, "4", Value::Null, false, 5]
    /// );
    /// ```
    #[must_use]
    pub fn values_flat(&self) -> OrderedMap<K::Index, V> {
        let Ok(leaves) = self.leaves(Unbounded);
        OrderedMap::from_values(leaves)
    }

    /// [`values_flat`](Self::values_flat) that fails when nesting is deeper
    /// than `max_depth`.
    ///
    /// # Errors
    ///
    /// Returns [`RecursionLimitError`] when a mapping nested more than
    /// `max_depth` levels below the receiver is found.
    pub fn values_flat_bounded(
        &self,
        max_depth: usize,
    ) -> Result<OrderedMap<K::Index, V>, RecursionLimitError> {
        self.leaves(MaxDepth(max_depth)).map(OrderedMap::from_values)
    }

    /// The leaf values of [`values_flat`](Self::values_flat) as a plain `Vec`.
    #[must_use]
    pub fn get_values_flat(&self) -> Vec<V> {
        let Ok(leaves) = self.leaves(Unbounded);
        leaves
    }
}

#[cfg(all(test, feature = "value"))]
mod tests {
    use super::*;
    use crate::value::{Key, Value};
    use crate::{list, mapping};
    use rstest::rstest;

    fn deep(levels: usize) -> OrderedMap<Key, Value> {
        (0..levels).fold(list![1], |inner, _| list![Value::from(inner)])
    }

    #[rstest]
    fn test_values_flat_on_flat_mapping_reindexes() {
        let flat = mapping! { "x" => 1, "y" => 2 };
        assert_eq!(flat.values_flat(), list![1, 2]);
    }

    #[rstest]
    fn test_records_are_leaves() {
        let record = Value::record("Point", [("x", Value::Int(1))]);
        let nested = list![record.clone(), list![2]];
        assert_eq!(nested.get_values_flat(), vec![record, Value::Int(2)]);
    }

    #[rstest]
    #[case(0, 0, true)]
    #[case(1, 0, false)]
    #[case(3, 3, true)]
    #[case(4, 3, false)]
    fn test_values_flat_bounded(#[case] levels: usize, #[case] limit: usize, #[case] succeeds: bool) {
        let result = deep(levels).values_flat_bounded(limit);
        assert_eq!(result.is_ok(), succeeds);
        if let Err(error) = result {
            assert_eq!(error, RecursionLimitError { limit });
        }
    }

    #[rstest]
    fn test_unbounded_descent_reaches_the_bottom() {
        assert_eq!(deep(64).get_values_flat(), vec![Value::Int(1)]);
    }
}
