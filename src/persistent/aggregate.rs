//! Aggregates and searches over the values of a mapping.

use std::cmp::Ordering;

use super::OrderedMap;
use crate::typeclass::{LooseCompare, MapKey, Numeric};

/// The first value that no later value beats under `wins`.
///
/// Incomparable pairs never replace the current extreme.
fn extreme<'a, V, I>(values: I, wins: Ordering) -> Option<&'a V>
where
    V: LooseCompare + 'a,
    I: IntoIterator<Item = &'a V>,
{
    values.into_iter().fold(None, |current, candidate| match current {
        Some(best) if candidate.loose_cmp(best) != Some(wins) => Some(best),
        _ => Some(candidate),
    })
}

impl<K: MapKey, V: Clone> OrderedMap<K, V> {
    /// The largest value under loose comparison, or `None` when empty.
    ///
    /// Among equal values the first one wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([3, 9, 1]);
    /// assert_eq!(mapping.max(), Some(&9));
    /// assert_eq!(mapping.min(), Some(&1));
    /// ```
    #[must_use]
    pub fn max(&self) -> Option<&V>
    where
        V: LooseCompare,
    {
        extreme(self.iter().map(|(_, value)| value), Ordering::Greater)
    }

    /// The smallest value under loose comparison, or `None` when empty.
    #[must_use]
    pub fn min(&self) -> Option<&V>
    where
        V: LooseCompare,
    {
        extreme(self.iter().map(|(_, value)| value), Ordering::Less)
    }

    /// The arithmetic mean of the values, `0.0` when empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([1, 2, 3, 4]);
    /// assert!((mapping.average() - 2.5).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn average(&self) -> f64
    where
        V: Numeric,
    {
        if self.is_empty() {
            return 0.0;
        }
        let total: f64 = self.iter().map(|(_, value)| value.to_f64()).sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.len() as f64;
        total / count
    }

    /// The sum of the values, [`Numeric::zero`] when empty.
    ///
    /// Integer sums saturate at the bounds of the value type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// assert_eq!(OrderedMap::<usize, i64>::from_values(1..=10).sum(), 55);
    /// ```
    #[must_use]
    pub fn sum(&self) -> V
    where
        V: Numeric,
    {
        self.iter()
            .fold(V::zero(), |total, (_, value)| total.add(value))
    }

    /// The sum of `function` applied to every value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let words = OrderedMap::<usize, &str>::from_values(["ab", "cde"]);
    /// assert_eq!(words.sum_by(|word| word.len()), 5);
    /// ```
    pub fn sum_by<N, F>(&self, mut function: F) -> N
    where
        N: Numeric,
        F: FnMut(&V) -> N,
    {
        self.iter()
            .fold(N::zero(), |total, (_, value)| total.add(&function(value)))
    }

    /// Returns `true` when the mapping is non-empty and every value satisfies
    /// `predicate`. An empty mapping is never "all true".
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([2, 4]);
    /// assert!(mapping.is_all_true(|value| value % 2 == 0));
    /// assert!(!mapping.is_all_true(|value| *value > 2));
    /// assert!(!OrderedMap::<usize, i64>::new().is_all_true(|_| true));
    /// ```
    pub fn is_all_true<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V) -> bool,
    {
        !self.is_empty() && self.iter().all(|(_, value)| predicate(value))
    }

    /// Returns `true` when at least one value satisfies `predicate`.
    pub fn is_any_true<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V) -> bool,
    {
        self.iter().any(|(_, value)| predicate(value))
    }

    /// The first value satisfying `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([1, 4, 6]);
    /// assert_eq!(mapping.find(|value| value % 2 == 0), Some(&4));
    /// assert_eq!(mapping.find_or(|value| *value > 10, -1), -1);
    /// ```
    pub fn find<P>(&self, mut predicate: P) -> Option<&V>
    where
        P: FnMut(&V) -> bool,
    {
        self.iter()
            .map(|(_, value)| value)
            .find(|value| predicate(value))
    }

    /// The first value satisfying `predicate`, or `not_found`.
    pub fn find_or<P>(&self, predicate: P, not_found: V) -> V
    where
        P: FnMut(&V) -> bool,
    {
        self.find(predicate).cloned().unwrap_or(not_found)
    }

    /// The first entry whose key and value satisfy `predicate`.
    pub fn find_key_value<P>(&self, mut predicate: P) -> Option<(&K, &V)>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.iter().find(|(key, value)| predicate(key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], None, None)]
    #[case(vec![2], Some(2), Some(2))]
    #[case(vec![3, 7, 7, -1], Some(7), Some(-1))]
    fn test_max_min(
        #[case] values: Vec<i64>,
        #[case] expected_max: Option<i64>,
        #[case] expected_min: Option<i64>,
    ) {
        let mapping = OrderedMap::<usize, i64>::from_values(values);
        assert_eq!(mapping.max().copied(), expected_max);
        assert_eq!(mapping.min().copied(), expected_min);
    }

    #[rstest]
    fn test_incomparable_values_do_not_replace_extreme() {
        let mapping = OrderedMap::<usize, f64>::from_values([1.0, f64::NAN, 0.5]);
        assert_eq!(mapping.max().copied(), Some(1.0));
        assert_eq!(mapping.min().copied(), Some(0.5));
    }

    #[rstest]
    #[case(vec![1, 2], 3)]
    #[case(vec![], 0)]
    #[case((1..=10).collect(), 55)]
    #[case((1..=10).map(|value| value * 2).collect(), 110)]
    #[case(vec![i64::MAX, 1], i64::MAX)]
    #[case(vec![i64::MIN, -1, 5], i64::MIN + 5)]
    fn test_sum(#[case] values: Vec<i64>, #[case] expected: i64) {
        assert_eq!(OrderedMap::<usize, i64>::from_values(values).sum(), expected);
    }

    #[rstest]
    fn test_average_of_empty_is_zero() {
        assert!(OrderedMap::<usize, i64>::new().average().abs() < f64::EPSILON);
    }

    #[rstest]
    fn test_sum_by_projects_values() {
        let mapping: OrderedMap<&str, (i64, i64)> =
            [("a", (1, 10)), ("b", (2, 20))].into_iter().collect();
        assert_eq!(mapping.sum_by(|(_, right)| *right), 30);
    }

    #[rstest]
    fn test_sum_by_saturates() {
        let mapping = OrderedMap::<usize, u32>::from_values([u32::MAX, 1]);
        assert_eq!(mapping.sum_by(|value| u64::from(*value)), u64::from(u32::MAX) + 1);
        assert_eq!(mapping.sum_by(|value| *value), u32::MAX);
    }

    #[rstest]
    fn test_is_any_true() {
        let positive = |value: &i64| *value > 0;
        assert!(OrderedMap::<usize, i64>::from_values([0, 0, 3]).is_any_true(positive));
        assert!(!OrderedMap::<usize, i64>::from_values([0]).is_any_true(positive));
        assert!(!OrderedMap::<usize, i64>::new().is_any_true(positive));
    }

    #[rstest]
    fn test_find_key_value_sees_keys() {
        let mapping: OrderedMap<&str, i64> = [("a", 1), ("b", 1)].into_iter().collect();
        assert_eq!(
            mapping.find_key_value(|key, value| *key == "b" && *value == 1),
            Some((&"b", &1))
        );
        assert_eq!(mapping.find_key_value(|_, value| *value == 2), None);
    }
}
