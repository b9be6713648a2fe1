//! Filtering operations. Every operation here preserves keys and order.

use super::OrderedMap;
use super::nesting::{DepthGuard, MaxDepth, Unbounded};
use super::options::{Equality, RecursiveFilter};
use super::transient::TransientOrderedMap;
use crate::error::MappingResult;
use crate::typeclass::{LooseCompare, MapKey, Nested, Truthy};

impl Equality {
    /// Compares two values under this equality.
    pub(crate) fn matches<V: LooseCompare + PartialEq>(self, left: &V, right: &V) -> bool {
        match self {
            Self::Loose => left.loose_eq(right),
            Self::Strict => left == right,
        }
    }
}

fn filter_nested<K, V, G, P>(
    mapping: &OrderedMap<K, V>,
    remove_empty_containers: bool,
    guard: G,
    depth: usize,
    predicate: &mut P,
) -> Result<OrderedMap<K, V>, G::Error>
where
    K: MapKey,
    V: Nested<K> + Clone,
    G: DepthGuard,
    P: FnMut(&K, &V) -> bool,
{
    let mut transient = TransientOrderedMap::with_capacity(mapping.len());
    for (key, value) in mapping {
        let value = match value.as_mapping() {
            Some(child) => {
                guard.enter(depth + 1)?;
                let filtered =
                    filter_nested(child, remove_empty_containers, guard, depth + 1, predicate)?;
                if remove_empty_containers && filtered.is_empty() {
                    continue;
                }
                V::from_mapping(filtered)
            }
            None => value.clone(),
        };
        if predicate(key, &value) {
            transient.insert(key.clone(), value);
        }
    }
    Ok(transient.persistent())
}

impl<K: MapKey, V: Clone> OrderedMap<K, V> {
    /// Keeps the entries whose value satisfies `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<i64, i64>::from_values([5, -4, 3, -2, 1]);
    /// let positive = mapping.filter(|value| *value > 0);
    /// assert_eq!(positive.entries(), vec![(0, 5), (2, 3), (4, 1)]);
    /// ```
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V) -> bool,
    {
        self.retain_entries(|_, value| predicate(value))
    }

    /// Keeps the truthy values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, &str>::from_values(["", "0", "a", "00"]);
    /// assert_eq!(mapping.filter_truthy().entries(), vec![(2, "a"), (3, "00")]);
    /// ```
    #[must_use]
    pub fn filter_truthy(&self) -> Self
    where
        V: Truthy,
    {
        self.filter(Truthy::is_truthy)
    }

    /// Keeps the entries whose value does not satisfy `predicate`.
    #[must_use]
    pub fn filter_not<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V) -> bool,
    {
        self.retain_entries(|_, value| !predicate(value))
    }

    /// Keeps the entries whose key satisfies `predicate`.
    #[must_use]
    pub fn filter_keys<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K) -> bool,
    {
        self.retain_entries(|key, _| predicate(key))
    }

    /// Keeps the entries satisfying `predicate(key, value)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<&str, i64> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    /// let kept = mapping.filter_key_value(|key, value| *key != "a" && *value != 3);
    /// assert_eq!(kept.entries(), vec![("b", 2)]);
    /// ```
    #[must_use]
    pub fn filter_key_value<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.retain_entries(predicate)
    }

    /// Filters nested mappings at every depth with `predicate(key, value)`.
    ///
    /// Children are filtered first; the predicate then sees every entry,
    /// containers included, with its already filtered value. Values that are
    /// not mappings are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::mapping;
    /// use ordered_mapping::value::Value;
    ///
    /// let nested = mapping! {
    ///     "keep" => 1,
    ///     "drop" => Value::Null,
    ///     "child" => mapping! { "inner" => Value::Null, "kept" => 2 },
    /// };
    /// let filtered = nested.filter_recursive(|_, value| !value.is_null());
    /// assert_eq!(
    ///     filtered,
    ///     mapping! { "keep" => 1, "child" => mapping! { "kept" => 2 } }
    /// );
    /// ```
    #[must_use]
    pub fn filter_recursive<P>(&self, mut predicate: P) -> Self
    where
        V: Nested<K>,
        P: FnMut(&K, &V) -> bool,
    {
        let Ok(filtered) = filter_nested(self, false, Unbounded, 0, &mut predicate);
        filtered
    }

    /// [`filter_recursive`](Self::filter_recursive) with options.
    ///
    /// With `remove_empty_containers`, nested mappings left empty by filtering
    /// are dropped without calling the predicate on them.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::RecursionLimit`](crate::error::MappingError::RecursionLimit)
    /// when nesting is deeper than the configured `max_depth`.
    pub fn filter_recursive_with<P>(
        &self,
        options: &RecursiveFilter,
        mut predicate: P,
    ) -> MappingResult<Self>
    where
        V: Nested<K>,
        P: FnMut(&K, &V) -> bool,
    {
        let remove_empty = options.removes_empty_containers();
        match options.depth_limit() {
            None => {
                let Ok(filtered) = filter_nested(self, remove_empty, Unbounded, 0, &mut predicate);
                Ok(filtered)
            }
            Some(limit) => Ok(filter_nested(
                self,
                remove_empty,
                MaxDepth(limit),
                0,
                &mut predicate,
            )?),
        }
    }

    /// Keeps the values equal to `target`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::list;
    /// use ordered_mapping::persistent::Equality;
    /// use ordered_mapping::value::Value;
    ///
    /// let mapping = list![5, "5", 6];
    /// assert_eq!(mapping.values_eq(&Value::Int(5), Equality::Loose).len(), 2);
    /// assert_eq!(mapping.values_eq(&Value::Int(5), Equality::Strict).len(), 1);
    /// ```
    #[must_use]
    pub fn values_eq(&self, target: &V, equality: Equality) -> Self
    where
        V: LooseCompare + PartialEq,
    {
        self.filter(|value| equality.matches(value, target))
    }

    /// Keeps the values not equal to `target`.
    #[must_use]
    pub fn values_not_eq(&self, target: &V, equality: Equality) -> Self
    where
        V: LooseCompare + PartialEq,
    {
        self.filter(|value| !equality.matches(value, target))
    }

    /// Drops the values that equal any of `targets`.
    #[must_use]
    pub fn remove_values(&self, targets: &[V], equality: Equality) -> Self
    where
        V: LooseCompare + PartialEq,
    {
        self.filter(|value| !targets.iter().any(|target| equality.matches(value, target)))
    }

    /// Alias of [`remove_values`](Self::remove_values).
    #[must_use]
    pub fn unset_values(&self, targets: &[V], equality: Equality) -> Self
    where
        V: LooseCompare + PartialEq,
    {
        self.remove_values(targets, equality)
    }

    /// Replaces the top-level values equal to `from` with `to`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::{Equality, OrderedMap};
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([1, 5, 5]);
    /// let replaced = mapping.replace_value(&5, 0, Equality::Strict);
    /// assert_eq!(replaced.get_values(), vec![1, 0, 0]);
    /// ```
    #[must_use]
    pub fn replace_value(&self, from: &V, to: V, equality: Equality) -> Self
    where
        V: LooseCompare + PartialEq,
    {
        self.map(|value| {
            if equality.matches(value, from) {
                to.clone()
            } else {
                value.clone()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbers() -> OrderedMap<usize, i64> {
        OrderedMap::from_values([5, -4, 3, -2, 1, 0, -1])
    }

    #[rstest]
    fn test_filter_is_idempotent() {
        let positive = |value: &i64| *value > 0;
        assert_eq!(numbers().filter(positive).filter(positive), numbers().filter(positive));
    }

    #[rstest]
    fn test_filter_not_complements_filter() {
        let kept = numbers().filter(|value| *value >= 0).len();
        let dropped = numbers().filter_not(|value| *value >= 0).len();
        assert_eq!(kept + dropped, numbers().len());
    }

    #[rstest]
    fn test_filter_keys_preserves_keys() {
        let even = numbers().filter_keys(|key| key % 2 == 0);
        assert_eq!(even.entries(), vec![(0, 5), (2, 3), (4, 1), (6, -1)]);
    }

    #[rstest]
    fn test_filter_truthy_drops_zero() {
        assert_eq!(numbers().filter_truthy().len(), 6);
    }

    #[rstest]
    fn test_remove_values_with_several_targets() {
        let removed = numbers().remove_values(&[5, -1], Equality::Strict);
        assert_eq!(removed.get_values(), vec![-4, 3, -2, 1, 0]);
        assert_eq!(
            numbers().unset_values(&[5, -1], Equality::Strict),
            removed
        );
    }

    #[rstest]
    fn test_values_not_eq() {
        let others = numbers().values_not_eq(&3, Equality::Loose);
        assert!(!others.get_values().contains(&3));
        assert_eq!(others.len(), 6);
    }
}

#[cfg(all(test, feature = "value"))]
mod recursive_tests {
    use super::*;
    use crate::error::{MappingError, RecursionLimitError};
    use crate::value::{Key, Value};
    use crate::{list, mapping};
    use rstest::rstest;

    fn tree() -> OrderedMap<Key, Value> {
        mapping! {
            "a" => 1,
            "b" => 0,
            "c" => mapping! { "d" => 0, "e" => mapping! { "f" => 0 } },
        }
    }

    #[rstest]
    fn test_predicate_sees_filtered_containers() {
        let mut seen = Vec::new();
        let _ = tree().filter_recursive(|key, value| {
            seen.push((key.clone(), value.clone()));
            true
        });
        assert!(seen.contains(&(Key::from("e"), Value::from(mapping! { "f" => 0 }))));
        assert_eq!(seen.last().map(|(key, _)| key.clone()), Some(Key::from("c")));
    }

    #[rstest]
    fn test_empty_containers_are_kept_by_default() {
        let filtered = tree().filter_recursive(|_, value| value.is_truthy() || value.is_map());
        assert_eq!(
            filtered,
            mapping! { "a" => 1, "c" => mapping! { "e" => list![] } }
        );
    }

    #[rstest]
    fn test_remove_empty_containers() {
        let options = RecursiveFilter::new().remove_empty_containers(true);
        let filtered = tree()
            .filter_recursive_with(&options, |_, value| value.is_truthy())
            .unwrap();
        assert_eq!(filtered, mapping! { "a" => 1 });
    }

    #[rstest]
    fn test_depth_limit_is_enforced() {
        let options = RecursiveFilter::new().max_depth(1);
        let result = tree().filter_recursive_with(&options, |_, _| true);
        assert_eq!(
            result,
            Err(MappingError::RecursionLimit(RecursionLimitError { limit: 1 }))
        );

        let options = RecursiveFilter::new().max_depth(2);
        assert_eq!(tree().filter_recursive_with(&options, |_, _| true), Ok(tree()));
    }

    #[rstest]
    fn test_loose_and_strict_removal() {
        let mapping = list![1, 2, 3, 4, "a", "b", 0, Value::Null, false];
        let loose = mapping.remove_values(&[Value::Int(0)], Equality::Loose);
        assert_eq!(loose, list![1, 2, 3, 4, "a", "b"]);

        let strict = mapping.remove_values(&[Value::Int(0)], Equality::Strict);
        assert_eq!(
            strict,
            mapping! {
                0 => 1, 1 => 2, 2 => 3, 3 => 4, 4 => "a", 5 => "b", 7 => Value::Null, 8 => false,
            }
        );
    }
}
