//! Set-like and structural operations: deduplication, key selection, merging,
//! flipping and row-oriented projections.

use std::borrow::Borrow;
use std::collections::HashSet;

use super::OrderedMap;
use super::options::{Collation, GroupOptions};
use super::transient::TransientOrderedMap;
use crate::error::{KeyTypeError, MappingResult};
use crate::typeclass::{
    LooseCompare, MapKey, Nested, SequentialKey, Shape, Textual, ToKey, numeric_prefix,
};

/// Converts `value` into a key, or reports which entry could not be converted.
pub(crate) fn require_key<K, V>(
    value: &V,
    operation: &'static str,
    position: usize,
) -> Result<K, KeyTypeError>
where
    V: ToKey<K> + ?Sized,
{
    value.to_key().ok_or_else(|| {
        let kind = value.kind();
        tracing::debug!(operation, position, kind, "value cannot be used as a key");
        KeyTypeError::new(operation, position, kind)
    })
}

impl<K: MapKey, V: Clone> OrderedMap<K, V> {
    /// Removes duplicate values, keeping the first occurrence and its key.
    ///
    /// - [`Collation::Text`] compares the text form of the values
    /// - [`Collation::Regular`] compares loosely
    /// - [`Collation::Numeric`] compares the numeric prefix of the text form
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::{Collation, OrderedMap};
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([5, 5, 1, 5, 1, 2]);
    /// let unique = mapping.unique(Collation::Text);
    /// assert_eq!(unique.entries(), vec![(0, 5), (2, 1), (5, 2)]);
    /// ```
    #[must_use]
    pub fn unique(&self, collation: Collation) -> Self
    where
        V: Textual + LooseCompare,
    {
        match collation {
            Collation::Text => {
                let mut seen = HashSet::with_capacity(self.len());
                self.retain_entries(|_, value| seen.insert(value.to_text().into_owned()))
            }
            Collation::Regular => {
                let mut kept: Vec<&V> = Vec::with_capacity(self.len());
                let mut keep = Vec::with_capacity(self.len());
                for (_, value) in self {
                    let duplicate = kept.iter().any(|seen| seen.loose_eq(value));
                    if !duplicate {
                        kept.push(value);
                    }
                    keep.push(!duplicate);
                }
                let mut keep = keep.into_iter();
                self.retain_entries(|_, _| keep.next().unwrap_or(false))
            }
            Collation::Numeric => {
                let mut kept: Vec<f64> = Vec::with_capacity(self.len());
                self.retain_entries(|_, value| {
                    let number = numeric_prefix(&value.to_text());
                    #[allow(clippy::float_cmp)]
                    let duplicate = kept.iter().any(|seen| *seen == number);
                    if !duplicate {
                        kept.push(number);
                    }
                    !duplicate
                })
            }
        }
    }

    /// Keeps the entries whose key is listed, in the receiver's order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<&str, i64> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    /// assert_eq!(mapping.only_keys(&["c", "a", "z"]).entries(), vec![("a", 1), ("c", 3)]);
    /// ```
    #[must_use]
    pub fn only_keys(&self, keys: &[K]) -> Self {
        let wanted: HashSet<&K> = keys.iter().collect();
        self.retain_entries(|key, _| wanted.contains(key))
    }

    /// Removes the entries whose key is listed.
    #[must_use]
    pub fn drop_keys(&self, keys: &[K]) -> Self {
        let unwanted: HashSet<&K> = keys.iter().collect();
        self.retain_entries(|key, _| !unwanted.contains(key))
    }

    /// Concatenates the receiver with `others`.
    ///
    /// Integral keys are renumbered sequentially from `0` across all inputs.
    /// Other keys are kept; a later mapping overwrites an earlier value in
    /// place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let left = OrderedMap::<i64, &str>::from_values(["a", "b"]);
    /// let right = OrderedMap::singleton(7_i64, "c");
    /// assert_eq!(
    ///     left.merge([&right]).entries(),
    ///     vec![(0, "a"), (1, "b"), (2, "c")]
    /// );
    /// ```
    #[must_use]
    pub fn merge<I>(&self, others: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Self>,
    {
        let mut transient = TransientOrderedMap::with_capacity(self.len());
        for (key, value) in self {
            transient.append(key.clone(), value.clone());
        }
        for other in others {
            for (key, value) in other.borrow() {
                transient.append(key.clone(), value.clone());
            }
        }
        transient.persistent()
    }

    /// Merges the nested mappings held as values into one mapping.
    ///
    /// Child mappings are merged like [`merge`](Self::merge); a value that is
    /// not a mapping is appended as a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::{list, mapping};
    ///
    /// let nested = list![list![1, 2], mapping! { "a" => 3 }, 4];
    /// assert_eq!(nested.merge_values(), mapping! { 0 => 1, 1 => 2, "a" => 3, 2 => 4 });
    /// ```
    #[must_use]
    pub fn merge_values(&self) -> Self
    where
        K: SequentialKey,
        V: Nested<K>,
    {
        let mut transient = TransientOrderedMap::new();
        for (_, value) in self {
            match value.as_mapping() {
                Some(child) => {
                    for (key, nested) in child {
                        transient.append(key.clone(), nested.clone());
                    }
                }
                None => transient.push(value.clone()),
            }
        }
        transient.persistent()
    }

    /// Removes the entries whose value appears in `others`, comparing text
    /// forms. Keys are preserved.
    #[must_use]
    pub fn diff(&self, others: &[V]) -> Self
    where
        V: Textual,
    {
        let excluded: HashSet<String> = others
            .iter()
            .map(|value| value.to_text().into_owned())
            .collect();
        self.retain_entries(|_, value| !excluded.contains(&*value.to_text()))
    }

    /// Keeps the entries whose value appears in `others`, comparing text
    /// forms. Keys are preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, &str>::from_values(["a", "b", "c"]);
    /// assert_eq!(mapping.intersect(&["c", "a"]).entries(), vec![(0, "a"), (2, "c")]);
    /// assert_eq!(mapping.diff(&["c", "a"]).entries(), vec![(1, "b")]);
    /// ```
    #[must_use]
    pub fn intersect(&self, others: &[V]) -> Self
    where
        V: Textual,
    {
        let included: HashSet<String> = others
            .iter()
            .map(|value| value.to_text().into_owned())
            .collect();
        self.retain_entries(|_, value| included.contains(&*value.to_text()))
    }

    /// Swaps keys and values. Later duplicates overwrite earlier ones in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns [`KeyTypeError`] for the first value that cannot be a key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<String, i64> =
    ///     [("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
    /// let flipped = mapping.flip::<i64>().unwrap();
    /// assert_eq!(flipped.get(&2), Some(&"b".to_string()));
    /// ```
    pub fn flip<K2>(&self) -> MappingResult<OrderedMap<K2, K>>
    where
        K2: MapKey,
        V: ToKey<K2>,
    {
        let mut transient = TransientOrderedMap::with_capacity(self.len());
        for (position, (key, value)) in self.iter().enumerate() {
            transient.insert(require_key(value, "flip", position)?, key.clone());
        }
        Ok(transient.persistent())
    }

    /// Uses the distinct values as keys, each mapped to `placeholder`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyTypeError`] for the first value that cannot be a key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([3, 1, 3]);
    /// let set = mapping.values_to_keys::<i64, bool>(true).unwrap();
    /// assert_eq!(set.entries(), vec![(3, true), (1, true)]);
    /// ```
    pub fn values_to_keys<K2, W>(&self, placeholder: W) -> MappingResult<OrderedMap<K2, W>>
    where
        K2: MapKey,
        V: ToKey<K2>,
        W: Clone,
    {
        let mut transient = TransientOrderedMap::with_capacity(self.len());
        for (position, (_, value)) in self.iter().enumerate() {
            transient.insert(
                require_key(value, "values_to_keys", position)?,
                placeholder.clone(),
            );
        }
        Ok(transient.persistent())
    }

    /// Extracts `field` from every row.
    ///
    /// The row shape is taken from the first value. When it is a record, only
    /// records carrying the field contribute; otherwise only mappings
    /// carrying the field do. The result is re-indexed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::value::{Key, Value};
    /// use ordered_mapping::{list, mapping};
    ///
    /// let rows = list![
    ///     mapping! { "id" => 1, "name" => "one" },
    ///     mapping! { "id" => 2 },
    ///     mapping! { "id" => 3, "name" => "three" },
    /// ];
    /// let names = rows.column(&Key::from("name"));
    /// assert_eq!(names.get_values(), vec![Value::from("one"), Value::from("three")]);
    /// ```
    #[must_use]
    pub fn column(&self, field: &K) -> OrderedMap<K::Index, V>
    where
        V: Nested<K>,
    {
        let Some(first) = self.first() else {
            return OrderedMap::new();
        };
        let shape = match first.shape() {
            Shape::Record => Shape::Record,
            Shape::Mapping | Shape::Scalar => Shape::Mapping,
        };

        let values = self.iter().enumerate().filter_map(|(position, (_, row))| {
            if row.shape() != shape {
                tracing::trace!(position, ?shape, "column skips a row of another shape");
                return None;
            }
            let found = row.lookup(field);
            if found.is_none() {
                tracing::trace!(position, "column skips a row without the field");
            }
            found.cloned()
        });
        OrderedMap::from_values(values)
    }

    /// Groups mapping rows by the value of `subkey`.
    ///
    /// Every bucket is a list of the rows that share a group value. Listed
    /// labels come first, in the order given, even when empty; other groups
    /// follow in first-seen order. Rows that are not mappings, miss the
    /// subkey, or whose subkey value cannot be a key are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::GroupOptions;
    /// use ordered_mapping::value::Key;
    /// use ordered_mapping::{list, mapping};
    ///
    /// let rows = list![
    ///     mapping! { "type" => "a", "v" => 1 },
    ///     mapping! { "type" => "b", "v" => 2 },
    ///     mapping! { "type" => "a", "v" => 3 },
    /// ];
    /// let grouped = rows.group_by_subkey(&Key::from("type"), &GroupOptions::new());
    /// assert_eq!(
    ///     grouped,
    ///     mapping! {
    ///         "a" => list![mapping! { "type" => "a", "v" => 1 }, mapping! { "type" => "a", "v" => 3 }],
    ///         "b" => list![mapping! { "type" => "b", "v" => 2 }],
    ///     }
    /// );
    /// ```
    #[must_use]
    pub fn group_by_subkey(&self, subkey: &K, options: &GroupOptions<K>) -> Self
    where
        K: SequentialKey,
        V: Nested<K> + ToKey<K>,
    {
        let mut buckets: TransientOrderedMap<K, Vec<V>> = TransientOrderedMap::new();
        if let Some(labels) = options.label_order() {
            for label in labels {
                buckets.insert(label.clone(), Vec::new());
            }
        }

        for (position, (_, row)) in self.iter().enumerate() {
            let Some(fields) = row.as_mapping() else {
                tracing::trace!(position, "group_by_subkey skips a row that is not a mapping");
                continue;
            };
            let Some(group) = fields.get(subkey) else {
                tracing::trace!(position, "group_by_subkey skips a row without the subkey");
                continue;
            };
            let Some(label): Option<K> = group.to_key() else {
                tracing::trace!(
                    position,
                    kind = ToKey::<K>::kind(group),
                    "group_by_subkey skips a row whose group value is not a key"
                );
                continue;
            };

            let stored = if options.unsets_subkey() {
                V::from_mapping(fields.remove(subkey))
            } else {
                row.clone()
            };
            match buckets.get_mut(&label) {
                Some(bucket) => bucket.push(stored),
                None => {
                    buckets.insert(label, vec![stored]);
                }
            }
        }

        buckets
            .persistent()
            .map(|rows| V::from_mapping(OrderedMap::from_values(rows.iter().cloned())))
    }
}


#[cfg(all(test, feature = "value"))]
mod value_tests {
    use super::*;
    use crate::error::MappingError;
    use crate::value::{Key, Value};
    use crate::{list, mapping};
    use rstest::rstest;

    fn people() -> OrderedMap<Key, Value> {
        list![
            mapping! { "id" => 1, "team" => "red", "name" => "ann" },
            mapping! { "id" => 2, "team" => "blue", "name" => "bob" },
            mapping! { "id" => 3, "team" => "red" },
            "not a row",
        ]
    }

    #[rstest]
    fn test_unique_regular_is_loose() {
        let mapping = list![1, "1", 1.0, "01", 2];
        assert_eq!(
            mapping.unique(Collation::Regular),
            mapping! { 0 => 1, 4 => 2 }
        );
        assert_eq!(
            mapping.unique(Collation::Text),
            mapping! { 0 => 1, 3 => "01", 4 => 2 }
        );
    }

    #[rstest]
    fn test_column_skips_rows_without_the_field() {
        assert_eq!(
            people().column(&Key::from("name")),
            list!["ann", "bob"]
        );
    }

    #[rstest]
    fn test_column_on_records_reads_fields() {
        let rows = list![
            Value::record("User", [("name", Value::from("ann"))]),
            mapping! { "name" => "bob" },
            Value::record("User", [("name", Value::from("cid"))]),
        ];
        assert_eq!(rows.column(&Key::from("name")), list!["ann", "cid"]);
    }

    #[rstest]
    fn test_column_of_empty_is_empty() {
        assert!(list![].column(&Key::from("id")).is_empty());
    }

    #[rstest]
    fn test_group_by_subkey_with_labels_and_unset() {
        let options = GroupOptions::new()
            .labels(vec![Key::from("green"), Key::from("red")])
            .unset_subkey(true);
        let grouped = people().group_by_subkey(&Key::from("team"), &options);
        assert_eq!(
            grouped,
            mapping! {
                "green" => list![],
                "red" => list![mapping! { "id" => 1, "name" => "ann" }, mapping! { "id" => 3 }],
                "blue" => list![mapping! { "id" => 2, "name" => "bob" }],
            }
        );
    }

    #[rstest]
    fn test_group_by_subkey_skips_unkeyable_group_values() {
        let rows = list![mapping! { "g" => 1.5 }, mapping! { "g" => 1 }];
        let grouped = rows.group_by_subkey(&Key::from("g"), &GroupOptions::new());
        assert_eq!(grouped, mapping! { 1 => list![mapping! { "g" => 1 }] });
    }

    #[rstest]
    fn test_flip_rejects_unkeyable_values() {
        let error = list![1, 2.5].flip::<Key>().unwrap_err();
        assert_eq!(error, MappingError::from(KeyTypeError::new("flip", 1, "float")));
    }

    #[rstest]
    fn test_values_to_keys_rejects_mappings() {
        let error = list![list![]]
            .values_to_keys::<Key, Value>(Value::Null)
            .unwrap_err();
        assert_eq!(
            error,
            MappingError::from(KeyTypeError::new("values_to_keys", 0, "mapping"))
        );
    }

    #[rstest]
    fn test_merge_values_appends_children() {
        let nested = list![list!["a", "b"], mapping! { "k" => "v" }, list!["c"]];
        assert_eq!(
            nested.merge_values(),
            mapping! { 0 => "a", 1 => "b", "k" => "v", 2 => "c" }
        );
    }
}
