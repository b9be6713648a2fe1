//! Mapping and reduction operations.

use super::OrderedMap;
use super::transient::TransientOrderedMap;
use crate::error::MappingResult;
use crate::typeclass::{MapKey, SequentialKey};

/// Results of a `map_key_value` mapper.
///
/// A mapper result places one value into the result mapping, either under an
/// explicit key (overwriting an earlier entry in place) or appended under the
/// next auto index.
///
/// Implemented for:
///
/// - `(K, V)`: always an explicit key
/// - `(Option<K>, V)`: `None` appends
/// - [`Value`](crate::value::Value) and `Vec<Value>`: a dynamic
///   `[key, value]` pair, validated at runtime
pub trait IntoKeyValue<K, V> {
    /// Places the result into `target`. `position` is the position of the
    /// source entry, used in error reports.
    ///
    /// # Errors
    ///
    /// Returns an error when the result is not a well-formed pair, or when it
    /// appends after the largest possible integer key.
    fn place_into(self, target: &mut TransientOrderedMap<K, V>, position: usize)
    -> MappingResult<()>;
}

impl<K: MapKey, V> IntoKeyValue<K, V> for (K, V) {
    fn place_into(
        self,
        target: &mut TransientOrderedMap<K, V>,
        _position: usize,
    ) -> MappingResult<()> {
        target.insert(self.0, self.1);
        Ok(())
    }
}

impl<K: SequentialKey, V> IntoKeyValue<K, V> for (Option<K>, V) {
    fn place_into(
        self,
        target: &mut TransientOrderedMap<K, V>,
        _position: usize,
    ) -> MappingResult<()> {
        match self {
            (Some(key), value) => {
                target.insert(key, value);
                Ok(())
            }
            (None, value) => target.try_push(value),
        }
    }
}

impl<K: MapKey, V: Clone> OrderedMap<K, V> {
    /// Transforms every value; keys and order are preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<&str, i64> = [("a", 1), ("b", 2)].into_iter().collect();
    /// let doubled = mapping.map(|value| value * 2);
    /// assert_eq!(doubled.entries(), vec![("a", 2), ("b", 4)]);
    /// ```
    #[must_use]
    pub fn map<W, F>(&self, mut function: F) -> OrderedMap<K, W>
    where
        F: FnMut(&V) -> W,
    {
        let mut transient = TransientOrderedMap::with_capacity(self.len());
        for (key, value) in self {
            transient.insert(key.clone(), function(value));
        }
        transient.persistent()
    }

    /// Maps every entry to a new `(key, value)` pair.
    ///
    /// The mapper receives the key and the value. Explicit keys overwrite
    /// earlier entries in place (last write wins); appended values receive
    /// one past the largest integral key placed so far.
    ///
    /// # Errors
    ///
    /// Fails with [`MapperContractError`](crate::error::MapperContractError)
    /// when a dynamic mapper result is not a `[key, value]` pair, and with
    /// [`KeyTypeError`](crate::error::KeyTypeError) when its key cannot be
    /// used as a key. An appended result fails with
    /// [`NextPositionError`](crate::error::NextPositionError) when an earlier
    /// result took the largest integer key. Explicitly keyed pairs never fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<&str, i64> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    ///
    /// let renamed = mapping
    ///     .map_key_value(|key, value| (format!("{key}x"), value + 1))
    ///     .unwrap();
    /// assert_eq!(renamed.get("bx"), Some(&3));
    ///
    /// let listed: OrderedMap<usize, i64> = mapping
    ///     .map_key_value(|_, value| (None, value * 10))
    ///     .unwrap();
    /// assert_eq!(listed.entries(), vec![(0, 10), (1, 20), (2, 30)]);
    /// ```
    pub fn map_key_value<K2, V2, R, F>(&self, mut mapper: F) -> MappingResult<OrderedMap<K2, V2>>
    where
        K2: MapKey,
        R: IntoKeyValue<K2, V2>,
        F: FnMut(&K, &V) -> R,
    {
        let mut transient = TransientOrderedMap::with_capacity(self.len());
        for (position, (key, value)) in self.iter().enumerate() {
            mapper(key, value).place_into(&mut transient, position)?;
        }
        Ok(transient.persistent())
    }

    /// Transforms the whole collection at once.
    ///
    /// `function` receives the entries and returns the entries of the result,
    /// which are collected with overwrite-on-insert.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([1, 2, 3]);
    /// let pairs_only = mapping.pass(|entries| {
    ///     entries.into_iter().filter(|(key, _)| key % 2 == 1)
    /// });
    /// assert_eq!(pairs_only.entries(), vec![(1, 2)]);
    /// ```
    #[must_use]
    pub fn pass<K2, V2, I, F>(&self, function: F) -> OrderedMap<K2, V2>
    where
        K2: MapKey,
        I: IntoIterator<Item = (K2, V2)>,
        F: FnOnce(Vec<(K, V)>) -> I,
    {
        function(self.entries()).into_iter().collect()
    }

    /// Left fold over the values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values(1..=10);
    /// assert_eq!(mapping.reduce(0, |total, value| total + value), 55);
    /// ```
    pub fn reduce<A, F>(&self, initial: A, mut function: F) -> A
    where
        F: FnMut(A, &V) -> A,
    {
        self.iter()
            .fold(initial, |accumulator, (_, value)| function(accumulator, value))
    }

    /// Calls `function` on every value and returns the receiver unchanged.
    pub fn each<F>(&self, function: F) -> &Self
    where
        F: FnMut(&V),
    {
        self.tap(function)
    }

    /// Alias of [`each`](Self::each).
    pub fn tap<F>(&self, mut function: F) -> &Self
    where
        F: FnMut(&V),
    {
        for (_, value) in self {
            function(value);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn letters() -> OrderedMap<String, i64> {
        [("a", 1), ("b", 2), ("c", 3)]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    #[rstest]
    fn test_map_preserves_keys() {
        let incremented = letters().map(|value| value + 1);
        assert_eq!(incremented.keys(), letters().keys());
        assert_eq!(incremented.get_values(), vec![2, 3, 4]);
    }

    #[rstest]
    fn test_map_key_value_append_after_largest_key_fails() {
        let result = letters().map_key_value(|key, value| {
            if key == "a" {
                (Some(i64::MAX), *value)
            } else {
                (None, *value)
            }
        });
        assert_eq!(
            result,
            Err(crate::error::MappingError::from(
                crate::error::NextPositionError { operation: "push" }
            ))
        );
    }

    #[rstest]
    fn test_map_key_value_renames_keys() {
        let renamed = letters()
            .map_key_value(|key, value| (format!("{key}x"), value + 1))
            .unwrap();
        assert_eq!(
            renamed.entries(),
            vec![
                ("ax".to_string(), 2),
                ("bx".to_string(), 3),
                ("cx".to_string(), 4),
            ]
        );
    }

    #[rstest]
    fn test_map_key_value_last_write_wins_in_place() {
        let collapsed = letters()
            .map_key_value(|key, value| (if key == "a" { "z" } else { "y" }, *value))
            .unwrap();
        assert_eq!(collapsed.entries(), vec![("z", 1), ("y", 3)]);
    }

    #[rstest]
    fn test_appended_values_skip_explicit_keys() {
        let source = OrderedMap::<usize, i64>::from_values([0, 1, 2]);
        let mixed: OrderedMap<i64, i64> = source
            .map_key_value(|_, value| {
                if *value == 0 {
                    (Some(5_i64), *value)
                } else {
                    (None, *value)
                }
            })
            .unwrap();
        assert_eq!(mixed.entries(), vec![(5, 0), (6, 1), (7, 2)]);
    }

    #[rstest]
    fn test_each_and_tap_return_receiver() {
        let mapping = letters();
        let mut total = 0;
        let returned = mapping.each(|value| total += value);
        assert_eq!(returned, &mapping);
        assert_eq!(total, 6);

        let mut visited = Vec::new();
        mapping.tap(|value| visited.push(*value)).tap(|value| visited.push(*value));
        assert_eq!(visited, vec![1, 2, 3, 1, 2, 3]);
    }

    #[rstest]
    fn test_reduce_on_empty_returns_initial() {
        let empty: OrderedMap<String, i64> = OrderedMap::new();
        assert_eq!(empty.reduce(42, |total, value| total + value), 42);
    }
}
