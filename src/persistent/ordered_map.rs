//! Persistent (immutable) ordered mapping.
//!
//! This module provides [`OrderedMap`], an immutable associative array whose
//! entries keep their insertion order.
//!
//! # Overview
//!
//! `OrderedMap` stores its entries behind a reference counter. Every
//! transformation builds a new instance in a
//! [`TransientOrderedMap`] and freezes it, so the receiver is never mutated
//! and clones are O(1).
//!
//! - O(1) `get` and `contains_key`
//! - O(1) `len`, `first` and `last`
//! - O(N) point updates (`insert`, `remove`, `push`, `unshift`)
//!
//! # Keys
//!
//! Keys are unique. Inserting an existing key overwrites its value in place:
//! the entry keeps its original position. Integral keys (see
//! [`MapKey::position`]) drive auto-indexing: a pushed value receives one past
//! the largest integral key inserted so far.
//!
//! Operations either *preserve* keys (`filter`, `reverse`, `first_n`, ...) or
//! *re-index* their result with fresh sequential keys `0..n` (`values`,
//! `sort`, `column`, ...). Re-indexed results use the key type
//! [`MapKey::Index`].
//!
//! # Examples
//!
//! ```rust
//! use ordered_mapping::persistent::OrderedMap;
//!
//! let scores: OrderedMap<&str, i64> = [("carol", 7), ("alice", 9), ("bob", 4)]
//!     .into_iter()
//!     .collect();
//!
//! let passed = scores.filter(|score| *score > 5);
//! assert_eq!(passed.entries(), vec![("carol", 7), ("alice", 9)]);
//!
//! // The receiver is unchanged
//! assert_eq!(scores.len(), 3);
//!
//! // Sorting re-indexes
//! assert_eq!(scores.sort().entries(), vec![(0, 4), (1, 7), (2, 9)]);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;

use super::ReferenceCounter;
use super::transient::{Table, TransientOrderedMap};
use crate::error::{MappingResult, NextPositionError};
use crate::typeclass::{
    Foldable, MapKey, Monoid, Semigroup, SequentialKey, Truthy, TypeConstructor,
};

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// An immutable, insertion-ordered mapping from keys to values.
///
/// # Type Parameters
///
/// - `K`: The key type. Must implement [`MapKey`] for most operations.
/// - `V`: The value type. Operations that need to know something about values
///   (truthiness, loose comparison, nesting, ...) state it as a bound.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::persistent::OrderedMap;
///
/// let mapping = OrderedMap::new().insert("a", 1).insert("b", 2).insert("a", 10);
/// assert_eq!(mapping.entries(), vec![("a", 10), ("b", 2)]);
/// ```
pub struct OrderedMap<K, V> {
    table: ReferenceCounter<Table<K, V>>,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new empty mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<String, i64> = OrderedMap::new();
    /// assert!(mapping.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_table(ReferenceCounter::new(Table::new()))
    }

    pub(super) const fn from_table(table: ReferenceCounter<Table<K, V>>) -> Self {
        Self { table }
    }

    /// The entries in order.
    pub(super) fn as_slice(&self) -> &[(K, V)] {
        &self.table.entries
    }

    /// Returns the number of top-level entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.entries.len()
    }

    /// Alias of [`len`](Self::len).
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the mapping contains no entry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }

    /// Returns an iterator over `(key, value)` pairs in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, char>::from_values(['x', 'y']);
    /// let pairs: Vec<(&usize, &char)> = mapping.iter().collect();
    /// assert_eq!(pairs, vec![(&0, &'x'), (&1, &'y')]);
    /// ```
    pub fn iter(&self) -> OrderedMapIterator<'_, K, V> {
        OrderedMapIterator {
            inner: self.table.entries.iter(),
        }
    }

    /// The first key, or `None` when empty.
    #[must_use]
    pub fn first_key(&self) -> Option<&K> {
        self.table.entries.first().map(|(key, _)| key)
    }

    /// The first value, or `None` when empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([3, 4]);
    /// assert_eq!(mapping.first(), Some(&3));
    /// assert_eq!(OrderedMap::<usize, i64>::new().first(), None);
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&V> {
        self.table.entries.first().map(|(_, value)| value)
    }

    /// The last key of the ordered key sequence, or `None` when empty.
    #[must_use]
    pub fn last_key(&self) -> Option<&K> {
        self.table.entries.last().map(|(key, _)| key)
    }

    /// The last value, or `None` when empty.
    #[must_use]
    pub fn last(&self) -> Option<&V> {
        self.table.entries.last().map(|(_, value)| value)
    }
}

impl<K: Clone, V> OrderedMap<K, V> {
    /// The first key, or `default` when empty.
    #[must_use]
    pub fn first_key_or(&self, default: K) -> K {
        self.first_key().cloned().unwrap_or(default)
    }

    /// The last key, or `default` when empty.
    #[must_use]
    pub fn last_key_or(&self, default: K) -> K {
        self.last_key().cloned().unwrap_or(default)
    }
}

impl<K, V: Clone> OrderedMap<K, V> {
    /// The first value, or `default` when empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let empty: OrderedMap<usize, &str> = OrderedMap::new();
    /// assert_eq!(empty.first_or("N/A"), "N/A");
    /// ```
    #[must_use]
    pub fn first_or(&self, default: V) -> V {
        self.first().cloned().unwrap_or(default)
    }

    /// The last value, or `default` when empty.
    #[must_use]
    pub fn last_or(&self, default: V) -> V {
        self.last().cloned().unwrap_or(default)
    }

    /// The values in order, as a plain `Vec`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<&str, i64> = [("a", 1), ("b", 2)].into_iter().collect();
    /// assert_eq!(mapping.get_values(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn get_values(&self) -> Vec<V> {
        self.table
            .entries
            .iter()
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl<K: MapKey, V> OrderedMap<K, V> {
    /// The value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::singleton("name".to_string(), 5);
    /// assert_eq!(mapping.get("name"), Some(&5));
    /// assert_eq!(mapping.get("other"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }
}

impl<K: MapKey, V: Clone> OrderedMap<K, V> {
    /// Creates a mapping containing a single entry.
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        let mut transient = TransientOrderedMap::with_capacity(1);
        transient.insert(key, value);
        transient.persistent()
    }

    /// Converts the mapping into a [`TransientOrderedMap`] for batch updates.
    ///
    /// The entries are copied only when they are shared with another instance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<i64, &str>::from_values(["a"]);
    /// let mut transient = mapping.clone().transient();
    /// transient.push("b");
    /// assert_eq!(transient.persistent().get_values(), vec!["a", "b"]);
    /// assert_eq!(mapping.len(), 1);
    /// ```
    #[must_use]
    pub fn transient(self) -> TransientOrderedMap<K, V> {
        TransientOrderedMap::from_table(ReferenceCounter::unwrap_or_clone(self.table))
    }

    /// Returns a new mapping with `value` stored under `key`.
    ///
    /// An existing key is overwritten in place; a new key is appended.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let original = OrderedMap::singleton("one", 1);
    /// let updated = original.insert("one", 100).insert("two", 2);
    /// assert_eq!(original.get("one"), Some(&1));
    /// assert_eq!(updated.entries(), vec![("one", 100), ("two", 2)]);
    /// ```
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let mut transient = self.clone().transient();
        transient.insert(key, value);
        transient.persistent()
    }

    /// Returns a new mapping without `key`.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.contains_key(key) {
            return self.clone();
        }
        let mut transient = self.clone().transient();
        transient.remove(key);
        transient.persistent()
    }

    /// Returns `true` if the keys are exactly the positions `0..len` in order.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.iter()
            .enumerate()
            .all(|(index, (key, _))| key.position() == i64::try_from(index).ok())
    }

    /// The `(key, value)` pairs as an owned `Vec`.
    #[must_use]
    pub fn entries(&self) -> Vec<(K, V)> {
        self.table.entries.clone()
    }

    /// Alias of [`entries`](Self::entries).
    #[must_use]
    pub fn all(&self) -> Vec<(K, V)> {
        self.entries()
    }

    /// The values re-indexed with sequential keys `0..n`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<&str, char> = [("x", 'a'), ("y", 'b')].into_iter().collect();
    /// assert_eq!(mapping.values().entries(), vec![(0, 'a'), (1, 'b')]);
    /// ```
    #[must_use]
    pub fn values(&self) -> OrderedMap<K::Index, V> {
        OrderedMap::from_values(self.iter().map(|(_, value)| value.clone()))
    }

    /// The keys as the values of a re-indexed mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<&str, i64> = [("a", 1), ("b", 2)].into_iter().collect();
    /// assert_eq!(mapping.keys().get_values(), vec!["a", "b"]);
    /// ```
    #[must_use]
    pub fn keys(&self) -> OrderedMap<K::Index, K> {
        OrderedMap::from_values(self.iter().map(|(key, _)| key.clone()))
    }

    /// Keeps the entries accepted by `keep`; keys and order are preserved.
    pub(super) fn retain_entries<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter()
            .filter(|(key, value)| keep(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Builds a mapping where integral keys are renumbered sequentially and
    /// other keys are kept (later duplicates overwrite in place).
    pub(super) fn renumbered<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut transient = TransientOrderedMap::new();
        for (key, value) in entries {
            transient.append(key, value);
        }
        transient.persistent()
    }
}

impl<K: SequentialKey, V: Clone> OrderedMap<K, V> {
    /// Creates a mapping from values, keyed `0..n`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<i64, &str>::from_values(["a", "b"]);
    /// assert_eq!(mapping.entries(), vec![(0, "a"), (1, "b")]);
    /// ```
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let values = values.into_iter();
        let mut transient = TransientOrderedMap::with_capacity(values.size_hint().0);
        for value in values {
            transient.push(value);
        }
        transient.persistent()
    }

    /// Returns a new mapping with `value` appended under the next auto index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::singleton(5_i64, "five").push("six");
    /// assert_eq!(mapping.get(&6), Some(&"six"));
    /// ```
    ///
    /// When the largest integer key leaves no next position (for example
    /// `i64::MAX`), the value is not added, a warning is logged, and the
    /// mapping is returned unchanged. [`try_push`](Self::try_push) reports
    /// that case as an error instead.
    #[must_use]
    pub fn push(&self, value: V) -> Self {
        self.appended(value).unwrap_or_else(|error| {
            tracing::warn!(%error, "push refused");
            self.clone()
        })
    }

    /// Returns a new mapping with `value` appended under the next auto index.
    ///
    /// # Errors
    ///
    /// Returns [`NextPositionError`](crate::error::NextPositionError) when
    /// the largest integer key leaves no next position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// assert!(OrderedMap::singleton(i64::MAX, "last").try_push("next").is_err());
    /// assert_eq!(OrderedMap::singleton(1_i64, "one").try_push("two").unwrap().len(), 2);
    /// ```
    pub fn try_push(&self, value: V) -> MappingResult<Self> {
        self.appended(value).map_err(|error| {
            tracing::debug!(%error, "no free position after the largest integer key");
            error.into()
        })
    }

    fn appended(&self, value: V) -> Result<Self, NextPositionError> {
        let mut table = Table::clone(&self.table);
        table.push(value)?;
        Ok(Self::from_table(ReferenceCounter::new(table)))
    }

    /// Returns a new mapping with `value` prepended.
    ///
    /// Integral keys are renumbered from `0`; other keys are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<i64, char>::from_values(['b', 'c']).unshift('a');
    /// assert_eq!(mapping.entries(), vec![(0, 'a'), (1, 'b'), (2, 'c')]);
    /// ```
    #[must_use]
    pub fn unshift(&self, value: V) -> Self {
        Self::renumbered(iter::once((K::from_position(0), value)).chain(self.entries()))
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over `(key, value)` pairs of an [`OrderedMap`].
pub struct OrderedMapIterator<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for OrderedMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for OrderedMapIterator<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl<K, V> ExactSizeIterator for OrderedMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// An owning iterator over `(key, value)` pairs of an [`OrderedMap`].
pub struct OrderedMapIntoIterator<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for OrderedMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for OrderedMapIntoIterator<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for OrderedMapIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Clone for OrderedMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            table: ReferenceCounter::clone(&self.table),
        }
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: MapKey, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let mut transient = TransientOrderedMap::new();
        transient.extend(iterable);
        transient.persistent()
    }
}

impl<K: MapKey, V> From<Vec<(K, V)>> for OrderedMap<K, V> {
    fn from(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: MapKey, V: Clone> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = OrderedMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        OrderedMapIntoIterator {
            inner: ReferenceCounter::unwrap_or_clone(self.table).entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = OrderedMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two mappings are equal when they hold the same entries in the same order.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.table, &other.table) || self.as_slice() == other.as_slice()
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Hash, V: Hash> Hash for OrderedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

/// A mapping is truthy unless it is empty.
impl<K, V> Truthy for OrderedMap<K, V> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// An `OrderedMap` is a container of `V` with the key type fixed.
impl<K, V> TypeConstructor for OrderedMap<K, V> {
    type Inner = V;
    type WithType<B> = OrderedMap<K, B>;
}

impl<K: MapKey, V: Clone> Foldable for OrderedMap<K, V> {
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, V) -> B,
    {
        self.into_iter()
            .fold(init, |accumulator, (_, value)| function(accumulator, value))
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(V, B) -> B,
    {
        self.into_iter()
            .rev()
            .fold(init, |accumulator, (_, value)| function(value, accumulator))
    }
}

/// `combine` is [`merge`](OrderedMap::merge).
impl<K: MapKey, V: Clone> Semigroup for OrderedMap<K, V> {
    fn combine(self, other: Self) -> Self {
        self.merge([other])
    }
}

impl<K: MapKey, V: Clone> Monoid for OrderedMap<K, V> {
    fn empty() -> Self {
        Self::new()
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(OrderedMap<i64, String>: Send, Sync);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for OrderedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + MapKey,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut transient = TransientOrderedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            transient.insert(key, value);
        }
        Ok(transient.persistent())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedMap<K, V>
where
    K: serde::Deserialize<'de> + MapKey,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(all(test, feature = "arc"))]
mod multithread_tests {
    use super::*;
    use rstest::rstest;
    use std::thread;

    #[rstest]
    fn test_mapping_shared_across_threads() {
        let mapping = OrderedMap::<usize, String>::from_values(["a".to_string(), "b".to_string()]);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mapping = mapping.clone();
                thread::spawn(move || mapping.get(&1).cloned())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some("b".to_string()));
        }
    }
}
