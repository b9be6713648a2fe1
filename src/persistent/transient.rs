//! Transient (mutable) builder for [`OrderedMap`].
//!
//! Operations accumulate their result in a [`TransientOrderedMap`] and freeze
//! it with [`TransientOrderedMap::persistent`] before returning, so mutation
//! never escapes the call that performs it.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;
use std::mem;
use std::rc::Rc;

use super::{OrderedMap, ReferenceCounter};
use crate::error::{MappingResult, NextPositionError};
use crate::typeclass::{MapKey, SequentialKey};

// =============================================================================
// Table
// =============================================================================

/// Entry storage shared by the persistent and transient maps.
///
/// `index` maps every key to its slot in `entries`. `next_position` is one
/// past the largest integral key ever inserted, never below zero, and `None`
/// once that key is `i64::MAX`.
#[derive(Clone)]
pub(super) struct Table<K, V> {
    pub(super) entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
    next_position: Option<i64>,
}

impl<K, V> Table<K, V> {
    pub(super) fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            next_position: Some(0),
        }
    }
}

impl<K: MapKey, V> Table<K, V> {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_position: Some(0),
        }
    }

    /// Inserts or overwrites in place, returning the previous value.
    pub(super) fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(position) = key.position()
            && self.next_position.is_some_and(|next| position >= next)
        {
            self.next_position = position.checked_add(1);
        }

        if let Some(&slot) = self.index.get(&key) {
            return Some(mem::replace(&mut self.entries[slot].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// The position the next pushed value receives, if there is one.
    pub(super) fn next_position(&self) -> Option<usize> {
        self.next_position.and_then(|next| usize::try_from(next).ok())
    }

    /// Inserts with integral keys moved to the next position.
    pub(super) fn append(&mut self, key: K, value: V) -> Result<(), NextPositionError> {
        let key = if key.position().is_some() {
            self.next_position()
                .and_then(|position| key.renumbered(position))
                .ok_or(NextPositionError { operation: "append" })?
        } else {
            key
        };
        self.insert(key, value);
        Ok(())
    }

    pub(super) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(key)?;
        let (_, value) = self.entries.remove(slot);
        for (shifted, _) in &self.entries[slot..] {
            if let Some(position) = self.index.get_mut::<K>(shifted) {
                *position -= 1;
            }
        }
        Some(value)
    }

    pub(super) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub(super) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        Some(&mut self.entries[slot].1)
    }

    pub(super) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }
}

impl<K: SequentialKey, V> Table<K, V> {
    pub(super) fn push(&mut self, value: V) -> Result<(), NextPositionError> {
        let key = self
            .next_position()
            .and_then(K::try_from_position)
            .ok_or(NextPositionError { operation: "push" })?;
        self.insert(key, value);
        Ok(())
    }
}

// =============================================================================
// TransientOrderedMap Definition
// =============================================================================

/// A mutable, single-owner builder for [`OrderedMap`].
///
/// Inserting an existing key overwrites its value in place; the entry keeps
/// its original position. Pushed values receive one past the largest integral
/// key inserted so far.
///
/// # Thread Safety
///
/// `TransientOrderedMap` is `!Send` and `!Sync`; it is meant to live inside a
/// single call and be frozen with [`persistent`](Self::persistent).
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::persistent::TransientOrderedMap;
///
/// let mut transient: TransientOrderedMap<i64, &str> = TransientOrderedMap::new();
/// transient.insert(5, "five");
/// transient.push("six");
/// transient.insert(5, "FIVE");
///
/// let mapping = transient.persistent();
/// assert_eq!(mapping.entries(), vec![(5, "FIVE"), (6, "six")]);
/// ```
pub struct TransientOrderedMap<K, V> {
    table: Table<K, V>,
    _marker: PhantomData<Rc<()>>,
}

static_assertions::assert_not_impl_any!(TransientOrderedMap<i64, String>: Send, Sync);
static_assertions::assert_not_impl_any!(TransientOrderedMap<String, i64>: Send, Sync);

impl<K, V> TransientOrderedMap<K, V> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::from_table(Table::new())
    }

    pub(super) const fn from_table(table: Table<K, V>) -> Self {
        Self {
            table,
            _marker: PhantomData,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.entries.len()
    }

    /// Returns `true` if the builder holds no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }

    /// Freezes the builder into an immutable [`OrderedMap`].
    #[must_use]
    pub fn persistent(self) -> OrderedMap<K, V> {
        OrderedMap::from_table(ReferenceCounter::new(self.table))
    }
}

impl<K: MapKey, V> TransientOrderedMap<K, V> {
    /// Creates an empty builder with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_table(Table::with_capacity(capacity))
    }

    /// Inserts `value` under `key`, overwriting in place.
    ///
    /// Returns the previous value of `key`, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert(key, value)
    }

    /// Inserts `value`, moving an integral `key` to the next free position.
    ///
    /// Non-integral keys are inserted as they are. This is how `merge`
    /// renumbers integer keys while string keys overwrite. An integral key is
    /// dropped with a warning when no position is left after the largest
    /// integer key.
    pub fn append(&mut self, key: K, value: V) {
        if let Err(error) = self.table.append(key, value) {
            tracing::warn!(%error, "append refused");
        }
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove(key)
    }

    /// The value stored under `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key)
    }

    /// A mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get_mut(key)
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

impl<K: SequentialKey, V> TransientOrderedMap<K, V> {
    /// Appends `value` under the next auto index.
    ///
    /// When the largest integer key leaves no next position (for example
    /// `i64::MAX`), the value is dropped with a warning; use
    /// [`try_push`](Self::try_push) to observe that case.
    pub fn push(&mut self, value: V) {
        if let Err(error) = self.table.push(value) {
            tracing::warn!(%error, "push refused");
        }
    }

    /// Appends `value` under the next auto index.
    ///
    /// # Errors
    ///
    /// Returns [`NextPositionError`] when no position is left after the
    /// largest integer key. The builder is unchanged in that case.
    pub fn try_push(&mut self, value: V) -> MappingResult<()> {
        self.table.push(value).map_err(|error| {
            tracing::debug!(%error, "no free position after the largest integer key");
            error.into()
        })
    }
}

impl<K, V> Default for TransientOrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: MapKey, V> Extend<(K, V)> for TransientOrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_insert_overwrites_in_place() {
        let mut transient = TransientOrderedMap::new();
        assert_eq!(transient.insert("a", 1), None);
        transient.insert("b", 2);
        assert_eq!(transient.insert("a", 10), Some(1));

        let mapping = transient.persistent();
        assert_eq!(mapping.entries(), vec![("a", 10), ("b", 2)]);
    }

    #[rstest]
    fn test_push_follows_largest_integral_key() {
        let mut transient: TransientOrderedMap<i64, &str> = TransientOrderedMap::new();
        transient.insert(7, "seven");
        transient.insert(2, "two");
        transient.push("eight");
        assert_eq!(transient.get(&8), Some(&"eight"));
    }

    #[rstest]
    fn test_negative_keys_do_not_lower_the_auto_index() {
        let mut transient: TransientOrderedMap<i64, &str> = TransientOrderedMap::new();
        transient.insert(-5, "minus five");
        transient.push("zero");
        assert_eq!(transient.get(&0), Some(&"zero"));
    }

    #[rstest]
    fn test_remove_keeps_lookups_consistent() {
        let mut transient = TransientOrderedMap::new();
        transient.extend([("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(transient.remove("a"), Some(1));
        assert_eq!(transient.remove("a"), None);
        assert_eq!(transient.get("c"), Some(&3));
        assert_eq!(transient.len(), 2);
        transient.insert("c", 30);
        assert_eq!(transient.persistent().entries(), vec![("b", 2), ("c", 30)]);
    }

    #[rstest]
    fn test_remove_shifts_every_later_slot() {
        let mut transient: TransientOrderedMap<String, usize> = TransientOrderedMap::new();
        transient.extend(["w", "x", "y", "z"].into_iter().enumerate().map(|(index, key)| (key.to_string(), index)));
        assert_eq!(transient.remove("x"), Some(1));
        assert_eq!(transient.remove("w"), Some(0));
        assert_eq!(transient.get("y"), Some(&2));
        assert_eq!(transient.get_mut("z").map(|value| *value), Some(3));
        assert_eq!(transient.remove("z"), Some(3));
        assert_eq!(
            transient.persistent().entries(),
            vec![("y".to_string(), 2)]
        );
    }

    #[rstest]
    fn test_append_renumbers_integral_keys_only() {
        let mut transient: TransientOrderedMap<i64, &str> = TransientOrderedMap::new();
        transient.append(10, "x");
        transient.append(3, "y");
        assert_eq!(transient.persistent().entries(), vec![(0, "x"), (1, "y")]);

        let mut named: TransientOrderedMap<String, i64> = TransientOrderedMap::new();
        named.append("k".to_string(), 1);
        named.append("k".to_string(), 2);
        assert_eq!(named.persistent().entries(), vec![("k".to_string(), 2)]);
    }

    #[rstest]
    fn test_get_mut_updates_in_place() {
        let mut transient = TransientOrderedMap::new();
        transient.insert("a", vec![1]);
        if let Some(bucket) = transient.get_mut("a") {
            bucket.push(2);
        }
        assert!(transient.get_mut("b").is_none());
        assert_eq!(transient.get("a"), Some(&vec![1, 2]));
    }

    #[rstest]
    fn test_push_after_largest_key_is_refused() {
        let mut transient: TransientOrderedMap<i64, &str> = TransientOrderedMap::new();
        transient.insert(i64::MAX, "original");
        assert_eq!(
            transient.try_push("pushed"),
            Err(crate::error::MappingError::from(NextPositionError { operation: "push" }))
        );
        transient.push("pushed");
        transient.insert(3, "three");
        assert_eq!(
            transient.persistent().entries(),
            vec![(i64::MAX, "original"), (3, "three")]
        );
    }

    #[rstest]
    fn test_push_after_largest_narrow_key_is_refused() {
        let mut transient: TransientOrderedMap<i32, char> = TransientOrderedMap::new();
        transient.insert(i32::MAX, 'a');
        assert!(transient.try_push('b').is_err());
        transient.append(0, 'c');
        assert_eq!(transient.persistent().entries(), vec![(i32::MAX, 'a')]);
    }

    #[rstest]
    fn test_push_before_largest_key_succeeds() {
        let mut transient: TransientOrderedMap<i64, &str> = TransientOrderedMap::new();
        transient.insert(i64::MAX - 1, "almost");
        assert_eq!(transient.try_push("last"), Ok(()));
        assert_eq!(transient.get(&i64::MAX), Some(&"last"));
        assert!(transient.try_push("overflow").is_err());
    }

    #[rstest]
    fn test_removed_position_is_not_reused_by_push() {
        let mut transient: TransientOrderedMap<usize, char> = TransientOrderedMap::new();
        transient.push('a');
        transient.push('b');
        transient.remove(&1);
        transient.push('c');
        assert_eq!(transient.persistent().entries(), vec![(0, 'a'), (2, 'c')]);
    }
}
