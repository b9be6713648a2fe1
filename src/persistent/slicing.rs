//! Ordering and windowing operations.

use std::cmp::Ordering;

use super::OrderedMap;
use super::natural::natural_cmp;
use super::options::{CaseSensitivity, KeyPolicy, Take};
use crate::typeclass::{LooseCompare, MapKey, Textual, loose_ordering};

/// Stable merge sort.
///
/// Tolerates comparators that are not total orders (loose comparison is not
/// transitive across types).
fn merge_sort<T, F>(items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = merge_sort(left, compare);
    let right = merge_sort(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(left_item), Some(right_item)) = (left.peek(), right.peek()) {
        if compare(right_item, left_item) == Ordering::Less {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

/// Resolves host array-slice arguments into a `start..end` range.
fn slice_bounds(len: usize, offset: isize, length: Option<isize>) -> (usize, usize) {
    let start = if offset < 0 {
        len.saturating_sub(offset.unsigned_abs())
    } else {
        offset.unsigned_abs().min(len)
    };
    let end = match length {
        None => len,
        Some(length) if length < 0 => len.saturating_sub(length.unsigned_abs()),
        Some(length) => start.saturating_add(length.unsigned_abs()).min(len),
    };
    (start, end.max(start))
}

impl<K: MapKey, V: Clone> OrderedMap<K, V> {
    fn with_policy<I>(entries: I, policy: KeyPolicy) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        match policy {
            KeyPolicy::Preserve => entries.into_iter().collect(),
            KeyPolicy::Reindex => Self::renumbered(entries),
        }
    }

    /// Sorts the values ascending by loose comparison and re-indexes.
    ///
    /// The sort is stable; incomparable values keep their relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping: OrderedMap<&str, i64> = [("x", 3), ("y", -1), ("z", 2)].into_iter().collect();
    /// assert_eq!(mapping.sort().entries(), vec![(0, -1), (1, 2), (2, 3)]);
    /// ```
    #[must_use]
    pub fn sort(&self) -> OrderedMap<K::Index, V>
    where
        V: LooseCompare,
    {
        self.sort_by(loose_ordering)
    }

    /// Sorts the values with `comparator` and re-indexes. Stable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([1, 3, 2]);
    /// let descending = mapping.sort_by(|left, right| right.cmp(left));
    /// assert_eq!(descending.get_values(), vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn sort_by<F>(&self, mut comparator: F) -> OrderedMap<K::Index, V>
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        OrderedMap::from_values(merge_sort(self.get_values(), &mut comparator))
    }

    /// Sorts by natural order of the collation text, preserving keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::{CaseSensitivity, OrderedMap};
    ///
    /// let files = OrderedMap::<usize, &str>::from_values(["img12", "img10", "img2", "IMG1"]);
    ///
    /// let sorted = files.sort_natural(CaseSensitivity::Sensitive);
    /// assert_eq!(sorted.entries(), vec![(3, "IMG1"), (2, "img2"), (1, "img10"), (0, "img12")]);
    ///
    /// let sorted = files.sort_natural(CaseSensitivity::Insensitive);
    /// assert_eq!(sorted.keys().get_values(), vec![3, 2, 1, 0]);
    /// ```
    #[must_use]
    pub fn sort_natural(&self, case: CaseSensitivity) -> Self
    where
        V: Textual,
    {
        merge_sort(self.entries(), &mut |(_, left): &(K, V), (_, right): &(K, V)| {
            natural_cmp(&left.to_text(), &right.to_text(), case)
        })
        .into_iter()
        .collect()
    }

    /// Reverses the order, preserving keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, char>::from_values(['a', 'b']);
    /// assert_eq!(mapping.reverse().entries(), vec![(1, 'b'), (0, 'a')]);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.reverse_with(KeyPolicy::Preserve)
    }

    /// Reverses the order under `policy`.
    #[must_use]
    pub fn reverse_with(&self, policy: KeyPolicy) -> Self {
        Self::with_policy(self.entries().into_iter().rev(), policy)
    }

    /// Extracts a window with host array-slice semantics.
    ///
    /// A negative `offset` counts from the end. `length` of `None` runs to the
    /// end; a negative `length` stops that many entries before the end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::{KeyPolicy, OrderedMap};
    ///
    /// let mapping = OrderedMap::<i64, char>::from_values(['a', 'b', 'c', 'd', 'e']);
    ///
    /// let middle = mapping.slice(1, Some(-1), KeyPolicy::Preserve);
    /// assert_eq!(middle.entries(), vec![(1, 'b'), (2, 'c'), (3, 'd')]);
    ///
    /// let tail = mapping.slice(-2, None, KeyPolicy::Reindex);
    /// assert_eq!(tail.entries(), vec![(0, 'd'), (1, 'e')]);
    /// ```
    #[must_use]
    pub fn slice(&self, offset: isize, length: Option<isize>, policy: KeyPolicy) -> Self {
        let (start, end) = slice_bounds(self.len(), offset, length);
        Self::with_policy(self.as_slice()[start..end].iter().cloned(), policy)
    }

    /// The leading entries selected by `take`, keys preserved.
    ///
    /// [`first_n`](Self::first_n) and [`first_while`](Self::first_while) are
    /// shorthands for the two arms.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::{OrderedMap, Take};
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([1, 3, 5, 2, 4]);
    /// assert_eq!(mapping.take_front(Take::While(|value: &i64| *value < 4)).len(), 2);
    /// assert_eq!(mapping.take_front(Take::<fn(&i64) -> bool>::Count(3)).len(), 3);
    /// ```
    #[must_use]
    pub fn take_front<P>(&self, take: Take<P>) -> Self
    where
        P: FnMut(&V) -> bool,
    {
        let count = match take {
            Take::Count(count) => count,
            Take::While(mut predicate) => self
                .iter()
                .take_while(|(_, value)| predicate(value))
                .count(),
        };
        if count >= self.len() {
            return self.clone();
        }
        self.iter()
            .take(count)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// The first `count` entries, keys preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([1, 3, 5, 2, 4]);
    /// assert_eq!(mapping.first_n(2).get_values(), vec![1, 3]);
    /// assert_eq!(mapping.first_n(99), mapping);
    /// ```
    #[must_use]
    pub fn first_n(&self, count: usize) -> Self {
        self.take_front(Take::<fn(&V) -> bool>::Count(count))
    }

    /// The leading entries while `predicate` holds, keys preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<usize, i64>::from_values([1, 3, 5, 2, 4]);
    /// assert_eq!(mapping.first_while(|value| *value < 4).get_values(), vec![1, 3]);
    /// ```
    #[must_use]
    pub fn first_while<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&V) -> bool,
    {
        self.take_front(Take::While(predicate))
    }

    /// The entries from position `n`, see [`slice`](Self::slice).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::{KeyPolicy, OrderedMap};
    ///
    /// let mapping = OrderedMap::<i64, i64>::from_values(0..=10);
    /// let tail = mapping.from_n(5, None, KeyPolicy::Preserve);
    /// assert_eq!(tail.first_key(), Some(&5));
    /// assert_eq!(tail.len(), 6);
    /// ```
    #[must_use]
    pub fn from_n(&self, n: isize, length: Option<isize>, policy: KeyPolicy) -> Self {
        self.slice(n, length, policy)
    }

    /// The last `count` entries, keys preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::persistent::OrderedMap;
    ///
    /// let mapping = OrderedMap::<i64, i64>::from_values(0..=10);
    /// assert!(mapping.last_n(0).is_empty());
    /// assert_eq!(mapping.last_n(1).entries(), vec![(10, 10)]);
    /// assert_eq!(mapping.last_n(99), mapping);
    /// ```
    #[must_use]
    pub fn last_n(&self, count: usize) -> Self {
        if count >= self.len() {
            return self.clone();
        }
        self.iter()
            .skip(self.len().saturating_sub(count))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
