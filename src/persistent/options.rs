//! Option types that configure mapping operations.
//!
//! Every option type implements `Default`, which matches the behavior of the
//! operation when the option is not mentioned.

/// Whether an operation keeps the keys of surviving entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyPolicy {
    /// Keep every key.
    #[default]
    Preserve,
    /// Renumber integral keys sequentially from `0`; keep other keys.
    Reindex,
}

/// How values are compared for equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Equality {
    /// Coercive comparison through [`LooseCompare`](crate::typeclass::LooseCompare).
    #[default]
    Loose,
    /// Exact type-and-value comparison through `PartialEq`.
    Strict,
}

/// How `unique` decides that two values are duplicates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Collation {
    /// Equal collation text ([`Textual`](crate::typeclass::Textual)).
    #[default]
    Text,
    /// Loose equality ([`LooseCompare`](crate::typeclass::LooseCompare)).
    Regular,
    /// Equal numeric value of the collation text.
    Numeric,
}

/// Case handling of natural ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    /// `"B"` sorts before `"a"`.
    #[default]
    Sensitive,
    /// Letters compare without regard to case.
    Insensitive,
}

/// How many leading entries [`take_front`](crate::persistent::OrderedMap::take_front)
/// keeps: a fixed count, or as long as a predicate holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Take<P> {
    /// The first `n` entries.
    Count(usize),
    /// The leading entries whose value satisfies the predicate.
    While(P),
}

/// Options of [`filter_recursive_with`](crate::persistent::OrderedMap::filter_recursive_with).
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::persistent::RecursiveFilter;
///
/// let options = RecursiveFilter::new().remove_empty_containers(true).max_depth(8);
/// assert_eq!(options.depth_limit(), Some(8));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RecursiveFilter {
    remove_empty_containers: bool,
    max_depth: Option<usize>,
}

impl RecursiveFilter {
    /// Default options: keep empty containers, no depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            remove_empty_containers: false,
            max_depth: None,
        }
    }

    /// Drop nested mappings that end up empty after filtering.
    #[must_use]
    pub const fn remove_empty_containers(mut self, remove: bool) -> Self {
        self.remove_empty_containers = remove;
        self
    }

    /// Fail with a recursion error beyond `depth` levels of nesting.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Whether empty nested mappings are dropped.
    #[must_use]
    pub const fn removes_empty_containers(&self) -> bool {
        self.remove_empty_containers
    }

    /// The configured depth limit.
    #[must_use]
    pub const fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }
}

/// Options of [`group_by_subkey`](crate::persistent::OrderedMap::group_by_subkey).
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::persistent::GroupOptions;
///
/// let options = GroupOptions::new().labels(vec!["b", "a"]).unset_subkey(true);
/// assert_eq!(options.label_order(), Some(&["b", "a"][..]));
/// assert!(options.unsets_subkey());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupOptions<K> {
    labels: Option<Vec<K>>,
    unset_subkey: bool,
}

impl<K> GroupOptions<K> {
    /// Default options: first-seen bucket order, rows stored unchanged.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            labels: None,
            unset_subkey: false,
        }
    }

    /// Fixes the leading bucket order. Listed labels get a bucket even when
    /// no row carries them.
    #[must_use]
    pub fn labels(mut self, labels: Vec<K>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Removes the grouping field from each stored row.
    #[must_use]
    pub const fn unset_subkey(mut self, unset: bool) -> Self {
        self.unset_subkey = unset;
        self
    }

    /// The configured label order.
    #[must_use]
    pub fn label_order(&self) -> Option<&[K]> {
        self.labels.as_deref()
    }

    /// Whether the grouping field is removed from stored rows.
    #[must_use]
    pub const fn unsets_subkey(&self) -> bool {
        self.unset_subkey
    }
}

impl<K> Default for GroupOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}
