//! Immutable ordered mappings.
//!
//! [`OrderedMap`] is an insertion-ordered key/value collection whose keys are
//! either integral (auto-indexed, renumbered by re-indexing operations) or
//! not (kept verbatim). Every operation returns a new mapping and leaves the
//! receiver untouched; results are assembled in a [`TransientOrderedMap`] and
//! frozen before they are returned.
//!
//! Operations are grouped by concern:
//!
//! - construction and access: [`OrderedMap`] itself
//! - filtering: `filter`, `filter_keys`, `filter_recursive`, `values_eq`, ...
//! - mapping and reduction: `map`, `map_key_value`, `reduce`, `each`, ...
//! - ordering and windowing: `sort`, `sort_natural`, `reverse`, `slice`, ...
//! - structure: `unique`, `merge`, `flip`, `column`, `group_by_subkey`, ...
//! - nesting: `values_flat`, `get_values_flat`
//! - aggregates: `max`, `min`, `sum`, `average`, `find`, ...
//!
//! # Structural Sharing
//!
//! Cloning a mapping shares its storage. Windows that cover every entry
//! (`first_n` or `last_n` with a count of at least `len`) return a clone of
//! the receiver instead of copying it.
//!
//! # Examples
//!
//! ```rust
//! use ordered_mapping::persistent::OrderedMap;
//!
//! let scores: OrderedMap<&str, i64> = [("ann", 3), ("bob", 5), ("cid", 4)]
//!     .into_iter()
//!     .collect();
//!
//! let best = scores
//!     .filter(|score| *score > 3)
//!     .sort_by(|left, right| right.cmp(left))
//!     .first_n(1);
//! assert_eq!(best.get_values(), vec![5]);
//!
//! // The original mapping is preserved
//! assert_eq!(scores.len(), 3);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled (default), this is `std::sync::Arc`,
/// so mappings are `Send + Sync` when their keys and values are.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod aggregate;
mod filtering;
mod mapping;
mod natural;
mod nesting;
mod options;
mod ordered_map;
mod slicing;
mod structural;
mod transient;

pub use mapping::IntoKeyValue;
pub use options::CaseSensitivity;
pub use options::Collation;
pub use options::Equality;
pub use options::GroupOptions;
pub use options::KeyPolicy;
pub use options::RecursiveFilter;
pub use options::Take;
pub use ordered_map::OrderedMap;
pub use ordered_map::OrderedMapIntoIterator;
pub use ordered_map::OrderedMapIterator;
pub use transient::TransientOrderedMap;

pub(crate) use structural::require_key;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_clone() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(*reference_counter, *reference_counter_clone);
    }

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
