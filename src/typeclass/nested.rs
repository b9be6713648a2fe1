//! Nested type class - values that may hold a nested mapping.
//!
//! Recursive operations (`values_flat`, `filter_recursive`, `merge_values`) and
//! row-oriented ones (`column`, `group_by_subkey`) need to see through a value
//! into the mapping it carries. [`Nested`] gives them that view without
//! committing to a concrete value type.
//!
//! The shape of a value is an explicit [`Shape`] tag, so row-oriented
//! operations can resolve it once and dispatch on it.

use crate::persistent::OrderedMap;

use super::keys::MapKey;

/// Structural shape of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A nested ordered mapping.
    Mapping,
    /// A structured record with named fields. Recursive operations treat it
    /// as a leaf.
    Record,
    /// Anything else.
    Scalar,
}

/// Values that may carry a nested [`OrderedMap`] keyed by `K`.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::typeclass::{Nested, Shape};
/// use ordered_mapping::value::{Key, Value};
/// use ordered_mapping::mapping;
///
/// let row = Value::from(mapping! { "id" => 7, "name" => "seven" });
/// assert_eq!(row.shape(), Shape::Mapping);
/// assert_eq!(row.lookup(&Key::from("id")), Some(&Value::Int(7)));
/// assert_eq!(Value::Int(7).shape(), Shape::Scalar);
/// ```
pub trait Nested<K: MapKey>: Sized {
    /// The shape of this value.
    fn shape(&self) -> Shape;

    /// The nested mapping, when the value is one.
    fn as_mapping(&self) -> Option<&OrderedMap<K, Self>>;

    /// Wraps a mapping as a value.
    fn from_mapping(mapping: OrderedMap<K, Self>) -> Self;

    /// The field named `field` of a mapping or record value.
    fn lookup(&self, field: &K) -> Option<&Self>;
}
