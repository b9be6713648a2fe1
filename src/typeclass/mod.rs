//! Type class traits for ordered mappings.
//!
//! Two families of type classes live here.
//!
//! ## Value semantics
//!
//! Operations that need to know something about their values state it as a
//! bound instead of inspecting values at runtime:
//!
//! - [`Truthy`]: the default predicate of `filter_truthy`
//! - [`LooseCompare`]: coercive comparison for `sort`, `max`, `min` and loose
//!   equality
//! - [`Numeric`]: addition and `f64` view for `sum` and `average`
//! - [`Textual`]: collation text for `unique`, `diff`, `intersect` and
//!   `sort_natural`
//! - [`Nested`]: access to nested mappings for recursive and row-oriented
//!   operations
//! - [`MapKey`], [`SequentialKey`], [`ToKey`]: key capabilities
//!
//! ## Algebraic structures
//!
//! - [`TypeConstructor`]: higher-kinded type emulation through GATs
//! - [`Foldable`]: folding over the values of a mapping
//! - [`Semigroup`]: `merge` as an associative operation
//! - [`Monoid`]: the empty mapping as its identity
//!
//! # Examples
//!
//! ```rust
//! use ordered_mapping::persistent::OrderedMap;
//! use ordered_mapping::typeclass::{Foldable, Monoid, Semigroup};
//!
//! let left = OrderedMap::<i64, i64>::from_values([1, 2]);
//! let right = OrderedMap::<i64, i64>::from_values([3]);
//!
//! let merged = left.combine(right).combine(OrderedMap::empty());
//! assert_eq!(merged.fold_left(0, |total, value| total + value), 6);
//! ```

mod foldable;
mod higher;
mod keys;
mod loose;
mod monoid;
#[cfg(feature = "persistent")]
mod nested;
mod numeric;
mod semigroup;
mod textual;
mod truthy;

pub use foldable::Foldable;
pub use higher::TypeConstructor;
pub use keys::{MapKey, SequentialKey, ToKey};
pub use loose::LooseCompare;
pub use monoid::Monoid;
#[cfg(feature = "persistent")]
pub use nested::{Nested, Shape};
pub use numeric::Numeric;
pub use semigroup::Semigroup;
pub use textual::Textual;
pub use truthy::{Truthy, is_truthy};

pub(crate) use loose::loose_ordering;
pub(crate) use textual::{float_text, numeric_prefix, scan_numeric};
