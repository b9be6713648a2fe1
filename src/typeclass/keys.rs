//! Key type classes.
//!
//! - [`MapKey`]: anything usable as a key of an
//!   [`OrderedMap`](crate::persistent::OrderedMap). A key may report an
//!   integral *position*, which drives auto-indexing and renumbering.
//! - [`SequentialKey`]: keys that can be minted from a position. Operations
//!   that append without a key (`push`, `from_values`, `map_key_value`)
//!   require it, and [`MapKey::Index`] names the sequential key type of
//!   re-indexed results.
//! - [`ToKey`]: values that can be converted into a key (`flip`,
//!   `values_to_keys`, `group_by_subkey`).
//!
//! # Examples
//!
//! ```rust
//! use ordered_mapping::typeclass::{MapKey, SequentialKey};
//!
//! assert_eq!(7_i64.position(), Some(7));
//! assert_eq!("name".to_string().position(), None);
//! assert_eq!(<usize as SequentialKey>::from_position(3), 3);
//! ```

use std::hash::Hash;

/// A key of an ordered mapping.
///
/// Integral keys return their integer value from [`position`](MapKey::position);
/// such keys take part in auto-indexing (the next pushed value gets one past the
/// largest position seen) and are renumbered by re-indexing operations. Other
/// keys keep the default `None` and are always preserved verbatim.
pub trait MapKey: Clone + Eq + Hash {
    /// Key type of re-indexed results (`values`, `keys`, `sort`, ...).
    type Index: SequentialKey;

    /// The integer value of this key, if it is integral.
    fn position(&self) -> Option<i64> {
        None
    }

    /// This key moved to `position` by a renumbering operation.
    ///
    /// Only integral keys change; other keys are returned as they are.
    /// `None` when an integral key type cannot represent `position`.
    #[must_use]
    fn renumbered(&self, _position: usize) -> Option<Self> {
        Some(self.clone())
    }
}

/// A key that can be minted from a sequential position.
pub trait SequentialKey: MapKey<Index = Self> {
    /// Builds the key for `position` in a freshly re-indexed mapping.
    ///
    /// A position past the range of the key type saturates; use
    /// [`try_from_position`](Self::try_from_position) where that matters.
    fn from_position(position: usize) -> Self;

    /// Builds the key for `position`, or `None` when the key type cannot
    /// represent it.
    fn try_from_position(position: usize) -> Option<Self> {
        Some(Self::from_position(position))
    }
}

/// Conversion of a value into a key.
///
/// Returns `None` when the value is not usable as a key.
///
/// Every key type converts into itself; the dynamic
/// [`Value`](crate::value::Value) converts into [`Key`](crate::value::Key)
/// when it is an integer or a string.
pub trait ToKey<K> {
    /// Converts `self` into a key.
    fn to_key(&self) -> Option<K>;

    /// Short name of the kind of `self`, used in error reports.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<K: MapKey> ToKey<K> for K {
    #[inline]
    fn to_key(&self) -> Option<K> {
        Some(self.clone())
    }
}

macro_rules! impl_integral_key {
    ($($integer:ty),* $(,)?) => {
        $(
            impl MapKey for $integer {
                type Index = Self;

                #[inline]
                fn position(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }

                #[inline]
                fn renumbered(&self, position: usize) -> Option<Self> {
                    <Self as SequentialKey>::try_from_position(position)
                }
            }

            impl SequentialKey for $integer {
                #[inline]
                fn from_position(position: usize) -> Self {
                    <$integer>::try_from(position).unwrap_or(<$integer>::MAX)
                }

                #[inline]
                fn try_from_position(position: usize) -> Option<Self> {
                    <$integer>::try_from(position).ok()
                }
            }
        )*
    };
}

impl_integral_key!(i32, i64, u32, u64, usize);

impl MapKey for String {
    type Index = usize;
}

impl MapKey for &str {
    type Index = usize;
}

impl MapKey for char {
    type Index = usize;
}
