//! Error types for fallible mapping operations.
//!
//! Almost every operation on [`OrderedMap`](crate::persistent::OrderedMap) is a
//! total function. The few that can fail return [`MappingError`], which wraps
//! one of four concrete errors:
//!
//! - [`MapperContractError`]: a `map_key_value` mapper returned something that
//!   is not a `[key, value]` pair
//! - [`KeyTypeError`]: a value could not be used as a key
//! - [`RecursionLimitError`]: a bounded recursive operation went too deep
//! - [`NextPositionError`]: an append found no free integer position after the
//!   largest integer key
//!
//! # Examples
//!
//! ```rust
//! use ordered_mapping::error::{KeyTypeError, MappingError};
//!
//! let error = MappingError::from(KeyTypeError::new("flip", 2, "float"));
//! assert_eq!(
//!     error.to_string(),
//!     "flip: value of kind `float` at position 2 cannot be used as a key"
//! );
//! ```

use thiserror::Error;

/// Convenience result type for fallible mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// A `map_key_value` mapper returned a malformed result.
///
/// Mappers must return exactly a two-element `[key, value]` list.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("mapper result at position {position} must be a [key, value] pair, found {found}")]
pub struct MapperContractError {
    /// Position of the source entry whose mapper result was rejected.
    pub position: usize,
    /// Short description of what the mapper returned instead.
    pub found: String,
}

impl MapperContractError {
    /// Creates a new `MapperContractError`.
    #[must_use]
    pub fn new(position: usize, found: impl Into<String>) -> Self {
        Self {
            position,
            found: found.into(),
        }
    }
}

/// A value could not be turned into a key.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{operation}: value of kind `{kind}` at position {position} cannot be used as a key")]
pub struct KeyTypeError {
    /// Name of the operation that needed the key.
    pub operation: &'static str,
    /// Position of the offending entry.
    pub position: usize,
    /// Kind of the rejected value (for example `"float"` or `"mapping"`).
    pub kind: &'static str,
}

impl KeyTypeError {
    /// Creates a new `KeyTypeError`.
    #[must_use]
    pub const fn new(operation: &'static str, position: usize, kind: &'static str) -> Self {
        Self {
            operation,
            position,
            kind,
        }
    }
}

/// A bounded recursive operation met nesting deeper than its limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("nesting exceeds the recursion limit of {limit}")]
pub struct RecursionLimitError {
    /// The configured maximum depth.
    pub limit: usize,
}

/// An append needed the position after the largest integer key, but the key
/// type cannot represent it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{operation}: the next position is already occupied")]
pub struct NextPositionError {
    /// Name of the operation that appended.
    pub operation: &'static str,
}

/// Unified error for every fallible mapping operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A mapper broke the `[key, value]` contract.
    #[error(transparent)]
    MapperContract(#[from] MapperContractError),

    /// A value was not usable as a key.
    #[error(transparent)]
    KeyType(#[from] KeyTypeError),

    /// A recursive operation exceeded its depth limit.
    #[error(transparent)]
    RecursionLimit(#[from] RecursionLimitError),

    /// An append ran out of integer positions.
    #[error(transparent)]
    NextPosition(#[from] NextPositionError),
}
