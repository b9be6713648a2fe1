//! # ordered-mapping
//!
//! An immutable, insertion-ordered key/value mapping with a chainable
//! transformation API.
//!
//! ## Overview
//!
//! Every operation on an [`OrderedMap`](persistent::OrderedMap) returns a new
//! mapping and leaves the receiver untouched. Operations either *preserve*
//! keys (filtering, windows, key-preserving sorts) or *re-index* them into
//! fresh sequential integers (`values`, `sort`, `column`, ...). Integral keys
//! take part in auto-indexing and are renumbered by `merge`; other keys are
//! kept verbatim.
//!
//! The crate is organized as:
//!
//! - **Type Classes**: the value semantics operations rely on (`Truthy`,
//!   `LooseCompare`, `Numeric`, `Textual`, `Nested`, `MapKey`) plus
//!   `Foldable`, `Semigroup` and `Monoid`
//! - **Persistent Mapping**: `OrderedMap`, its transient builder and every
//!   transformation
//! - **Dynamic Values**: `Key`, `Value`, `Record` and the `mapping!` / `list!`
//!   literals for heterogeneous data
//! - **Errors**: the few fallible operations return
//!   [`MappingError`](error::MappingError)
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type class traits
//! - `persistent`: `OrderedMap` and its operations
//! - `value`: Dynamic keys and values, literal macros
//! - `arc`: Thread-safe reference counting (`Arc` instead of `Rc`)
//! - `serde`: `Serialize` / `Deserialize` support
//! - `full`: Enable all features
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` before an operation fails,
//! `warn` when an infallible append is refused, `trace` when a row-oriented
//! operation skips a row) and never installs a subscriber.
//!
//! ## Example
//!
//! ```rust
//! use ordered_mapping::prelude::*;
//! use ordered_mapping::{list, mapping};
//!
//! let rows = list![
//!     mapping! { "id" => 3, "team" => "red" },
//!     mapping! { "id" => 1, "team" => "blue" },
//!     mapping! { "id" => 2, "team" => "red" },
//! ];
//!
//! let ids = rows.column(&Key::from("id")).sort();
//! assert_eq!(ids, list![1, 2, 3]);
//!
//! let teams = rows.column(&Key::from("team")).unique(Collation::Text);
//! assert_eq!(teams.get_values(), vec![Value::from("red"), Value::from("blue")]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use ordered_mapping::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "value")]
    pub use crate::value::*;

    pub use crate::error::{MappingError, MappingResult};
}

pub mod error;

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "value")]
pub mod value;
