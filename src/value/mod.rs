//! Dynamic keys and values.
//!
//! [`Key`] and [`Value`] model heterogeneous mappings: integer and string keys
//! side by side, values of any scalar kind, nested mappings and named
//! [`Record`]s. They implement every value-semantics type class, so the whole
//! [`OrderedMap`](crate::persistent::OrderedMap) API is available on
//! `OrderedMap<Key, Value>`.
//!
//! # Loose Comparison
//!
//! [`LooseCompare`](crate::typeclass::LooseCompare) for [`Value`] follows the
//! coercive rules of dynamically typed arrays:
//!
//! | Left                 | Right               | Compared as                              |
//! |----------------------|---------------------|------------------------------------------|
//! | `Null`               | `Str`               | `""` against the text                    |
//! | `Null` or `Bool`     | anything            | truthiness (`false < true`)              |
//! | number               | number              | numbers                                  |
//! | number               | numeric text        | numbers                                  |
//! | number               | other text          | the number's text against the text       |
//! | text                 | text                | numbers when both are numeric, else bytes |
//! | `Map`                | `Map`               | size, then value by value (a missing key is incomparable) |
//! | `Record`             | `Record`            | fields, when the names match             |
//! | `Record` or `Map`    | anything else       | always greater                           |
//!
//! # Examples
//!
//! ```rust
//! use ordered_mapping::persistent::Equality;
//! use ordered_mapping::value::{Key, Value};
//! use ordered_mapping::{list, mapping};
//!
//! let row = mapping! { "id" => 7, "tags" => list!["a", "b"], "score" => 1.5 };
//! assert_eq!(row.get(&Key::from("id")), Some(&Value::Int(7)));
//!
//! let mixed = list![1, "1", 1.0, true];
//! assert_eq!(mixed.values_eq(&Value::from(1), Equality::Loose).len(), 4);
//! assert_eq!(mixed.values_eq(&Value::from(1), Equality::Strict).len(), 1);
//! ```

mod compare;
mod convert;
mod dynamic;
mod key;
mod macros;
mod record;

pub use dynamic::Value;
pub use key::Key;
pub use record::Record;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Value: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Record: Send, Sync);
