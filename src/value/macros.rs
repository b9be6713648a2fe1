//! Literal macros for dynamic mappings.

/// Builds an `OrderedMap<Key, Value>` from `key => value` pairs.
///
/// Keys go through [`Key::from`](crate::value::Key) and values through
/// [`Value::from`](crate::value::Value). A repeated key overwrites the earlier
/// value in place.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::mapping;
/// use ordered_mapping::value::{Key, Value};
///
/// let row = mapping! { "id" => 1, "5" => "five", "id" => 2 };
/// assert_eq!(row.len(), 2);
/// assert_eq!(row.get(&Key::Int(5)), Some(&Value::from("five")));
/// assert_eq!(row.first(), Some(&Value::Int(2)));
/// ```
#[macro_export]
macro_rules! mapping {
    () => {
        $crate::persistent::OrderedMap::<$crate::value::Key, $crate::value::Value>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut transient = $crate::persistent::TransientOrderedMap::<
            $crate::value::Key,
            $crate::value::Value,
        >::new();
        $(
            transient.insert(
                $crate::value::Key::from($key),
                $crate::value::Value::from($value),
            );
        )+
        transient.persistent()
    }};
}

/// Builds a list: an `OrderedMap<Key, Value>` keyed `0..n`.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::list;
/// use ordered_mapping::value::{Key, Value};
///
/// let values = list![10, "x", 2.5];
/// assert!(values.is_list());
/// assert_eq!(values.get(&Key::Int(1)), Some(&Value::from("x")));
/// assert!(list![].is_empty());
/// ```
#[macro_export]
macro_rules! list {
    ($($value:expr),* $(,)?) => {
        $crate::persistent::OrderedMap::<$crate::value::Key, $crate::value::Value>::from_values(
            [$($crate::value::Value::from($value)),*],
        )
    };
}
