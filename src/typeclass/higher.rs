//! Type constructor emulation through Generic Associated Types.
//!
//! An [`OrderedMap<K, V>`](crate::persistent::OrderedMap) is treated as a
//! container of `V` with the key type `K` fixed. [`TypeConstructor`] names
//! that element type and lets generic code talk about the same container
//! holding a different element type, which is what [`Foldable`](super::Foldable)
//! builds on.

/// A trait representing a type constructor applied to an element type.
///
/// # Associated Types
///
/// - `Inner`: The element type the constructor is currently applied to.
/// - `WithType<B>`: The same constructor applied to `B`.
///
/// # Laws
///
/// `<F as TypeConstructor>::WithType<F::Inner>` is `F`.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::persistent::OrderedMap;
/// use ordered_mapping::typeclass::TypeConstructor;
///
/// fn assert_inner<T: TypeConstructor<Inner = i64>>() {}
/// assert_inner::<OrderedMap<String, i64>>();
/// ```
pub trait TypeConstructor {
    /// The element type.
    type Inner;

    /// The same constructor applied to `B`.
    type WithType<B>: TypeConstructor<Inner = B>;
}

#[cfg(all(test, feature = "persistent"))]
mod tests {
    use super::*;
    use crate::persistent::OrderedMap;

    #[test]
    fn ordered_map_inner_type_is_value_type() {
        fn assert_inner<T: TypeConstructor<Inner = bool>>() {}
        assert_inner::<OrderedMap<i64, bool>>();
    }

    #[test]
    fn ordered_map_with_type_keeps_key_type() {
        fn assert_with_type<K, V, B>()
        where
            OrderedMap<K, V>: TypeConstructor<Inner = V, WithType<B> = OrderedMap<K, B>>,
        {
        }

        assert_with_type::<String, i64, bool>();
        assert_with_type::<i64, String, Vec<u8>>();
    }

    #[test]
    fn chained_with_type_transformations() {
        type Step1 = <OrderedMap<i64, i64> as TypeConstructor>::WithType<String>;
        type Step2 = <Step1 as TypeConstructor>::WithType<char>;

        fn assert_is_char<T: TypeConstructor<Inner = char>>() {}
        assert_is_char::<Step2>();
    }
}
