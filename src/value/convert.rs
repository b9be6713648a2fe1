//! Conversions into [`Value`] and its type class instances.

use std::borrow::Cow;

use super::compare::Number;
use super::{Key, Record, Value};
use crate::error::{MapperContractError, MappingError, MappingResult};
use crate::persistent::{IntoKeyValue, OrderedMap, TransientOrderedMap, require_key};
use crate::typeclass::{Nested, Numeric, Shape, Textual, ToKey, Truthy, float_text};

// =============================================================================
// From Implementations
// =============================================================================

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Self::Int(integer)
    }
}

impl From<i32> for Value {
    fn from(integer: i32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<u32> for Value {
    fn from(integer: u32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(integer: usize) -> Self {
        i64::try_from(integer).map_or(Self::Float(integer as f64), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Self::Float(float)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<OrderedMap<Key, Self>> for Value {
    fn from(mapping: OrderedMap<Key, Self>) -> Self {
        Self::Map(mapping)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(integer) => Self::Int(integer),
            Key::Str(text) => Self::Str(text),
        }
    }
}

/// `None` becomes [`Value::Null`].
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

/// A vector becomes a list.
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Map(OrderedMap::from_values(values.into_iter().map(Into::into)))
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

/// `Null`, `false`, `0`, `0.0`, `""`, `"0"` and empty mappings are falsy.
/// Records are always truthy.
impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Int(integer) => integer.is_truthy(),
            Self::Float(float) => float.is_truthy(),
            Self::Str(text) => text.is_truthy(),
            Self::Map(mapping) => mapping.is_truthy(),
            Self::Record(_) => true,
        }
    }
}

/// Mappings collate as `"Array"` and records as `"Object"`.
impl Textual for Value {
    fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Bool(flag) => Cow::Borrowed(if *flag { "1" } else { "" }),
            Self::Int(integer) => Cow::Owned(integer.to_string()),
            Self::Float(float) => Cow::Owned(float_text(*float)),
            Self::Str(text) => Cow::Borrowed(text),
            Self::Map(_) => Cow::Borrowed("Array"),
            Self::Record(_) => Cow::Borrowed("Object"),
        }
    }
}

/// Texts count with their leading number; other non-numbers count as `0`.
impl Numeric for Value {
    fn zero() -> Self {
        Self::Int(0)
    }

    fn add(&self, other: &Self) -> Self {
        Self::from(self.to_number().add(other.to_number()))
    }

    fn to_f64(&self) -> f64 {
        self.to_number().to_f64()
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(integer) => Self::Int(integer),
            Number::Float(float) => Self::Float(float),
        }
    }
}

/// Records are looked up by field name; an integer key names the field
/// spelled as that integer.
impl Nested<Key> for Value {
    fn shape(&self) -> Shape {
        match self {
            Self::Map(_) => Shape::Mapping,
            Self::Record(_) => Shape::Record,
            _ => Shape::Scalar,
        }
    }

    fn as_mapping(&self) -> Option<&OrderedMap<Key, Self>> {
        self.as_map()
    }

    fn from_mapping(mapping: OrderedMap<Key, Self>) -> Self {
        Self::Map(mapping)
    }

    fn lookup(&self, field: &Key) -> Option<&Self> {
        match (self, field) {
            (Self::Map(mapping), _) => mapping.get(field),
            (Self::Record(record), Key::Str(name)) => record.get(name),
            (Self::Record(record), Key::Int(integer)) => record.get(&integer.to_string()),
            _ => None,
        }
    }
}

/// Integers and texts are keys; texts are normalized like [`Key::from`].
impl ToKey<Key> for Value {
    fn to_key(&self) -> Option<Key> {
        match self {
            Self::Int(integer) => Some(Key::Int(*integer)),
            Self::Str(text) => Some(Key::from(text.as_str())),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        Self::kind(self)
    }
}

// =============================================================================
// Dynamic Mapper Results
// =============================================================================

fn contract_violation(position: usize, found: String) -> MappingError {
    tracing::debug!(position, %found, "mapper result is not a [key, value] pair");
    MapperContractError::new(position, found).into()
}

/// Places `value` under `key`; a `Null` or `false` key appends.
fn place_pair(
    key: &Value,
    value: Value,
    target: &mut TransientOrderedMap<Key, Value>,
    position: usize,
) -> MappingResult<()> {
    match key {
        Value::Null | Value::Bool(false) => target.try_push(value),
        key => {
            target.insert(require_key(key, "map_key_value", position)?, value);
            Ok(())
        }
    }
}

/// A `[key, value]` list.
impl IntoKeyValue<Key, Value> for Vec<Value> {
    fn place_into(
        self,
        target: &mut TransientOrderedMap<Key, Value>,
        position: usize,
    ) -> MappingResult<()> {
        match <[Value; 2]>::try_from(self) {
            Ok([key, value]) => place_pair(&key, value, target, position),
            Err(values) => Err(contract_violation(
                position,
                format!("a list of {} elements", values.len()),
            )),
        }
    }
}

/// A list-shaped mapping with exactly the keys `0` and `1`.
impl IntoKeyValue<Key, Value> for Value {
    fn place_into(
        self,
        target: &mut TransientOrderedMap<Key, Value>,
        position: usize,
    ) -> MappingResult<()> {
        let Self::Map(pair) = &self else {
            return Err(contract_violation(position, self.kind().to_string()));
        };
        if pair.len() != 2 {
            return Err(contract_violation(
                position,
                format!("a mapping of {} entries", pair.len()),
            ));
        }
        match (pair.get(&Key::Int(0)), pair.get(&Key::Int(1))) {
            (Some(key), Some(value)) => place_pair(key, value.clone(), target, position),
            _ => Err(contract_violation(
                position,
                "a mapping without the keys 0 and 1".to_string(),
            )),
        }
    }
}
