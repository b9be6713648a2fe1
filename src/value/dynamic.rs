//! The dynamic value type.

use std::fmt;

use super::{Key, Record};
use crate::persistent::OrderedMap;
use crate::typeclass::float_text;

/// A dynamically typed value.
///
/// Equality (`==`) is strict: variants and contents must match, and nested
/// mappings must hold the same entries in the same order. Coercive equality
/// is [`LooseCompare::loose_eq`](crate::typeclass::LooseCompare::loose_eq).
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::typeclass::LooseCompare;
/// use ordered_mapping::value::Value;
///
/// assert_ne!(Value::Int(5), Value::from("5"));
/// assert!(Value::Int(5).loose_eq(&Value::from("5")));
/// assert_eq!(Value::from(2.5).kind(), "float");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A text.
    Str(String),
    /// A nested mapping. Lists are mappings keyed `0..n`.
    Map(OrderedMap<Key, Value>),
    /// A named record.
    Record(Record),
}

impl Value {
    /// Builds a [`Value::Record`], see [`Record::new`].
    #[must_use]
    pub fn record<N, I, F>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (F, Self)>,
        F: Into<String>,
    {
        Self::Record(Record::new(name, fields))
    }

    /// Short name of the variant: `"null"`, `"bool"`, `"int"`, `"float"`,
    /// `"string"`, `"mapping"` or `"record"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Map(_) => "mapping",
            Self::Record(_) => "record",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for [`Value::Map`].
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns `true` for integers, floats and numeric texts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_mapping::value::Value;
    ///
    /// assert!(Value::from("1.5e3").is_numeric());
    /// assert!(!Value::from("12abc").is_numeric());
    /// assert!(!Value::Bool(true).is_numeric());
    /// ```
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Int(_) | Self::Float(_) => true,
            Self::Str(text) => super::compare::numeric_text(text).is_some(),
            _ => false,
        }
    }

    /// The boolean, for [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The integer, for [`Value::Int`].
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(integer) => Some(*integer),
            _ => None,
        }
    }

    /// The float, for [`Value::Float`].
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(float) => Some(*float),
            _ => None,
        }
    }

    /// The text, for [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// The nested mapping, for [`Value::Map`].
    #[must_use]
    pub const fn as_map(&self) -> Option<&OrderedMap<Key, Self>> {
        match self {
            Self::Map(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// The record, for [`Value::Record`].
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Int(integer) => write!(formatter, "{integer}"),
            Self::Float(float) => formatter.write_str(&float_text(*float)),
            Self::Str(text) => formatter.write_str(text),
            Self::Map(mapping) => write!(formatter, "{mapping}"),
            Self::Record(record) => write!(formatter, "{record}"),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

/// List-shaped mappings serialize as sequences, other mappings as maps.
#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Int(integer) => serializer.serialize_i64(*integer),
            Self::Float(float) => serializer.serialize_f64(*float),
            Self::Str(text) => serializer.serialize_str(text),
            Self::Map(mapping) if mapping.is_list() => {
                serializer.collect_seq(mapping.iter().map(|(_, value)| value))
            }
            Self::Map(mapping) => serde::Serialize::serialize(mapping, serializer),
            Self::Record(record) => serde::Serialize::serialize(record, serializer),
        }
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any value")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: serde::de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Int(value))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Value, E> {
        Ok(i64::try_from(value).map_or(Value::Float(value as f64), Value::Int))
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::Str(value))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(value) = access.next_element()? {
            values.push(value);
        }
        Ok(Value::Map(OrderedMap::from_values(values)))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut transient =
            crate::persistent::TransientOrderedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            transient.insert(key, value);
        }
        Ok(Value::Map(transient.persistent()))
    }
}

/// Records deserialize as mappings; the input does not say which maps were
/// records.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}
