//! Named structured objects.

use std::fmt;

use super::Value;
use crate::persistent::{OrderedMap, TransientOrderedMap};

/// A named object with ordered, string-named fields.
///
/// Recursive operations treat a record as a leaf. `column` reads record
/// fields by name when the rows are records.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::value::{Record, Value};
///
/// let user = Record::new("User", [("name", Value::from("ann")), ("age", Value::from(31))]);
/// assert_eq!(user.name(), "User");
/// assert_eq!(user.get("age"), Some(&Value::Int(31)));
/// assert_eq!(user.to_string(), "User {name: ann, age: 31}");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    name: String,
    fields: OrderedMap<String, Value>,
}

impl Record {
    /// Creates a record. A repeated field name keeps the last value.
    #[must_use]
    pub fn new<N, I, F>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (F, Value)>,
        F: Into<String>,
    {
        let mut transient = TransientOrderedMap::new();
        for (field, value) in fields {
            transient.insert(field.into(), value);
        }
        Self {
            name: name.into(),
            fields: transient.persistent(),
        }
    }

    /// The record's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in declaration order.
    #[must_use]
    pub const fn fields(&self) -> &OrderedMap<String, Value> {
        &self.fields
    }

    /// The value of `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// A copy of the record with `field` set to `value`.
    #[must_use]
    pub fn with_field(&self, field: impl Into<String>, value: Value) -> Self {
        Self {
            name: self.name.clone(),
            fields: self.fields.insert(field.into(), value),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}", self.name, self.fields)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

/// Serialized as `{"name": ..., "fields": {...}}`.
#[cfg(feature = "serde")]
impl serde::Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Record", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("fields", &self.fields)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
struct RecordVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a record with a name and fields")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Record, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut name: Option<String> = None;
        let mut fields: Option<OrderedMap<String, Value>> = None;
        while let Some(entry) = access.next_key::<String>()? {
            match entry.as_str() {
                "name" => name = Some(access.next_value()?),
                "fields" => fields = Some(access.next_value()?),
                other => {
                    return Err(serde::de::Error::unknown_field(other, &["name", "fields"]));
                }
            }
        }
        let name = name.ok_or_else(|| serde::de::Error::missing_field("name"))?;
        Ok(Record {
            name,
            fields: fields.unwrap_or_default(),
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_struct("Record", &["name", "fields"], RecordVisitor)
    }
}
