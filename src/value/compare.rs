//! Coercive comparison and numeric coercion of dynamic values.

use std::cmp::Ordering;

use super::{Record, Value};
use crate::persistent::OrderedMap;
use crate::typeclass::{LooseCompare, MapKey, Textual, Truthy, scan_numeric};

/// A value coerced to a number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    pub(super) const fn to_f64(self) -> f64 {
        match self {
            Self::Int(integer) => integer as f64,
            Self::Float(float) => float,
        }
    }

    fn cmp_number(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => Some(left.cmp(&right)),
            (left, right) => left.to_f64().partial_cmp(&right.to_f64()),
        }
    }

    /// Integer addition, promoted to a float on overflow.
    pub(super) fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left
                .checked_add(right)
                .map_or_else(|| Self::Float(self.to_f64() + other.to_f64()), Self::Int),
            (left, right) => Self::Float(left.to_f64() + right.to_f64()),
        }
    }
}

/// The number a text holds when it is entirely numeric.
pub(super) fn numeric_text(text: &str) -> Option<Number> {
    let numeric = scan_numeric(text).filter(|numeric| numeric.is_whole())?;
    if numeric.integral
        && let Ok(integer) = numeric.literal.parse::<i64>()
    {
        return Some(Number::Int(integer));
    }
    Some(Number::Float(numeric.to_f64()))
}

/// The number a text starts with, `0` when it has no leading number.
pub(super) fn leading_number(text: &str) -> Number {
    match scan_numeric(text) {
        Some(numeric) if numeric.integral => numeric
            .literal
            .parse::<i64>()
            .map_or_else(|_| Number::Float(numeric.to_f64()), Number::Int),
        Some(numeric) => Number::Float(numeric.to_f64()),
        None => Number::Int(0),
    }
}

impl Value {
    /// The value coerced to a number. Containers and null count as `0`.
    pub(super) fn to_number(&self) -> Number {
        match self {
            Self::Int(integer) => Number::Int(*integer),
            Self::Float(float) => Number::Float(*float),
            Self::Bool(flag) => Number::Int(i64::from(*flag)),
            Self::Str(text) => leading_number(text),
            Self::Null | Self::Map(_) | Self::Record(_) => Number::Int(0),
        }
    }

    const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Int(integer) => Some(Number::Int(*integer)),
            Self::Float(float) => Some(Number::Float(*float)),
            _ => None,
        }
    }
}

/// Text against text: numerically when both are numeric, bytewise otherwise.
pub(super) fn compare_texts(left: &str, right: &str) -> Ordering {
    match (numeric_text(left), numeric_text(right)) {
        (Some(left_number), Some(right_number)) => left_number
            .cmp_number(right_number)
            .unwrap_or(Ordering::Equal),
        _ => left.cmp(right),
    }
}

/// A number against a text: numerically when the text is numeric, otherwise
/// the number's text against the text.
pub(super) fn compare_number_with_text(number: &Value, text: &str) -> Option<Ordering> {
    match (number.as_number(), numeric_text(text)) {
        (Some(left), Some(right)) => left.cmp_number(right),
        _ => Some((*number.to_text()).cmp(text)),
    }
}

/// Mappings compare by size, then value by value in the left mapping's order.
/// A key of the left mapping missing on the right makes them incomparable.
fn compare_mappings<K: MapKey>(
    left: &OrderedMap<K, Value>,
    right: &OrderedMap<K, Value>,
) -> Option<Ordering> {
    match left.len().cmp(&right.len()) {
        Ordering::Equal => {}
        ordering => return Some(ordering),
    }
    for (key, left_value) in left {
        let right_value = right.get(key)?;
        match left_value.loose_cmp(right_value)? {
            Ordering::Equal => {}
            ordering => return Some(ordering),
        }
    }
    Some(Ordering::Equal)
}

fn compare_records(left: &Record, right: &Record) -> Option<Ordering> {
    if left.name() == right.name() {
        compare_mappings(left.fields(), right.fields())
    } else {
        None
    }
}

impl LooseCompare for Value {
    fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Null, Self::Str(text)) => Some(compare_texts("", text)),
            (Self::Str(text), Self::Null) => Some(compare_texts(text, "")),
            (Self::Null | Self::Bool(_), _) | (_, Self::Null | Self::Bool(_)) => {
                Some(self.is_truthy().cmp(&other.is_truthy()))
            }
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                self.to_number().cmp_number(other.to_number())
            }
            (Self::Int(_) | Self::Float(_), Self::Str(text)) => {
                compare_number_with_text(self, text)
            }
            (Self::Str(text), Self::Int(_) | Self::Float(_)) => {
                compare_number_with_text(other, text).map(Ordering::reverse)
            }
            (Self::Str(left), Self::Str(right)) => Some(compare_texts(left, right)),
            (Self::Map(left), Self::Map(right)) => compare_mappings(left, right),
            (Self::Record(left), Self::Record(right)) => compare_records(left, right),
            (Self::Record(_), _) => Some(Ordering::Greater),
            (_, Self::Record(_)) => Some(Ordering::Less),
            (Self::Map(_), _) => Some(Ordering::Greater),
            (_, Self::Map(_)) => Some(Ordering::Less),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, mapping};
    use rstest::rstest;

    #[rstest]
    #[case(Value::Int(1), Value::from("1"), true)]
    #[case(Value::Int(1), Value::from("01"), true)]
    #[case(Value::Int(10), Value::from("1e1"), true)]
    #[case(Value::Int(0), Value::from("a"), false)]
    #[case(Value::Int(0), Value::Null, true)]
    #[case(Value::Int(0), Value::Bool(false), true)]
    #[case(Value::Null, Value::from("0"), false)]
    #[case(Value::Null, Value::from(""), true)]
    #[case(Value::Null, Value::from(list![]), true)]
    #[case(Value::from("abc"), Value::from("ABC"), false)]
    #[case(Value::from("1.0"), Value::from("1"), true)]
    #[case(Value::from(" 1"), Value::from("1"), true)]
    #[case(Value::Float(1.0), Value::Int(1), true)]
    #[case(Value::Bool(true), Value::from("x"), true)]
    #[case(Value::from(list![1, 2]), Value::from(list!["1", "2"]), true)]
    #[case(Value::from(list![1, 2]), Value::from(list![1]), false)]
    fn test_loose_eq(#[case] left: Value, #[case] right: Value, #[case] expected: bool) {
        assert_eq!(left.loose_eq(&right), expected);
        assert_eq!(right.loose_eq(&left), expected);
    }

    #[rstest]
    fn test_mappings_with_different_keys_are_incomparable() {
        let left = Value::from(mapping! { "a" => 1 });
        let right = Value::from(mapping! { "b" => 1 });
        assert_eq!(left.loose_cmp(&right), None);
    }

    #[rstest]
    fn test_containers_are_greater_than_scalars() {
        assert_eq!(
            Value::from(list![]).loose_cmp(&Value::Int(100)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::Int(100).loose_cmp(&Value::record("R", Vec::<(String, Value)>::new())),
            Some(Ordering::Less)
        );
    }

    #[rstest]
    fn test_records_with_different_names_are_incomparable() {
        let left = Value::record("A", [("x", Value::Int(1))]);
        let right = Value::record("B", [("x", Value::Int(1))]);
        assert_eq!(left.loose_cmp(&right), None);
        assert!(left.loose_eq(&Value::record("A", [("x", Value::from("1"))])));
    }

    #[rstest]
    #[case("12abc", Number::Int(12))]
    #[case("  3.5 kg", Number::Float(3.5))]
    #[case("abc", Number::Int(0))]
    #[case("-7", Number::Int(-7))]
    fn test_leading_number(#[case] text: &str, #[case] expected: Number) {
        assert_eq!(leading_number(text), expected);
    }

    #[rstest]
    fn test_integer_overflow_promotes_to_float() {
        let sum = Number::Int(i64::MAX).add(Number::Int(1));
        assert!(matches!(sum, Number::Float(_)));
        assert_eq!(Number::Int(2).add(Number::Int(3)), Number::Int(5));
    }

    #[rstest]
    fn test_numeric_text_requires_whole_text() {
        assert_eq!(numeric_text("12"), Some(Number::Int(12)));
        assert_eq!(numeric_text("12 "), Some(Number::Int(12)));
        assert_eq!(numeric_text("12abc"), None);
        assert_eq!(numeric_text("0.5"), Some(Number::Float(0.5)));
    }
}
