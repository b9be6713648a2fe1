//! Integer-or-string keys.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use super::compare::{compare_number_with_text, compare_texts};
use crate::typeclass::{LooseCompare, MapKey, SequentialKey, Textual};

/// A key of a dynamic mapping.
///
/// Strings holding a canonical decimal integer are stored as [`Key::Int`], so
/// `Key::from("5") == Key::from(5)`. `"05"`, `"-0"`, `"+5"` and `" 5"` are not
/// canonical and stay strings.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::value::Key;
///
/// assert_eq!(Key::from("42"), Key::Int(42));
/// assert_eq!(Key::from("042"), Key::Str("042".to_string()));
/// assert_eq!(Key::from(-3).to_string(), "-3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// An integral key. Takes part in auto-indexing and renumbering.
    Int(i64),
    /// Any other key.
    Str(String),
}

/// Parses `text` when it is a canonical decimal integer.
fn canonical_integer(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let canonical = !digits.is_empty()
        && digits.bytes().all(|byte| byte.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
        && text != "-0";
    if canonical { text.parse().ok() } else { None }
}

impl Key {
    /// The integer, for integral keys.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(integer) => Some(*integer),
            Self::Str(_) => None,
        }
    }

    /// The text, for string keys.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(text) => Some(text),
        }
    }
}

impl MapKey for Key {
    type Index = Self;

    #[inline]
    fn position(&self) -> Option<i64> {
        self.as_int()
    }

    fn renumbered(&self, position: usize) -> Option<Self> {
        match self {
            Self::Int(_) => Self::try_from_position(position),
            Self::Str(_) => Some(self.clone()),
        }
    }
}

impl SequentialKey for Key {
    #[inline]
    fn from_position(position: usize) -> Self {
        Self::Int(i64::try_from(position).unwrap_or(i64::MAX))
    }

    #[inline]
    fn try_from_position(position: usize) -> Option<Self> {
        i64::try_from(position).ok().map(Self::Int)
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        canonical_integer(text).map_or_else(|| Self::Str(text.to_string()), Self::Int)
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        canonical_integer(&text).map_or(Self::Str(text), Self::Int)
    }
}

impl From<i64> for Key {
    fn from(integer: i64) -> Self {
        Self::Int(integer)
    }
}

impl From<i32> for Key {
    fn from(integer: i32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<usize> for Key {
    fn from(position: usize) -> Self {
        Self::from_position(position)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(integer) => write!(formatter, "{integer}"),
            Self::Str(text) => formatter.write_str(text),
        }
    }
}

impl Textual for Key {
    fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Int(integer) => Cow::Owned(integer.to_string()),
            Self::Str(text) => Cow::Borrowed(text),
        }
    }
}

impl LooseCompare for Key {
    fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => Some(left.cmp(right)),
            (Self::Str(left), Self::Str(right)) => Some(compare_texts(left, right)),
            (Self::Int(left), Self::Str(right)) => {
                compare_number_with_text(&super::Value::Int(*left), right)
            }
            (Self::Str(left), Self::Int(right)) => {
                compare_number_with_text(&super::Value::Int(*right), left).map(Ordering::reverse)
            }
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Int(integer) => serializer.serialize_i64(*integer),
            Self::Str(text) => serializer.serialize_str(text),
        }
    }
}

#[cfg(feature = "serde")]
struct KeyVisitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string")
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Key, E> {
        Ok(Key::Int(value))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Key, E> {
        i64::try_from(value)
            .map(Key::Int)
            .map_err(|_| E::invalid_value(serde::de::Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Key, E> {
        Ok(Key::from(value))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Key, E> {
        Ok(Key::from(value))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Key::Int(0))]
    #[case("7", Key::Int(7))]
    #[case("-12", Key::Int(-12))]
    #[case("-0", Key::Str("-0".to_string()))]
    #[case("007", Key::Str("007".to_string()))]
    #[case("+1", Key::Str("+1".to_string()))]
    #[case("1.5", Key::Str("1.5".to_string()))]
    #[case("", Key::Str(String::new()))]
    #[case("-", Key::Str("-".to_string()))]
    #[case("99999999999999999999", Key::Str("99999999999999999999".to_string()))]
    fn test_canonical_integer_strings_normalize(#[case] text: &str, #[case] expected: Key) {
        assert_eq!(Key::from(text), expected);
        assert_eq!(Key::from(text.to_string()), expected);
    }

    #[rstest]
    fn test_renumbered_moves_integers_only() {
        assert_eq!(Key::Int(9).renumbered(2), Some(Key::Int(2)));
        assert_eq!(Key::from("name").renumbered(2), Some(Key::from("name")));
    }

    #[rstest]
    fn test_loose_compare_mixes_integers_and_numeric_text() {
        assert_eq!(Key::Int(10).loose_cmp(&Key::from("9.5")), Some(Ordering::Greater));
        assert_eq!(Key::from("abc").loose_cmp(&Key::Int(1)), Some(Ordering::Greater));
        assert!(Key::from("b").loose_cmp(&Key::from("a")) == Some(Ordering::Greater));
    }

    #[rstest]
    fn test_text_matches_display() {
        assert_eq!(Key::Int(-4).to_text(), Key::Int(-4).to_string());
        assert_eq!(Key::from("x").to_text(), "x");
    }
}
