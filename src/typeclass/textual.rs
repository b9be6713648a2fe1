//! Textual type class - the collation text of a value.
//!
//! Text collation is used by `unique(Collation::Text)`, `diff`, `intersect` and
//! `sort_natural`. Two values collate equal when their texts are equal.
//!
//! | Type         | Text                                       |
//! |--------------|--------------------------------------------|
//! | `bool`       | `"1"` for `true`, `""` for `false`         |
//! | integers     | decimal digits                             |
//! | floats       | shortest round-trip digits, exponent form outside `1e-4..1e14`, `INF`, `-INF`, `NAN` |
//! | text         | itself                                     |

use std::borrow::Cow;

/// Types with a collation text.
///
/// # Examples
///
/// ```rust
/// use ordered_mapping::typeclass::Textual;
///
/// assert_eq!(42_i64.to_text(), "42");
/// assert_eq!(2.0_f64.to_text(), "2");
/// assert_eq!(true.to_text(), "1");
/// assert_eq!("img12".to_text(), "img12");
/// ```
pub trait Textual {
    /// The text this value collates as.
    fn to_text(&self) -> Cow<'_, str>;
}

/// Formats a float the way it collates: integral floats drop the fraction,
/// and magnitudes from `1e14` up or below `1e-4` use exponent form
/// (`1.0E+25`, `1.5E-7`).
pub(crate) fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "INF" } else { "-INF" }.to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{value}");
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..14).contains(&exponent) {
        return format!("{value}");
    }

    let fraction = if mantissa.contains('.') { "" } else { ".0" };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}{fraction}E{sign}{}", exponent.unsigned_abs())
}

/// The leading numeric literal of a text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NumericText<'a> {
    /// The literal itself, sign included, surrounding whitespace excluded.
    pub literal: &'a str,
    /// `true` when the literal has neither a fraction nor an exponent.
    pub integral: bool,
    /// Whatever follows the literal.
    pub rest: &'a str,
}

impl NumericText<'_> {
    /// `true` when nothing but whitespace follows the literal.
    pub fn is_whole(&self) -> bool {
        self.rest.trim_matches(is_numeric_whitespace).is_empty()
    }

    /// The literal as a float.
    pub fn to_f64(&self) -> f64 {
        self.literal.parse().unwrap_or(0.0)
    }
}

const fn is_numeric_whitespace(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().take_while(|byte| byte.is_ascii_digit()).count()
}

/// Scans the numeric literal at the start of `text`.
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction, and an optional exponent. Returns `None` when no digit is found.
pub(crate) fn scan_numeric(text: &str) -> Option<NumericText<'_>> {
    let trimmed = text.trim_start_matches(is_numeric_whitespace);
    let bytes = trimmed.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = digit_run(bytes, end);
    end += integer_digits;

    let mut integral = true;
    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digit_run(bytes, end + 1);
        if integer_digits + fraction_digits > 0 {
            end += 1 + fraction_digits;
            integral = false;
        }
    }
    if integer_digits + fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_digits = digit_run(bytes, end + 1 + sign);
        if exponent_digits > 0 {
            end += 1 + sign + exponent_digits;
            integral = false;
        }
    }

    Some(NumericText {
        literal: &trimmed[..end],
        integral,
        rest: &trimmed[end..],
    })
}

/// The number a text collates as under numeric collation: its leading
/// numeric literal, or `0` when it has none.
pub(crate) fn numeric_prefix(text: &str) -> f64 {
    scan_numeric(text).map_or(0.0, |numeric| numeric.to_f64())
}

impl Textual for bool {
    #[inline]
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "1" } else { "" })
    }
}

macro_rules! impl_textual_by_display {
    ($($primitive:ty),* $(,)?) => {
        $(
            impl Textual for $primitive {
                #[inline]
                fn to_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_textual_by_display!(char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Textual for f32 {
    #[inline]
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Owned(float_text(f64::from(*self)))
    }
}

impl Textual for f64 {
    #[inline]
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Owned(float_text(*self))
    }
}

impl Textual for String {
    #[inline]
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Textual for &str {
    #[inline]
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.5, "0.5")]
    #[case(3.0, "3")]
    #[case(-2.25, "-2.25")]
    #[case(f64::INFINITY, "INF")]
    #[case(f64::NEG_INFINITY, "-INF")]
    #[case(f64::NAN, "NAN")]
    #[case(1e25, "1.0E+25")]
    #[case(-1.5e14, "-1.5E+14")]
    #[case(1e13, "10000000000000")]
    #[case(0.0001, "0.0001")]
    #[case(0.00001, "1.0E-5")]
    #[case(1.5e-7, "1.5E-7")]
    #[case(0.0, "0")]
    fn test_float_text(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(value.to_text(), expected);
    }

    #[rstest]
    #[case("42", Some(("42", true, "")))]
    #[case("  -1.5e3xyz", Some(("-1.5e3", false, "xyz")))]
    #[case(".5", Some((".5", false, "")))]
    #[case("7.", Some(("7.", false, "")))]
    #[case("3e", Some(("3", true, "e")))]
    #[case("+", None)]
    #[case("abc", None)]
    #[case("", None)]
    fn test_scan_numeric(#[case] text: &str, #[case] expected: Option<(&str, bool, &str)>) {
        let scanned =
            scan_numeric(text).map(|numeric| (numeric.literal, numeric.integral, numeric.rest));
        assert_eq!(scanned, expected);
    }

    #[rstest]
    #[case("12 ", true)]
    #[case(" 12", true)]
    #[case("12abc", false)]
    fn test_numeric_is_whole(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(scan_numeric(text).is_some_and(|numeric| numeric.is_whole()), expected);
    }

    #[rstest]
    #[case("10 apples", 10.0)]
    #[case("apples", 0.0)]
    #[case("-2.5", -2.5)]
    fn test_numeric_prefix(#[case] text: &str, #[case] expected: f64) {
        assert!((numeric_prefix(text) - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn test_bool_text() {
        assert_eq!(true.to_text(), "1");
        assert_eq!(false.to_text(), "");
    }

    #[rstest]
    fn test_text_is_borrowed() {
        let owned = String::from("abc");
        assert!(matches!(owned.to_text(), Cow::Borrowed("abc")));
    }
}
