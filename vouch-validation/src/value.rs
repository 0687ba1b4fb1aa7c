// Validation values and numeric coercion

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// Decimal or scientific notation, no hex, no inf/nan spellings
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap()
});

/// A value a rule operates on.
///
/// Values arrive either as numbers or as text, and the distinction matters:
/// regex rules test text verbatim but render numbers canonically, and
/// comparisons between two texts are lexicographic while any numeric operand
/// makes the comparison numeric.
///
/// `Number(f64::NAN)` behaves exactly like `Missing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum ValidationValue {
    /// Numeric value
    Number(f64),
    /// Textual value
    Text(String),
    /// No value
    #[default]
    Missing,
}

impl ValidationValue {
    /// Whether the value is absent for validation purposes (missing or NaN)
    pub fn is_missing(&self) -> bool {
        match self {
            ValidationValue::Missing => true,
            ValidationValue::Number(n) => n.is_nan(),
            ValidationValue::Text(_) => false,
        }
    }

    /// Whether the value arrived as text
    pub fn is_text(&self) -> bool {
        matches!(self, ValidationValue::Text(_))
    }

    /// Interpret the value as a number.
    ///
    /// Numbers are used directly; text goes through [`parse_number`].
    /// Returns `None` for missing values, NaN and unparsable text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ValidationValue::Number(n) if !n.is_nan() => Some(*n),
            ValidationValue::Number(_) | ValidationValue::Missing => None,
            ValidationValue::Text(text) => parse_number(text),
        }
    }

    /// The string a regex is tested against.
    ///
    /// Text is returned verbatim, numbers in their canonical decimal form
    /// (see [`format_number`]).
    pub fn match_string(&self) -> Option<Cow<'_, str>> {
        match self {
            ValidationValue::Text(text) => Some(Cow::Borrowed(text.as_str())),
            ValidationValue::Number(n) if !n.is_nan() => Some(Cow::Owned(format_number(*n))),
            ValidationValue::Number(_) | ValidationValue::Missing => None,
        }
    }
}

/// Parse text into a finite number.
///
/// Accepts surrounding whitespace, an optional sign, decimal digits with an
/// optional fraction and an optional exponent (`"3.14e2"` is `314`). Empty
/// text, `inf`/`nan` spellings, hex and values overflowing to infinity are
/// rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if !NUMBER_REGEX.is_match(trimmed) {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Canonical decimal rendering of a number.
///
/// Integral values carry no fraction (`314.0` renders as `"314"`) and
/// negative zero renders as `"0"`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}

impl fmt::Display for ValidationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationValue::Number(n) => write!(f, "{}", format_number(*n)),
            ValidationValue::Text(text) => write!(f, "\"{}\"", text),
            ValidationValue::Missing => write!(f, "missing"),
        }
    }
}

impl From<f64> for ValidationValue {
    fn from(value: f64) -> Self {
        ValidationValue::Number(value)
    }
}

impl From<f32> for ValidationValue {
    fn from(value: f32) -> Self {
        ValidationValue::Number(f64::from(value))
    }
}

impl From<i32> for ValidationValue {
    fn from(value: i32) -> Self {
        ValidationValue::Number(f64::from(value))
    }
}

impl From<u32> for ValidationValue {
    fn from(value: u32) -> Self {
        ValidationValue::Number(f64::from(value))
    }
}

impl From<i64> for ValidationValue {
    fn from(value: i64) -> Self {
        ValidationValue::Number(value as f64)
    }
}

impl From<u64> for ValidationValue {
    fn from(value: u64) -> Self {
        ValidationValue::Number(value as f64)
    }
}

impl From<&str> for ValidationValue {
    fn from(value: &str) -> Self {
        ValidationValue::Text(value.to_string())
    }
}

impl From<String> for ValidationValue {
    fn from(value: String) -> Self {
        ValidationValue::Text(value)
    }
}

impl<T: Into<ValidationValue>> From<Option<T>> for ValidationValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ValidationValue::Missing)
    }
}
