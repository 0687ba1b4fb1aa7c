// Built-in rule predicates

use crate::{ValidationError, ValidationValue};
use regex::Regex;
use std::cmp::Ordering;

/// Validates that a value represents a mathematical integer.
///
/// The check runs on the parsed number, not the literal text, so `"3.14e2"`
/// passes and `"3.14"` does not.
pub struct IsInteger;

impl IsInteger {
    pub fn check(value: &ValidationValue) -> bool {
        value
            .as_number()
            .is_some_and(|n| n.is_finite() && n.fract() == 0.0)
    }
}

/// Validates that a value's string form matches a regex.
///
/// Text is tested verbatim, numbers in canonical form. The regex is applied
/// as given; anchor it with `^...$` to require a full match.
#[derive(Debug, Clone)]
pub struct MatchesRegex(pub Regex);

impl MatchesRegex {
    /// Compile `pattern`, failing fast on invalid syntax
    pub fn new(pattern: &str) -> Result<Self, ValidationError> {
        Regex::new(pattern)
            .map(MatchesRegex)
            .map_err(|e| ValidationError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn check(&self, value: &ValidationValue) -> bool {
        value
            .match_string()
            .is_some_and(|text| self.0.is_match(&text))
    }

    pub fn pattern(&self) -> &str {
        self.0.as_str()
    }
}

/// Order a value against a comparison target.
///
/// Two texts compare lexicographically by code point, so `"342" < "42"`.
/// If either side is a number both sides are compared numerically, parsing
/// text the same way [`IsInteger`] does. Returns `None` when either side is
/// missing, NaN or unparsable.
pub fn compare(value: &ValidationValue, target: &ValidationValue) -> Option<Ordering> {
    if value.is_missing() || target.is_missing() {
        return None;
    }

    match (value, target) {
        (ValidationValue::Text(lhs), ValidationValue::Text(rhs)) => {
            Some(lhs.as_str().cmp(rhs.as_str()))
        }
        _ => {
            let lhs = value.as_number()?;
            let rhs = target.as_number()?;
            lhs.partial_cmp(&rhs)
        }
    }
}

/// Validates `value <= target`
pub struct LessThanOrEquals;

impl LessThanOrEquals {
    pub fn check(value: &ValidationValue, target: &ValidationValue) -> bool {
        matches!(
            compare(value, target),
            Some(Ordering::Less | Ordering::Equal)
        )
    }
}

/// Validates `value >= target`
pub struct GreaterThanOrEquals;

impl GreaterThanOrEquals {
    pub fn check(value: &ValidationValue, target: &ValidationValue) -> bool {
        matches!(
            compare(value, target),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }
}
