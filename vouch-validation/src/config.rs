// Rule configuration and results

use serde::{Deserialize, Serialize};

/// The kind of check a rule performs, with its kind-specific settings.
///
/// Serialized with a `type` tag: `"is_integer"`, `"regex_match"` (with
/// `regex`), `"<="` and `">="` (with `target`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ValidationKind {
    /// The value represents a mathematical integer
    #[serde(rename = "is_integer")]
    IsInteger,

    /// The value's string form matches `pattern`
    #[serde(rename = "regex_match")]
    MatchesRegex {
        #[serde(rename = "regex")]
        pattern: String,
    },

    /// The value is less than or equal to the named target
    #[serde(rename = "<=")]
    LessThanOrEquals { target: String },

    /// The value is greater than or equal to the named target
    #[serde(rename = ">=")]
    GreaterThanOrEquals { target: String },
}

impl ValidationKind {
    /// Short constraint name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            ValidationKind::IsInteger => "isInteger",
            ValidationKind::MatchesRegex { .. } => "matchesRegex",
            ValidationKind::LessThanOrEquals { .. } => "lessThanOrEquals",
            ValidationKind::GreaterThanOrEquals { .. } => "greaterThanOrEquals",
        }
    }

    /// Name of the comparison target, for comparison kinds
    pub fn target(&self) -> Option<&str> {
        match self {
            ValidationKind::LessThanOrEquals { target }
            | ValidationKind::GreaterThanOrEquals { target } => Some(target),
            ValidationKind::IsInteger | ValidationKind::MatchesRegex { .. } => None,
        }
    }
}

/// Immutable configuration of a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// What the rule checks
    #[serde(flatten)]
    pub kind: ValidationKind,

    /// Message reported with every outcome, pass or fail
    pub description: String,
}

impl ValidationConfig {
    /// Create a new rule configuration
    pub fn new(kind: ValidationKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    pub fn is_integer(description: impl Into<String>) -> Self {
        Self::new(ValidationKind::IsInteger, description)
    }

    pub fn regex(description: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(
            ValidationKind::MatchesRegex {
                pattern: pattern.into(),
            },
            description,
        )
    }

    pub fn less_than_or_equals(description: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            ValidationKind::LessThanOrEquals {
                target: target.into(),
            },
            description,
        )
    }

    pub fn greater_than_or_equals(
        description: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::new(
            ValidationKind::GreaterThanOrEquals {
                target: target.into(),
            },
            description,
        )
    }
}

/// Outcome of one validation attempt.
///
/// `message` is always the configured description; callers branch on `valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationState {
    pub valid: bool,
    pub message: String,
}

impl ValidationState {
    pub fn new(valid: bool, message: impl Into<String>) -> Self {
        Self {
            valid,
            message: message.into(),
        }
    }
}
