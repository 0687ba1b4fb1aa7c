// Validation errors

use thiserror::Error;

/// Failure reported by a value or target resolver.
///
/// Resolvers return this when the underlying value cannot be read at all.
/// A value that is merely absent is [`ValidationValue::Missing`](crate::ValidationValue::Missing),
/// not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ResolveError {
    /// Error message
    pub message: String,
}

impl ResolveError {
    /// Create a new resolve error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised while building or running a validation.
///
/// A failed check is not an error: it is reported as a
/// [`ValidationState`](crate::ValidationState) with `valid == false`.
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    /// The primary value resolver failed
    #[error("Value resolver failed: {0}")]
    Resolve(#[source] ResolveError),

    /// The target resolver failed for the named target
    #[error("Target resolver failed for '{target}': {source}")]
    ResolveTarget {
        target: String,
        #[source]
        source: ResolveError,
    },

    /// The configured regex pattern does not compile
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A comparison rule was built without a target resolver
    #[error("Comparison rule against '{0}' requires a target resolver")]
    MissingTargetResolver(String),

    /// A tokio task spawned by `ValidationSet::validate_parallel` panicked
    /// or was cancelled
    #[error("Validation task failed: {0}")]
    Task(String),
}

impl ValidationError {
    /// Whether this error came from a resolver rather than from configuration
    pub fn is_resolve_error(&self) -> bool {
        matches!(
            self,
            ValidationError::Resolve(_) | ValidationError::ResolveTarget { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_display() {
        let error = ValidationError::ResolveTarget {
            target: "max_cpu".to_string(),
            source: ResolveError::new("field detached"),
        };

        assert_eq!(
            error.to_string(),
            "Target resolver failed for 'max_cpu': field detached"
        );
        assert!(error.is_resolve_error());
    }

    #[test]
    fn test_configuration_errors_are_not_resolve_errors() {
        let error = ValidationError::MissingTargetResolver("limit".to_string());
        assert!(!error.is_resolve_error());
    }
}
