// Rule evaluation

use crate::{
    AsyncValidate, GreaterThanOrEquals, IsInteger, LessThanOrEquals, MatchesRegex, Result,
    TargetResolver, ValidationConfig, ValidationError, ValidationKind, ValidationState,
    ValidationValue, ValueResolver,
};
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A zero-argument async predicate, as registered with dialogs and wizards.
///
/// Each call is one complete validation attempt against the latest values.
pub type Validator = Arc<dyn Fn() -> BoxFuture<'static, Result<ValidationState>> + Send + Sync>;

enum Rule {
    IsInteger,
    MatchesRegex(MatchesRegex),
    LessThanOrEquals {
        target: String,
        resolver: Arc<dyn TargetResolver>,
    },
    GreaterThanOrEquals {
        target: String,
        resolver: Arc<dyn TargetResolver>,
    },
}

struct Inner {
    config: ValidationConfig,
    rule: Rule,
    value: Arc<dyn ValueResolver>,
}

/// A configured rule bound to its resolvers.
///
/// Cloning is cheap and clones share the same configuration and resolvers.
/// A `Validation` holds no mutable state; everything it observes comes from
/// its resolvers at call time.
///
/// # Examples
///
/// ```
/// use vouch_validation::{Validation, ValidationConfig, ValidationValue};
///
/// # tokio_test::block_on(async {
/// let config = ValidationConfig::regex("digits only", "^[0-9]+$");
/// let validation = Validation::new(config, ValidationValue::from(3.14e2)).unwrap();
///
/// let validator = validation.validator();
/// let state = validator().await.unwrap();
/// assert!(state.valid);
/// assert_eq!(state.message, "digits only");
/// # });
/// ```
#[derive(Clone)]
pub struct Validation {
    inner: Arc<Inner>,
}

impl Validation {
    /// Create a rule that needs no comparison target.
    ///
    /// Fails with [`ValidationError::MissingTargetResolver`] for comparison
    /// kinds and [`ValidationError::InvalidPattern`] for a bad regex.
    pub fn new(config: ValidationConfig, value: impl ValueResolver + 'static) -> Result<Self> {
        Self::build(config, Arc::new(value), None)
    }

    /// Create a rule with a target resolver for comparison kinds.
    ///
    /// The target resolver is unused by non-comparison kinds.
    pub fn with_target(
        config: ValidationConfig,
        value: impl ValueResolver + 'static,
        target: impl TargetResolver + 'static,
    ) -> Result<Self> {
        Self::build(config, Arc::new(value), Some(Arc::new(target)))
    }

    /// Integer rule
    pub fn integer(description: impl Into<String>, value: impl ValueResolver + 'static) -> Self {
        Self::from_parts(
            ValidationConfig::is_integer(description),
            Rule::IsInteger,
            Arc::new(value),
        )
    }

    /// Regex rule; fails if `pattern` does not compile
    pub fn regex(
        description: impl Into<String>,
        pattern: impl Into<String>,
        value: impl ValueResolver + 'static,
    ) -> Result<Self> {
        Self::new(ValidationConfig::regex(description, pattern), value)
    }

    /// `value <= target` rule
    pub fn less_than_or_equals(
        description: impl Into<String>,
        target: impl Into<String>,
        value: impl ValueResolver + 'static,
        target_resolver: impl TargetResolver + 'static,
    ) -> Self {
        let target = target.into();
        Self::from_parts(
            ValidationConfig::less_than_or_equals(description, target.clone()),
            Rule::LessThanOrEquals {
                target,
                resolver: Arc::new(target_resolver),
            },
            Arc::new(value),
        )
    }

    /// `value >= target` rule
    pub fn greater_than_or_equals(
        description: impl Into<String>,
        target: impl Into<String>,
        value: impl ValueResolver + 'static,
        target_resolver: impl TargetResolver + 'static,
    ) -> Self {
        let target = target.into();
        Self::from_parts(
            ValidationConfig::greater_than_or_equals(description, target.clone()),
            Rule::GreaterThanOrEquals {
                target,
                resolver: Arc::new(target_resolver),
            },
            Arc::new(value),
        )
    }

    /// Create a rule from already shared resolvers
    pub fn build(
        config: ValidationConfig,
        value: Arc<dyn ValueResolver>,
        target: Option<Arc<dyn TargetResolver>>,
    ) -> Result<Self> {
        let rule = match &config.kind {
            ValidationKind::IsInteger => Rule::IsInteger,
            ValidationKind::MatchesRegex { pattern } => {
                Rule::MatchesRegex(MatchesRegex::new(pattern)?)
            }
            ValidationKind::LessThanOrEquals { target: name } => Rule::LessThanOrEquals {
                resolver: target
                    .ok_or_else(|| ValidationError::MissingTargetResolver(name.clone()))?,
                target: name.clone(),
            },
            ValidationKind::GreaterThanOrEquals { target: name } => Rule::GreaterThanOrEquals {
                resolver: target
                    .ok_or_else(|| ValidationError::MissingTargetResolver(name.clone()))?,
                target: name.clone(),
            },
        };

        Ok(Self::from_parts(config, rule, value))
    }

    fn from_parts(config: ValidationConfig, rule: Rule, value: Arc<dyn ValueResolver>) -> Self {
        trace!(constraint = config.kind.name(), "Validation created");
        Self {
            inner: Arc::new(Inner {
                config,
                rule,
                value,
            }),
        }
    }

    /// The rule's configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.inner.config
    }

    /// The configured description, reported with every outcome
    pub fn description(&self) -> &str {
        &self.inner.config.description
    }

    /// Run one validation attempt.
    ///
    /// Resolves the value, then the target for comparison rules, and applies
    /// the rule. Missing or unparsable values yield `valid == false`; resolver
    /// failures are returned as errors.
    pub async fn validate(&self) -> Result<ValidationState> {
        let inner = &self.inner;
        let constraint = inner.config.kind.name();

        let value = inner.value.resolve().await.map_err(|e| {
            warn!(constraint, error = %e, "Value resolver failed");
            ValidationError::Resolve(e)
        })?;

        let valid = match &inner.rule {
            Rule::IsInteger => IsInteger::check(&value),
            Rule::MatchesRegex(regex) => regex.check(&value),
            Rule::LessThanOrEquals { target, resolver } => {
                let target_value = resolve_target(resolver.as_ref(), target).await?;
                LessThanOrEquals::check(&value, &target_value)
            }
            Rule::GreaterThanOrEquals { target, resolver } => {
                let target_value = resolve_target(resolver.as_ref(), target).await?;
                GreaterThanOrEquals::check(&value, &target_value)
            }
        };

        debug!(constraint, %value, valid, "Validation evaluated");
        Ok(ValidationState::new(valid, inner.config.description.as_str()))
    }

    /// Detach this rule into a [`Validator`] closure.
    ///
    /// The closure can be invoked any number of times; each invocation
    /// re-resolves its values.
    pub fn validator(&self) -> Validator {
        let validation = self.clone();
        Arc::new(move || {
            let validation = validation.clone();
            async move { validation.validate().await }.boxed()
        })
    }
}

async fn resolve_target(resolver: &dyn TargetResolver, target: &str) -> Result<ValidationValue> {
    resolver.resolve_target(target).await.map_err(|source| {
        warn!(target_name = target, error = %source, "Target resolver failed");
        ValidationError::ResolveTarget {
            target: target.to_string(),
            source,
        }
    })
}

#[async_trait]
impl AsyncValidate for Validation {
    async fn validate(&self) -> Result<ValidationState> {
        Validation::validate(self).await
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validation")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ResolveError, ValidationContext};

    #[tokio::test]
    async fn test_integer_nan_is_invalid() {
        let validation = Validation::integer("not an integer", ValidationValue::from(f64::NAN));
        let state = validation.validate().await.unwrap();

        assert_eq!(state, ValidationState::new(false, "not an integer"));
    }

    #[tokio::test]
    async fn test_message_is_description_for_both_outcomes() {
        let context = ValidationContext::new().with_value("count", 3);
        let validation = Validation::integer("count must be whole", context.resolver("count"));
        let validator = validation.validator();

        let passed = validator().await.unwrap();
        assert!(passed.valid);
        assert_eq!(passed.message, "count must be whole");

        context.set("count", 3.5);
        let failed = validator().await.unwrap();
        assert!(!failed.valid);
        assert_eq!(failed.message, "count must be whole");
    }

    #[tokio::test]
    async fn test_comparison_without_target_resolver_fails_fast() {
        let config = ValidationConfig::less_than_or_equals("at most max", "max");
        let result = Validation::new(config, ValidationValue::from(1));

        assert!(matches!(
            result,
            Err(ValidationError::MissingTargetResolver(target)) if target == "max"
        ));
    }

    #[tokio::test]
    async fn test_invalid_pattern_fails_fast() {
        let result = Validation::regex("broken", "(", ValidationValue::from("x"));
        assert!(matches!(result, Err(ValidationError::InvalidPattern { .. })));
    }

    #[tokio::test]
    async fn test_less_than_or_equals_missing_primary() {
        let validation = Validation::less_than_or_equals(
            "missing <= 42",
            "comparisonTarget",
            ValidationValue::Missing,
            ValidationValue::from(42),
        );

        let state = validation.validate().await.unwrap();
        assert!(!state.valid);
        assert_eq!(state.message, "missing <= 42");
    }

    #[tokio::test]
    async fn test_target_resolver_receives_target_name() {
        let target = |name: String| async move {
            if name == "max_cpu" {
                Ok(ValidationValue::from(8))
            } else {
                Err(ResolveError::new(format!("unknown target {}", name)))
            }
        };
        let validation = Validation::with_target(
            ValidationConfig::less_than_or_equals("cpu <= max", "max_cpu"),
            ValidationValue::from("4"),
            target,
        )
        .unwrap();

        assert!(validation.validate().await.unwrap().valid);
    }

    #[tokio::test]
    async fn test_value_resolver_error_propagates() {
        let failing = || async { Err::<ValidationValue, _>(ResolveError::new("field detached")) };
        let validation = Validation::integer("integer", failing);

        let error = validation.validate().await.unwrap_err();
        assert!(matches!(error, ValidationError::Resolve(_)));
    }

    #[tokio::test]
    async fn test_target_resolver_error_propagates() {
        let failing =
            |_name: String| async { Err::<ValidationValue, _>(ResolveError::new("gone")) };
        let validation = Validation::greater_than_or_equals(
            ">= min",
            "min",
            ValidationValue::from(1),
            failing,
        );

        let error = validation.validator()().await.unwrap_err();
        assert!(matches!(
            error,
            ValidationError::ResolveTarget { ref target, .. } if target == "min"
        ));
    }

    #[test]
    fn test_debug_shows_config() {
        let validation = Validation::integer("integer", ValidationValue::Missing);
        let debug = format!("{:?}", validation);
        assert!(debug.contains("IsInteger"));
    }
}
