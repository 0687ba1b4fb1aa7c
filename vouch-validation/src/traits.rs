// Resolver and validation traits

use crate::{ResolveError, ValidationError, ValidationState, ValidationValue};
use async_trait::async_trait;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;

/// Fetches the current value to validate.
///
/// Called again on every validation attempt, so a rule always sees the
/// latest value. Any `Fn() -> impl Future<Output = Result<ValidationValue, ResolveError>>`
/// is a resolver; a bare [`ValidationValue`] resolves to itself.
#[async_trait]
pub trait ValueResolver: Send + Sync {
    async fn resolve(&self) -> Result<ValidationValue, ResolveError>;
}

/// Looks up the current value of a named comparison target
#[async_trait]
pub trait TargetResolver: Send + Sync {
    async fn resolve_target(&self, target: &str) -> Result<ValidationValue, ResolveError>;
}

/// Trait for async validatable types
#[async_trait]
pub trait AsyncValidate: Send + Sync {
    /// Run one complete validation attempt
    async fn validate(&self) -> Result<ValidationState, ValidationError>;
}

#[async_trait]
impl<F, Fut> ValueResolver for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ValidationValue, ResolveError>> + Send + 'static,
{
    async fn resolve(&self) -> Result<ValidationValue, ResolveError> {
        self().await
    }
}

#[async_trait]
impl<F, Fut> TargetResolver for F
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ValidationValue, ResolveError>> + Send + 'static,
{
    async fn resolve_target(&self, target: &str) -> Result<ValidationValue, ResolveError> {
        self(target.to_string()).await
    }
}

#[async_trait]
impl ValueResolver for ValidationValue {
    async fn resolve(&self) -> Result<ValidationValue, ResolveError> {
        Ok(self.clone())
    }
}

#[async_trait]
impl TargetResolver for ValidationValue {
    async fn resolve_target(&self, _target: &str) -> Result<ValidationValue, ResolveError> {
        Ok(self.clone())
    }
}

/// Shared store of named field values.
///
/// Acts as the [`TargetResolver`] for comparison rules and hands out a
/// [`ValueResolver`] per field. Clones share the same store, so writes made
/// through one handle are seen by every resolver created from any handle.
/// Unknown fields resolve to [`ValidationValue::Missing`].
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    values: Arc<DashMap<String, ValidationValue>>,
}

impl ValidationContext {
    /// Create a new, empty validation context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field value
    pub fn with_value(self, field: impl Into<String>, value: impl Into<ValidationValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set or replace a field value
    pub fn set(&self, field: impl Into<String>, value: impl Into<ValidationValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Remove a field, making it resolve to `Missing`
    pub fn remove(&self, field: &str) {
        self.values.remove(field);
    }

    /// Current value of a field
    pub fn get(&self, field: &str) -> ValidationValue {
        self.values
            .get(field)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Resolver that reads `field` from this context on every call
    pub fn resolver(&self, field: impl Into<String>) -> FieldResolver {
        FieldResolver {
            context: self.clone(),
            field: field.into(),
        }
    }
}

#[async_trait]
impl TargetResolver for ValidationContext {
    async fn resolve_target(&self, target: &str) -> Result<ValidationValue, ResolveError> {
        Ok(self.get(target))
    }
}

/// Value resolver bound to one field of a [`ValidationContext`]
#[derive(Debug, Clone)]
pub struct FieldResolver {
    context: ValidationContext,
    field: String,
}

impl FieldResolver {
    pub fn field(&self) -> &str {
        &self.field
    }
}

#[async_trait]
impl ValueResolver for FieldResolver {
    async fn resolve(&self) -> Result<ValidationValue, ResolveError> {
        Ok(self.context.get(&self.field))
    }
}
