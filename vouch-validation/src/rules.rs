// Validation sets

use crate::{AsyncValidate, Result, Validation, ValidationError, ValidationState, Validator};
use async_trait::async_trait;
use futures::FutureExt;
use std::sync::Arc;
use tracing::debug;

/// Ordered collection of rules reduced with logical AND.
///
/// The first failing rule, in insertion order, decides the reported message.
/// An empty set passes with an empty message.
#[derive(Debug, Clone, Default)]
pub struct ValidationSet {
    validations: Vec<Validation>,
}

impl ValidationSet {
    /// Create an empty validation set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, validation: Validation) -> Self {
        self.validations.push(validation);
        self
    }

    /// Add a rule in place
    pub fn push(&mut self, validation: Validation) {
        self.validations.push(validation);
    }

    pub fn len(&self) -> usize {
        self.validations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validations.is_empty()
    }

    pub fn validations(&self) -> &[Validation] {
        &self.validations
    }

    /// Run the rules in order, stopping at the first failure.
    ///
    /// Resolver errors propagate immediately.
    pub async fn validate(&self) -> Result<ValidationState> {
        for validation in &self.validations {
            let state = validation.validate().await?;
            if !state.valid {
                debug!(message = %state.message, "Validation set failed");
                return Ok(state);
            }
        }

        Ok(ValidationState::new(true, ""))
    }

    /// Run every rule in order and return every outcome
    pub async fn validate_all(&self) -> Result<Vec<ValidationState>> {
        let mut states = Vec::with_capacity(self.validations.len());
        for validation in &self.validations {
            states.push(validation.validate().await?);
        }
        Ok(states)
    }

    /// Run every rule concurrently.
    ///
    /// Each rule runs as its own tokio task. The reduction matches
    /// [`validate`](Self::validate): the earliest failing rule in insertion
    /// order is reported, regardless of completion order. A resolver error
    /// from any rule is returned; when several fail, the earliest rule's
    /// error wins.
    ///
    /// # Panics
    ///
    /// Must be awaited inside a tokio runtime; spawning panics otherwise.
    pub async fn validate_parallel(&self) -> Result<ValidationState> {
        use tokio::task::JoinSet;

        let mut set = JoinSet::new();

        for (index, validation) in self.validations.iter().enumerate() {
            let validation = validation.clone();
            set.spawn(async move { (index, validation.validate().await) });
        }

        let mut outcomes: Vec<Option<Result<ValidationState>>> =
            (0..self.validations.len()).map(|_| None).collect();

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(e) => return Err(ValidationError::Task(e.to_string())),
            }
        }

        for outcome in outcomes.into_iter().flatten() {
            let state = outcome?;
            if !state.valid {
                return Ok(state);
            }
        }

        Ok(ValidationState::new(true, ""))
    }

    /// Detach the whole set into a single [`Validator`]
    pub fn validator(&self) -> Validator {
        let set = self.clone();
        Arc::new(move || {
            let set = set.clone();
            async move { set.validate().await }.boxed()
        })
    }
}

impl FromIterator<Validation> for ValidationSet {
    fn from_iter<I: IntoIterator<Item = Validation>>(iter: I) -> Self {
        Self {
            validations: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl AsyncValidate for ValidationSet {
    async fn validate(&self) -> Result<ValidationState> {
        ValidationSet::validate(self).await
    }
}
