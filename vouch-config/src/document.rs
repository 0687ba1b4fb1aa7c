// Rule documents

use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use vouch_validation::{
    MatchesRegex, Validation, ValidationConfig, ValidationContext, ValidationKind, ValidationSet,
};

/// The rules attached to one named field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRules {
    /// Field name, also the key the field's value is read from
    pub name: String,

    #[serde(default)]
    pub validations: Vec<ValidationConfig>,
}

impl FieldRules {
    /// Bind this field's rules to `context`.
    ///
    /// Each rule reads the field's value from the context; comparison rules
    /// look their target up in the same context.
    pub fn bind(&self, context: &ValidationContext) -> Result<Vec<Validation>> {
        self.validations
            .iter()
            .map(|config| {
                Validation::build(
                    config.clone(),
                    Arc::new(context.resolver(self.name.as_str())),
                    Some(Arc::new(context.clone())),
                )
                .map_err(|source| ConfigError::InvalidRule {
                    field: self.name.clone(),
                    source,
                })
            })
            .collect()
    }
}

/// A set of field rules, as loaded from a rule file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub fields: Vec<FieldRules>,
}

impl RuleDocument {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Self { fields }
    }

    /// Total number of rules across all fields
    pub fn rule_count(&self) -> usize {
        self.fields.iter().map(|f| f.validations.len()).sum()
    }

    pub fn field(&self, name: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Reject empty or duplicated field names and regexes that do not compile
    pub fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(ConfigError::InvalidDocument(
                    "field name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::InvalidDocument(format!(
                    "field '{}' is declared more than once",
                    field.name
                )));
            }

            for config in &field.validations {
                if let ValidationKind::MatchesRegex { pattern } = &config.kind {
                    MatchesRegex::new(pattern).map_err(|source| ConfigError::InvalidRule {
                        field: field.name.clone(),
                        source,
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Bind every rule in the document, in document order
    pub fn validation_set(&self, context: &ValidationContext) -> Result<ValidationSet> {
        let mut set = ValidationSet::new();
        for field in &self.fields {
            for validation in field.bind(context)? {
                set.push(validation);
            }
        }
        Ok(set)
    }

    /// Bind the rules of a single field
    pub fn field_validation_set(
        &self,
        name: &str,
        context: &ValidationContext,
    ) -> Result<ValidationSet> {
        let field = self
            .field(name)
            .ok_or_else(|| ConfigError::InvalidDocument(format!("unknown field '{}'", name)))?;

        Ok(field.bind(context)?.into_iter().collect())
    }
}
