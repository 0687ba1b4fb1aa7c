// Rule configuration loading for vouch validations

pub mod document;
pub mod error;
pub mod loader;

pub use document::{FieldRules, RuleDocument};
pub use error::{ConfigError, Result};
pub use loader::{FileFormat, RuleLoader, load_rules};
