// Vouch - declarative async validation rules
//
// This library bundles the rule engine with optional rule-file loading and
// dialog/wizard gates.

// Re-export the rule engine
pub use vouch_validation::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use vouch_config;

#[cfg(feature = "dialog")]
pub use vouch_dialog;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AsyncValidate, TargetResolver, Validation, ValidationConfig, ValidationContext,
        ValidationKind, ValidationSet, ValidationState, ValidationValue, Validator, ValueResolver,
    };

    #[cfg(feature = "config")]
    pub use vouch_config::{RuleDocument, RuleLoader, load_rules};

    #[cfg(feature = "dialog")]
    pub use vouch_dialog::{Dialog, DialogMessage, PageChangeInfo, Wizard, WizardPage};
}
