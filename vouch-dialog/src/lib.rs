//! Dialog and wizard gates for vouch validations
//!
//! Dialogs and wizards consult a single registered gate before closing or
//! changing pages. A gate is either a plain async predicate or a
//! [`Validator`](vouch_validation::Validator) built from validation rules,
//! in which case a failing rule's description is surfaced as the error
//! message.
//!
//! ```
//! use vouch_dialog::Dialog;
//! use vouch_validation::{Validation, ValidationContext};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let form = ValidationContext::new().with_value("replicas", "2.5");
//!
//! let mut dialog = Dialog::new("Scale deployment");
//! dialog.register_validation_gate(
//!     Validation::integer("Replicas must be a whole number", form.resolver("replicas")).validator(),
//! );
//!
//! assert!(!dialog.validate_close().await.unwrap());
//! assert_eq!(dialog.message().unwrap().text, "Replicas must be a whole number");
//! # });
//! ```

pub mod dialog;
pub mod error;
pub mod gate;
pub mod pane;
pub mod wizard;

pub use dialog::Dialog;
pub use error::{DialogError, Result};
pub use gate::{
    CloseValidator, NavigationValidator, PageChangeInfo, close_validator, navigation_validator,
};
pub use pane::{DialogMessage, MessageLevel, MessageObserver, Pane, ValidityObserver};
pub use wizard::{PageChangedObserver, Wizard, WizardPage};
