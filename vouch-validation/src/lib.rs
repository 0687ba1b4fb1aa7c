//! Declarative async validation rules
//!
//! Rules resolve a candidate value (and, for comparisons, a named target
//! value) through async resolvers, apply a type-aware predicate and report a
//! [`ValidationState`] carrying the rule's description.
//!
//! # Examples
//!
//! ## Single Rule
//!
//! ```
//! use vouch_validation::{Validation, ValidationValue};
//!
//! # tokio_test::block_on(async {
//! let validation = Validation::integer("must be an integer", ValidationValue::from("3.14e2"));
//!
//! let state = validation.validate().await.unwrap();
//! assert!(state.valid);
//! assert_eq!(state.message, "must be an integer");
//! # });
//! ```
//!
//! ## Comparing Fields
//!
//! Two text operands compare lexicographically; a numeric operand on either
//! side makes the comparison numeric.
//!
//! ```
//! use vouch_validation::{Validation, ValidationContext};
//!
//! # tokio_test::block_on(async {
//! let form = ValidationContext::new()
//!     .with_value("memory", "342")
//!     .with_value("max_memory", "42");
//!
//! let validation = Validation::less_than_or_equals(
//!     "memory must not exceed the maximum",
//!     "max_memory",
//!     form.resolver("memory"),
//!     form.clone(),
//! );
//! assert!(validation.validate().await.unwrap().valid);
//!
//! form.set("max_memory", 42);
//! assert!(!validation.validate().await.unwrap().valid);
//! # });
//! ```
//!
//! ## Validation Sets
//!
//! ```
//! use vouch_validation::{Validation, ValidationSet, ValidationValue};
//!
//! # tokio_test::block_on(async {
//! let set = ValidationSet::new()
//!     .add(Validation::integer("integer", ValidationValue::from(12)))
//!     .add(Validation::regex("two digits", "^[0-9]{2}$", ValidationValue::from(12)).unwrap());
//!
//! let validator = set.validator();
//! assert!(validator().await.unwrap().valid);
//! # });
//! ```

mod config;
mod errors;
mod rules;
mod traits;
mod validation;
mod validators;
mod value;

pub use config::*;
pub use errors::*;
pub use rules::*;
pub use traits::*;
pub use validation::*;
pub use validators::*;
pub use value::*;
