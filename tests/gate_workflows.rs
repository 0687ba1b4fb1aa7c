//! Integration tests for common vouch workflows.
//!
//! Rules are loaded from a document, bound to live form values and used to
//! gate dialogs and wizards.

use vouch::prelude::*;
use vouch::vouch_config::FileFormat;
use vouch::vouch_dialog::close_validator;

const DEPLOYMENT_RULES: &str = r#"
[[fields]]
name = "replicas"

[[fields.validations]]
type = "is_integer"
description = "Replicas must be a whole number"

[[fields.validations]]
type = ">="
target = "min_replicas"
description = "Replicas must be at least the minimum"

[[fields.validations]]
type = "<="
target = "max_replicas"
description = "Replicas must not exceed the maximum"

[[fields]]
name = "name"

[[fields.validations]]
type = "regex_match"
regex = "^[a-z][a-z0-9-]*$"
description = "Name must be lowercase letters, digits and dashes"
"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn deployment_form() -> ValidationContext {
    ValidationContext::new()
        .with_value("replicas", "3")
        .with_value("min_replicas", 1)
        .with_value("max_replicas", 10)
        .with_value("name", "web-frontend")
}

// =============================================================================
// Rule Document Tests
// =============================================================================

#[tokio::test]
async fn test_rules_from_document_validate_form() {
    init_tracing();

    let document = RuleLoader::new(FileFormat::Toml)
        .parse(DEPLOYMENT_RULES)
        .unwrap();
    let form = deployment_form();
    let rules = document.validation_set(&form).unwrap();
    assert_eq!(rules.len(), 4);

    let state = rules.validate().await.unwrap();
    assert!(state.valid);

    form.set("replicas", "3.14e2");
    let state = rules.validate_parallel().await.unwrap();
    assert!(!state.valid);
    assert_eq!(state.message, "Replicas must not exceed the maximum");

    form.set("replicas", 4);
    form.set("name", "Web Frontend");
    let states = rules.validate_all().await.unwrap();
    let failing: Vec<&str> = states
        .iter()
        .filter(|s| !s.valid)
        .map(|s| s.message.as_str())
        .collect();
    assert_eq!(
        failing,
        vec!["Name must be lowercase letters, digits and dashes"]
    );
}

// =============================================================================
// Gate Tests
// =============================================================================

#[tokio::test]
async fn test_wizard_gated_by_document_rules() {
    init_tracing();

    let document = RuleLoader::new(FileFormat::Toml)
        .parse(DEPLOYMENT_RULES)
        .unwrap();
    let form = deployment_form();

    let mut wizard = Wizard::new(
        "New deployment",
        vec![WizardPage::new("Scale"), WizardPage::new("Review")],
    );
    wizard.set_current_page(0).unwrap();
    wizard.register_validation_gate(
        document
            .field_validation_set("replicas", &form)
            .unwrap()
            .validator(),
    );

    form.set("replicas", 0);
    assert!(!wizard.navigate(1).await.unwrap());
    assert_eq!(
        wizard.message().map(|m| m.text.as_str()),
        Some("Replicas must be at least the minimum")
    );

    form.set("replicas", 2);
    assert!(wizard.navigate(1).await.unwrap());
    assert_eq!(wizard.current_page(), Some(1));
}

#[tokio::test]
async fn test_dialog_gate_composed_from_single_rules() {
    let form = deployment_form();
    let name_rule = Validation::regex(
        "Name must be lowercase",
        "^[a-z-]+$",
        form.resolver("name"),
    )
    .unwrap();

    // Combine two rules by hand into a plain close predicate
    let replicas_rule = Validation::integer("Replicas must be whole", form.resolver("replicas"));
    let name_validator = name_rule.validator();
    let replicas_validator = replicas_rule.validator();

    let mut dialog = Dialog::new("Edit deployment");
    dialog.register_close_validator(close_validator(move || {
        let name_validator = name_validator.clone();
        let replicas_validator = replicas_validator.clone();
        async move {
            let name = name_validator().await?;
            let replicas = replicas_validator().await?;
            Ok::<_, vouch::vouch_dialog::DialogError>(name.valid && replicas.valid)
        }
    }));

    assert!(dialog.validate_close().await.unwrap());

    form.set("replicas", "two");
    assert!(!dialog.validate_close().await.unwrap());
    // Plain predicates leave the message alone
    assert!(dialog.message().is_none());
}
