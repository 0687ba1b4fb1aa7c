//! Wizard navigation gate

use crate::gate::{NavigationValidator, PageChangeInfo, run_rules};
use crate::pane::{DialogMessage, MessageSlot, Pane};
use crate::{DialogError, Result};
use tracing::{debug, info};
use vouch_validation::Validator;

/// Observer called after the current page changes
pub type PageChangedObserver = Box<dyn Fn(PageChangeInfo) + Send + Sync>;

/// One page of a wizard.
///
/// The page's pane tracks the outcome of rule gates run while it is current.
#[derive(Debug, Default)]
pub struct WizardPage {
    pub title: String,
    pub pane: Pane,
}

impl WizardPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pane: Pane::new(),
        }
    }
}

enum NavigationGate {
    Predicate(NavigationValidator),
    Rules(Validator),
}

/// A multi-page wizard whose navigation can be gated by a validator.
///
/// No page is current until [`set_current_page`](Self::set_current_page) is
/// first called. As with [`Dialog`](crate::Dialog), the last registered gate
/// wins and an ungated wizard may always navigate.
pub struct Wizard {
    pub title: String,
    pages: Vec<WizardPage>,
    current_page: Option<usize>,
    page_changed: Vec<PageChangedObserver>,
    message: MessageSlot,
    pane: Pane,
    gate: Option<NavigationGate>,
}

impl Wizard {
    pub fn new(title: impl Into<String>, pages: Vec<WizardPage>) -> Self {
        Self {
            title: title.into(),
            pages,
            current_page: None,
            page_changed: Vec::new(),
            message: MessageSlot::default(),
            pane: Pane::new(),
            gate: None,
        }
    }

    pub fn pages(&self) -> &[WizardPage] {
        &self.pages
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut WizardPage> {
        self.pages.get_mut(index)
    }

    pub fn current_page(&self) -> Option<usize> {
        self.current_page
    }

    /// Validity as last reported by a validation gate
    pub fn valid(&self) -> bool {
        self.pane.valid()
    }

    pub fn message(&self) -> Option<&DialogMessage> {
        self.message.get()
    }

    pub fn set_message(&mut self, message: Option<DialogMessage>) {
        self.message.set(message);
    }

    /// Register a message-changed observer
    pub fn on_message_changed(
        &mut self,
        observer: impl Fn(Option<&DialogMessage>) + Send + Sync + 'static,
    ) {
        self.message.subscribe(observer);
    }

    /// Register a page-changed observer
    pub fn on_page_changed(&mut self, observer: impl Fn(PageChangeInfo) + Send + Sync + 'static) {
        self.page_changed.push(Box::new(observer));
    }

    /// Make `index` the current page.
    ///
    /// Page-changed observers run only when the page actually changes. This
    /// does not consult the navigation gate; see [`navigate`](Self::navigate).
    pub fn set_current_page(&mut self, index: usize) -> Result<()> {
        if index >= self.pages.len() {
            return Err(DialogError::PageOutOfBounds {
                index,
                page_count: self.pages.len(),
            });
        }

        let last_page = self.current_page.replace(index);
        if last_page != Some(index) {
            let change = PageChangeInfo {
                last_page,
                new_page: index,
            };
            info!(wizard = %self.title, ?last_page, new_page = index, "Wizard page changed");
            for observer in &self.page_changed {
                observer(change);
            }
        }

        Ok(())
    }

    /// Gate navigation on a predicate that sees the page transition
    pub fn register_navigation_validator(&mut self, validator: NavigationValidator) {
        debug!(wizard = %self.title, "Registered navigation validator");
        self.gate = Some(NavigationGate::Predicate(validator));
    }

    /// Gate navigation on validation rules.
    ///
    /// A failing rule blocks navigation and its description becomes the
    /// wizard's error message.
    pub fn register_validation_gate(&mut self, validator: Validator) {
        debug!(wizard = %self.title, "Registered validation gate");
        self.gate = Some(NavigationGate::Rules(validator));
    }

    /// Ask the registered gate whether the wizard may move to `new_page`
    pub async fn validate_navigation(&mut self, new_page: usize) -> Result<bool> {
        let change = PageChangeInfo {
            last_page: self.current_page,
            new_page,
        };

        let allowed = match &self.gate {
            None => true,
            Some(NavigationGate::Predicate(validator)) => validator(change).await?,
            Some(NavigationGate::Rules(validator)) => {
                let valid = run_rules(validator, &mut self.pane, &mut self.message).await?;
                if let Some(page) = self.current_page.and_then(|i| self.pages.get_mut(i)) {
                    page.pane.notify_validity_changed(valid);
                }
                valid
            }
        };

        debug!(wizard = %self.title, ?change, allowed, "Navigation validated");
        Ok(allowed)
    }

    /// Validate, then move to `new_page` if the gate allows it.
    ///
    /// Returns whether navigation was allowed.
    pub async fn navigate(&mut self, new_page: usize) -> Result<bool> {
        if new_page >= self.pages.len() {
            return Err(DialogError::PageOutOfBounds {
                index: new_page,
                page_count: self.pages.len(),
            });
        }

        if !self.validate_navigation(new_page).await? {
            return Ok(false);
        }

        self.set_current_page(new_page)?;
        Ok(true)
    }
}

impl std::fmt::Debug for Wizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("title", &self.title)
            .field("pages", &self.pages)
            .field("current_page", &self.current_page)
            .field("message", &self.message)
            .field("gated", &self.gate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::navigation_validator;
    use std::sync::{Arc, Mutex};
    use vouch_validation::{Validation, ValidationContext};

    fn wizard() -> Wizard {
        Wizard::new(
            "Deploy",
            vec![
                WizardPage::new("Target"),
                WizardPage::new("Resources"),
                WizardPage::new("Summary"),
            ],
        )
    }

    #[test]
    fn test_set_current_page_bounds() {
        let mut wizard = wizard();
        assert_eq!(wizard.current_page(), None);

        wizard.set_current_page(1).unwrap();
        assert_eq!(wizard.current_page(), Some(1));

        assert!(matches!(
            wizard.set_current_page(3),
            Err(DialogError::PageOutOfBounds {
                index: 3,
                page_count: 3
            })
        ));
        assert_eq!(wizard.current_page(), Some(1));
    }

    #[test]
    fn test_page_changed_fires_only_on_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut wizard = wizard();

        let sink = seen.clone();
        wizard.on_page_changed(move |change| sink.lock().unwrap().push(change));

        wizard.set_current_page(0).unwrap();
        wizard.set_current_page(0).unwrap();
        wizard.set_current_page(2).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                PageChangeInfo {
                    last_page: None,
                    new_page: 0
                },
                PageChangeInfo {
                    last_page: Some(0),
                    new_page: 2
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_navigation_allowed_without_gate() {
        let mut wizard = wizard();
        assert!(wizard.validate_navigation(1).await.unwrap());
        assert!(wizard.navigate(1).await.unwrap());
        assert_eq!(wizard.current_page(), Some(1));
    }

    #[tokio::test]
    async fn test_navigation_validator_sees_transition() {
        let mut wizard = wizard();
        wizard.set_current_page(0).unwrap();

        // Only forward moves are allowed
        wizard.register_navigation_validator(navigation_validator(|change: PageChangeInfo| async move {
            Ok::<_, DialogError>(change.last_page.is_none_or(|last| change.new_page > last))
        }));

        assert!(wizard.navigate(2).await.unwrap());
        assert!(!wizard.navigate(1).await.unwrap());
        assert_eq!(wizard.current_page(), Some(2));
    }

    #[tokio::test]
    async fn test_rule_gate_updates_current_page_pane() {
        let form = ValidationContext::new().with_value("replicas", "2.5");
        let mut wizard = wizard();
        wizard.set_current_page(1).unwrap();
        wizard.register_validation_gate(
            Validation::integer("whole replicas", form.resolver("replicas")).validator(),
        );

        assert!(!wizard.navigate(2).await.unwrap());
        assert!(!wizard.pages()[1].pane.valid());
        assert!(wizard.pages()[0].pane.valid());

        form.set("replicas", 2);
        assert!(wizard.navigate(2).await.unwrap());
        assert!(wizard.pages()[1].pane.valid());
        assert_eq!(wizard.current_page(), Some(2));
    }

    #[tokio::test]
    async fn test_navigate_to_current_page_is_allowed() {
        let mut wizard = wizard();
        wizard.set_current_page(1).unwrap();

        assert!(wizard.navigate(1).await.unwrap());
        assert_eq!(wizard.current_page(), Some(1));
    }

    #[tokio::test]
    async fn test_navigate_out_of_bounds() {
        let mut wizard = wizard();
        assert!(wizard.navigate(5).await.is_err());
    }
}
