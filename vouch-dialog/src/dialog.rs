//! Dialog close gate

use crate::gate::{CloseValidator, run_rules};
use crate::pane::{DialogMessage, MessageSlot, Pane};
use crate::Result;
use tracing::debug;
use vouch_validation::Validator;

enum CloseGate {
    Predicate(CloseValidator),
    Rules(Validator),
}

/// A dialog whose close can be gated by a validator.
///
/// At most one gate is registered at a time; registering another replaces
/// it. Without a gate the dialog may always close.
pub struct Dialog {
    pub title: String,
    pane: Pane,
    message: MessageSlot,
    gate: Option<CloseGate>,
}

impl Dialog {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pane: Pane::new(),
            message: MessageSlot::default(),
            gate: None,
        }
    }

    pub fn pane(&self) -> &Pane {
        &self.pane
    }

    pub fn pane_mut(&mut self) -> &mut Pane {
        &mut self.pane
    }

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

    /// Gate closing on a plain predicate
    pub fn register_close_validator(&mut self, validator: CloseValidator) {
        debug!(dialog = %self.title, "Registered close validator");
        self.gate = Some(CloseGate::Predicate(validator));
    }

    /// Gate closing on validation rules.
    ///
    /// A failing rule blocks the close and its description becomes the
    /// dialog's error message.
    pub fn register_validation_gate(&mut self, validator: Validator) {
        debug!(dialog = %self.title, "Registered validation gate");
        self.gate = Some(CloseGate::Rules(validator));
    }

    /// Ask the registered gate whether the dialog may close
    pub async fn validate_close(&mut self) -> Result<bool> {
        let allowed = match &self.gate {
            None => true,
            Some(CloseGate::Predicate(validator)) => validator().await?,
            Some(CloseGate::Rules(validator)) => {
                run_rules(validator, &mut self.pane, &mut self.message).await?
            }
        };

        debug!(dialog = %self.title, allowed, "Close validated");
        Ok(allowed)
    }
}

impl std::fmt::Debug for Dialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialog")
            .field("title", &self.title)
            .field("pane", &self.pane)
            .field("message", &self.message)
            .field("gated", &self.gate.is_some())
            .finish()
    }
}
