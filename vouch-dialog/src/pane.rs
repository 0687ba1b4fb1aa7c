//! Validity tracking and user-facing messages

use std::fmt;
use tracing::debug;

/// Observer called with the new validity
pub type ValidityObserver = Box<dyn Fn(bool) + Send + Sync>;

/// Observer called with the new message, `None` when cleared
pub type MessageObserver = Box<dyn Fn(Option<&DialogMessage>) + Send + Sync>;

/// Validity flag with an explicit observer list.
///
/// Starts out valid. Observers run synchronously, in registration order,
/// and only when the flag actually changes.
pub struct Pane {
    valid: bool,
    observers: Vec<ValidityObserver>,
}

impl Pane {
    pub fn new() -> Self {
        Self {
            valid: true,
            observers: Vec::new(),
        }
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Register a validity-changed observer
    pub fn on_validity_changed(&mut self, observer: impl Fn(bool) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Record the pane's validity, notifying observers on change
    pub fn notify_validity_changed(&mut self, valid: bool) {
        if self.valid == valid {
            return;
        }

        self.valid = valid;
        debug!(valid, observers = self.observers.len(), "Pane validity changed");
        for observer in &self.observers {
            observer(valid);
        }
    }
}

impl Default for Pane {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pane")
            .field("valid", &self.valid)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Severity of a [`DialogMessage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Error,
    Warning,
    Information,
}

/// Message shown by a dialog or wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogMessage {
    pub text: String,
    pub level: MessageLevel,
}

impl DialogMessage {
    pub fn new(text: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, MessageLevel::Error)
    }
}

/// Current message plus its observers, shared by dialogs and wizards
#[derive(Default)]
pub(crate) struct MessageSlot {
    message: Option<DialogMessage>,
    observers: Vec<MessageObserver>,
}

impl MessageSlot {
    pub(crate) fn get(&self) -> Option<&DialogMessage> {
        self.message.as_ref()
    }

    pub(crate) fn set(&mut self, message: Option<DialogMessage>) {
        self.message = message;
        for observer in &self.observers {
            observer(self.message.as_ref());
        }
    }

    pub(crate) fn subscribe(
        &mut self,
        observer: impl Fn(Option<&DialogMessage>) + Send + Sync + 'static,
    ) {
        self.observers.push(Box::new(observer));
    }
}

impl fmt::Debug for MessageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSlot")
            .field("message", &self.message)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_pane_starts_valid() {
        assert!(Pane::new().valid());
    }

    #[test]
    fn test_observers_fire_only_on_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut pane = Pane::new();

        let counter = calls.clone();
        pane.on_validity_changed(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        pane.notify_validity_changed(true);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        pane.notify_validity_changed(false);
        pane.notify_validity_changed(false);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!pane.valid());

        pane.notify_validity_changed(true);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_message_slot_notifies() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut slot = MessageSlot::default();

        let counter = seen.clone();
        slot.subscribe(move |message| {
            if message.is_some() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        slot.set(Some(DialogMessage::error("bad value")));
        slot.set(None);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(slot.get().is_none());
    }
}
