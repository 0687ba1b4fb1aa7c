//! Gate validators

use crate::pane::{DialogMessage, MessageSlot, Pane};
use crate::Result;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;
use vouch_validation::Validator;

/// Page transition passed to a [`NavigationValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChangeInfo {
    /// Page being left, `None` before the first page is shown
    pub last_page: Option<usize>,
    /// Page being navigated to
    pub new_page: usize,
}

/// Decides whether a dialog may close
pub type CloseValidator = Arc<dyn Fn() -> BoxFuture<'static, Result<bool>> + Send + Sync>;

/// Decides whether a wizard may move between pages
pub type NavigationValidator =
    Arc<dyn Fn(PageChangeInfo) -> BoxFuture<'static, Result<bool>> + Send + Sync>;

/// Wrap an async closure as a [`CloseValidator`]
pub fn close_validator<F, Fut>(validator: F) -> CloseValidator
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool>> + Send + 'static,
{
    Arc::new(move || validator().boxed())
}

/// Wrap an async closure as a [`NavigationValidator`]
pub fn navigation_validator<F, Fut>(validator: F) -> NavigationValidator
where
    F: Fn(PageChangeInfo) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool>> + Send + 'static,
{
    Arc::new(move |info: PageChangeInfo| validator(info).boxed())
}

/// Run a rule validator as a gate.
///
/// The outcome drives the pane's validity; a failure puts the rule's message
/// up as an error and a pass clears any message.
pub(crate) async fn run_rules(
    validator: &Validator,
    pane: &mut Pane,
    message: &mut MessageSlot,
) -> Result<bool> {
    let state = validator().await?;
    debug!(valid = state.valid, message = %state.message, "Validation gate evaluated");

    pane.notify_validity_changed(state.valid);
    if state.valid {
        if message.get().is_some() {
            message.set(None);
        }
    } else {
        message.set(Some(DialogMessage::error(state.message)));
    }

    Ok(state.valid)
}
