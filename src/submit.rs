//! Submission handler for the wish form.
//!
//! DESIGN
//! ======
//! Validation is the only rule: trimmed name and message must both be
//! non-empty, and anything else is dropped without a word to the guest.
//! Valid wishes go straight to the store. The handler never touches the
//! feed; whatever the store pushes afterwards is what the guest sees.
//!
//! ERROR HANDLING
//! ==============
//! The submit control is disabled only while a remote write is in flight,
//! and a drop guard re-enables it on every exit path. A failed write is
//! shown both as a blocking alert and as a toast carrying the cause text.
//! Nothing retries. Re-entrant submits while pending are only prevented by
//! the disabled control, not by the handler.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::WishesTexts;
use crate::error::WishError;
use crate::store::WishStore;
use crate::wish::NewWish;

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

/// The wish form as the handler sees it.
pub trait WishForm {
    /// Clear the name and message fields.
    fn reset(&self);

    /// Disable the submit control and show the busy label, or undo that.
    fn set_pending(&self, pending: bool);
}

/// Guest-facing notifications.
pub trait Notifier {
    /// Transient, non-blocking notification.
    fn toast(&self, message: &str);

    /// Blocking alert.
    fn alert(&self, message: &str);
}

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input; nothing was written.
    Ignored,
    /// The store accepted the wish.
    Sent,
    /// The store rejected the wish.
    Failed(WishError),
}

/// Restores the idle form state when dropped.
struct PendingGuard<'a> {
    form: &'a dyn WishForm,
}

impl<'a> PendingGuard<'a> {
    fn enter(form: &'a dyn WishForm) -> Self {
        form.set_pending(true);
        Self { form }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.form.set_pending(false);
    }
}

/// Validates form input and forwards it to the store.
pub struct SubmissionHandler {
    store: Rc<dyn WishStore>,
    form: Rc<dyn WishForm>,
    notifier: Rc<dyn Notifier>,
    texts: WishesTexts,
}

impl SubmissionHandler {
    #[must_use]
    pub fn new(store: Rc<dyn WishStore>, form: Rc<dyn WishForm>, notifier: Rc<dyn Notifier>, texts: WishesTexts) -> Self {
        Self { store, form, notifier, texts }
    }

    /// Handle one form submission.
    pub async fn on_submit(&self, raw_name: &str, raw_message: &str) -> SubmitOutcome {
        let Ok(wish) = NewWish::parse(raw_name, raw_message) else {
            debug!("ignoring blank wish submission");
            return SubmitOutcome::Ignored;
        };

        let result = {
            let _pending = self
                .store
                .kind()
                .round_trips()
                .then(|| PendingGuard::enter(self.form.as_ref()));
            self.store.submit(wish).await
        };

        match result {
            Ok(()) => {
                self.form.reset();
                self.notifier.toast(&self.texts.success_toast);
                SubmitOutcome::Sent
            }
            Err(err) => {
                warn!(error = %err, "wish submission failed");
                let cause = err.cause();
                self.notifier.alert(&format!("{}{cause}", self.texts.error_alert_prefix));
                self.notifier.toast(&format!("{}{cause}", self.texts.error_toast_prefix));
                SubmitOutcome::Failed(err)
            }
        }
    }
}
