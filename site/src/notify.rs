//! Guest notifications: blocking alerts and self-removing toasts.

use std::cell::Cell;

use gloo_timers::callback::Timeout;
use tracing::warn;
use web_sys::{Document, Element, Window};
use wishes::submit::Notifier;

use crate::js::{js_message, report};
use crate::markup::{TOAST_CONTAINER_CLASS, TOAST_CONTAINER_SELECTOR, toast_id, toast_markup};

pub(crate) struct DomNotifier {
    window: Window,
    document: Document,
    toast_ms: u32,
    seq: Cell<u32>,
}

impl DomNotifier {
    pub(crate) fn new(window: Window, document: Document, toast_ms: u32) -> Self {
        Self { window, document, toast_ms, seq: Cell::new(0) }
    }

    /// The shared toast container, created on first use.
    fn container(&self) -> Option<Element> {
        if let Ok(Some(existing)) = self.document.query_selector(TOAST_CONTAINER_SELECTOR) {
            return Some(existing);
        }
        let body = self.document.body()?;
        let container = match self.document.create_element("div") {
            Ok(container) => container,
            Err(err) => {
                warn!(error = %js_message(&err), "could not create toast container");
                return None;
            }
        };
        container.set_class_name(TOAST_CONTAINER_CLASS);
        report(container.set_attribute("style", "z-index: 9999"), "style toast container");
        report(body.append_child(&container).map(drop), "attach toast container");
        Some(container)
    }
}

impl Notifier for DomNotifier {
    fn toast(&self, message: &str) {
        let Some(container) = self.container() else {
            warn!(%message, "toast dropped; no container");
            return;
        };
        let seq = self.seq.get();
        self.seq.set(seq.wrapping_add(1));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let id = toast_id(js_sys::Date::now() as u64, seq);

        report(container.insert_adjacent_html("beforeend", &toast_markup(&id, message)), "insert toast");
        let document = self.document.clone();
        Timeout::new(self.toast_ms, move || {
            if let Some(toast) = document.get_element_by_id(&id) {
                toast.remove();
            }
        })
        .forget();
    }

    fn alert(&self, message: &str) {
        report(self.window.alert_with_message(message), "alert");
    }
}
