//! Slide-out panel listing every wish.
//!
//! The floating button opens it; the close button and the overlay close it.
//! While open, the body does not scroll. Missing elements disable the panel
//! with a warning rather than failing boot.

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event};
use wishes::config::ElementIds;

use crate::dom::element_by_id;
use crate::js::report;

const ACTIVE_CLASS: &str = "active";

#[derive(Clone)]
struct Panel {
    document: Document,
    sidebar: Element,
    overlay: Element,
}

impl Panel {
    fn set_open(&self, open: bool) {
        for element in [&self.sidebar, &self.overlay] {
            let classes = element.class_list();
            let result = if open { classes.add_1(ACTIVE_CLASS) } else { classes.remove_1(ACTIVE_CLASS) };
            report(result, "toggle sidebar class");
        }
        if let Some(body) = self.document.body() {
            report(body.style().set_property("overflow", if open { "hidden" } else { "" }), "lock body scroll");
        }
        debug!(open, "wishes sidebar toggled");
    }
}

/// Attach open/close handlers. Handlers live for the page lifetime.
pub(crate) fn install(document: &Document, ids: &ElementIds) {
    let (sidebar, overlay) = match (element_by_id(document, &ids.sidebar), element_by_id(document, &ids.sidebar_overlay)) {
        (Ok(sidebar), Ok(overlay)) => (sidebar, overlay),
        (Err(err), _) | (_, Err(err)) => {
            warn!(error = %err, "wishes sidebar disabled");
            return;
        }
    };
    let panel = Panel { document: document.clone(), sidebar, overlay };

    for (id, open) in [(&ids.sidebar_open, true), (&ids.sidebar_close, false)] {
        match element_by_id(document, id) {
            Ok(element) => attach(&element, panel.clone(), open),
            Err(err) => warn!(error = %err, "sidebar control missing"),
        }
    }
    attach(&panel.overlay.clone(), panel, false);
}

fn attach(element: &Element, panel: Panel, open: bool) {
    let handler = Closure::wrap(Box::new(move |_event: Event| panel.set_open(open)) as Box<dyn FnMut(Event)>);
    report(element.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref()), "attach sidebar click");
    handler.forget();
}
