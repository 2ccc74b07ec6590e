//! DOM-backed feed surfaces and the wish form.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page ships the containers empty. Cards and placeholders are inserted
//! as markup produced by `wishes::render` and found again by class or
//! attribute, so nothing here keeps references to individual cards.
//!
//! ERROR HANDLING
//! ==============
//! A DOM call that throws is logged and skipped. Only missing required
//! elements at boot are errors.

use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, NodeList};
use wishes::config::{ElementIds, WishesTexts};
use wishes::feed::{CountBadge, DisplayTarget};
use wishes::render::{CARD_CLASS, PLACEHOLDER_ATTR, WishCard};
use wishes::submit::WishForm;

use crate::error::SiteError;
use crate::js::{js_message, report};
use crate::markup::{BADGE_PULSE, BADGE_REST, ENTRANCE_FROM, ENTRANCE_TO, submit_label};

/// Delay before an entering card starts its transition.
const ENTRANCE_DELAY_MS: u32 = 10;

pub(crate) fn element_by_id(document: &Document, id: &str) -> Result<Element, SiteError> {
    document.get_element_by_id(id).ok_or_else(|| SiteError::missing(id))
}

pub(crate) fn html_element_by_id(document: &Document, id: &str) -> Result<HtmlElement, SiteError> {
    element_by_id(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::missing(id))
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (name, value) in styles {
        report(style.set_property(name, value), "set style");
    }
}

// =============================================================================
// FEED CONTAINER
// =============================================================================

/// A feed container element.
pub(crate) struct DomFeed {
    container: Element,
    card_selector: String,
    placeholder_selector: String,
}

impl DomFeed {
    pub(crate) fn new(container: Element) -> Self {
        Self {
            container,
            card_selector: format!(".{CARD_CLASS}"),
            placeholder_selector: format!("[{PLACEHOLDER_ATTR}]"),
        }
    }

    fn cards(&self) -> Option<NodeList> {
        match self.container.query_selector_all(&self.card_selector) {
            Ok(cards) => Some(cards),
            Err(err) => {
                warn!(error = %js_message(&err), "card lookup failed");
                None
            }
        }
    }

    fn insert(&self, position: &str, markup: &str) {
        report(self.container.insert_adjacent_html(position, markup), "insert markup");
    }

    fn animate_first_card(&self) {
        let Ok(Some(card)) = self.container.query_selector(&self.card_selector) else {
            return;
        };
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            return;
        };
        set_styles(&card, &ENTRANCE_FROM);
        Timeout::new(ENTRANCE_DELAY_MS, move || set_styles(&card, &ENTRANCE_TO)).forget();
    }
}

impl DisplayTarget for DomFeed {
    fn clear(&mut self) {
        self.container.set_inner_html("");
    }

    fn append_card(&mut self, card: &WishCard) {
        self.insert("beforeend", &card.html);
    }

    fn prepend_card(&mut self, card: &WishCard, entrance: bool) {
        self.insert("afterbegin", &card.html);
        if entrance {
            self.animate_first_card();
        }
    }

    fn remove_last_card(&mut self) {
        let Some(cards) = self.cards() else {
            return;
        };
        let Some(last) = cards.length().checked_sub(1).and_then(|index| cards.get(index)) else {
            return;
        };
        if let Ok(last) = last.dyn_into::<Element>() {
            last.remove();
        }
    }

    fn card_count(&self) -> usize {
        self.cards().map_or(0, |cards| cards.length() as usize)
    }

    fn show_placeholder(&mut self, markup: &str) {
        self.insert("beforeend", markup);
    }

    fn remove_placeholder(&mut self) {
        if let Ok(Some(placeholder)) = self.container.query_selector(&self.placeholder_selector) {
            placeholder.remove();
        }
    }
}

// =============================================================================
// BADGE
// =============================================================================

/// Count badge on the floating wishes button.
pub(crate) struct DomBadge {
    element: HtmlElement,
    pulse_ms: u32,
}

impl DomBadge {
    pub(crate) fn new(element: HtmlElement, pulse_ms: u32) -> Self {
        Self { element, pulse_ms }
    }
}

impl CountBadge for DomBadge {
    fn set_text(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn pulse(&mut self) {
        set_styles(&self.element, &[("transform", BADGE_PULSE)]);
        let element = self.element.clone();
        Timeout::new(self.pulse_ms, move || set_styles(&element, &[("transform", BADGE_REST)])).forget();
    }
}

// =============================================================================
// FORM
// =============================================================================

/// The wish form and its fields.
pub(crate) struct DomForm {
    form: HtmlFormElement,
    name: Element,
    message: Element,
    button: Option<HtmlButtonElement>,
    texts: WishesTexts,
}

impl DomForm {
    pub(crate) fn from_ids(document: &Document, ids: &ElementIds, texts: WishesTexts) -> Result<Self, SiteError> {
        let form = element_by_id(document, &ids.form)?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| SiteError::missing(&ids.form))?;
        let button = match form.query_selector("button[type=\"submit\"]") {
            Ok(Some(button)) => match button.dyn_into::<HtmlButtonElement>() {
                Ok(button) => Some(button),
                Err(_) => None,
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %js_message(&err), "submit button lookup failed");
                None
            }
        };
        if button.is_none() {
            warn!(form = %ids.form, "wish form has no submit button; pending state will not show");
        }
        Ok(Self {
            name: element_by_id(document, &ids.name_input)?,
            message: element_by_id(document, &ids.message_input)?,
            form,
            button,
            texts,
        })
    }

    pub(crate) fn element(&self) -> &HtmlFormElement {
        &self.form
    }

    /// Current raw name and message, untrimmed.
    pub(crate) fn values(&self) -> (String, String) {
        (field_value(&self.name), field_value(&self.message))
    }
}

/// `value` of an input or textarea.
fn field_value(field: &Element) -> String {
    match js_sys::Reflect::get(field, &JsValue::from_str("value")) {
        Ok(value) => value.as_string().unwrap_or_default(),
        Err(err) => {
            warn!(error = %js_message(&err), "could not read field value");
            String::new()
        }
    }
}

impl WishForm for DomForm {
    fn reset(&self) {
        self.form.reset();
    }

    fn set_pending(&self, pending: bool) {
        if let Some(button) = &self.button {
            button.set_disabled(pending);
            button.set_inner_html(&submit_label(&self.texts, pending));
        }
    }
}
