//! Small pieces of markup and style values the DOM glue writes.
//!
//! Kept free of `web-sys` so they can be checked natively. Every piece of
//! guest or config text goes through [`escape_html`] before it reaches
//! `innerHTML`.

use wishes::config::WishesTexts;
use wishes::render::escape_html;

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

/// Selector for the shared toast container.
pub const TOAST_CONTAINER_SELECTOR: &str = ".toast-container";

/// Classes of a freshly created toast container.
pub const TOAST_CONTAINER_CLASS: &str = "toast-container position-fixed bottom-0 end-0 p-3";

/// Badge transform at the peak of a pulse.
pub const BADGE_PULSE: &str = "scale(1.2)";

/// Badge transform at rest.
pub const BADGE_REST: &str = "scale(1)";

/// Starting style of a card that animates in.
pub const ENTRANCE_FROM: [(&str, &str); 2] = [("opacity", "0"), ("transform", "translateY(-20px)")];

/// Final style of a card that animates in.
pub const ENTRANCE_TO: [(&str, &str); 3] =
    [("transition", "all 0.5s ease"), ("opacity", "1"), ("transform", "translateY(0)")];

/// Inner markup of the submit button.
#[must_use]
pub fn submit_label(texts: &WishesTexts, pending: bool) -> String {
    if pending {
        format!("<i class=\"bi bi-hourglass-split\"></i> {}", escape_html(&texts.submit_busy))
    } else {
        format!("<i class=\"bi bi-send\"></i> {}", escape_html(&texts.submit_idle))
    }
}

/// Element id for the `seq`-th toast shown at `millis`.
#[must_use]
pub fn toast_id(millis: u64, seq: u32) -> String {
    format!("toast-{millis}-{seq}")
}

/// One visible toast carrying `message` as text.
#[must_use]
pub fn toast_markup(id: &str, message: &str) -> String {
    format!(
        concat!(
            "<div id=\"{id}\" class=\"toast show align-items-center text-white border-0\" ",
            "style=\"background: linear-gradient(135deg, #d4a373, #c9a227);\" ",
            "role=\"alert\" aria-live=\"assertive\" aria-atomic=\"true\">",
            "<div class=\"d-flex\">",
            "<div class=\"toast-body\">{message}</div>",
            "<button type=\"button\" class=\"btn-close btn-close-white me-2 m-auto\" data-bs-dismiss=\"toast\"></button>",
            "</div></div>",
        ),
        id = escape_html(id),
        message = escape_html(message),
    )
}
