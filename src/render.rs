//! Markup for wish cards and empty-state placeholders.
//!
//! SYSTEM CONTEXT
//! ==============
//! Display targets insert these strings as HTML, so every piece of
//! guest-supplied text passes through [`escape_html`] first. Nothing else in
//! the crate builds markup.

use crate::clock::Clock;
use crate::wish::{CreatedAt, WishId, WishRecord};

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

/// Class carried by every rendered card.
pub const CARD_CLASS: &str = "wish-card";

/// Attribute marking an empty-state placeholder so targets can find it.
pub const PLACEHOLDER_ATTR: &str = "data-wish-placeholder";

/// A rendered card ready for insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WishCard {
    pub id: WishId,
    pub html: String,
}

/// Which empty-state variant to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// Main feed: icon plus an invitation to post first.
    Feed,
    /// Sidebar: a single muted line.
    Sidebar,
}

/// Encode markup-significant characters so text can never become structure.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Human-readable creation time.
///
/// A pending remote write has no server time yet, so it shows "now".
#[must_use]
pub fn time_label(created_at: &CreatedAt, clock: &dyn Clock) -> String {
    match created_at {
        CreatedAt::Server(ts) => clock.format(*ts),
        CreatedAt::Pending => clock.now_display(),
        CreatedAt::Local(text) => text.clone(),
    }
}

/// Render one wish as a card.
#[must_use]
pub fn render_wish(wish: &WishRecord, clock: &dyn Clock) -> WishCard {
    let html = format!(
        concat!(
            "<div class=\"{class}\" data-wish-id=\"{id}\">",
            "<div class=\"wish-name\"><i class=\"bi bi-person-heart\"></i> {name}</div>",
            "<div class=\"wish-text\">{message}</div>",
            "<div class=\"wish-time\"><i class=\"bi bi-clock\"></i> {time}</div>",
            "</div>"
        ),
        class = CARD_CLASS,
        id = escape_html(&wish.id.to_string()),
        name = escape_html(&wish.name),
        message = escape_html(&wish.message),
        time = escape_html(&time_label(&wish.created_at, clock)),
    );
    WishCard { id: wish.id.clone(), html }
}

/// Render an empty-state placeholder.
#[must_use]
pub fn render_placeholder(kind: Placeholder, text: &str) -> String {
    let text = escape_html(text);
    match kind {
        Placeholder::Feed => format!(
            "<div class=\"no-wishes\" {PLACEHOLDER_ATTR}><i class=\"bi bi-envelope-heart\"></i><p>{text}</p></div>"
        ),
        Placeholder::Sidebar => {
            format!("<p class=\"text-center text-muted mt-5\" {PLACEHOLDER_ATTR}>{text}</p>")
        }
    }
}
