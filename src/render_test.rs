use super::*;
use crate::test_helpers::{FixedClock, local_wish, remote_wish};
use crate::wish::ServerTimestamp;

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// =============================================================
// escape_html
// =============================================================

#[test]
fn escape_encodes_markup_characters() {
    assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
}

#[test]
fn escape_leaves_plain_text_alone() {
    assert_eq!(escape_html("Chúc hai bạn trăm năm hạnh phúc 💍"), "Chúc hai bạn trăm năm hạnh phúc 💍");
}

#[test]
fn escaped_script_reads_back_as_literal_text() {
    let hostile = "<script>alert('x')</script> & \"more\"";
    let escaped = escape_html(hostile);
    assert!(!escaped.contains('<'));
    assert!(!escaped.contains('>'));
    assert_eq!(unescape(&escaped), hostile);
}

#[test]
fn escape_does_not_double_decode_entities() {
    let literal = "&lt;b&gt;";
    assert_eq!(unescape(&escape_html(literal)), literal);
}

// =============================================================
// time_label
// =============================================================

#[test]
fn server_time_uses_clock_format() {
    let clock = FixedClock::at(5_000);
    let label = time_label(&CreatedAt::Server(ServerTimestamp::new(77, 0)), clock.as_ref());
    assert_eq!(label, "server@77");
}

#[test]
fn pending_time_falls_back_to_now() {
    let clock = FixedClock::at(5_000);
    assert_eq!(time_label(&CreatedAt::Pending, clock.as_ref()), "now@5000");
}

#[test]
fn local_time_is_preformatted_text() {
    let clock = FixedClock::at(5_000);
    assert_eq!(time_label(&CreatedAt::Local("hôm qua".to_owned()), clock.as_ref()), "hôm qua");
}

// =============================================================
// render_wish
// =============================================================

#[test]
fn card_contains_name_message_and_time() {
    let clock = FixedClock::at(0);
    let card = render_wish(&remote_wish("doc-9", "Lan", 12), clock.as_ref());
    assert_eq!(card.id, WishId::Remote("doc-9".to_owned()));
    assert!(card.html.starts_with("<div class=\"wish-card\" data-wish-id=\"doc-9\">"));
    assert!(card.html.contains("Lan</div>"));
    assert!(card.html.contains("<div class=\"wish-text\">message from Lan</div>"));
    assert!(card.html.contains("server@12"));
}

#[test]
fn card_escapes_guest_content() {
    let clock = FixedClock::at(0);
    let mut wish = local_wish(1, "<b>Eve</b>");
    wish.message = "<script>steal()</script>".to_owned();
    let card = render_wish(&wish, clock.as_ref());
    assert!(!card.html.contains("<script>"));
    assert!(!card.html.contains("<b>"));
    assert!(card.html.contains("&lt;script&gt;steal()&lt;/script&gt;"));
    assert!(card.html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
}

#[test]
fn card_escapes_local_time_text() {
    let clock = FixedClock::at(0);
    let mut wish = local_wish(1, "A");
    wish.created_at = CreatedAt::Local("<i>noon</i>".to_owned());
    let card = render_wish(&wish, clock.as_ref());
    assert!(card.html.contains("&lt;i&gt;noon&lt;/i&gt;"));
}

// =============================================================
// render_placeholder
// =============================================================

#[test]
fn feed_placeholder_is_marked_and_escaped() {
    let markup = render_placeholder(Placeholder::Feed, "Be <first>!");
    assert!(markup.contains(PLACEHOLDER_ATTR));
    assert!(markup.contains("no-wishes"));
    assert!(markup.contains("Be &lt;first&gt;!"));
}

#[test]
fn sidebar_placeholder_is_single_line() {
    let markup = render_placeholder(Placeholder::Sidebar, "Chưa có lời chúc nào.");
    assert!(markup.starts_with("<p "));
    assert!(markup.contains(PLACEHOLDER_ATTR));
    assert!(markup.contains("Chưa có lời chúc nào."));
}
