use super::*;

#[test]
fn idle_and_busy_labels_differ() {
    let texts = WishesTexts::default();
    assert_eq!(submit_label(&texts, false), "<i class=\"bi bi-send\"></i> Gửi lời chúc");
    assert_eq!(submit_label(&texts, true), "<i class=\"bi bi-hourglass-split\"></i> Đang gửi...");
}

#[test]
fn labels_escape_configured_text() {
    let texts = WishesTexts { submit_idle: "<b>Send</b>".to_owned(), ..WishesTexts::default() };
    assert!(submit_label(&texts, false).ends_with("&lt;b&gt;Send&lt;/b&gt;"));
}

#[test]
fn toast_ids_are_distinct_within_a_millisecond() {
    assert_ne!(toast_id(1_000, 0), toast_id(1_000, 1));
}

#[test]
fn toast_carries_escaped_message() {
    let markup = toast_markup("toast-1-0", "Lỗi: <script>x</script>");
    assert!(markup.starts_with("<div id=\"toast-1-0\""));
    assert!(markup.contains("<div class=\"toast-body\">Lỗi: &lt;script&gt;x&lt;/script&gt;</div>"));
    assert!(!markup.contains("<script>"));
}

#[test]
fn toast_container_selector_matches_class() {
    let class = TOAST_CONTAINER_SELECTOR.trim_start_matches('.');
    assert!(TOAST_CONTAINER_CLASS.split(' ').any(|c| c == class));
}
