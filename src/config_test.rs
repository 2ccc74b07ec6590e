use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn empty_object_yields_defaults() {
    let config = WishesConfig::from_json("{}").expect("empty config");
    assert_eq!(config, WishesConfig::default());
    assert_eq!(config.backend, BackendKind::Remote);
    assert_eq!(config.collection, "wishes");
    assert_eq!(config.storage_key, "weddingWishes");
    assert_eq!(config.feed_limit, 10);
    assert_eq!(config.badge_overflow, 99);
}

#[test]
fn default_element_ids_match_page_markup() {
    let ids = ElementIds::default();
    assert_eq!(ids.name_input, "wishName");
    assert_eq!(ids.message_input, "wishMessage");
    assert_eq!(ids.main_feed, "wishesContainer");
    assert_eq!(ids.sidebar_feed, "sidebarWishesContainer");
    assert_eq!(ids.badge, "wishesCount");
}

#[test]
fn partial_texts_keep_other_defaults() {
    let config =
        WishesConfig::from_json(r#"{"texts": {"successToast": "Thanks!"}}"#).expect("config");
    assert_eq!(config.texts.success_toast, "Thanks!");
    assert_eq!(config.texts.error_alert_prefix, "Lỗi: ");
}

// =============================================================
// Backend selection
// =============================================================

#[test]
fn backend_deserializes_lowercase() {
    let config = WishesConfig::from_json(r#"{"backend": "local"}"#).expect("config");
    assert_eq!(config.backend, BackendKind::Local);
}

#[test]
fn backend_from_str_accepts_aliases() {
    assert_eq!("Firestore".parse::<BackendKind>().expect("alias"), BackendKind::Remote);
    assert_eq!(" localStorage ".parse::<BackendKind>().expect("alias"), BackendKind::Local);
}

#[test]
fn backend_from_str_rejects_unknown() {
    let err = "indexeddb".parse::<BackendKind>().expect_err("unknown");
    assert!(matches!(err, ConfigError::UnknownBackend(name) if name == "indexeddb"));
}

#[test]
fn only_remote_round_trips() {
    assert!(BackendKind::Remote.round_trips());
    assert!(!BackendKind::Local.round_trips());
}

// =============================================================
// Validation
// =============================================================

#[test]
fn zero_feed_limit_is_invalid() {
    let err = WishesConfig::from_json(r#"{"feedLimit": 0}"#).expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid { field: "feedLimit", .. }));
}

#[test]
fn blank_storage_key_is_invalid() {
    let err = WishesConfig::from_json(r#"{"storageKey": "  "}"#).expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid { field: "storageKey", .. }));
}

#[test]
fn absurd_offset_is_invalid() {
    let err = WishesConfig::from_json(r#"{"utcOffsetMinutes": 1000}"#).expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid { field: "utcOffsetMinutes", .. }));
}

#[test]
fn malformed_json_is_parse_error() {
    let err = WishesConfig::from_json("{backend:").expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn feed_settings_copy_limits_and_texts() {
    let config = WishesConfig { feed_limit: 3, badge_overflow: 9, ..WishesConfig::default() };
    let settings = config.feed_settings();
    assert_eq!(settings.feed_limit, 3);
    assert_eq!(settings.badge_overflow, 9);
    assert_eq!(settings.empty_sidebar, "Chưa có lời chúc nào.");
}

#[test]
fn json_accepts_backend_aliases() {
    let remote = WishesConfig::from_json(r#"{"backend": "firestore"}"#).expect("remote alias");
    assert_eq!(remote.backend, BackendKind::Remote);
    let local = WishesConfig::from_json(r#"{"backend": "localStorage"}"#).expect("local alias");
    assert_eq!(local.backend, BackendKind::Local);
}
