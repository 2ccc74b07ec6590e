//! Wishes configuration.
//!
//! DESIGN
//! ======
//! The page is static, so configuration arrives as a JSON blob embedded in
//! the document rather than from environment variables. Every field has a
//! default matching the production page, which means an absent blob (or an
//! empty object) yields a working remote-backed setup.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_COLLECTION: &str = "wishes";
pub const DEFAULT_STORAGE_KEY: &str = "weddingWishes";
pub const DEFAULT_FEED_LIMIT: usize = 10;
pub const DEFAULT_BADGE_OVERFLOW: usize = 99;
pub const DEFAULT_LOCALE: &str = "vi-VN";
pub const DEFAULT_UTC_OFFSET_MINUTES: i16 = 7 * 60;
pub const DEFAULT_TOAST_MS: u32 = 3000;
pub const DEFAULT_BADGE_PULSE_MS: u32 = 200;

/// Error returned when configuration cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The blob is not valid JSON or has the wrong shape.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but holds an unusable value.
    #[error("invalid config field {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// The backend name is not one this build understands.
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
}

// =============================================================================
// BACKEND SELECTION
// =============================================================================

/// Which storage backend the page runs against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Remote realtime document store with a live ordered subscription.
    #[default]
    #[serde(alias = "firestore")]
    Remote,
    /// Per-browser key-value storage, read once and appended to.
    #[serde(alias = "localstorage", alias = "localStorage")]
    Local,
}

impl BackendKind {
    /// Whether a submission waits on a network round trip.
    #[must_use]
    pub fn round_trips(self) -> bool {
        matches!(self, Self::Remote)
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "remote" | "firestore" => Ok(Self::Remote),
            "local" | "localstorage" => Ok(Self::Local),
            _ => Err(ConfigError::UnknownBackend(raw.to_owned())),
        }
    }
}

// =============================================================================
// ELEMENT IDS AND TEXTS
// =============================================================================

/// Element id contract with the page markup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub form: String,
    pub name_input: String,
    pub message_input: String,
    pub main_feed: String,
    pub sidebar_feed: String,
    pub badge: String,
    pub sidebar: String,
    pub sidebar_open: String,
    pub sidebar_close: String,
    pub sidebar_overlay: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            form: "wishForm".to_owned(),
            name_input: "wishName".to_owned(),
            message_input: "wishMessage".to_owned(),
            main_feed: "wishesContainer".to_owned(),
            sidebar_feed: "sidebarWishesContainer".to_owned(),
            badge: "wishesCount".to_owned(),
            sidebar: "wishesSidebar".to_owned(),
            sidebar_open: "floatingWishesBtn".to_owned(),
            sidebar_close: "closeSidebar".to_owned(),
            sidebar_overlay: "sidebarOverlay".to_owned(),
        }
    }
}

/// Guest-facing copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WishesTexts {
    pub success_toast: String,
    pub error_alert_prefix: String,
    pub error_toast_prefix: String,
    pub submit_idle: String,
    pub submit_busy: String,
    pub empty_feed: String,
    pub empty_sidebar: String,
}

impl Default for WishesTexts {
    fn default() -> Self {
        Self {
            success_toast: "Cảm ơn bạn đã gửi lời chúc! 💕".to_owned(),
            error_alert_prefix: "Lỗi: ".to_owned(),
            error_toast_prefix: "Có lỗi xảy ra: ".to_owned(),
            submit_idle: "Gửi lời chúc".to_owned(),
            submit_busy: "Đang gửi...".to_owned(),
            empty_feed: "Hãy là người đầu tiên gửi lời chúc!".to_owned(),
            empty_sidebar: "Chưa có lời chúc nào.".to_owned(),
        }
    }
}

// =============================================================================
// WISHES CONFIG
// =============================================================================

/// Complete configuration for one page load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WishesConfig {
    pub backend: BackendKind,
    /// Remote collection name.
    pub collection: String,
    /// Local storage key holding the JSON blob.
    pub storage_key: String,
    /// Maximum cards in the main feed. The sidebar is uncapped.
    pub feed_limit: usize,
    /// Counts above this render as `"{overflow}+"` on the badge.
    pub badge_overflow: usize,
    /// Locale passed to the browser's date formatting.
    pub locale: String,
    /// Fixed offset used by the native clock.
    pub utc_offset_minutes: i16,
    pub toast_ms: u32,
    pub badge_pulse_ms: u32,
    pub elements: ElementIds,
    pub texts: WishesTexts,
}

impl Default for WishesConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            collection: DEFAULT_COLLECTION.to_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            feed_limit: DEFAULT_FEED_LIMIT,
            badge_overflow: DEFAULT_BADGE_OVERFLOW,
            locale: DEFAULT_LOCALE.to_owned(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            toast_ms: DEFAULT_TOAST_MS,
            badge_pulse_ms: DEFAULT_BADGE_PULSE_MS,
            elements: ElementIds::default(),
            texts: WishesTexts::default(),
        }
    }
}

impl WishesConfig {
    /// Parse and validate a JSON config blob. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a field fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_limit == 0 {
            return Err(invalid("feedLimit", "must be at least 1"));
        }
        if self.collection.trim().is_empty() {
            return Err(invalid("collection", "must not be empty"));
        }
        if self.storage_key.trim().is_empty() {
            return Err(invalid("storageKey", "must not be empty"));
        }
        if !(-14 * 60..=14 * 60).contains(&self.utc_offset_minutes) {
            return Err(invalid("utcOffsetMinutes", "must be within +/-14 hours"));
        }
        Ok(())
    }

    /// Feed settings derived from this config.
    #[must_use]
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            feed_limit: self.feed_limit,
            badge_overflow: self.badge_overflow,
            empty_feed: self.texts.empty_feed.clone(),
            empty_sidebar: self.texts.empty_sidebar.clone(),
        }
    }
}

/// The subset of configuration the feed controller needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedSettings {
    pub feed_limit: usize,
    pub badge_overflow: usize,
    pub empty_feed: String,
    pub empty_sidebar: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        WishesConfig::default().feed_settings()
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.to_owned() }
}
