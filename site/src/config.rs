//! Page configuration.
//!
//! The page may embed `<script id="wishes-config" type="application/json">`.
//! A missing element means defaults. A blob that fails to parse or validate
//! is logged and replaced by defaults so the feed still works.

use tracing::{info, warn};
use wishes::config::WishesConfig;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Id of the element carrying the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "wishes-config";

/// Resolve the configuration from the embedded blob, if any.
#[must_use]
pub fn parse_page_config(raw: Option<&str>) -> WishesConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        info!("no embedded wishes config; using defaults");
        return WishesConfig::default();
    };
    match WishesConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "embedded wishes config rejected; using defaults");
            WishesConfig::default()
        }
    }
}
