//! `localStorage` as the local store's key-value medium.
//!
//! TRADE-OFFS
//! ==========
//! When storage is blocked (private mode, disabled cookies) the page falls
//! back to an in-memory store: wishes show for the session and are gone on
//! reload.

use tracing::warn;
use web_sys::{Storage, Window};
use wishes::error::WishError;
use wishes::store::{KeyValueStore, MemoryKeyValueStore};

use crate::js::js_message;

pub(crate) struct BrowserStorage {
    storage: Storage,
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, WishError> {
        self.storage.get_item(key).map_err(|err| WishError::read(js_message(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WishError> {
        self.storage.set_item(key, value).map_err(|err| WishError::write(js_message(&err)))
    }
}

/// The window's `localStorage`, or a session-only stand-in.
pub(crate) fn browser_kv(window: &Window) -> Box<dyn KeyValueStore> {
    match window.local_storage() {
        Ok(Some(storage)) => Box::new(BrowserStorage { storage }),
        Ok(None) => {
            warn!("localStorage unavailable; wishes will not survive a reload");
            Box::new(MemoryKeyValueStore::new())
        }
        Err(err) => {
            warn!(error = %js_message(&err), "localStorage blocked; wishes will not survive a reload");
            Box::new(MemoryKeyValueStore::new())
        }
    }
}
