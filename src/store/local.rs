//! Local snapshot store.
//!
//! One key holds a JSON array of `{id, name, message, time}`, newest first.
//! Reads parse the whole blob; writes read, prepend and rewrite it.
//!
//! TRADE-OFFS
//! ==========
//! Two tabs writing the same key are not coordinated: each rewrites the
//! blob from its own read, so the later write wins and can drop the other
//! tab's wish. A blob that fails to parse is treated as empty, and the next
//! successful write replaces it. A blob that cannot be read at all is never
//! overwritten.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};

use super::{WishStore, emit};
use crate::clock::Clock;
use crate::config::{BackendKind, WishesConfig};
use crate::error::WishError;
use crate::feed::{FeedEvent, FeedSender};
use crate::wish::{LocalWish, NewWish, WishRecord};

#[cfg(test)]
#[path = "local_test.rs"]
mod local_test;

/// Durable string storage scoped to one browser profile.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns [`WishError::Read`] when the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, WishError>;

    /// # Errors
    ///
    /// Returns [`WishError::Write`] when the medium rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), WishError>;
}

/// [`WishStore`] backed by a single key-value blob.
pub struct LocalSnapshotStore {
    kv: Box<dyn KeyValueStore>,
    key: String,
    clock: Rc<dyn Clock>,
    events: RefCell<Option<FeedSender>>,
}

impl LocalSnapshotStore {
    #[must_use]
    pub fn new(kv: Box<dyn KeyValueStore>, key: impl Into<String>, clock: Rc<dyn Clock>) -> Self {
        Self { kv, key: key.into(), clock, events: RefCell::new(None) }
    }

    #[must_use]
    pub fn from_config(config: &WishesConfig, kv: Box<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self::new(kv, config.storage_key.clone(), clock)
    }

    /// Read and parse the blob. A missing or blank blob is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`WishError::Decode`] when the blob is present but unparseable,
    /// or [`WishError::Read`] when the medium fails.
    pub fn load(&self) -> Result<Vec<LocalWish>, WishError> {
        match self.kv.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Every stored wish, newest first. Unreadable storage yields an empty list.
    #[must_use]
    pub fn fetch_all(&self) -> Vec<WishRecord> {
        self.load_or_empty().into_iter().map(WishRecord::from).collect()
    }

    fn load_or_empty(&self) -> Vec<LocalWish> {
        match self.load() {
            Ok(wishes) => wishes,
            Err(err) => {
                warn!(key = %self.key, error = %err, "local wishes unreadable; treating as empty");
                Vec::new()
            }
        }
    }

    /// Current list for a write. Only an unparseable blob counts as empty.
    fn load_for_write(&self) -> Result<Vec<LocalWish>, WishError> {
        match self.load() {
            Ok(wishes) => Ok(wishes),
            Err(WishError::Decode(err)) => {
                warn!(key = %self.key, error = %err, "local wishes unparseable; replacing");
                Ok(Vec::new())
            }
            Err(err) => Err(WishError::write(err.cause())),
        }
    }

    /// Creation time in milliseconds, bumped past `newest` so ids stay strictly increasing.
    fn next_id(&self, newest: Option<u64>) -> Result<u64, WishError> {
        let now = self.clock.now_millis();
        match newest {
            Some(newest) if newest >= now => newest
                .checked_add(1)
                .ok_or_else(|| WishError::write("local wish ids exhausted")),
            _ => Ok(now),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl WishStore for LocalSnapshotStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn start(&self, events: FeedSender) -> Result<(), WishError> {
        let wishes = self.fetch_all();
        info!(key = %self.key, count = wishes.len(), "loaded local wishes");
        emit(&events, FeedEvent::Replaced(wishes));
        *self.events.borrow_mut() = Some(events);
        Ok(())
    }

    async fn submit(&self, wish: NewWish) -> Result<(), WishError> {
        let mut wishes = self.load_for_write()?;
        let entry = LocalWish {
            id: self.next_id(wishes.iter().map(|w| w.id).max())?,
            name: wish.name().to_owned(),
            message: wish.message().to_owned(),
            time: self.clock.now_display(),
        };
        wishes.insert(0, entry.clone());

        let blob = serde_json::to_string(&wishes).map_err(WishError::write)?;
        self.kv.set(&self.key, &blob)?;
        info!(id = entry.id, count = wishes.len(), "wish saved locally");

        if let Some(events) = self.events.borrow().as_ref() {
            emit(events, FeedEvent::Inserted(entry.into()));
        }
        Ok(())
    }
}
