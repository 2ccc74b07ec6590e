//! Storage backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! `WishStore` is the one seam the rest of the crate sees. Two variants sit
//! behind it and are chosen once at startup:
//!
//! - [`RemoteLiveStore`] writes single documents to a remote collection and
//!   pushes a full ordered snapshot to the feed on every change, including
//!   the submitting client's own write.
//! - [`LocalSnapshotStore`] keeps one JSON blob in per-browser storage,
//!   replays it once on start, and pushes each new wish as an insert.
//!
//! The concrete remote store and key-value medium are themselves seams
//! ([`DocumentStore`], [`KeyValueStore`]) so the browser crate can plug in
//! Firestore and `localStorage` while tests use the in-memory versions.

pub mod local;
pub mod memory;
pub mod remote;

pub use local::{KeyValueStore, LocalSnapshotStore};
pub use memory::{MemoryDocumentStore, MemoryKeyValueStore};
pub use remote::{DocumentStore, RemoteLiveStore, SnapshotListener};

use tracing::debug;

use crate::config::BackendKind;
use crate::error::WishError;
use crate::feed::{FeedEvent, FeedSender};
use crate::wish::NewWish;

/// Persistence backend for wishes.
#[async_trait::async_trait(?Send)]
pub trait WishStore {
    /// Which variant this is.
    fn kind(&self) -> BackendKind;

    /// Begin delivering feed events to `events`, the feed's only channel.
    ///
    /// # Errors
    ///
    /// Returns [`WishError::Read`] if the initial subscription or read
    /// cannot be registered.
    fn start(&self, events: FeedSender) -> Result<(), WishError>;

    /// Persist a validated wish.
    ///
    /// # Errors
    ///
    /// Returns [`WishError::Write`] when the medium rejects the write or is
    /// unreachable.
    async fn submit(&self, wish: NewWish) -> Result<(), WishError>;
}

/// Send an event to the feed, tolerating a feed that has already gone away.
pub(crate) fn emit(events: &FeedSender, event: FeedEvent) {
    if events.unbounded_send(event).is_err() {
        debug!("feed receiver dropped; event discarded");
    }
}
