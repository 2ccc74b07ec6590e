//! In-memory implementations of the storage seams.
//!
//! `MemoryDocumentStore` behaves like the remote realtime store: it assigns
//! ids and strictly increasing server timestamps, answers live queries with
//! ordered snapshots, and can be told to reject writes or break its
//! subscriptions. `MemoryKeyValueStore` stands in for browser storage.
//! Both are cheap to clone; clones share state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;
use uuid::Uuid;

use super::local::KeyValueStore;
use super::remote::{DocumentStore, SnapshotListener};
use crate::clock::Clock;
use crate::error::WishError;
use crate::wish::{NewWish, ServerTimestamp, StoredWish, WishDocument};

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

// =============================================================================
// DOCUMENT STORE
// =============================================================================

struct DocumentsInner {
    clock: Rc<dyn Clock>,
    collections: HashMap<String, Vec<StoredWish>>,
    listeners: Vec<(String, SnapshotListener)>,
    last_stamp: Option<ServerTimestamp>,
    write_failure: Option<String>,
}

impl DocumentsInner {
    fn next_stamp(&mut self) -> ServerTimestamp {
        let millis = i64::try_from(self.clock.now_millis()).unwrap_or(i64::MAX);
        let now = ServerTimestamp::from_unix_millis(millis);
        let stamp = match self.last_stamp {
            Some(last) if now <= last => successor(last),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn snapshot(&self, collection: &str) -> Vec<StoredWish> {
        let mut docs = self.collections.get(collection).cloned().unwrap_or_default();
        docs.sort_by(|a, b| b.document.created_at.cmp(&a.document.created_at));
        docs
    }
}

fn successor(ts: ServerTimestamp) -> ServerTimestamp {
    if ts.nanoseconds < 999_999_999 {
        ServerTimestamp::new(ts.seconds, ts.nanoseconds + 1)
    } else {
        ServerTimestamp::new(ts.seconds + 1, 0)
    }
}

/// Process-local document store with live ordered queries.
#[derive(Clone)]
pub struct MemoryDocumentStore {
    inner: Rc<RefCell<DocumentsInner>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DocumentsInner {
                clock,
                collections: HashMap::new(),
                listeners: Vec::new(),
                last_stamp: None,
                write_failure: None,
            })),
        }
    }

    /// Reject every insert with `cause` until called again with `None`.
    pub fn fail_writes(&self, cause: Option<&str>) {
        self.inner.borrow_mut().write_failure = cause.map(str::to_owned);
    }

    /// Deliver a read error to every live subscription and end them.
    pub fn fail_subscriptions(&self, cause: &str) {
        let listeners = std::mem::take(&mut self.inner.borrow_mut().listeners);
        debug!(count = listeners.len(), %cause, "failing memory subscriptions");
        for (_, mut listener) in listeners {
            listener(Err(WishError::read(cause)));
        }
    }

    /// Current contents of `collection`, newest first.
    #[must_use]
    pub fn documents(&self, collection: &str) -> Vec<StoredWish> {
        self.inner.borrow().snapshot(collection)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn notify(&self, collection: &str) {
        let (snapshot, mut listeners) = {
            let mut inner = self.inner.borrow_mut();
            (inner.snapshot(collection), std::mem::take(&mut inner.listeners))
        };
        for (name, listener) in &mut listeners {
            if name.as_str() == collection {
                listener(Ok(snapshot.clone()));
            }
        }
        let mut inner = self.inner.borrow_mut();
        listeners.append(&mut inner.listeners);
        inner.listeners = listeners;
    }
}

#[async_trait::async_trait(?Send)]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, wish: &NewWish) -> Result<String, WishError> {
        let id = {
            let mut inner = self.inner.borrow_mut();
            if let Some(cause) = &inner.write_failure {
                return Err(WishError::write(cause));
            }
            let id = Uuid::new_v4().to_string();
            let created_at = Some(inner.next_stamp());
            let document = WishDocument { name: wish.name().to_owned(), message: wish.message().to_owned(), created_at };
            inner
                .collections
                .entry(collection.to_owned())
                .or_default()
                .push(StoredWish { id: id.clone(), document });
            id
        };
        self.notify(collection);
        Ok(id)
    }

    fn subscribe_ordered(&self, collection: &str, mut listener: SnapshotListener) -> Result<(), WishError> {
        let snapshot = self.inner.borrow().snapshot(collection);
        listener(Ok(snapshot));
        self.inner.borrow_mut().listeners.push((collection.to_owned(), listener));
        Ok(())
    }
}

// =============================================================================
// KEY-VALUE STORE
// =============================================================================

/// Process-local key-value store.
#[derive(Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    write_failure: Rc<RefCell<Option<String>>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    /// Reject every write with `cause` until called again with `None`.
    pub fn fail_writes(&self, cause: Option<&str>) {
        *self.write_failure.borrow_mut() = cause.map(str::to_owned);
    }

    /// Raw stored value for `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, WishError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WishError> {
        if let Some(cause) = self.write_failure.borrow().as_ref() {
            return Err(WishError::write(cause));
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
