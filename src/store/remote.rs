//! Remote live store.
//!
//! DESIGN
//! ======
//! The remote collection is the single source of truth. Writes are
//! fire-and-confirm inserts with no client-supplied id; the subscription
//! callback is the only thing that ever changes what the feed displays, so a
//! guest's own wish appears after one round trip like everybody else's.
//!
//! ERROR HANDLING
//! ==============
//! Write failures propagate to the submission handler. Subscription failures
//! are logged and end the subscription; nothing retries.

use std::rc::Rc;

use tracing::{debug, error, info, warn};

use super::{WishStore, emit};
use crate::config::{BackendKind, WishesConfig};
use crate::error::WishError;
use crate::feed::{FeedEvent, FeedSender};
use crate::wish::{NewWish, StoredWish, WishRecord};

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

/// Field the live query orders by, descending.
pub const ORDER_FIELD: &str = "createdAt";

/// Callback receiving every ordered snapshot, or the error that ended the subscription.
pub type SnapshotListener = Box<dyn FnMut(Result<Vec<StoredWish>, WishError>)>;

/// Client of a remote document-oriented store.
#[async_trait::async_trait(?Send)]
pub trait DocumentStore {
    /// Insert one document into `collection` and return its store-assigned id.
    ///
    /// The store stamps `createdAt` with its own clock.
    ///
    /// # Errors
    ///
    /// Returns [`WishError::Write`] when the insert is rejected or the store
    /// is unreachable.
    async fn insert(&self, collection: &str, wish: &NewWish) -> Result<String, WishError>;

    /// Subscribe to `collection` ordered by [`ORDER_FIELD`] descending.
    ///
    /// The listener fires once with the current contents and again after
    /// every change, for the lifetime of the page.
    ///
    /// # Errors
    ///
    /// Returns [`WishError::Read`] if the subscription cannot be registered.
    fn subscribe_ordered(&self, collection: &str, listener: SnapshotListener) -> Result<(), WishError>;
}

/// [`WishStore`] backed by a remote live collection.
pub struct RemoteLiveStore {
    documents: Rc<dyn DocumentStore>,
    collection: String,
}

impl RemoteLiveStore {
    #[must_use]
    pub fn new(documents: Rc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self { documents, collection: collection.into() }
    }

    #[must_use]
    pub fn from_config(config: &WishesConfig, documents: Rc<dyn DocumentStore>) -> Self {
        Self::new(documents, config.collection.clone())
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait::async_trait(?Send)]
impl WishStore for RemoteLiveStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    fn start(&self, events: FeedSender) -> Result<(), WishError> {
        info!(collection = %self.collection, "subscribing to remote wishes");
        let collection = self.collection.clone();
        let listener: SnapshotListener = Box::new(move |snapshot| match snapshot {
            Ok(docs) => {
                let wishes: Vec<WishRecord> = docs.into_iter().map(WishRecord::from).collect();
                emit(&events, FeedEvent::Replaced(wishes));
            }
            Err(err) => error!(%collection, error = %err, "wishes subscription failed"),
        });
        self.documents.subscribe_ordered(&self.collection, listener)
    }

    async fn submit(&self, wish: NewWish) -> Result<(), WishError> {
        match self.documents.insert(&self.collection, &wish).await {
            Ok(id) => {
                debug!(%id, collection = %self.collection, "wish written to remote store");
                Ok(())
            }
            Err(err) => {
                warn!(collection = %self.collection, error = %err, "remote wish write failed");
                Err(err)
            }
        }
    }
}
