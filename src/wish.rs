//! Wish record model.
//!
//! DESIGN
//! ======
//! `WishRecord` is the one shape the feed and renderer understand. The two
//! backends persist different shapes (`WishDocument` in the remote
//! collection, `LocalWish` in the local blob) and convert into it at the
//! boundary. Records are immutable once built; there is no edit or delete.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WishError;

#[cfg(test)]
#[path = "wish_test.rs"]
mod wish_test;

// =============================================================================
// IDENTITY AND TIME
// =============================================================================

/// Identifier of a wish, unique within its collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WishId {
    /// Store-assigned document id.
    Remote(String),
    /// Locally generated token derived from creation time.
    Local(u64),
}

impl fmt::Display for WishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(id) => f.write_str(id),
            Self::Local(id) => write!(f, "{id}"),
        }
    }
}

/// Authoritative server-assigned timestamp.
///
/// Field names follow the remote store's timestamp object so a snapshot can
/// be deserialized directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServerTimestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl ServerTimestamp {
    #[must_use]
    pub fn new(seconds: i64, nanoseconds: u32) -> Self {
        Self { seconds, nanoseconds }
    }

    /// Build a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_unix_millis(millis: i64) -> Self {
        let nanoseconds = u32::try_from(millis.rem_euclid(1000) * 1_000_000).unwrap_or_default();
        Self { seconds: millis.div_euclid(1000), nanoseconds }
    }

    /// Milliseconds since the Unix epoch, truncating sub-millisecond precision.
    /// Saturates at the `i64` range.
    #[must_use]
    pub fn unix_millis(self) -> i64 {
        self.seconds
            .saturating_mul(1000)
            .saturating_add(i64::from(self.nanoseconds / 1_000_000))
    }
}

/// When a wish was created, as far as the viewer can tell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreatedAt {
    /// Server timestamp from the remote store.
    Server(ServerTimestamp),
    /// Remote write the server has not stamped yet.
    Pending,
    /// Display text captured by the client at write time (local backend).
    Local(String),
}

// =============================================================================
// RECORDS
// =============================================================================

/// Canonical guest wish as held by the feed and rendered on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WishRecord {
    pub id: WishId,
    /// Author-supplied, untrusted.
    pub name: String,
    /// Author-supplied, untrusted.
    pub message: String,
    pub created_at: CreatedAt,
}

/// A validated wish that has not been persisted yet.
///
/// The only way to build one is [`NewWish::parse`], so every value that
/// reaches a backend has a non-empty trimmed name and message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewWish {
    name: String,
    message: String,
}

impl NewWish {
    /// Trim both inputs and reject the pair if either ends up empty.
    ///
    /// # Errors
    ///
    /// Returns [`WishError::Validation`] when the trimmed name or message is empty.
    pub fn parse(raw_name: &str, raw_message: &str) -> Result<Self, WishError> {
        let name = raw_name.trim();
        let message = raw_message.trim();
        if name.is_empty() || message.is_empty() {
            return Err(WishError::Validation);
        }
        Ok(Self { name: name.to_owned(), message: message.to_owned() })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// =============================================================================
// PERSISTED SHAPES
// =============================================================================

/// Document body in the remote `wishes` collection.
///
/// `created_at` is `None` while the server timestamp is still pending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishDocument {
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<ServerTimestamp>,
}

/// A remote document together with its store-assigned id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredWish {
    pub id: String,
    pub document: WishDocument,
}

impl From<StoredWish> for WishRecord {
    fn from(stored: StoredWish) -> Self {
        let created_at = stored
            .document
            .created_at
            .map_or(CreatedAt::Pending, CreatedAt::Server);
        Self {
            id: WishId::Remote(stored.id),
            name: stored.document.name,
            message: stored.document.message,
            created_at,
        }
    }
}

/// One entry of the local JSON blob, newest first in the array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalWish {
    pub id: u64,
    pub name: String,
    pub message: String,
    pub time: String,
}

impl From<LocalWish> for WishRecord {
    fn from(local: LocalWish) -> Self {
        Self {
            id: WishId::Local(local.id),
            name: local.name,
            message: local.message,
            created_at: CreatedAt::Local(local.time),
        }
    }
}
