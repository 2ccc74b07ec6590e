//! Error taxonomy for the wishes feature.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is terminal for the operation that triggered it; nothing in
//! this crate retries. Callers decide how loudly to surface each variant:
//! validation is silent, writes are shown to the guest, reads are only logged,
//! and decode failures degrade to an empty collection.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Error returned by wish validation and storage operations.
#[derive(Debug, thiserror::Error)]
pub enum WishError {
    /// Name or message was empty after trimming.
    #[error("name and message are both required")]
    Validation,

    /// The store rejected the write or could not be reached.
    #[error("write failed: {cause}")]
    Write { cause: String },

    /// The store could not be read or the live subscription failed.
    #[error("read failed: {cause}")]
    Read { cause: String },

    /// A persisted blob was present but could not be parsed.
    #[error("stored wishes could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WishError {
    /// Build a [`WishError::Write`] from anything printable.
    pub fn write(cause: impl ToString) -> Self {
        Self::Write { cause: cause.to_string() }
    }

    /// Build a [`WishError::Read`] from anything printable.
    pub fn read(cause: impl ToString) -> Self {
        Self::Read { cause: cause.to_string() }
    }

    /// The underlying failure text, without the variant prefix.
    ///
    /// This is what the guest sees after "Lỗi: " when a submission fails.
    #[must_use]
    pub fn cause(&self) -> String {
        match self {
            Self::Write { cause } | Self::Read { cause } => cause.clone(),
            other => other.to_string(),
        }
    }
}
