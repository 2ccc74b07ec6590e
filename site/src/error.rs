//! Boot-time errors.

use wishes::error::WishError;

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("no browser window")]
    NoWindow,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("javascript error: {0}")]
    Js(String),
    #[error(transparent)]
    Store(#[from] WishError),
}

impl SiteError {
    #[must_use]
    pub fn missing(id: &str) -> Self {
        Self::MissingElement(id.to_owned())
    }
}
