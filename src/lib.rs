//! Guest wishes feed for the wedding site.
//!
//! Visitors post a short wish (name + message) and every visitor sees the
//! list, newest first. The same feature ships in two mutually exclusive
//! deployments: a remote realtime document store that pushes ordered
//! snapshots, or per-browser local storage that is read once and appended to.
//!
//! This crate owns everything that does not need a browser. The `site`
//! crate supplies DOM-backed implementations of the seams defined here.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`wish`] | Wish record model and the two persisted shapes |
//! | [`error`] | Error taxonomy shared by every component |
//! | [`config`] | Typed configuration, element ids, user-visible texts |
//! | [`clock`] | Time source and timestamp formatting seam |
//! | [`render`] | Markup for cards and empty-state placeholders |
//! | [`store`] | Storage backend trait plus remote, local and in-memory variants |
//! | [`feed`] | Feed controller owning the displayed collection |
//! | [`submit`] | Form submission validation and pending-state handling |
//! | [`app`] | Startup context that wires the pieces together |

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod feed;
pub mod render;
pub mod store;
pub mod submit;
pub mod wish;

#[cfg(test)]
pub(crate) mod test_helpers;
