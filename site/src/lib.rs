//! # site
//!
//! WebAssembly entry point for the wedding site's wishes feature.
//!
//! The page markup is static; this crate attaches to it by element id,
//! supplies DOM-backed implementations of the `wishes` seams, and starts the
//! selected storage backend. Everything touching `web-sys` is gated behind
//! the `browser` feature so the pure helpers still build and test natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Reads the page's embedded JSON configuration |
//! | [`error`] | Boot-time error type |
//! | [`markup`] | Submit-button labels, toast markup, badge transforms |
//! | `boot` | Page bootstrap: logging, backend selection, event wiring |
//! | `dom` | Feed containers, badge and form over the live DOM |
//! | `notify` | `window.alert` plus toasts |
//! | `sidebar` | Slide-out wishes panel |
//! | `storage` | `localStorage` key-value medium |
//! | `firestore` | Firestore bindings for the remote store |
//! | `clock` | `Date`-based clock using the page locale |

pub mod config;
pub mod error;
pub mod markup;

#[cfg(feature = "browser")]
mod boot;
#[cfg(feature = "browser")]
mod clock;
#[cfg(feature = "browser")]
mod dom;
#[cfg(feature = "browser")]
mod firestore;
#[cfg(feature = "browser")]
mod js;
#[cfg(feature = "browser")]
mod notify;
#[cfg(feature = "browser")]
mod sidebar;
#[cfg(feature = "browser")]
mod storage;

/// Called by the generated JS glue once the module is instantiated.
#[cfg(feature = "browser")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    boot::run();
}
