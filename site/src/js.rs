//! `JsValue` error plumbing shared by the browser modules.

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::SiteError;

/// Readable text for a thrown JS value: the `Error.message` when there is one.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        text
    } else if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        err.message().into()
    } else {
        format!("{value:?}")
    }
}

pub(crate) fn js_err(value: JsValue) -> SiteError {
    SiteError::Js(js_message(&value))
}

/// Log a failed DOM call that has no caller to report to.
pub(crate) fn report(result: Result<(), JsValue>, action: &'static str) {
    if let Err(err) = result {
        warn!(action, error = %js_message(&err), "DOM call failed");
    }
}
