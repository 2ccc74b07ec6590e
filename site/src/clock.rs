//! Browser clock: JS `Date` formatted with the page locale.

use js_sys::Date;
use wasm_bindgen::JsValue;
use wishes::clock::Clock;
use wishes::wish::ServerTimestamp;

pub(crate) struct JsClock {
    locale: String,
}

impl JsClock {
    pub(crate) fn new(locale: impl Into<String>) -> Self {
        Self { locale: locale.into() }
    }

    fn display(&self, date: &Date) -> String {
        date.to_locale_string(&self.locale, &JsValue::UNDEFINED).into()
    }
}

impl Clock for JsClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_millis(&self) -> u64 {
        Date::now() as u64
    }

    fn now_display(&self) -> String {
        self.display(&Date::new_0())
    }

    #[allow(clippy::cast_precision_loss)]
    fn format(&self, ts: ServerTimestamp) -> String {
        self.display(&Date::new(&JsValue::from_f64(ts.unix_millis() as f64)))
    }
}
