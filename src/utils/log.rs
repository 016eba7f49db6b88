//! Category-tagged console logging.
//!
//! Entries go straight to the browser console, prefixed with an ISO
//! timestamp and a category such as "sheet-fetch" or "review-webhook".

use wasm_bindgen::JsValue;

fn entry(category: &str, message: &str) -> JsValue {
    let timestamp = js_sys::Date::new_0()
        .to_iso_string()
        .as_string()
        .unwrap_or_default();
    JsValue::from_str(&format!("{} [{}] {}", timestamp, category, message))
}

pub fn log_info(category: &str, message: &str) {
    web_sys::console::log_1(&entry(category, message));
}

pub fn log_warn(category: &str, message: &str) {
    web_sys::console::warn_1(&entry(category, message));
}

pub fn log_error(category: &str, message: &str) {
    web_sys::console::error_1(&entry(category, message));
}
