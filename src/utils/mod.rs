//! Utility modules: sheet ingestion, link massage, webhook clients, logging.

pub mod drive;
pub mod gviz;
pub mod log;
pub mod sheet;
pub mod webhook;

use wasm_bindgen::JsCast;

// Shared browser helpers

/// Read a non-empty query parameter from the current location.
pub fn query_param(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|value| !value.is_empty())
}

/// Fire-and-forget clipboard write.
pub fn copy_to_clipboard(text: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.navigator().clipboard().write_text(text);
    }
}

/// Blocking browser alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Focus an element by id, if present.
pub fn focus_element(id: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Some(element) = document.get_element_by_id(id) {
            if let Some(element) = element.dyn_ref::<web_sys::HtmlElement>() {
                let _ = element.focus();
            }
        }
    }
}

// Shared string helpers

/// Title-case a shop name after collapsing separator and space runs.
/// Sheet cells hold names like "blue-bottle_cafe"; the page header wants
/// "Blue Bottle Cafe".
pub fn format_shop_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '-' | '_' | '.' | '/' | '\\' => ' ',
            other => other,
        })
        .collect();
    cleaned
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Derive the review posting URL from a stored map link. Links that are
/// already write-review links pass through; g.page shortlinks get the
/// /review suffix; anything else is left for the user to navigate.
pub fn review_url(url: &str) -> String {
    if url.contains("writereview") {
        return url.to_string();
    }
    if url.contains("g.page") {
        return if url.ends_with('/') {
            format!("{}review", url)
        } else {
            format!("{}/review", url)
        };
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_name_title_cases_and_collapses_separators() {
        assert_eq!(format_shop_name("blue-bottle_cafe"), "Blue Bottle Cafe");
        assert_eq!(format_shop_name("  ACME   stores  "), "Acme Stores");
        assert_eq!(format_shop_name("a.b/c\\d"), "A B C D");
    }

    #[test]
    fn shop_name_empty_input_stays_empty() {
        assert_eq!(format_shop_name(""), "");
        assert_eq!(format_shop_name("   "), "");
    }

    #[test]
    fn review_url_passes_write_review_links_through() {
        let url = "https://search.google.com/local/writereview?placeid=XYZ";
        assert_eq!(review_url(url), url);
    }

    #[test]
    fn review_url_appends_review_to_shortlinks() {
        assert_eq!(review_url("https://g.page/acme"), "https://g.page/acme/review");
        assert_eq!(review_url("https://g.page/acme/"), "https://g.page/acme/review");
    }

    #[test]
    fn review_url_leaves_plain_map_links_alone() {
        let url = "https://maps.google.com/?q=acme";
        assert_eq!(review_url(url), url);
    }
}
