//! Data structures shared across pages.

use serde::Deserialize;
use serde_json::Value;

// ============================================
// Google Visualization API payload
// ============================================

/// Top-level gviz response. Everything past `table` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GvizResponse {
    #[serde(default)]
    pub table: Option<SheetTable>,
}

/// The raw tabular payload: column descriptors plus positional rows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetTable {
    #[serde(default)]
    pub cols: Vec<SheetCol>,
    #[serde(default)]
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetCol {
    #[serde(default)]
    pub label: Option<String>,
}

/// One sheet row. `c` is absent for fully empty rows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetRow {
    #[serde(default)]
    pub c: Option<Vec<Option<SheetCell>>>,
}

/// One cell. `v` carries the untyped value as the sheet delivers it
/// (string, number or bool); no coercion happens on our side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetCell {
    #[serde(default)]
    pub v: Value,
}

// ============================================
// Parsed records
// ============================================

/// One parsed sheet row, keyed by inferred header.
/// Field order is the sheet's column order; resolution depends on it.
#[derive(Debug, Clone, Default)]
pub struct ShopRecord {
    pub fields: Vec<(String, Value)>,
}

impl ShopRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

// ============================================
// Review page state
// ============================================

/// Shop located in the sheet by partial place-ID match.
#[derive(Debug, Clone, Default)]
pub struct ShopDetails {
    pub shop_name: String,
    pub logo_url: Option<String>,
    pub place_id: Option<String>,
    pub shop_url: Option<String>,
}

/// Short/long text pair returned by the review generation webhook.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReview {
    pub short: String,
    pub long: String,
}

// ============================================
// Provisioning form
// ============================================

/// Text fields collected by the user-creation form. The logo file rides
/// alongside as a browser object, not in the model.
#[derive(Debug, Clone, Default)]
pub struct NewShopRequest {
    pub user_name: String,
    pub map_url: String,
    pub password: String,
    pub shop_name: String,
    pub shop_url: String,
    pub place_id: String,
}
