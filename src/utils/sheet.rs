//! Row parsing and heuristic field resolution.
//!
//! Sheets maintained by hand never agree on header spelling, so lookups
//! run over candidate terms in priority order instead of fixed keys.

use serde_json::Value;

use crate::models::{SheetTable, ShopRecord};

/// Render a cell value for text use. Strings come through as-is, numbers
/// and bools via their JSON form, null as empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Convert the raw table into ordered header/value records.
///
/// Headers are the non-empty column labels when any exist; otherwise the
/// first data row is promoted to the header row. Rows zip against the
/// headers positionally: short rows simply omit the trailing keys, rows
/// without a cell vector are skipped, and a null cell slot contributes no
/// key at all.
pub fn parse_rows(table: &SheetTable) -> Vec<ShopRecord> {
    let mut headers: Vec<String> = table
        .cols
        .iter()
        .filter_map(|col| col.label.clone())
        .filter(|label| !label.is_empty())
        .collect();
    let mut start = 0;
    if headers.is_empty() {
        let Some(first) = table.rows.first().and_then(|row| row.c.as_ref()) else {
            return Vec::new();
        };
        headers = first
            .iter()
            .map(|cell| cell.as_ref().map(|c| value_text(&c.v)).unwrap_or_default())
            .collect();
        start = 1;
    }

    let mut records = Vec::new();
    for row in table.rows.iter().skip(start) {
        let Some(cells) = row.c.as_ref() else { continue };
        let mut fields = Vec::new();
        for (header, cell) in headers.iter().zip(cells.iter()) {
            if let Some(cell) = cell {
                fields.push((header.clone(), cell.v.clone()));
            }
        }
        records.push(ShopRecord { fields });
    }
    records
}

/// Two-tier field lookup. Pass 1 wants a key whose trimmed, case-folded
/// form equals a term, trying terms in priority order; pass 2 settles for
/// a key merely containing a term. Exact beats substring, earlier term
/// beats later term, earlier key beats later key.
pub fn resolve<'a>(record: &'a ShopRecord, terms: &[&str]) -> Option<&'a Value> {
    for term in terms {
        let needle = term.trim().to_lowercase();
        if let Some((_, value)) = record
            .fields
            .iter()
            .find(|(key, _)| key.trim().to_lowercase() == needle)
        {
            return Some(value);
        }
    }
    for term in terms {
        let needle = term.to_lowercase();
        if let Some((_, value)) = record
            .fields
            .iter()
            .find(|(key, _)| key.to_lowercase().contains(&needle))
        {
            return Some(value);
        }
    }
    None
}

/// Resolve straight to non-empty text, for display call sites.
pub fn resolve_text(record: &ShopRecord, terms: &[&str]) -> Option<String> {
    resolve(record, terms)
        .map(value_text)
        .filter(|text| !text.is_empty())
}

/// Terms identifying the place-ID column, most specific first. Sheets
/// without a dedicated column keep the ID inside the QR link column.
pub const PLACE_ID_TERMS: &[&str] = &["place id", "qr url", "qr"];

/// Linear scan for the first record whose identifier field contains the
/// target as a substring, both sides trimmed and case-folded. Sheets stay
/// in the tens-to-hundreds of rows, so no index is kept.
pub fn find_by_place_id<'a>(
    records: &'a [ShopRecord],
    terms: &[&str],
    pid: &str,
) -> Option<&'a ShopRecord> {
    let target = pid.trim().to_lowercase();
    if target.is_empty() {
        return None;
    }
    records.iter().find(|record| {
        resolve(record, terms)
            .map(value_text)
            .is_some_and(|value| value.trim().to_lowercase().contains(&target))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: Value) -> SheetTable {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn labeled_columns_become_headers() {
        let table = table(json!({
            "cols": [{"label": "Shop Name"}, {"label": "Shop URL"}],
            "rows": [
                {"c": [{"v": "Acme"}, {"v": "https://acme.example"}]},
                {"c": [{"v": "Bolt"}, {"v": "https://bolt.example"}]}
            ]
        }));
        let records = parse_rows(&table);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields.len(), 2);
        assert_eq!(records[0].get("Shop Name"), Some(&json!("Acme")));
        assert_eq!(records[1].get("Shop URL"), Some(&json!("https://bolt.example")));
    }

    #[test]
    fn first_row_becomes_headers_when_labels_are_blank() {
        let table = table(json!({
            "cols": [{"label": ""}, {"label": ""}],
            "rows": [
                {"c": [{"v": "Shop Name"}, {"v": "Shop URL"}]},
                {"c": [{"v": "Acme"}, {"v": "https://acme.example"}]}
            ]
        }));
        let records = parse_rows(&table);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Shop Name"), Some(&json!("Acme")));
    }

    #[test]
    fn short_rows_omit_missing_keys_and_bare_rows_are_skipped() {
        let table = table(json!({
            "cols": [{"label": "A"}, {"label": "B"}],
            "rows": [
                {"c": [{"v": "only-a"}]},
                {},
                {"c": [null, {"v": "only-b"}]}
            ]
        }));
        let records = parse_rows(&table);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields.len(), 1);
        assert_eq!(records[0].get("A"), Some(&json!("only-a")));
        assert!(records[1].get("A").is_none());
        assert_eq!(records[1].get("B"), Some(&json!("only-b")));
    }

    #[test]
    fn cell_values_keep_their_types() {
        let table = table(json!({
            "cols": [{"label": "Count"}, {"label": "Open"}],
            "rows": [{"c": [{"v": 42}, {"v": true}]}]
        }));
        let records = parse_rows(&table);
        assert_eq!(records[0].get("Count"), Some(&json!(42)));
        assert_eq!(records[0].get("Open"), Some(&json!(true)));
        assert_eq!(value_text(records[0].get("Count").unwrap()), "42");
    }

    fn record(fields: &[(&str, &str)]) -> ShopRecord {
        ShopRecord {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), json!(v)))
                .collect(),
        }
    }

    #[test]
    fn exact_match_beats_substring_match() {
        let record = record(&[("Shopkeeper Name", "bob"), ("Shop Name", "Acme")]);
        assert_eq!(
            resolve(&record, &["shop name", "name"]),
            Some(&json!("Acme"))
        );
    }

    #[test]
    fn substring_pass_runs_when_no_exact_match_exists() {
        let record = record(&[("QR Code URL", "https://qr.example/x")]);
        assert_eq!(resolve(&record, &["qr"]), Some(&json!("https://qr.example/x")));
    }

    #[test]
    fn earlier_term_wins_within_a_pass() {
        let record = record(&[("Map URL", "map"), ("Shop URL", "shop")]);
        assert_eq!(resolve(&record, &["shop url", "url"]), Some(&json!("shop")));
    }

    #[test]
    fn resolution_misses_return_none() {
        let record = record(&[("Shop Name", "Acme")]);
        assert_eq!(resolve(&record, &["qr", "logo"]), None);
        assert_eq!(resolve_text(&record, &["qr"]), None);
    }

    #[test]
    fn place_id_scan_matches_on_substring() {
        let records = vec![
            record(&[("Shop Name", "Acme"), ("Place ID", "ChIJAAAA")]),
            record(&[("Shop Name", "Bolt"), ("Place ID", "ChIJBBBB")]),
        ];
        let hit = find_by_place_id(&records, PLACE_ID_TERMS, "ijbbbb").unwrap();
        assert_eq!(hit.get("Shop Name"), Some(&json!("Bolt")));
        assert!(find_by_place_id(&records, PLACE_ID_TERMS, "ChIJCCCC").is_none());
        assert!(find_by_place_id(&records, PLACE_ID_TERMS, "  ").is_none());
    }

    #[test]
    fn place_id_scan_falls_back_to_qr_column() {
        let records = vec![record(&[
            ("Shop Name", "Acme"),
            ("QR URL", "https://maps.example/writereview?placeid=ChIJZZZZ"),
        ])];
        let hit = find_by_place_id(&records, PLACE_ID_TERMS, "ChIJZZZZ").unwrap();
        assert_eq!(hit.get("Shop Name"), Some(&json!("Acme")));
    }

    #[test]
    fn parsed_sheet_resolves_and_normalizes_end_to_end() {
        let table = table(json!({
            "cols": [
                {"label": "User Name"}, {"label": "Shop Name"}, {"label": "Shop Logo URL"}
            ],
            "rows": [{"c": [{"v": "alice"}, {"v": "Acme"}, {"v": "http://x/logo.png"}]}]
        }));
        let records = parse_rows(&table);
        assert_eq!(records.len(), 1);
        let logo = resolve_text(&records[0], &["shop logo url", "logo"]).unwrap();
        assert_eq!(logo, "http://x/logo.png");
        assert_eq!(crate::utils::drive::direct_drive_link(&logo), logo);
    }
}
