//! Sheet ingestion over the Google Visualization API.
//!
//! The gviz endpoint wraps its JSON table in a JavaScript call
//! (`google.visualization.Query.setResponse({...});`, or a named handler
//! when one is requested). Instead of letting a script tag evaluate that,
//! we fetch the body as text and cut the object out of the wrapper, so the
//! whole request stays an ordinary scoped async call with nothing global
//! to clean up.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::models::{GvizResponse, SheetTable};

/// Slice the JSON object out of the wrapper call.
pub fn strip_response_wrapper(body: &str) -> Option<&str> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (start <= end).then(|| &body[start..=end])
}

/// Parse a raw gviz response body into the table payload.
pub fn parse_sheet_response(body: &str) -> Result<SheetTable, String> {
    let json = strip_response_wrapper(body).ok_or("no JSON object in sheet response")?;
    let response: GvizResponse =
        serde_json::from_str(json).map_err(|e| format!("sheet JSON parse failed: {}", e))?;
    response
        .table
        .ok_or_else(|| "sheet response carries no table".to_string())
}

/// Fetch one sheet's tabular JSON.
pub async fn fetch_sheet(sheet_id: &str) -> Result<SheetTable, String> {
    let url = format!(
        "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:json",
        sheet_id
    );
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| format!("request build failed: {:?}", e))?;
    let window = web_sys::window().ok_or("no window")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("sheet fetch failed: {:?}", e))?;
    let resp: Response = resp_value.dyn_into().map_err(|_| "not a Response")?;
    if !resp.ok() {
        return Err(format!("sheet endpoint returned {}", resp.status()));
    }
    let text = JsFuture::from(resp.text().map_err(|e| format!("text() failed: {:?}", e))?)
        .await
        .map_err(|e| format!("response read failed: {:?}", e))?;
    let body = text.as_string().ok_or("response body is not text")?;
    parse_sheet_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = concat!(
        "/*O_o*/\n",
        "google.visualization.Query.setResponse(",
        r#"{"version":"0.6","status":"ok","table":{"#,
        r#""cols":[{"id":"A","label":"Shop Name","type":"string"},"#,
        r#"{"id":"B","label":"Shop URL","type":"string"}],"#,
        r#""rows":[{"c":[{"v":"Acme"},{"v":"https://acme.example"}]},"#,
        r#"{"c":[{"v":"Bolt"},null]}]}}"#,
        ");"
    );

    #[test]
    fn wrapper_is_stripped_from_set_response_form() {
        let json = strip_response_wrapper(BODY).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn wrapper_is_stripped_from_named_handler_form() {
        let body = r#"cb123({"table":{"cols":[],"rows":[]}});"#;
        assert_eq!(
            strip_response_wrapper(body),
            Some(r#"{"table":{"cols":[],"rows":[]}}"#)
        );
    }

    #[test]
    fn table_parses_with_columns_and_rows() {
        let table = parse_sheet_response(BODY).unwrap();
        assert_eq!(table.cols.len(), 2);
        assert_eq!(table.cols[0].label.as_deref(), Some("Shop Name"));
        assert_eq!(table.rows.len(), 2);
        // The second row's missing cell survives as None.
        assert!(table.rows[1].c.as_ref().unwrap()[1].is_none());
    }

    #[test]
    fn payload_without_table_is_an_error() {
        let err = parse_sheet_response(r#"cb({"status":"error"});"#).unwrap_err();
        assert!(err.contains("no table"));
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(parse_sheet_response("<!doctype html>").is_err());
        assert!(parse_sheet_response("cb({oops);").is_err());
    }
}
