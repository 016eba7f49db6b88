//! Clients for the review-generation and user-provisioning webhooks.
//!
//! Both endpoints answer with loosely shaped JSON: an optional envelope
//! object and synonymous field names. Decoding runs over fixed priority
//! lists in dedicated functions, so each logical field has exactly one
//! lookup order.
//!
//! The error strings returned by the async clients are user-facing alert
//! text; technical causes are logged here before they are swallowed.

use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

use crate::models::{GeneratedReview, NewShopRequest};
use crate::utils::log::{log_error, log_warn};

/// First non-empty string under any of the candidate keys.
fn first_string(data: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        data.get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Unwrap one level of envelope (`data`, `body`) when present.
fn unwrap_envelope<'a>(json: &'a Value, key: &str) -> &'a Value {
    match json.get(key) {
        Some(inner) if inner.is_object() => inner,
        _ => json,
    }
}

/// Decode the generation payload. `None` means the server answered 2xx but
/// carried no review text under any known name.
pub fn decode_review_payload(json: &Value) -> Option<GeneratedReview> {
    let data = unwrap_envelope(json, "data");
    let short = first_string(data, &["short_review", "short", "shortReview"]);
    let long = first_string(data, &["long_review", "long", "review", "detailedReview"]);
    if short.is_none() && long.is_none() {
        return None;
    }
    Some(GeneratedReview {
        short: short.unwrap_or_else(|| "No short summary available.".to_string()),
        long: long.unwrap_or_else(|| "No details available.".to_string()),
    })
}

/// Decode the provisioning response: optional `body` envelope around
/// `{status, message}`. `status == "error"` means rejection even on a 2xx.
pub fn decode_user_payload(json: &Value, http_ok: bool) -> Result<(), String> {
    let body = unwrap_envelope(json, "body");
    let status = body.get("status").and_then(Value::as_str).unwrap_or_default();
    if http_ok && status != "error" {
        return Ok(());
    }
    Err(body
        .get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "Failed to create user. Please try again.".to_string()))
}

async fn send(request: Request) -> Result<Response, String> {
    let window = web_sys::window().ok_or("no window")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?;
    resp_value.dyn_into().map_err(|_| "not a Response".to_string())
}

async fn response_json(resp: &Response) -> Result<Value, String> {
    let json = JsFuture::from(resp.json().map_err(|e| format!("json() failed: {:?}", e))?)
        .await
        .map_err(|e| format!("JSON read failed: {:?}", e))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| format!("JSON decode failed: {:?}", e))
}

async fn post_review(review: &str, shop_name: &str, shop_url: &str) -> Result<Response, String> {
    let body = serde_json::json!({
        "review": review,
        "shopName": shop_name,
        "shopUrl": shop_url,
    });

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body.to_string()));

    let request = Request::new_with_str_and_init(crate::REVIEW_WEBHOOK_URL, &opts)
        .map_err(|e| format!("request build failed: {:?}", e))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("header set failed: {:?}", e))?;
    send(request).await
}

/// Submit a raw review and return the generated short/long pair.
pub async fn generate_review(
    review: &str,
    shop_name: &str,
    shop_url: &str,
) -> Result<GeneratedReview, String> {
    let resp = match post_review(review, shop_name, shop_url).await {
        Ok(resp) => resp,
        Err(e) => {
            log_error("review-webhook", &e);
            return Err("An error occurred. Please try again.".to_string());
        }
    };
    if !resp.ok() {
        log_error(
            "review-webhook",
            &format!("endpoint returned {}", resp.status()),
        );
        return Err("Failed to submit review. Please try again.".to_string());
    }
    let json = match response_json(&resp).await {
        Ok(json) => json,
        Err(e) => {
            log_error("review-webhook", &e);
            return Err("An error occurred. Please try again.".to_string());
        }
    };
    match decode_review_payload(&json) {
        Some(generated) => Ok(generated),
        None => {
            log_warn("review-webhook", "response carried no review fields");
            Err("Review submitted, but no content was returned from the server.".to_string())
        }
    }
}

async fn post_user(request: &NewShopRequest, shop_logo: Option<&File>) -> Result<Response, String> {
    let form = FormData::new().map_err(|e| format!("form build failed: {:?}", e))?;
    let fields = [
        ("userName", request.user_name.as_str()),
        ("mapUrl", request.map_url.as_str()),
        ("password", request.password.as_str()),
        ("shopName", request.shop_name.as_str()),
        ("shopUrl", request.shop_url.as_str()),
        ("placeId", request.place_id.as_str()),
    ];
    for (key, value) in fields {
        form.append_with_str(key, value)
            .map_err(|e| format!("form field {} failed: {:?}", key, e))?;
    }
    if let Some(file) = shop_logo {
        form.append_with_blob("shopLogo", file)
            .map_err(|e| format!("form file failed: {:?}", e))?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(crate::USER_WEBHOOK_URL, &opts)
        .map_err(|e| format!("request build failed: {:?}", e))?;
    send(request).await
}

/// Create a shop/user record. Ok(()) means the webhook accepted it.
pub async fn create_user(request: &NewShopRequest, shop_logo: Option<&File>) -> Result<(), String> {
    let resp = match post_user(request, shop_logo).await {
        Ok(resp) => resp,
        Err(e) => {
            log_error("user-webhook", &e);
            return Err("An error occurred. Please try again.".to_string());
        }
    };
    let json = match response_json(&resp).await {
        Ok(json) => json,
        Err(e) => {
            log_error("user-webhook", &e);
            return Err("An error occurred. Please try again.".to_string());
        }
    };
    decode_user_payload(&json, resp.ok()).map_err(|message| {
        log_warn(
            "user-webhook",
            &format!("creation rejected with http {}", resp.status()),
        );
        message
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn review_payload_decodes_flat_shape() {
        let json = json!({"short_review": "Nice.", "long_review": "Really nice."});
        let review = decode_review_payload(&json).unwrap();
        assert_eq!(review.short, "Nice.");
        assert_eq!(review.long, "Really nice.");
    }

    #[test]
    fn review_payload_decodes_data_envelope_and_synonyms() {
        let json = json!({"data": {"shortReview": "Nice.", "detailedReview": "Long."}});
        let review = decode_review_payload(&json).unwrap();
        assert_eq!(review.short, "Nice.");
        assert_eq!(review.long, "Long.");
    }

    #[test]
    fn review_payload_prefers_earlier_synonyms() {
        let json = json!({"long_review": "first", "review": "second", "short": "s"});
        let review = decode_review_payload(&json).unwrap();
        assert_eq!(review.long, "first");
    }

    #[test]
    fn review_payload_fills_missing_half_with_placeholder() {
        let json = json!({"short": "Only short."});
        let review = decode_review_payload(&json).unwrap();
        assert_eq!(review.short, "Only short.");
        assert_eq!(review.long, "No details available.");
    }

    #[test]
    fn review_payload_without_any_field_is_none() {
        assert!(decode_review_payload(&json!({})).is_none());
        assert!(decode_review_payload(&json!({"data": {}})).is_none());
        // Empty strings count as missing.
        assert!(decode_review_payload(&json!({"short": "", "review": ""})).is_none());
    }

    #[test]
    fn user_payload_accepts_plain_success() {
        assert!(decode_user_payload(&json!({"status": "ok"}), true).is_ok());
        assert!(decode_user_payload(&json!({}), true).is_ok());
    }

    #[test]
    fn user_payload_unwraps_body_envelope() {
        let json = json!({"body": {"status": "error", "message": "duplicate shop"}});
        assert_eq!(decode_user_payload(&json, true).unwrap_err(), "duplicate shop");
    }

    #[test]
    fn user_payload_rejects_error_status_despite_http_ok() {
        let json = json!({"status": "error"});
        assert_eq!(
            decode_user_payload(&json, true).unwrap_err(),
            "Failed to create user. Please try again."
        );
    }

    #[test]
    fn user_payload_rejects_http_failure() {
        let json = json!({"status": "ok", "message": "server exploded"});
        assert_eq!(decode_user_payload(&json, false).unwrap_err(), "server exploded");
    }
}
