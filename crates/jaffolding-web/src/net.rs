//! Fetch glue for the demo endpoints
//!
//! One shot, no retry: a failed or malformed response falls back to the
//! built-in dataset so the demos render offline.

use jaffolding_apps::sales::{fallback_dataset, SalesRecord};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Fetch sales records from the given endpoint, falling back to the
/// bundled dataset on any failure.
pub async fn fetch_sales(url: &str) -> Vec<SalesRecord> {
    match try_fetch_sales(url).await {
        Ok(records) => records,
        Err(err) => {
            web_sys::console::warn_2(
                &JsValue::from_str(&format!("fetch {url} failed, using fallback dataset")),
                &err,
            );
            fallback_dataset()
        }
    }
}

async fn try_fetch_sales(url: &str) -> Result<Vec<SalesRecord>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("status {}", response.status())));
    }
    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("non-text body"))?;
    serde_json::from_str(&body).map_err(|e| JsValue::from_str(&e.to_string()))
}
