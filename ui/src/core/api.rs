//! REST client for the sweep endpoints.
//!
//! Two surfaces exist upstream: the layer list
//! (`GET {base}/parametersweep/allLayers`) and the result set
//! (`GET {base}/parametersweep?{query}`). Failures are typed and never
//! panic; the viewer decides what to keep on screen.

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::core::record::{LayerOption, SweepRecord};

/// Result alias for endpoint calls.
pub type Result<T> = std::result::Result<T, ApiError>;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

static BASE_URL: OnceCell<String> = OnceCell::new();

/// Registers the API origin. Intended for the launcher, before the first
/// render; later calls are ignored.
pub fn register_base_url<T: Into<String>>(url: T) {
    let _ = BASE_URL.set(url.into());
}

/// The registered API origin, falling back to the local development server.
pub fn base_url() -> &'static str {
    BASE_URL.get().map(String::as_str).unwrap_or(DEFAULT_BASE_URL)
}

/// Endpoint failure modes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, CORS, aborted).
    #[error("request failed: {0}")]
    Network(String),

    /// Non-success status from the endpoint.
    #[error("endpoint returned HTTP {status}")]
    Http { status: u16 },

    /// Payload did not match the expected schema.
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Fetches the layer list for the layer multi-select.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_layers() -> Result<Vec<LayerOption>> {
    get_json(&format!("{}/parametersweep/allLayers", base_url()), &[]).await
}

/// Fetches the result records for the selected layers, OR-ing one
/// `layer_name_canonical` condition per layer.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_records(layers: &[String]) -> Result<Vec<SweepRecord>> {
    let params = crate::core::query::layer_filter_params(layers);
    get_json(&format!("{}/parametersweep", base_url()), &params).await
}

#[cfg(target_arch = "wasm32")]
async fn get_json<T: serde::de::DeserializeOwned>(
    url: &str,
    params: &[(&str, String)],
) -> Result<T> {
    use gloo_net::http::Request;

    let response = Request::get(url)
        .query(params.iter().map(|(key, value)| (*key, value.as_str())))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Http {
            status: response.status(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

// Native builds only exist to run the unit suites; the viewer issues
// requests exclusively from the web runtime.
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_layers() -> Result<Vec<LayerOption>> {
    Err(ApiError::Network(
        "no HTTP transport outside the web runtime".to_string(),
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_records(_layers: &[String]) -> Result<Vec<SweepRecord>> {
    Err(ApiError::Network(
        "no HTTP transport outside the web runtime".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_for_the_status_line() {
        assert_eq!(
            ApiError::Http { status: 502 }.to_string(),
            "endpoint returned HTTP 502"
        );
        assert_eq!(
            ApiError::Network("connection refused".into()).to_string(),
            "request failed: connection refused"
        );
        assert_eq!(
            ApiError::Decode("missing field `rows`".into()).to_string(),
            "could not decode response: missing field `rows`"
        );
    }
}
