//! services/client/src/adapters/http.rs
//!
//! This module contains the adapter for the remote WasteWise HTTP API.
//! It implements the `WastewiseApi` port from the `core` crate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use wastewise_core::{
    domain::{ApiBody, ApiFailure, ApiOutcome},
    ports::WastewiseApi,
};

use crate::config::ApiConfig;

/// Status text reported when the server could not be reached at all.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `WastewiseApi` over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpApiAdapter {
    client: Client,
    config: ApiConfig,
}

impl HttpApiAdapter {
    /// Creates a new `HttpApiAdapter` for the API described by `config`.
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(Duration::from_secs(10)))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Sends the request and turns whatever comes back into an outcome.
    async fn execute(&self, request: RequestBuilder, url: &str) -> ApiOutcome {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed before a response arrived: {}", url, e);
                return ApiOutcome::Failure(transport_failure(url));
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("Reading the response body from {} failed: {}", url, e);
                return ApiOutcome::Failure(transport_failure(url));
            }
        };
        debug!(status = status.as_u16(), bytes = text.len(), "Response from {}", url);

        if status.is_success() {
            decode_success(url, status, &text)
        } else {
            ApiOutcome::Failure(http_failure(url, status, &text))
        }
    }
}

//=========================================================================================
// `WastewiseApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl WastewiseApi for HttpApiAdapter {
    /// Posts the entry text as a raw `text/plain` body.
    async fn save_entry(&self, text: &str) -> ApiOutcome {
        let url = self.config.save_entry_url();
        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .body(text.to_string());
        self.execute(request, &url).await
    }

    async fn get_insights(&self) -> ApiOutcome {
        let url = self.config.insights_url();
        let request = self.client.get(&url);
        self.execute(request, &url).await
    }
}

//=========================================================================================
// Response Decoding
//=========================================================================================

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

fn transport_failure(url: &str) -> ApiFailure {
    ApiFailure::new(
        0,
        UNKNOWN_ERROR,
        None,
        format!("Http failure response for {}: 0 {}", url, UNKNOWN_ERROR),
    )
}

/// An empty 2xx body is a success with a `null` body; a body that is not JSON
/// is a failure even though the status was fine.
fn decode_success(url: &str, status: StatusCode, text: &str) -> ApiOutcome {
    if text.trim().is_empty() {
        return ApiOutcome::Success(ApiBody::from_json(Value::Null));
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) => ApiOutcome::Success(ApiBody::from_json(value)),
        Err(e) => {
            warn!("Response from {} is not JSON: {}", url, e);
            ApiOutcome::Failure(ApiFailure::new(
                status.as_u16(),
                status_text(status),
                Some(ApiBody::from_json(Value::String(text.to_string()))),
                format!("Http failure during parsing for {}", url),
            ))
        }
    }
}

fn http_failure(url: &str, status: StatusCode, text: &str) -> ApiFailure {
    let error_body = if text.trim().is_empty() {
        None
    } else {
        let value = serde_json::from_str::<Value>(text)
            .unwrap_or_else(|_| Value::String(text.to_string()));
        Some(ApiBody::from_json(value))
    };
    ApiFailure::new(
        status.as_u16(),
        status_text(status),
        error_body,
        format!(
            "Http failure response for {}: {} {}",
            url,
            status.as_u16(),
            status_text(status)
        ),
    )
}
