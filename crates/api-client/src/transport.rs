//! HTTP transport seam
//!
//! The gateway only needs "POST this JSON, give me status and bytes".

use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Request correlation ID header
pub const X_REQUEST_ID: &str = "X-Request-ID";

/// Raw response handed back to the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Build a response from a status and a JSON value
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as lossy UTF-8, cut to `max` characters
    #[must_use]
    pub fn body_snippet(&self, max: usize) -> String {
        String::from_utf8_lossy(&self.body).chars().take(max).collect()
    }
}

/// Something that can POST a JSON body
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send `body` to `url` and return the raw response
    ///
    /// Implementations report connection problems as [`ApiError::Transport`]
    /// and their own deadlines as [`ApiError::Timeout`]; any HTTP status,
    /// including errors, is a successful transport result.
    async fn post_json(
        &self,
        url: &str,
        request_id: &str,
        body: &serde_json::Value,
    ) -> ApiResult<TransportResponse>;
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport whose own deadline matches the gateway's
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("bankkaro-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ApiError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { inner, timeout })
    }

    fn map_error(&self, err: &reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        request_id: &str,
        body: &serde_json::Value,
    ) -> ApiResult<TransportResponse> {
        let response = self
            .inner
            .post(url)
            .header(X_REQUEST_ID, request_id)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.map_error(&e))?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
