//! Request gateway
//!
//! Every call walks the same path: validate the payload, take a rate-limit
//! slot if a limiter was supplied, POST with a deadline, retry network-level
//! failures according to the endpoint's policy, then check the response.

use crate::config::ClientConfig;
use crate::endpoints::{CalculatorApi, CardsApi};
use crate::error::{ApiError, ApiResult};
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::transport::{ReqwestTransport, Transport, TransportResponse};
use bankkaro_core::rate_limit::RateLimiter;
use bankkaro_core::retry::RetryConfig;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// How much of an error body is kept in [`ApiError::HttpStatus`]
const ERROR_BODY_SNIPPET: usize = 256;

/// Which external endpoint a call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Card catalog
    Cards,
    /// Reward calculator
    Calculator,
}

impl Endpoint {
    /// Key used for rate limiting and logs
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Calculator => "calculator",
        }
    }
}

/// BankKaro API client
///
/// Cheap to clone; clones share the transport, notifier and limiter. Calls
/// are independent of each other: each owns its deadline and retry counter.
#[derive(Clone, Debug)]
pub struct BankKaroClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
    notifier: Arc<dyn Notifier>,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl BankKaroClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with specific configuration, a `reqwest`
    /// transport and log-only notifications
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        Self::builder(config).build()
    }

    /// Start building a client with custom collaborators
    #[must_use]
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            transport: None,
            notifier: None,
            rate_limiter: None,
        }
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The limiter shared by this client, if throttling is on
    #[must_use]
    pub fn rate_limiter(&self) -> Option<&Arc<RateLimiter>> {
        self.rate_limiter.as_ref()
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access the card catalog
    #[must_use]
    pub fn cards(&self) -> CardsApi {
        CardsApi::new(self.clone())
    }

    /// Access the reward calculator
    #[must_use]
    pub fn calculator(&self) -> CalculatorApi {
        CalculatorApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Gateway internals shared by the endpoint modules
    // -------------------------------------------------------------------------

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    fn url_for(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Cards => &self.config.cards_url,
            Endpoint::Calculator => &self.config.calculator_url,
        }
    }

    fn retry_for(&self, endpoint: Endpoint) -> &RetryConfig {
        match endpoint {
            Endpoint::Cards => &self.config.cards_retry,
            Endpoint::Calculator => &self.config.calculator_retry,
        }
    }

    /// Take a rate-limit slot, then POST with retry; returns the raw 2xx
    /// response
    pub(crate) async fn post(
        &self,
        endpoint: Endpoint,
        body: &serde_json::Value,
    ) -> ApiResult<TransportResponse> {
        let request_id = Uuid::new_v4().to_string();
        let url = self.url_for(endpoint);

        if let Some(limiter) = &self.rate_limiter {
            if !limiter.try_acquire(endpoint.key()) {
                warn!(
                    request_id = %request_id,
                    endpoint = endpoint.key(),
                    "Rate limited"
                );
                return Err(ApiError::RateLimited(endpoint.key().to_string()));
            }
        }

        self.execute_with_retry(&request_id, endpoint, url, body)
            .await
    }

    async fn execute_with_retry(
        &self,
        request_id: &str,
        endpoint: Endpoint,
        url: &str,
        body: &serde_json::Value,
    ) -> ApiResult<TransportResponse> {
        let policy = self.retry_for(endpoint);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let start = Instant::now();
            let result = self.execute_single_request(request_id, url, body).await;
            let elapsed = start.elapsed();

            match result {
                Ok(response) => {
                    debug!(
                        request_id = %request_id,
                        endpoint = endpoint.key(),
                        attempt,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(response);
                }
                Err(e) if e.is_retryable() && policy.should_retry(attempt) => {
                    let delay = policy.delay_for_attempt(attempt);
                    debug!(
                        request_id = %request_id,
                        endpoint = endpoint.key(),
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "Request failed, will retry"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    debug!(
                        request_id = %request_id,
                        endpoint = endpoint.key(),
                        attempt,
                        error = %e,
                        "Request failed, not retrying"
                    );
                    return Err(e);
                }
            }
        }
    }

    /// One attempt: deadline-bounded send plus status check
    async fn execute_single_request(
        &self,
        request_id: &str,
        url: &str,
        body: &serde_json::Value,
    ) -> ApiResult<TransportResponse> {
        let timeout = self.config.timeout;

        // Dropping the send future on expiry aborts the in-flight request
        let response = tokio::time::timeout(timeout, self.transport.post_json(url, request_id, body))
            .await
            .map_err(|_| ApiError::Timeout(timeout))??;

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::http_status(
                response.status,
                response.body_snippet(ERROR_BODY_SNIPPET),
            ))
        }
    }
}

/// Builder for [`BankKaroClient`]
#[derive(Debug)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    notifier: Option<Arc<dyn Notifier>>,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl ClientBuilder {
    /// Use a custom transport instead of `reqwest`
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Deliver failure notifications to `notifier`
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Share an existing limiter; overrides `config.rate_limit`
    #[must_use]
    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Validate the configuration and assemble the client
    pub fn build(self) -> ApiResult<BankKaroClient> {
        self.config.validate()?;

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(self.config.timeout)?),
        };
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier));
        let rate_limiter = self.rate_limiter.or_else(|| {
            self.config
                .rate_limit
                .clone()
                .map(|c| Arc::new(RateLimiter::new(c)))
        });

        Ok(BankKaroClient {
            transport,
            config: Arc::new(self.config),
            notifier,
            rate_limiter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedTransport, Step};
    use bankkaro_core::rate_limit::RateLimitConfig;
    use serde_json::json;
    use std::time::Duration;

    fn client_with(transport: &Arc<ScriptedTransport>, config: ClientConfig) -> BankKaroClient {
        BankKaroClient::builder(config)
            .transport(transport.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(BankKaroClient::with_config(ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(BankKaroClient::with_config(config).is_err());
    }

    #[test]
    fn test_rate_limiter_from_config() {
        let config = ClientConfig::default().with_rate_limit(RateLimitConfig::api());
        let client = BankKaroClient::with_config(config).unwrap();
        assert_eq!(client.rate_limiter().unwrap().config().max_requests, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_retries_then_succeeds() {
        let transport = Arc::new(ScriptedTransport::new([
            Step::Fail(ApiError::Transport("connection reset".into())),
            Step::Respond(TransportResponse::json(200, &json!({"cards": []}))),
        ]));
        let client = client_with(&transport, ClientConfig::default());

        let response = client.post(Endpoint::Cards, &json!({})).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_http_error_not_retried() {
        let transport = Arc::new(ScriptedTransport::new([Step::Respond(
            TransportResponse {
                status: 503,
                body: b"maintenance".to_vec(),
            },
        )]));
        let client = client_with(&transport, ClientConfig::default());

        let err = client.post(Endpoint::Cards, &json!({})).await.unwrap_err();
        assert_eq!(err, ApiError::http_status(503, "maintenance"));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_turns_hang_into_timeout() {
        let transport = Arc::new(ScriptedTransport::new([Step::Hang]));
        let config = ClientConfig::default().with_timeout(Duration::from_millis(500));
        let client = client_with(&transport, config);

        let err = client.post(Endpoint::Calculator, &json!({})).await.unwrap_err();
        assert_eq!(err, ApiError::Timeout(Duration::from_millis(500)));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_call_skips_transport() {
        let transport = Arc::new(ScriptedTransport::new([Step::Respond(
            TransportResponse::json(200, &json!({})),
        )]));
        let limiter = Arc::new(RateLimiter::new(RateLimitConfig::new(
            1,
            Duration::from_secs(60),
        )));
        let client = BankKaroClient::builder(ClientConfig::default())
            .transport(transport.clone())
            .rate_limiter(limiter)
            .build()
            .unwrap();

        assert!(client.post(Endpoint::Cards, &json!({})).await.is_ok());
        let err = client.post(Endpoint::Cards, &json!({})).await.unwrap_err();
        assert_eq!(err, ApiError::RateLimited("cards".into()));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_request_targets_endpoint_url() {
        let transport = Arc::new(ScriptedTransport::new([
            Step::Respond(TransportResponse::json(200, &json!({}))),
            Step::Respond(TransportResponse::json(200, &json!({}))),
        ]));
        let config = ClientConfig::default()
            .with_cards_url("http://cards.test/list")
            .with_calculator_url("http://calc.test/pro");
        let client = client_with(&transport, config);

        client.post(Endpoint::Cards, &json!({"a": 1})).await.unwrap();
        client.post(Endpoint::Calculator, &json!({"b": 2})).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://cards.test/list");
        assert_eq!(requests[0].body, json!({"a": 1}));
        assert_eq!(requests[1].url, "http://calc.test/pro");
        assert_ne!(requests[0].request_id, requests[1].request_id);
    }
}
