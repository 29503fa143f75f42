//! Retrying, rate-limited HTTP client.
//!
//! Every attempt, retries included, first takes a permit from the sliding
//! window limiter, then goes out through the injected [`Fetch`]. Failed
//! attempts are retried according to a [`RetryPolicy`]; the final response
//! is returned whatever its status, so the caller decides how to map it.

use std::sync::Arc;
use std::time::Duration;

use assembly_common::resilience::{
    AttemptFailure, RetryDecision, RetryPolicy, SlidingWindowConfig, SlidingWindowRateLimiter,
};
use assembly_core::{Fetch, FetchError, HttpRequest, HttpResponse};
use assembly_domain::constants::{
    DEFAULT_REQUESTS_PER_SECOND, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_RETRY_COUNT,
    DEFAULT_TIMEOUT_SECS, HEADER_RETRY_AFTER, MAX_RETRY_AFTER_SECS, RATE_LIMIT_WINDOW_MS,
    RETRYABLE_STATUS_CODES, RETRY_AFTER_STATUS_CODES,
};
use assembly_domain::Result;
use tracing::{debug, warn};

use super::fetch::ReqwestFetch;
use crate::api::errors::parse_retry_after;

/// HTTP client with built-in retry and rate limiting.
#[derive(Clone)]
pub struct HttpClient {
    fetch: Arc<dyn Fetch>,
    limiter: SlidingWindowRateLimiter,
    retry: RetryPolicy,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("limiter", self.limiter.config())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Retry policy in use
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Send `request`, retrying transient failures.
    ///
    /// Returns the last response received (any status), or the last network
    /// error when no attempt produced a response.
    pub async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, FetchError> {
        let method = request.method;
        let path = request.url.path().to_string();
        let mut attempt: u32 = 1;

        loop {
            self.limiter.acquire().await;
            debug!(attempt, %method, path = %path, "sending HTTP request");

            let outcome = self.fetch.fetch(request.clone()).await;
            let failure = match &outcome {
                Ok(response) if response.is_success() => return outcome,
                Ok(response) => AttemptFailure::Status {
                    status: response.status,
                    retry_after: parse_retry_after(response.header(HEADER_RETRY_AFTER)),
                },
                Err(_) => AttemptFailure::Network,
            };

            match self.retry.decide(method.as_str(), attempt, failure) {
                RetryDecision::Stop => return outcome,
                RetryDecision::RetryAfter(delay) => {
                    match &outcome {
                        Ok(response) => warn!(
                            attempt,
                            %method,
                            path = %path,
                            status = response.status,
                            delay_ms = delay.as_millis() as u64,
                            "retrying request"
                        ),
                        Err(err) => warn!(
                            attempt,
                            %method,
                            path = %path,
                            error = %err,
                            delay_ms = delay.as_millis() as u64,
                            "retrying request"
                        ),
                    }
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    fetch: Option<Arc<dyn Fetch>>,
    timeout: Duration,
    retry_count: u32,
    base_backoff: Duration,
    requests_per_second: u32,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            fetch: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_count: DEFAULT_RETRY_COUNT,
            base_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        }
    }
}

impl HttpClientBuilder {
    /// Send requests through `fetch` instead of a reqwest client.
    pub fn fetch(mut self, fetch: Arc<dyn Fetch>) -> Self {
        self.fetch = Some(fetch);
        self
    }

    /// Per-attempt timeout of the default reqwest fetch.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retries after the first attempt.
    pub fn retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn requests_per_second(mut self, requests_per_second: u32) -> Self {
        self.requests_per_second = requests_per_second;
        self
    }

    /// Validate the settings and build the client.
    ///
    /// # Errors
    /// `Config` when the rate is zero or the reqwest client cannot be built.
    pub fn build(self) -> Result<HttpClient> {
        let retry = RetryPolicy::builder()
            .limit(self.retry_count)
            .exponential_backoff(self.base_backoff)
            .status_codes(RETRYABLE_STATUS_CODES)
            .after_status_codes(RETRY_AFTER_STATUS_CODES)
            .max_retry_after(Duration::from_secs(MAX_RETRY_AFTER_SECS))
            .build()?;

        let limiter = SlidingWindowRateLimiter::new(
            SlidingWindowConfig::builder()
                .max_requests(self.requests_per_second)
                .window(Duration::from_millis(RATE_LIMIT_WINDOW_MS))
                .build()?,
        )?;

        let fetch = match self.fetch {
            Some(fetch) => fetch,
            None => Arc::new(ReqwestFetch::builder().timeout(self.timeout).build()?),
        };

        Ok(HttpClient { fetch, limiter, retry })
    }
}
