//! [`Fetch`] implementation backed by reqwest.

use std::time::Duration;

use assembly_core::{Fetch, FetchError, HttpMethod, HttpRequest, HttpResponse};
use assembly_domain::constants::DEFAULT_TIMEOUT_SECS;
use assembly_domain::{AssemblyError, Result};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method};
use tracing::debug;

/// Sends requests with a shared reqwest client.
///
/// Each attempt is bounded by the client timeout; a timeout is reported as
/// [`FetchError::Timeout`].
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: ReqwestClient,
}

impl ReqwestFetch {
    /// Start building a fetch implementation.
    pub fn builder() -> ReqwestFetchBuilder {
        ReqwestFetchBuilder::default()
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(client: ReqwestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for ReqwestFetch {
    async fn fetch(&self, request: HttpRequest) -> std::result::Result<HttpResponse, FetchError> {
        let method = to_reqwest_method(request.method);
        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        debug!(status, bytes = body.len(), "received HTTP response");
        Ok(HttpResponse { status, headers, body })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::with_source("HTTP request failed", err)
    }
}

/// Builder for [`ReqwestFetch`].
#[derive(Debug)]
pub struct ReqwestFetchBuilder {
    timeout: Duration,
}

impl Default for ReqwestFetchBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
    }
}

impl ReqwestFetchBuilder {
    /// Per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ReqwestFetch> {
        let client = ReqwestClient::builder().timeout(self.timeout).no_proxy().build().map_err(|err| {
            AssemblyError::config("Failed to build HTTP client").with_source(err)
        })?;
        Ok(ReqwestFetch { client })
    }
}
