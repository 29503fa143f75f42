//! Authenticated request interface to the Assembly API.
//!
//! A [`Transport`] is configured once per logical client with the compound
//! key and SDK version. Each verb joins the path onto the base URL, attaches
//! the auth headers, sends through the retrying, rate-limited
//! [`HttpClient`], then either decodes the JSON body or classifies the
//! failure into an [`AssemblyError`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use assembly_common::validation::Schema;
use assembly_core::{parse_response, Fetch, HttpMethod, HttpRequest};
use assembly_domain::constants::{
    CONTENT_TYPE_JSON, DEFAULT_BASE_URL, DEFAULT_REQUESTS_PER_SECOND, DEFAULT_RETRY_BACKOFF_MS,
    DEFAULT_RETRY_COUNT, DEFAULT_TIMEOUT_SECS, HEADER_API_KEY, HEADER_SDK_VERSION,
};
use assembly_domain::{AssemblyError, ErrorKind, Result, SdkConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::errors::{classify_fetch_error, classify_response};
use crate::http::HttpClient;

/// Settings for one [`Transport`].
#[derive(Clone)]
pub struct TransportOptions {
    /// Value of the `X-API-Key` header
    pub compound_key: String,
    /// Value of the `X-Assembly-SDK-Version` header
    pub sdk_version: String,
    pub base_url: String,
    /// Retries after the first attempt
    pub retry_count: u32,
    pub requests_per_second: u32,
    /// Delay before the first retry
    pub retry_backoff: Duration,
    /// Per-attempt timeout of the default reqwest fetch
    pub timeout: Duration,
    /// Replaces the reqwest fetch when set
    pub fetch: Option<Arc<dyn Fetch>>,
}

impl fmt::Debug for TransportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportOptions")
            .field("compound_key", &"[REDACTED]")
            .field("sdk_version", &self.sdk_version)
            .field("base_url", &self.base_url)
            .field("retry_count", &self.retry_count)
            .field("requests_per_second", &self.requests_per_second)
            .field("retry_backoff", &self.retry_backoff)
            .field("timeout", &self.timeout)
            .field("custom_fetch", &self.fetch.is_some())
            .finish()
    }
}

impl TransportOptions {
    /// Default settings for the given credentials
    pub fn new(compound_key: impl Into<String>, sdk_version: impl Into<String>) -> Self {
        Self {
            compound_key: compound_key.into(),
            sdk_version: sdk_version.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            retry_count: DEFAULT_RETRY_COUNT,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fetch: None,
        }
    }

    /// Settings taken from an [`SdkConfig`]
    pub fn from_config(compound_key: impl Into<String>, config: &SdkConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            retry_count: config.retry_count,
            requests_per_second: config.requests_per_second,
            retry_backoff: config.retry_backoff(),
            timeout: config.timeout(),
            ..Self::new(compound_key, config.sdk_version.clone())
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_requests_per_second(mut self, requests_per_second: u32) -> Self {
        self.requests_per_second = requests_per_second;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send requests through `fetch`
    pub fn with_fetch(mut self, fetch: Arc<dyn Fetch>) -> Self {
        self.fetch = Some(fetch);
        self
    }
}

/// Query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Appended to the URL query in insertion order
    pub search_params: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter rendered with `Display`
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.search_params.push((key.into(), value.to_string()));
        self
    }
}

/// Authenticated, rate-limited request interface.
///
/// Cheap to share behind an `Arc`; all verbs take `&self` and may run
/// concurrently. The rate-limit window is the only mutable state.
pub struct Transport {
    base_url: Url,
    compound_key: String,
    sdk_version: String,
    http: HttpClient,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .field("compound_key", &"[REDACTED]")
            .field("sdk_version", &self.sdk_version)
            .field("http", &self.http)
            .finish()
    }
}

impl Transport {
    /// Build a transport from `options`.
    ///
    /// # Errors
    /// `Config` when the base URL does not parse or the rate limit is zero.
    pub fn new(options: TransportOptions) -> Result<Self> {
        let base_url = normalize_base_url(&options.base_url)?;

        let mut http = HttpClient::builder()
            .retry_count(options.retry_count)
            .base_backoff(options.retry_backoff)
            .requests_per_second(options.requests_per_second)
            .timeout(options.timeout);
        if let Some(fetch) = options.fetch {
            http = http.fetch(fetch);
        }

        debug!(base_url = %base_url, retry_count = options.retry_count, "transport configured");
        Ok(Self {
            base_url,
            compound_key: options.compound_key,
            sdk_version: options.sdk_version,
            http: http.build()?,
        })
    }

    /// API root every path is joined onto (always ends with `/`)
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET path`
    #[instrument(skip(self, opts), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str, opts: &RequestOptions) -> Result<T> {
        self.request(HttpMethod::Get, path, None, opts).await
    }

    /// `DELETE path`
    #[instrument(skip(self, opts), fields(path = %path))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, opts: &RequestOptions) -> Result<T> {
        self.request(HttpMethod::Delete, path, None, opts).await
    }

    /// `POST path` with a JSON body
    #[instrument(skip(self, body, opts), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B, opts: &RequestOptions) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.request(HttpMethod::Post, path, Some(body), opts).await
    }

    /// `PATCH path` with a JSON body
    #[instrument(skip(self, body, opts), fields(path = %path))]
    pub async fn patch<B, T>(&self, path: &str, body: &B, opts: &RequestOptions) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.request(HttpMethod::Patch, path, Some(body), opts).await
    }

    /// `GET path`, then validate the body against `schema`.
    ///
    /// # Errors
    /// Everything [`Transport::get`] returns, plus `ResponseParse` when the
    /// body does not match.
    pub async fn get_parsed<S: Schema>(
        &self,
        path: &str,
        opts: &RequestOptions,
        schema: &S,
    ) -> Result<S::Output> {
        let value: Value = self.get(path, opts).await?;
        parse_response(schema, &value)
    }

    /// Absolute URL for `path` with the query from `opts`.
    ///
    /// The result always lies under [`Transport::base_url`].
    ///
    /// # Errors
    /// `Validation` when `path` is an absolute URL or resolves outside the
    /// base URL.
    pub fn url_for(&self, path: &str, opts: &RequestOptions) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        if Url::parse(relative).is_ok() {
            return Err(invalid_path(path));
        }
        let mut url = self
            .base_url
            .join(relative)
            .map_err(|e| invalid_path(path).with_source(e))?;
        if url.origin() != self.base_url.origin()
            || !url.path().starts_with(self.base_url.path())
        {
            return Err(invalid_path(path));
        }
        if !opts.search_params.is_empty() {
            url.query_pairs_mut().extend_pairs(opts.search_params.iter());
        }
        Ok(url)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
        opts: &RequestOptions,
    ) -> Result<T> {
        let url = self.url_for(path, opts)?;
        let url_path = url.path().to_string();
        let mut request = HttpRequest::new(method, url)
            .with_header(HEADER_API_KEY, self.compound_key.as_str())
            .with_header(HEADER_SDK_VERSION, self.sdk_version.as_str());
        if let Some(body) = body {
            request = request.with_header("Content-Type", CONTENT_TYPE_JSON).with_body(body);
        }

        match self.http.send(request).await {
            Ok(response) if response.is_success() => {
                debug!(status = response.status, bytes = response.body.len(), "request succeeded");
                decode_body(&response.body)
            }
            Ok(response) => Err(classify_response(method, &url_path, &response)),
            Err(err) => Err(classify_fetch_error(err)),
        }
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let with_slash =
        if trimmed.ends_with('/') { trimmed.to_string() } else { format!("{trimmed}/") };
    Url::parse(&with_slash).map_err(|e| {
        AssemblyError::config(format!("Invalid base URL: {base_url}")).with_source(e)
    })
}

fn invalid_path(path: &str) -> AssemblyError {
    AssemblyError::new(ErrorKind::Validation).with_message(format!("Invalid request path: {path}"))
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| {
        AssemblyError::new(ErrorKind::Validation)
            .with_message("Request body could not be serialized as JSON")
            .with_source(e)
    })
}

/// Empty bodies decode as JSON `null`.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let decoded = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    decoded.map_err(AssemblyError::connection)
}
