//! Fetch port consumed by the HTTP transport.
//!
//! # Example
//!
//! ```no_run
//! use assembly_core::{Fetch, HttpMethod, HttpRequest};
//!
//! async fn ping(fetch: &dyn Fetch) -> bool {
//!     let url = url::Url::parse("https://app.assembly.com/api/workspace").unwrap();
//!     let request = HttpRequest::new(HttpMethod::Get, url);
//!     matches!(fetch.fetch(request).await, Ok(res) if res.is_success())
//! }
//! ```

use std::fmt;

use async_trait::async_trait;
use assembly_domain::BoxError;
use thiserror::Error;
use url::Url;

/// HTTP verbs the transport issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound request attempt.
#[derive(Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    /// Header name/value pairs, sent in order
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Request without headers or body
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self { method, url, headers: Vec::new(), body: None }
    }

    /// Append a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// First header named `name` (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

impl fmt::Debug for HttpRequest {
    // Header values may hold credentials.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &names)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

/// A response as seen by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Response with a status and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, headers: Vec::new(), body: body.into() }
    }

    /// Append a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header named `name` (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
}

/// Failure to obtain any response.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl FetchError {
    /// Network failure without an underlying error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into(), source: None }
    }

    /// Network failure wrapping `source`
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Network { message: message.into(), source: Some(source.into()) }
    }
}

/// A fetch-like function: send one request, return whatever the server
/// answered (any status), or a [`FetchError`] when no response arrived.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Send `request`
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let res = HttpResponse::new(429, "{}").with_header("retry-after", "3");
        assert_eq!(res.header("Retry-After"), Some("3"));
        assert_eq!(res.header("X-Missing"), None);
        assert!(!res.is_success());
    }

    #[test]
    fn request_debug_hides_header_values() {
        let url = Url::parse("https://app.assembly.com/api/clients").unwrap();
        let req = HttpRequest::new(HttpMethod::Get, url).with_header("X-API-Key", "ws/secret");
        let rendered = format!("{req:?}");
        assert!(rendered.contains("X-API-Key"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn fetch_error_keeps_source() {
        use std::error::Error as _;
        let err = FetchError::with_source("connection reset", std::io::Error::other("reset"));
        assert_eq!(err.to_string(), "network error: connection reset");
        assert!(err.source().is_some());
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
