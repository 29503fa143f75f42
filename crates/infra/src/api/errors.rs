//! Error classification for Assembly API responses
//!
//! | status            | kind         |
//! |-------------------|--------------|
//! | 400, 422          | Validation   |
//! | 401               | Unauthorized |
//! | 403               | Forbidden    |
//! | 404               | NotFound     |
//! | 429               | RateLimit    |
//! | >= 500            | Server       |
//! | anything else     | Connection   |
//! | no response       | Connection   |
//!
//! The response body, when it is JSON, becomes the error's `details`.

use std::time::Duration;

use assembly_core::{FetchError, HttpMethod, HttpResponse};
use assembly_domain::constants::HEADER_RETRY_AFTER;
use assembly_domain::{AssemblyError, ErrorKind};
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// The failed response that caused an error, kept as its source.
#[derive(Debug, Clone, Error)]
#[error("{method} {path} failed with HTTP {status}")]
pub struct HttpStatusError {
    pub status: u16,
    pub method: HttpMethod,
    /// URL path of the request (no query string)
    pub path: String,
}

/// Parse a `Retry-After` header relative to the current time.
pub fn parse_retry_after(header: Option<&str>) -> Option<Duration> {
    parse_retry_after_at(header, Utc::now())
}

/// Parse a `Retry-After` header relative to `now`.
///
/// - absent or empty: `None`
/// - a non-negative number of seconds (fractions allowed): that delay
/// - a negative or non-finite number: `None`
/// - an HTTP-date: seconds until that date rounded up, or zero when it has
///   passed
/// - anything else: `None`
pub fn parse_retry_after_at(header: Option<&str>, now: DateTime<Utc>) -> Option<Duration> {
    let header = header.map(str::trim).filter(|h| !h.is_empty())?;

    if let Ok(seconds) = header.parse::<f64>() {
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }
        return Duration::try_from_secs_f64(seconds).ok();
    }

    let date = DateTime::parse_from_rfc2822(header)
        .or_else(|_| DateTime::parse_from_rfc3339(header))
        .ok()?
        .with_timezone(&Utc);

    let delay_ms = (date - now).num_milliseconds();
    if delay_ms <= 0 {
        return Some(Duration::ZERO);
    }
    let delay_ms = u64::try_from(delay_ms).ok()?;
    Some(Duration::from_secs(delay_ms.div_ceil(1000)))
}

/// Best-effort JSON decoding of an error body.
pub fn try_parse_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

/// Map a status code to an [`AssemblyError`].
pub fn classify_status(
    status: u16,
    details: Option<Value>,
    retry_after_header: Option<&str>,
) -> AssemblyError {
    let err = match status {
        400 => AssemblyError::new(ErrorKind::Validation).with_status(400),
        422 => AssemblyError::new(ErrorKind::Validation),
        401 => AssemblyError::new(ErrorKind::Unauthorized),
        403 => AssemblyError::new(ErrorKind::Forbidden),
        404 => AssemblyError::new(ErrorKind::NotFound),
        429 => AssemblyError::rate_limit(parse_retry_after(retry_after_header)),
        s if s >= 500 => AssemblyError::new(ErrorKind::Server).with_status(s),
        s => AssemblyError::new(ErrorKind::Connection).with_message(format!("Unexpected HTTP {s}")),
    };
    err.with_details(details)
}

/// Map a failed response to an [`AssemblyError`] carrying the body as
/// details and an [`HttpStatusError`] as source.
pub fn classify_response(method: HttpMethod, path: &str, response: &HttpResponse) -> AssemblyError {
    classify_status(
        response.status,
        try_parse_body(&response.body),
        response.header(HEADER_RETRY_AFTER),
    )
    .with_source(HttpStatusError { status: response.status, method, path: path.to_string() })
}

/// Wrap a network-level failure.
pub fn classify_fetch_error(err: FetchError) -> AssemblyError {
    AssemblyError::connection(err)
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap()
    }

    #[test]
    fn test_retry_after_seconds() {
        assert_eq!(parse_retry_after(Some("30")), Some(Duration::from_secs(30)));
        assert_eq!(parse_retry_after(Some("0")), Some(Duration::ZERO));
        assert_eq!(parse_retry_after(Some("1.5")), Some(Duration::from_millis(1500)));
        assert_eq!(parse_retry_after(Some("-5")), None);
        assert_eq!(parse_retry_after(Some("inf")), None);
        assert_eq!(parse_retry_after(Some("")), None);
        assert_eq!(parse_retry_after(None), None);
        assert_eq!(parse_retry_after(Some("soon")), None);
    }

    #[test]
    fn test_retry_after_http_date() {
        let now = fixed_now();
        assert_eq!(
            parse_retry_after_at(Some("Wed, 21 Oct 2015 07:28:10 GMT"), now),
            Some(Duration::from_secs(10))
        );
        assert_eq!(
            parse_retry_after_at(Some("Wed, 21 Oct 2015 07:27:00 GMT"), now),
            Some(Duration::ZERO)
        );
        assert_eq!(
            parse_retry_after_at(Some("2015-10-21T07:28:02.500Z"), now),
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (400, ErrorKind::Validation, 400),
            (422, ErrorKind::Validation, 422),
            (401, ErrorKind::Unauthorized, 401),
            (403, ErrorKind::Forbidden, 403),
            (404, ErrorKind::NotFound, 404),
            (429, ErrorKind::RateLimit, 429),
            (500, ErrorKind::Server, 500),
            (503, ErrorKind::Server, 503),
            (418, ErrorKind::Connection, 503),
        ];
        for (status, kind, code) in cases {
            let err = classify_status(status, None, None);
            assert_eq!(err.kind(), kind, "status {status}");
            assert_eq!(err.status_code(), code, "status {status}");
        }
        assert_eq!(classify_status(409, None, None).message(), "Unexpected HTTP 409");
    }

    #[test]
    fn test_rate_limit_carries_retry_after() {
        let err = classify_status(429, None, Some("7"));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_response_body_becomes_details() {
        let response = HttpResponse::new(422, r#"{"error":"name is required"}"#);
        let err = classify_response(HttpMethod::Post, "/api/v1/clients", &response);
        assert_eq!(err.details(), Some(&json!({"error": "name is required"})));
        assert_eq!(
            err.source().map(|s| s.to_string()).as_deref(),
            Some("POST /api/v1/clients failed with HTTP 422")
        );

        let html = HttpResponse::new(502, "<html>bad gateway</html>");
        assert!(classify_response(HttpMethod::Get, "/", &html).details().is_none());
    }

    #[test]
    fn test_network_failure_is_connection_error() {
        let err = classify_fetch_error(FetchError::network("connection refused"));
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert_eq!(err.status_code(), 503);
        assert!(err.source().is_some());
    }
}
