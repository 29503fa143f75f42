//! Transport retry and rate-limit timing with an in-process fetch
//!
//! Time is paused, so delays are asserted exactly.

#[path = "support.rs"]
mod support;

use std::sync::Arc;
use std::time::Duration;

use assembly_core::{FetchError, HttpResponse};
use assembly_domain::ErrorKind;
use assembly_infra::api::RequestOptions;
use futures::future::join_all;
use serde_json::Value;
use support::{transport_with, MockFetch};
use tokio::time::Instant;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn test_backoff_doubles_between_attempts() {
    let fetch = MockFetch::new()
        .respond(HttpResponse::new(500, ""))
        .respond(HttpResponse::new(500, ""))
        .respond(HttpResponse::new(200, "[]"))
        .into_arc();
    let transport = transport_with(fetch.clone());

    let start = Instant::now();
    let body: Value = transport.get("v1/clients", &RequestOptions::new()).await.unwrap();
    assert_eq!(body, Value::Array(Vec::new()));
    assert_eq!(fetch.offsets_from(start), vec![ms(0), ms(300), ms(900)]);
}

#[tokio::test(start_paused = true)]
async fn test_retry_after_header_sets_delay() {
    let fetch = MockFetch::new()
        .respond(HttpResponse::new(429, "").with_header("Retry-After", "2"))
        .into_arc();
    let transport = transport_with(fetch.clone());

    let start = Instant::now();
    let _: Value = transport.get("v1/clients", &RequestOptions::new()).await.unwrap();
    assert_eq!(fetch.offsets_from(start), vec![ms(0), ms(2000)]);
}

#[tokio::test(start_paused = true)]
async fn test_network_failures_become_connection_error() {
    let fetch = MockFetch::new()
        .fail(FetchError::network("connection reset"))
        .fail(FetchError::Timeout)
        .fail(FetchError::network("connection refused"))
        .into_arc();
    let transport = transport_with(fetch.clone());

    let err = transport.get::<Value>("v1/clients", &RequestOptions::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(err.status_code(), 503);
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(fetch.attempts(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_payload_too_large_without_retry_after_is_not_retried() {
    let fetch = MockFetch::new().respond(HttpResponse::new(413, "")).into_arc();
    let transport = transport_with(fetch.clone());

    let err = transport
        .post::<_, Value>("v1/files", &serde_json::json!({"blob": "x"}), &RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(fetch.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_requests_over_the_limit_wait_for_the_window() {
    let fetch = MockFetch::new().into_arc();
    let transport = Arc::new(transport_with(fetch.clone()));

    let start = Instant::now();
    let calls = (0..21).map(|i| {
        let transport = Arc::clone(&transport);
        async move {
            transport.get::<Value>(&format!("v1/clients/c{i}"), &RequestOptions::new()).await
        }
    });
    let results = join_all(calls).await;

    assert!(results.iter().all(Result::is_ok));
    let mut offsets = fetch.offsets_from(start);
    offsets.sort();
    assert_eq!(offsets.len(), 21);
    assert_eq!(offsets[19], Duration::ZERO);
    assert!(offsets[20] >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_every_attempt_takes_a_permit() {
    let fetch = MockFetch::new()
        .respond(HttpResponse::new(503, ""))
        .respond(HttpResponse::new(503, ""))
        .into_arc();
    let transport = assembly_infra::api::Transport::new(
        assembly_infra::api::TransportOptions::new("ws1/k1", "1.0.0")
            .with_requests_per_second(1)
            .with_retry_backoff(ms(10))
            .with_fetch(fetch.clone()),
    )
    .unwrap();

    let start = Instant::now();
    let _: Value = transport.get("v1/clients", &RequestOptions::new()).await.unwrap();
    assert_eq!(fetch.offsets_from(start), vec![ms(0), ms(1000), ms(2000)]);
}

#[tokio::test(start_paused = true)]
async fn test_requests_carry_auth_headers() {
    let fetch = MockFetch::new().into_arc();
    let transport = transport_with(fetch.clone());

    let _: Value = transport
        .get("/v1/clients", &RequestOptions::new().param("companyId", "co1"))
        .await
        .unwrap();

    let request = &fetch.requests()[0].request;
    assert_eq!(request.url.as_str(), "https://api.test/api/v1/clients?companyId=co1");
    assert_eq!(request.header("x-api-key"), Some("ws1/k1"));
    assert_eq!(request.header("X-Assembly-SDK-Version"), Some("1.0.0"));
    assert_eq!(request.header("Content-Type"), None);
}
