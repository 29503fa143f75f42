//! Shared helpers for infra integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use assembly_core::{Fetch, FetchError, HttpRequest, HttpResponse};
use assembly_infra::api::{Transport, TransportOptions};
use async_trait::async_trait;
use tokio::time::Instant;

/// A request seen by [`MockFetch`] and when it arrived.
#[derive(Clone)]
pub struct RecordedRequest {
    pub request: HttpRequest,
    pub at: Instant,
}

/// In-process [`Fetch`] that replays scripted outcomes.
///
/// Once the script is exhausted every call gets the fallback response
/// (`200 {}` unless changed with [`MockFetch::otherwise`]).
pub struct MockFetch {
    script: Mutex<VecDeque<Result<HttpResponse, FetchError>>>,
    fallback: HttpResponse,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockFetch {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: HttpResponse::new(200, "{}"),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response
    pub fn respond(self, response: HttpResponse) -> Self {
        self.script.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a network failure
    pub fn fail(self, error: FetchError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Response used after the script runs out
    pub fn otherwise(mut self, response: HttpResponse) -> Self {
        self.fallback = response;
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Arrival time of each attempt relative to `start`
    pub fn offsets_from(&self, start: Instant) -> Vec<std::time::Duration> {
        self.requests().iter().map(|r| r.at.duration_since(start)).collect()
    }
}

#[async_trait]
impl Fetch for MockFetch {
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(RecordedRequest { request, at: Instant::now() });
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Transport over `fetch` with the default retry and rate settings.
pub fn transport_with(fetch: Arc<MockFetch>) -> Transport {
    Transport::new(
        TransportOptions::new("ws1/k1", "1.0.0")
            .with_base_url("https://api.test/api")
            .with_fetch(fetch),
    )
    .unwrap()
}
