//! HTTP plumbing shared by the API layer.

pub mod client;
pub mod fetch;

pub use client::{HttpClient, HttpClientBuilder};
pub use fetch::{ReqwestFetch, ReqwestFetchBuilder};
