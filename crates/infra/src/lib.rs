//! # Assembly Infrastructure
//!
//! Network-facing implementations for the Assembly SDK.
//!
//! This crate contains:
//! - The reqwest-backed [`Fetch`](assembly_core::Fetch) implementation
//! - The retrying, rate-limited HTTP client
//! - The ErrorClassifier and the [`Transport`] request interface
//! - The [`AssemblyClient`] facade tying tokens and transport together
//! - Configuration loading and tracing initialisation
//!
//! ## Architecture
//! - Implements ports defined in `assembly-core`
//! - Contains all impure code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod http;
pub mod observability;
pub mod sdk;

// Re-export commonly used items
pub use api::{
    classify_fetch_error, classify_response, parse_retry_after, RequestOptions, Transport,
    TransportOptions,
};
pub use config::ConfigError;
pub use http::{HttpClient, ReqwestFetch};
pub use observability::{init_tracing, LogFormat};
pub use sdk::{AssemblyClient, AssemblyClientBuilder};
