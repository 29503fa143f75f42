//! Resilience patterns for outbound calls
//!
//! - **Rate limiting**: a sliding-window limiter bounding request rate
//! - **Retry policy**: retry decisions with `Retry-After` support and
//!   exponential backoff
//!
//! Both are transport-agnostic; the HTTP client in `assembly-infra` wires
//! them into its request loop.

pub mod rate_limiter;
pub mod retry;

pub use rate_limiter::{SlidingWindowConfig, SlidingWindowConfigBuilder, SlidingWindowRateLimiter};
pub use retry::{AttemptFailure, BackoffStrategy, RetryDecision, RetryPolicy, RetryPolicyBuilder};
