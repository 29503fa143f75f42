//! SDK constants
//!
//! Centralized location for defaults and wire names shared by the token
//! codec and the HTTP transport.

/// Version reported in the `X-Assembly-SDK-Version` header by default.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

// Transport defaults
/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://app.assembly.com/api";
/// Permits per rate-limit window.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 20;
/// Retries after the first attempt.
pub const DEFAULT_RETRY_COUNT: u32 = 2;
/// Per-attempt request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Delay before the first retry; doubles on each further retry.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 300;
/// Length of the rate-limit window.
pub const RATE_LIMIT_WINDOW_MS: u64 = 1000;
/// Upper bound on a server-provided `Retry-After` delay.
pub const MAX_RETRY_AFTER_SECS: u64 = 60;

// Header names
/// Carries the compound key.
pub const HEADER_API_KEY: &str = "X-API-Key";
/// Carries the SDK version.
pub const HEADER_SDK_VERSION: &str = "X-Assembly-SDK-Version";
/// Server back-off hint on 413, 429 and 503 responses.
pub const HEADER_RETRY_AFTER: &str = "Retry-After";
/// Content type of request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

// Retry classification
/// Statuses the transport retries.
pub const RETRYABLE_STATUS_CODES: [u16; 7] = [408, 413, 429, 500, 502, 503, 504];
/// Statuses whose `Retry-After` header is honoured.
pub const RETRY_AFTER_STATUS_CODES: [u16; 3] = [413, 429, 503];
