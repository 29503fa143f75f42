//! SDK configuration structures

use std::fmt;
use std::time::Duration;

use assembly_common::validation::{ValidationResult, Validator};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_REQUESTS_PER_SECOND, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_RETRY_COUNT,
    DEFAULT_TIMEOUT_SECS, SDK_VERSION,
};
use crate::errors::{AssemblyError, Result};

/// Settings shared by the SDK client and its transport.
///
/// Every field except `api_key` has a default, so partial TOML/JSON files
/// deserialize.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Raw Assembly API key
    pub api_key: Option<String>,
    /// API root that request paths are joined onto
    pub base_url: String,
    /// Value of the `X-Assembly-SDK-Version` header
    pub sdk_version: String,
    /// Retries after the first attempt
    pub retry_count: u32,
    /// Sliding-window rate limit
    pub requests_per_second: u32,
    /// Per-attempt request timeout in seconds
    pub timeout_secs: u64,
    /// Delay before the first retry in milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            sdk_version: SDK_VERSION.to_string(),
            retry_count: DEFAULT_RETRY_COUNT,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

impl fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("sdk_version", &self.sdk_version)
            .field("retry_count", &self.retry_count)
            .field("requests_per_second", &self.requests_per_second)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

impl SdkConfig {
    /// Defaults with the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self { api_key: Some(api_key.into()), ..Self::default() }
    }

    /// The API key, or `MissingApiKey` when it is absent or blank
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AssemblyError::missing_api_key()),
        }
    }

    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Initial retry backoff
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Check value ranges (the API key is checked by [`Self::require_api_key`])
    pub fn validate(&self) -> ValidationResult<()> {
        let mut validator = Validator::new();
        validator.validate_not_empty("base_url", &self.base_url)?;
        validator.validate_not_empty("sdk_version", &self.sdk_version)?;
        if self.requests_per_second == 0 {
            validator.add_error("requests_per_second", "must be greater than 0");
        }
        if self.timeout_secs == 0 {
            validator.add_error("timeout_secs", "must be greater than 0");
        }
        validator.finalize()
    }
}
