//! Retry policy for HTTP-style operations
//!
//! [`RetryPolicy`] decides whether a failed attempt is retried and how long
//! to wait first. It owns no I/O: callers run the attempt loop and consult
//! [`RetryPolicy::decide`] after each failure.
//!
//! Defaults:
//! - 2 retries (3 attempts in total)
//! - retryable statuses 408, 413, 429, 500, 502, 503, 504; network failures
//!   are always retryable
//! - a `Retry-After` delay on 413, 429 and 503 is honoured, capped at 60 s
//! - otherwise exponential backoff `300 ms * 2^(retry - 1)`

use std::time::Duration;

use tracing::debug;

use crate::error::{CommonError, CommonResult};

/// Decision for whether to retry an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the given delay
    RetryAfter(Duration),
    /// Don't retry the operation
    Stop,
}

/// Backoff strategy for calculating retry delays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// Fixed delay between retries
    Fixed(Duration),
    /// `initial_delay * 2^(retry - 1)`, capped at `max_delay`
    Exponential {
        /// Delay before the first retry
        initial_delay: Duration,
        /// Upper bound for any computed delay
        max_delay: Duration,
    },
}

impl BackoffStrategy {
    /// Delay before retry number `retry` (1-based)
    pub fn calculate_delay(&self, retry: u32) -> Duration {
        match self {
            BackoffStrategy::Fixed(delay) => *delay,
            BackoffStrategy::Exponential { initial_delay, max_delay } => {
                let exponent = retry.saturating_sub(1).min(31);
                initial_delay.saturating_mul(1u32 << exponent).min(*max_delay)
            }
        }
    }
}

/// What went wrong on a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptFailure {
    /// No response was received
    Network,
    /// The server answered with a non-success status
    Status {
        /// HTTP status code
        status: u16,
        /// Parsed `Retry-After` header, if any
        retry_after: Option<Duration>,
    },
}

/// Retry configuration and decision logic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub limit: u32,
    /// Upper-case method names that may be retried
    pub methods: Vec<String>,
    /// Status codes that may be retried
    pub status_codes: Vec<u16>,
    /// Status codes whose `Retry-After` header is honoured
    pub after_status_codes: Vec<u16>,
    /// Cap applied to `Retry-After` delays
    pub max_retry_after: Duration,
    /// Delay used when no `Retry-After` applies
    pub backoff: BackoffStrategy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            limit: 2,
            methods: ["GET", "POST", "PATCH", "DELETE"]
                .into_iter()
                .map(String::from)
                .collect(),
            status_codes: vec![408, 413, 429, 500, 502, 503, 504],
            after_status_codes: vec![413, 429, 503],
            max_retry_after: Duration::from_secs(60),
            backoff: BackoffStrategy::Exponential {
                initial_delay: Duration::from_millis(300),
                max_delay: Duration::from_secs(60),
            },
        }
    }
}

impl RetryPolicy {
    /// Create a new policy builder
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self { limit: 0, ..Self::default() }
    }

    /// Total attempts including the first one
    pub fn max_attempts(&self) -> u32 {
        self.limit.saturating_add(1)
    }

    /// Whether requests with `method` may be retried at all
    pub fn allows_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }

    /// Decide what to do after attempt number `attempt` (1-based) failed
    pub fn decide(&self, method: &str, attempt: u32, failure: AttemptFailure) -> RetryDecision {
        if attempt > self.limit || !self.allows_method(method) {
            return RetryDecision::Stop;
        }

        match failure {
            AttemptFailure::Network => RetryDecision::RetryAfter(self.backoff.calculate_delay(attempt)),
            AttemptFailure::Status { status, retry_after } => {
                if !self.status_codes.contains(&status) {
                    return RetryDecision::Stop;
                }
                if self.after_status_codes.contains(&status) {
                    if let Some(after) = retry_after {
                        let delay = after.min(self.max_retry_after);
                        debug!(status, delay_ms = delay.as_millis() as u64, "honouring Retry-After");
                        return RetryDecision::RetryAfter(delay);
                    }
                    if status == 413 {
                        return RetryDecision::Stop;
                    }
                }
                RetryDecision::RetryAfter(self.backoff.calculate_delay(attempt))
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CommonResult<()> {
        if let Some(code) =
            self.status_codes.iter().chain(&self.after_status_codes).find(|c| !(400..=599).contains(*c))
        {
            return Err(CommonError::config_field(
                "status_codes",
                format!("{code} is not an HTTP error status"),
            ));
        }
        if self.max_retry_after.is_zero() {
            return Err(CommonError::config_field("max_retry_after", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for RetryPolicy
#[derive(Debug, Default)]
pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl RetryPolicyBuilder {
    /// Retries after the first attempt
    pub fn limit(mut self, limit: u32) -> Self {
        self.policy.limit = limit;
        self
    }

    /// Exponential backoff starting at `initial_delay`
    pub fn exponential_backoff(mut self, initial_delay: Duration) -> Self {
        self.policy.backoff =
            BackoffStrategy::Exponential { initial_delay, max_delay: Duration::from_secs(60) };
        self
    }

    /// Fixed delay between retries
    pub fn fixed_backoff(mut self, delay: Duration) -> Self {
        self.policy.backoff = BackoffStrategy::Fixed(delay);
        self
    }

    /// Cap applied to `Retry-After` delays
    pub fn max_retry_after(mut self, max: Duration) -> Self {
        self.policy.max_retry_after = max;
        self
    }

    /// Replace the retryable status codes
    pub fn status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.policy.status_codes = codes.into_iter().collect();
        self
    }

    /// Replace the statuses whose `Retry-After` header is honoured
    pub fn after_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.policy.after_status_codes = codes.into_iter().collect();
        self
    }

    /// Validate and build
    pub fn build(self) -> CommonResult<RetryPolicy> {
        self.policy.validate()?;
        Ok(self.policy)
    }
}
