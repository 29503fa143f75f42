//! Sliding-window rate limiting for outbound requests
//!
//! [`SlidingWindowRateLimiter`] grants at most `max_requests` permits in any
//! rolling `window`. Callers that arrive while the window is full wait until
//! the oldest permit ages out. Waiters are admitted in arrival order and the
//! backlog is unbounded.
//!
//! Timing uses `tokio::time::Instant`, so tests can drive the limiter with a
//! paused clock.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::error::{CommonError, CommonResult};

/// Configuration for the sliding-window limiter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindowConfig {
    /// Maximum permits granted inside one window
    pub max_requests: u32,
    /// Length of the rolling window
    pub window: Duration,
}

impl Default for SlidingWindowConfig {
    fn default() -> Self {
        Self { max_requests: 20, window: Duration::from_secs(1) }
    }
}

impl SlidingWindowConfig {
    /// Create a new configuration builder
    pub fn builder() -> SlidingWindowConfigBuilder {
        SlidingWindowConfigBuilder::new()
    }

    /// `max_requests` permits per second
    pub fn per_second(max_requests: u32) -> Self {
        Self { max_requests, window: Duration::from_secs(1) }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CommonResult<()> {
        if self.max_requests == 0 {
            return Err(CommonError::config_field("max_requests", "must be greater than 0"));
        }
        if self.window.is_zero() {
            return Err(CommonError::config_field("window", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for SlidingWindowConfig
#[derive(Debug, Default)]
pub struct SlidingWindowConfigBuilder {
    config: SlidingWindowConfig,
}

impl SlidingWindowConfigBuilder {
    /// Start from the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Permits per window
    pub fn max_requests(mut self, max_requests: u32) -> Self {
        self.config.max_requests = max_requests;
        self
    }

    /// Window length
    pub fn window(mut self, window: Duration) -> Self {
        self.config.window = window;
        self
    }

    /// Validate and build
    pub fn build(self) -> CommonResult<SlidingWindowConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Sliding-window rate limiter
///
/// Clones share the same window. Create a new limiter for state that must
/// not be shared.
///
/// # Examples
///
/// ```rust
/// use assembly_common::resilience::{SlidingWindowConfig, SlidingWindowRateLimiter};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let limiter = SlidingWindowRateLimiter::new(SlidingWindowConfig::per_second(20))?;
/// limiter.acquire().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SlidingWindowRateLimiter {
    config: SlidingWindowConfig,
    granted: Arc<Mutex<VecDeque<Instant>>>,
}

impl SlidingWindowRateLimiter {
    /// Create a limiter from a validated configuration
    pub fn new(config: SlidingWindowConfig) -> CommonResult<Self> {
        config.validate()?;
        let capacity = config.max_requests as usize;
        Ok(Self { config, granted: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))) })
    }

    /// Limiter configuration
    pub fn config(&self) -> &SlidingWindowConfig {
        &self.config
    }

    /// Wait for a permit.
    ///
    /// The lock is held while waiting, so callers are admitted one at a time
    /// in the order they called `acquire`.
    pub async fn acquire(&self) {
        let mut granted = self.granted.lock().await;
        loop {
            let now = Instant::now();
            self.evict_expired(&mut granted, now);

            if granted.len() < self.config.max_requests as usize {
                granted.push_back(now);
                return;
            }

            if let Some(&oldest) = granted.front() {
                let ready_at = oldest + self.config.window;
                debug!(
                    wait_ms = ready_at.saturating_duration_since(now).as_millis() as u64,
                    in_window = granted.len(),
                    "rate limit window full, waiting for a permit"
                );
                sleep_until(ready_at).await;
            }
        }
    }

    /// Take a permit if one is free right now.
    ///
    /// Returns `false` when the window is full or another caller is waiting.
    pub fn try_acquire(&self) -> bool {
        let Ok(mut granted) = self.granted.try_lock() else {
            return false;
        };
        let now = Instant::now();
        self.evict_expired(&mut granted, now);
        if granted.len() < self.config.max_requests as usize {
            granted.push_back(now);
            true
        } else {
            false
        }
    }

    /// Permits that could be granted immediately
    pub async fn available_permits(&self) -> u32 {
        let mut granted = self.granted.lock().await;
        self.evict_expired(&mut granted, Instant::now());
        self.config.max_requests.saturating_sub(granted.len() as u32)
    }

    fn evict_expired(&self, granted: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&front) = granted.front() {
            if now.saturating_duration_since(front) >= self.config.window {
                granted.pop_front();
            } else {
                break;
            }
        }
    }
}
