//! Common utilities shared across the Assembly SDK crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: error classification, validation and JSON schemas
//! - `runtime`: token cryptography and resilience (rate limiting, retry)
//! - `test-utils`: everything needed by downstream test suites

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;
#[cfg(feature = "foundation")]
pub mod validation;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod crypto;
#[cfg(feature = "runtime")]
pub mod resilience;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use crypto::{CryptoError, DerivedKey, TokenCipher};
#[cfg(feature = "foundation")]
pub use error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
#[cfg(feature = "runtime")]
pub use resilience::{
    AttemptFailure, BackoffStrategy, RetryDecision, RetryPolicy, SlidingWindowConfig,
    SlidingWindowRateLimiter,
};
#[cfg(feature = "foundation")]
pub use validation::{FieldError, Schema, ValidationError, ValidationResult, Validator};
