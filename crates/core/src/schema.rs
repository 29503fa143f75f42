//! Response validation
//!
//! Any [`Schema`] can check an API response before it reaches the caller.
//! A mismatch becomes a `ResponseParse` error carrying the structured
//! failure and its pretty-printed summary.

use assembly_common::validation::Schema;
use assembly_domain::{AssemblyError, Result};
use serde_json::Value;
use tracing::warn;

/// Validate `value` against `schema`.
pub fn parse_response<S: Schema>(schema: &S, value: &Value) -> Result<S::Output> {
    schema.safe_parse(value).map_err(|errors| {
        warn!(issues = errors.error_count(), "response did not match schema");
        AssemblyError::response_parse(errors)
    })
}
