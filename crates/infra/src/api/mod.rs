//! Assembly API access
//!
//! - [`errors`]: maps failed responses and network errors to
//!   [`AssemblyError`](assembly_domain::AssemblyError)
//! - [`transport`]: authenticated `get`/`post`/`patch`/`delete` over the
//!   retrying HTTP client

pub mod errors;
pub mod transport;

pub use errors::{
    classify_fetch_error, classify_response, classify_status, parse_retry_after,
    parse_retry_after_at, try_parse_body, HttpStatusError,
};
pub use transport::{RequestOptions, Transport, TransportOptions};
