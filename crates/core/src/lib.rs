//! # Assembly Core
//!
//! Token handling and transport ports - no network code.
//!
//! This crate contains:
//! - The token codec (`parse_token`, `create_token`, `build_compound_key`)
//! - Token guards narrowing a payload to client or internal-user scope
//! - The token payload schema and response-schema validation
//! - The [`Fetch`] port the transport sends requests through
//!
//! ## Architecture Principles
//! - Only depends on `assembly-common` and `assembly-domain`
//! - The HTTP stack is injected through the `Fetch` trait

pub mod schema;
pub mod token;
pub mod transport;

pub use schema::parse_response;
pub use token::{
    build_compound_key, create_token, ensure_is_client, ensure_is_internal_user,
    is_client_token, is_internal_user_token, parse_token, parse_token_value, TokenCodec,
    TokenPayloadSchema,
};
pub use transport::ports::{Fetch, FetchError, HttpMethod, HttpRequest, HttpResponse};
