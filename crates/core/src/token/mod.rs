//! Assembly token handling
//!
//! Tokens are hex strings wrapping an AES-128-CBC encrypted JSON
//! [`TokenPayload`](assembly_domain::TokenPayload). The cipher itself lives in
//! `assembly_common::crypto`; this module adds the JSON layer, schema
//! validation and the SDK error mapping.

pub mod codec;
pub mod guards;
pub mod schema;

pub use codec::{build_compound_key, create_token, parse_token, parse_token_value, TokenCodec};
pub use guards::{ensure_is_client, ensure_is_internal_user, is_client_token, is_internal_user_token};
pub use schema::TokenPayloadSchema;
