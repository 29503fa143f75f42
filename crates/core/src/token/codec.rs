//! Token codec
//!
//! Decrypts and validates tokens handed to an app by the Assembly dashboard,
//! creates tokens for tests and tooling, and builds the compound key the
//! transport sends as `X-API-Key`.
//!
//! ```rust
//! use assembly_core::{build_compound_key, create_token, parse_token};
//! use assembly_domain::TokenPayload;
//!
//! let payload = TokenPayload::client("ws1", "c1", "co1");
//! let token = create_token(&payload, "k1")?;
//! let parsed = parse_token(Some(&token), "k1")?;
//! assert_eq!(parsed, payload);
//! assert_eq!(build_compound_key("k1", &parsed), "ws1/k1");
//! # Ok::<(), assembly_domain::AssemblyError>(())
//! ```

use assembly_common::crypto::TokenCipher;
use assembly_common::validation::Schema;
use assembly_domain::{AssemblyError, ErrorKind, Result, TokenPayload};
use serde_json::Value;
use tracing::debug;

use super::schema::TokenPayloadSchema;

const DECRYPT_FAILED: &str = "Failed to decrypt token; verify the API key and token are correct";
const NOT_JSON: &str = "Decrypted token is not valid JSON";
const SCHEMA_FAILED: &str = "Token payload failed schema validation";

/// Token encoder/decoder bound to one API key.
///
/// Derives the cipher key once, so prefer it over the free functions when
/// handling many tokens for the same key.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    cipher: TokenCipher,
}

impl TokenCodec {
    /// Codec for `api_key`
    pub fn new(api_key: &str) -> Result<Self> {
        let cipher = TokenCipher::new(api_key)
            .map_err(|e| AssemblyError::invalid_token(DECRYPT_FAILED, e))?;
        Ok(Self { cipher })
    }

    /// Decrypt and validate `token`.
    ///
    /// # Errors
    /// - `NoToken` when `token` is `None` or empty
    /// - `InvalidToken` when decryption, JSON parsing or schema validation
    ///   fails; the upstream error is kept as the source
    pub fn parse(&self, token: Option<&str>) -> Result<TokenPayload> {
        let token = require_token(token)?;
        let decrypted = self.decrypt(token)?;
        validate_payload(&decrypted)
    }

    /// Like [`Self::parse`] for a token taken from untyped input such as a
    /// query string decoded to JSON. `null` counts as missing; any other
    /// non-string is `InvalidToken`.
    pub fn parse_value(&self, token: &Value) -> Result<TokenPayload> {
        match token {
            Value::Null => Err(AssemblyError::no_token()),
            Value::String(s) => self.parse(Some(s)),
            other => Err(not_a_string(other)),
        }
    }

    /// Validate `payload`, serialize it and encrypt it under a fresh IV.
    ///
    /// Two calls with the same payload yield different tokens.
    pub fn create(&self, payload: &TokenPayload) -> Result<String> {
        let value = serde_json::to_value(payload)
            .map_err(|e| AssemblyError::invalid_token(SCHEMA_FAILED, e))?;
        let validated = TokenPayloadSchema
            .safe_parse(&value)
            .map_err(|e| AssemblyError::invalid_token(SCHEMA_FAILED, e))?;
        let json = serde_json::to_string(&validated)
            .map_err(|e| AssemblyError::invalid_token(SCHEMA_FAILED, e))?;

        self.cipher
            .encrypt_to_hex(&json)
            .map_err(|e| AssemblyError::invalid_token("Failed to encrypt token", e))
    }

    fn decrypt(&self, token: &str) -> Result<String> {
        self.cipher.decrypt_from_hex(token).map_err(|e| {
            debug!(stage = "decrypt", error = %e, "token rejected");
            AssemblyError::invalid_token(DECRYPT_FAILED, e)
        })
    }
}

fn require_token(token: Option<&str>) -> Result<&str> {
    match token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AssemblyError::no_token()),
    }
}

fn validate_payload(decrypted: &str) -> Result<TokenPayload> {
    let value: Value = serde_json::from_str(decrypted).map_err(|e| {
        debug!(stage = "json", "token rejected");
        AssemblyError::invalid_token(NOT_JSON, e)
    })?;

    TokenPayloadSchema.safe_parse(&value).map_err(|e| {
        debug!(stage = "schema", issues = e.error_count(), "token rejected");
        AssemblyError::invalid_token(SCHEMA_FAILED, e)
    })
}

fn not_a_string(value: &Value) -> AssemblyError {
    let type_name = match value {
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
    };
    AssemblyError::new(ErrorKind::InvalidToken)
        .with_message(format!("Expected token to be a string, got {type_name}"))
}

/// Decrypt and validate `token` with the key derived from `api_key`.
///
/// See [`TokenCodec::parse`] for the error contract.
pub fn parse_token(token: Option<&str>, api_key: &str) -> Result<TokenPayload> {
    let token = require_token(token)?;
    TokenCodec::new(api_key)?.parse(Some(token))
}

/// Decrypt and validate a token held in an untyped JSON value.
pub fn parse_token_value(token: &Value, api_key: &str) -> Result<TokenPayload> {
    match token {
        Value::Null => Err(AssemblyError::no_token()),
        Value::String(s) => parse_token(Some(s), api_key),
        other => Err(not_a_string(other)),
    }
}

/// Encrypt `payload` into a token for `api_key`.
pub fn create_token(payload: &TokenPayload, api_key: &str) -> Result<String> {
    TokenCodec::new(api_key)?.create(payload)
}

/// The credential sent as `X-API-Key`:
/// `{workspaceId}/{apiKey}/{tokenId}`, or `{workspaceId}/{apiKey}` when the
/// payload has no (or an empty) `tokenId`.
pub fn build_compound_key(api_key: &str, payload: &TokenPayload) -> String {
    match payload.token_id.as_deref().filter(|id| !id.is_empty()) {
        Some(token_id) => format!("{}/{}/{}", payload.workspace_id, api_key, token_id),
        None => format!("{}/{}", payload.workspace_id, api_key),
    }
}
