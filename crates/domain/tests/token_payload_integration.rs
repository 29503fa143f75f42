//! Integration tests for token payload types and the error taxonomy
//!
//! Covers the JSON shape shared with the Assembly backend and how payloads,
//! refinements and errors behave together.

use std::time::Duration;

use assembly_common::error::ErrorClassification;
use assembly_domain::{
    AssemblyError, ClientTokenPayload, ErrorKind, InternalUserTokenPayload, SdkConfig,
    TokenPayload,
};

// ============================================================================
// TokenPayload Integration Tests
// ============================================================================

/// Payloads produced by the backend deserialize with every optional field
#[test]
fn test_full_payload_from_backend_json() -> anyhow::Result<()> {
    let json = r#"{
        "baseUrl": "https://eu.assembly.test/api",
        "clientId": "c1",
        "companyId": "co1",
        "notificationId": "n1",
        "tokenId": "t1",
        "workspaceId": "ws1"
    }"#;
    let payload: TokenPayload = serde_json::from_str(json)?;

    assert_eq!(payload.workspace_id, "ws1");
    assert_eq!(payload.base_url.as_deref(), Some("https://eu.assembly.test/api"));
    assert_eq!(payload.token_id.as_deref(), Some("t1"));
    assert_eq!(payload.notification_id.as_deref(), Some("n1"));
    assert!(payload.is_client());
    assert!(!payload.is_internal_user());
    Ok(())
}

/// Serialization follows the backend's key order
#[test]
fn test_serialization_key_order() -> anyhow::Result<()> {
    let payload = TokenPayload::internal_user("ws1", "iu1").with_token_id("t1");
    assert_eq!(
        serde_json::to_string(&payload)?,
        r#"{"internalUserId":"iu1","tokenId":"t1","workspaceId":"ws1"}"#
    );
    Ok(())
}

/// A payload carrying both scopes narrows to either refinement
#[test]
fn test_dual_scope_payload_narrows_both_ways() {
    let payload = TokenPayload {
        internal_user_id: Some("iu1".into()),
        ..TokenPayload::client("ws1", "c1", "co1")
    };

    let client = ClientTokenPayload::try_from(payload.clone()).expect("client scope");
    let internal = InternalUserTokenPayload::try_from(payload).expect("internal scope");

    assert_eq!(client.client_id(), "c1");
    assert_eq!(internal.internal_user_id(), "iu1");
    assert_eq!(client.workspace_id, internal.workspace_id);
}

/// Narrowing serializes exactly like the wrapped payload
#[test]
fn test_refinement_serializes_transparently() -> anyhow::Result<()> {
    let payload = TokenPayload::client("ws1", "c1", "co1");
    let client = ClientTokenPayload::try_from(payload.clone()).expect("client scope");
    assert_eq!(serde_json::to_value(&client)?, serde_json::to_value(&payload)?);
    Ok(())
}

// ============================================================================
// AssemblyError Integration Tests
// ============================================================================

/// Every kind has a stable name and default status
#[test]
fn test_error_kind_names() {
    assert_eq!(ErrorKind::RateLimit.to_string(), "AssemblyRateLimitError");
    assert_eq!(ErrorKind::ResponseParse.name(), "AssemblyResponseParseError");
    assert_eq!(AssemblyError::no_token().status_code(), 400);
    assert_eq!(AssemblyError::unauthorized(None).status_code(), 401);
}

/// Retry classification matches the transport's transient failures
#[test]
fn test_retryable_kinds() {
    let retryable = [ErrorKind::RateLimit, ErrorKind::Server, ErrorKind::Connection];
    for kind in retryable {
        assert!(AssemblyError::new(kind).is_retryable(), "{kind} should be retryable");
    }
    for kind in [ErrorKind::InvalidToken, ErrorKind::Forbidden, ErrorKind::ResponseParse] {
        assert!(!AssemblyError::new(kind).is_retryable(), "{kind} should not be retryable");
    }
    let limited = AssemblyError::rate_limit(Some(Duration::from_secs(12)));
    assert_eq!(limited.retry_after(), Some(Duration::from_secs(12)));
}

/// Error kinds round-trip through serde for structured logs
#[test]
fn test_error_kind_serde() -> anyhow::Result<()> {
    let json = serde_json::to_string(&ErrorKind::NotFound)?;
    assert_eq!(json, r#""NotFound""#);
    let kind: ErrorKind = serde_json::from_str(&json)?;
    assert_eq!(kind, ErrorKind::NotFound);
    Ok(())
}

// ============================================================================
// SdkConfig Integration Tests
// ============================================================================

/// A missing key in the config surfaces as the SDK's MissingApiKey error
#[test]
fn test_config_without_key() {
    let err = SdkConfig::default().require_api_key().unwrap_err();
    assert!(err.is(ErrorKind::MissingApiKey));
    assert_eq!(err.message(), "Assembly API key is missing or empty");
}
