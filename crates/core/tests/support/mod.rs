//! Shared helpers for assembly-core integration tests.

#![allow(dead_code)]

use assembly_common::testing::fixtures;
use assembly_domain::TokenPayload;

/// Client payload built from the fixture ids.
pub fn client_payload() -> TokenPayload {
    TokenPayload::client(fixtures::WORKSPACE_ID, fixtures::CLIENT_ID, fixtures::COMPANY_ID)
}

/// Internal-user payload built from the fixture ids.
pub fn internal_user_payload() -> TokenPayload {
    TokenPayload::internal_user(fixtures::WORKSPACE_ID, fixtures::INTERNAL_USER_ID)
}

/// Payloads covering every optional field at least once.
pub fn representative_payloads() -> Vec<TokenPayload> {
    vec![
        client_payload(),
        internal_user_payload(),
        client_payload().with_token_id(fixtures::TOKEN_ID),
        internal_user_payload().with_base_url(fixtures::BASE_URL),
        TokenPayload {
            notification_id: Some("nt-1".into()),
            internal_user_id: Some(fixtures::INTERNAL_USER_ID.into()),
            ..client_payload()
        },
    ]
}
