//! Token payload types
//!
//! A [`TokenPayload`] is the decrypted session descriptor carried by an
//! Assembly token. It identifies either a client (portal) user through
//! `clientId` + `companyId`, or an internal (team) user through
//! `internalUserId`. Nothing forbids a payload from carrying both.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Decrypted session descriptor.
///
/// Fields are declared in the order the Assembly backend serializes them, so
/// `serde_json::to_string` produces the same bytes for the same payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    /// API root override for this session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
    /// Appended to the compound API key when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    pub workspace_id: String,
}

impl TokenPayload {
    /// Payload for a client (portal) user
    pub fn client(
        workspace_id: impl Into<String>,
        client_id: impl Into<String>,
        company_id: impl Into<String>,
    ) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            client_id: Some(client_id.into()),
            company_id: Some(company_id.into()),
            ..Self::default()
        }
    }

    /// Payload for an internal (team) user
    pub fn internal_user(
        workspace_id: impl Into<String>,
        internal_user_id: impl Into<String>,
    ) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            internal_user_id: Some(internal_user_id.into()),
            ..Self::default()
        }
    }

    /// Set `tokenId`
    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = Some(token_id.into());
        self
    }

    /// Set `baseUrl`
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Both `clientId` and `companyId` are present
    pub fn is_client(&self) -> bool {
        self.client_id.is_some() && self.company_id.is_some()
    }

    /// `internalUserId` is present
    pub fn is_internal_user(&self) -> bool {
        self.internal_user_id.is_some()
    }

    /// The payload identifies at least one kind of user
    pub fn has_valid_scope(&self) -> bool {
        self.is_internal_user() || self.is_client()
    }
}

/// A payload known to carry `clientId` and `companyId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClientTokenPayload(TokenPayload);

impl ClientTokenPayload {
    pub fn client_id(&self) -> &str {
        self.0.client_id.as_deref().unwrap_or_default()
    }

    pub fn company_id(&self) -> &str {
        self.0.company_id.as_deref().unwrap_or_default()
    }

    /// Unwrap into the general payload
    pub fn into_inner(self) -> TokenPayload {
        self.0
    }
}

impl TryFrom<TokenPayload> for ClientTokenPayload {
    type Error = TokenPayload;

    fn try_from(payload: TokenPayload) -> Result<Self, Self::Error> {
        if payload.is_client() {
            Ok(Self(payload))
        } else {
            Err(payload)
        }
    }
}

impl Deref for ClientTokenPayload {
    type Target = TokenPayload;

    fn deref(&self) -> &TokenPayload {
        &self.0
    }
}

/// A payload known to carry `internalUserId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InternalUserTokenPayload(TokenPayload);

impl InternalUserTokenPayload {
    pub fn internal_user_id(&self) -> &str {
        self.0.internal_user_id.as_deref().unwrap_or_default()
    }

    /// Unwrap into the general payload
    pub fn into_inner(self) -> TokenPayload {
        self.0
    }
}

impl TryFrom<TokenPayload> for InternalUserTokenPayload {
    type Error = TokenPayload;

    fn try_from(payload: TokenPayload) -> Result<Self, Self::Error> {
        if payload.is_internal_user() {
            Ok(Self(payload))
        } else {
            Err(payload)
        }
    }
}

impl Deref for InternalUserTokenPayload {
    type Target = TokenPayload;

    fn deref(&self) -> &TokenPayload {
        &self.0
    }
}
