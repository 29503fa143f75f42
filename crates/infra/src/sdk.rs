//! Client facade tying the token codec to the transport.
//!
//! ```no_run
//! use assembly_infra::AssemblyClient;
//! use assembly_infra::api::RequestOptions;
//!
//! # async fn example(token: &str) -> assembly_domain::Result<()> {
//! let client = AssemblyClient::builder().api_key("k1").token(token).build()?;
//! let client_payload = client.ensure_client()?;
//! let me: serde_json::Value = client
//!     .transport()
//!     .get(&format!("v1/clients/{}", client_payload.client_id()), &RequestOptions::new())
//!     .await?;
//! # let _ = me;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use assembly_core::{build_compound_key, ensure_is_client, ensure_is_internal_user, parse_token, Fetch};
use assembly_domain::{
    AssemblyError, ClientTokenPayload, InternalUserTokenPayload, Result, SdkConfig, TokenPayload,
};
use tracing::{debug, info};

use crate::api::{Transport, TransportOptions};

/// An authenticated Assembly API client.
#[derive(Debug)]
pub struct AssemblyClient {
    payload: Option<TokenPayload>,
    transport: Arc<Transport>,
}

impl AssemblyClient {
    pub fn builder() -> AssemblyClientBuilder {
        AssemblyClientBuilder::default()
    }

    /// Decoded session token, when one was supplied
    pub fn payload(&self) -> Option<&TokenPayload> {
        self.payload.as_ref()
    }

    /// Shared transport for issuing requests
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// The token as a client payload.
    ///
    /// # Errors
    /// `NoToken` without a token, `Unauthorized` when it lacks client fields.
    pub fn ensure_client(&self) -> Result<ClientTokenPayload> {
        ensure_is_client(self.require_payload()?.clone())
    }

    /// The token as an internal-user payload.
    ///
    /// # Errors
    /// `NoToken` without a token, `Unauthorized` when it lacks an
    /// `internalUserId`.
    pub fn ensure_internal_user(&self) -> Result<InternalUserTokenPayload> {
        ensure_is_internal_user(self.require_payload()?.clone())
    }

    fn require_payload(&self) -> Result<&TokenPayload> {
        self.payload.as_ref().ok_or_else(AssemblyError::no_token)
    }
}

/// Builder for [`AssemblyClient`].
#[derive(Default)]
pub struct AssemblyClientBuilder {
    config: SdkConfig,
    token: Option<String>,
    fetch: Option<Arc<dyn Fetch>>,
}

impl AssemblyClientBuilder {
    /// Transport settings; an API key set here is kept unless
    /// [`Self::api_key`] overrides it
    pub fn config(mut self, config: SdkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Encrypted session token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Send requests through `fetch` instead of reqwest
    pub fn fetch(mut self, fetch: Arc<dyn Fetch>) -> Self {
        self.fetch = Some(fetch);
        self
    }

    /// Validate credentials and settings, decode the token, and build the
    /// transport.
    ///
    /// # Errors
    /// - `MissingApiKey` when the API key is absent or blank
    /// - `Config` when the settings are out of range
    /// - `NoToken` / `InvalidToken` when a supplied token does not decode
    pub fn build(self) -> Result<AssemblyClient> {
        let api_key = self.config.require_api_key()?;
        self.config.validate().map_err(|errors| {
            AssemblyError::config(format!("Invalid SDK configuration: {errors}"))
                .with_source(errors)
        })?;

        let payload = match self.token.as_deref() {
            Some(token) => Some(parse_token(Some(token), api_key)?),
            None => None,
        };

        let compound_key = match &payload {
            Some(payload) => build_compound_key(api_key, payload),
            None => api_key.to_string(),
        };

        let mut options = TransportOptions::from_config(compound_key, &self.config);
        if let Some(base_url) = payload.as_ref().and_then(|p| p.base_url.as_deref()) {
            debug!(base_url, "using base URL from token");
            options = options.with_base_url(base_url);
        }
        if let Some(fetch) = self.fetch {
            options = options.with_fetch(fetch);
        }

        let transport = Transport::new(options)?;
        info!(has_token = payload.is_some(), "Assembly client initialized");
        Ok(AssemblyClient { payload, transport: Arc::new(transport) })
    }
}

#[cfg(test)]
mod tests {
    use assembly_common::testing::fixtures;
    use assembly_domain::ErrorKind;

    use super::*;

    #[test]
    fn missing_api_key_is_rejected() {
        let err = AssemblyClient::builder().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingApiKey);

        let err = AssemblyClient::builder().api_key("   ").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingApiKey);
    }

    #[test]
    fn invalid_settings_are_config_errors() {
        let config = SdkConfig { requests_per_second: 0, ..SdkConfig::with_api_key("k1") };
        let err = AssemblyClient::builder().config(config).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.message().contains("requests_per_second"));
    }

    #[test]
    fn without_token_there_is_no_payload() {
        let client = AssemblyClient::builder().api_key("k1").build().unwrap();
        assert!(client.payload().is_none());
        assert_eq!(client.ensure_client().unwrap_err().kind(), ErrorKind::NoToken);
        assert_eq!(client.transport().base_url().as_str(), "https://app.assembly.com/api/");
    }

    #[test]
    fn token_base_url_overrides_config() {
        let client = AssemblyClient::builder()
            .api_key(fixtures::TEST_API_KEY)
            .token(fixtures::BASE_URL_TOKEN)
            .build()
            .unwrap();
        assert_eq!(client.transport().base_url().as_str(), "https://staging-api.assembly.com/");
        assert!(client.ensure_internal_user().is_ok());
        assert_eq!(client.ensure_client().unwrap_err().kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn wrong_key_fails_closed() {
        let err = AssemblyClient::builder()
            .api_key("not-the-key")
            .token(fixtures::CLIENT_TOKEN)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);
    }
}
