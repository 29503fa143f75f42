//! Scope guards for token payloads
//!
//! A payload may satisfy both guards at once; neither treats that as an
//! error.

use assembly_domain::{
    AssemblyError, ClientTokenPayload, InternalUserTokenPayload, Result, TokenPayload,
};

const CLIENT_REQUIRED: &str = "This operation requires a client token (clientId + companyId), \
                               but the token does not contain client fields";
const INTERNAL_USER_REQUIRED: &str = "This operation requires an internal user token \
                                      (internalUserId), but the token does not contain an \
                                      internalUserId";

/// Whether `payload` identifies a client (portal) user
pub fn is_client_token(payload: &TokenPayload) -> bool {
    payload.is_client()
}

/// Whether `payload` identifies an internal (team) user
pub fn is_internal_user_token(payload: &TokenPayload) -> bool {
    payload.is_internal_user()
}

/// Narrow `payload` to a client payload, or fail with `Unauthorized`.
pub fn ensure_is_client(payload: TokenPayload) -> Result<ClientTokenPayload> {
    ClientTokenPayload::try_from(payload)
        .map_err(|_| AssemblyError::unauthorized(Some(CLIENT_REQUIRED.to_string())))
}

/// Narrow `payload` to an internal-user payload, or fail with `Unauthorized`.
pub fn ensure_is_internal_user(payload: TokenPayload) -> Result<InternalUserTokenPayload> {
    InternalUserTokenPayload::try_from(payload)
        .map_err(|_| AssemblyError::unauthorized(Some(INTERNAL_USER_REQUIRED.to_string())))
}
