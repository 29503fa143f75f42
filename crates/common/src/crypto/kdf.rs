//! Deterministic cipher key derivation from an Assembly API key.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::error::{CryptoError, CryptoResult};

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of the derived AES-128 key.
pub const KEY_LEN: usize = 16;

/// AES-128 key derived from an API key.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Lower-case hex rendering of the key
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DerivedKey").field(&"[REDACTED]").finish()
    }
}

/// Derive the token cipher key: the first 16 bytes of an HMAC-SHA256
/// keyed with `api_key` over an empty message.
///
/// The same API key always yields the same key.
pub fn derive_key(api_key: &str) -> CryptoResult<DerivedKey> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(api_key.as_bytes())
        .map_err(|_| CryptoError::InvalidKeyLength)?;
    let digest = mac.finalize().into_bytes();

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&digest[..KEY_LEN]);
    Ok(DerivedKey(key))
}
