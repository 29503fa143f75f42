//! AES-128-CBC token cipher.
//!
//! Tokens travel as hex strings laid out as `IV (16 bytes) || ciphertext`,
//! where the ciphertext is the PKCS#7-padded plaintext encrypted under the
//! key from [`derive_key`](super::kdf::derive_key).
//!
//! Decryption runs two strategies in order:
//!
//! 1. [`PaddingStrategy::Native`]: the cipher removes PKCS#7 padding itself.
//! 2. [`PaddingStrategy::Manual`]: decrypt without unpadding, then strip the
//!    padding with [`strip_pkcs7`], which inspects every padding byte
//!    without an early exit.
//!
//! Some producers disagree on padding for block-aligned plaintext, so the
//! second strategy must stay. When both fail the first strategy's error is
//! returned.
//!
//! ```rust
//! use assembly_common::crypto::TokenCipher;
//!
//! let cipher = TokenCipher::new("api-key")?;
//! let token = cipher.encrypt_to_hex("{\"workspaceId\":\"ws1\"}")?;
//! assert_eq!(cipher.decrypt_from_hex(&token)?, "{\"workspaceId\":\"ws1\"}");
//! # Ok::<(), assembly_common::crypto::CryptoError>(())
//! ```

use aes::cipher::block_padding::{NoPadding, Pkcs7};
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use super::error::{CryptoError, CryptoResult};
use super::kdf::{derive_key, DerivedKey};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Length in bytes of the IV prefix on every token.
pub const IV_LEN: usize = 16;

/// How PKCS#7 padding is removed during decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingStrategy {
    /// Let the cipher validate and remove the padding.
    Native,
    /// Decrypt raw blocks and strip the padding with [`strip_pkcs7`].
    Manual,
}

/// Token cipher bound to the key derived from one API key.
#[derive(Clone)]
pub struct TokenCipher {
    key: DerivedKey,
}

impl std::fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCipher").field("key", &"[REDACTED]").finish()
    }
}

impl TokenCipher {
    /// Build a cipher for `api_key`.
    pub fn new(api_key: &str) -> CryptoResult<Self> {
        Ok(Self { key: derive_key(api_key)? })
    }

    /// Build a cipher from an already derived key.
    pub fn from_key(key: DerivedKey) -> Self {
        Self { key }
    }

    /// Encrypt `plaintext` under a fresh random IV and return the hex blob.
    pub fn encrypt_to_hex(&self, plaintext: &str) -> CryptoResult<String> {
        let iv = Self::generate_iv();
        let ciphertext = Aes128CbcEnc::new_from_slices(self.key.as_bytes(), &iv)
            .map_err(|_| CryptoError::InvalidKeyLength)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len());
        blob.extend_from_slice(&iv);
        blob.extend_from_slice(&ciphertext);
        Ok(hex::encode(blob))
    }

    /// Decrypt a hex blob, falling back to manual unpadding when the native
    /// strategy fails.
    pub fn decrypt_from_hex(&self, token: &str) -> CryptoResult<String> {
        let (iv, ciphertext) = split_blob(token)?;

        match self.decrypt_parts(&iv, &ciphertext, PaddingStrategy::Native) {
            Ok(plaintext) => Ok(plaintext),
            Err(native_err) => {
                debug!(error = %native_err, "native unpadding failed, retrying with manual unpadding");
                self.decrypt_parts(&iv, &ciphertext, PaddingStrategy::Manual)
                    .map_err(|_| native_err)
            }
        }
    }

    /// Decrypt a hex blob using exactly one padding strategy.
    pub fn decrypt_with_strategy(
        &self,
        token: &str,
        strategy: PaddingStrategy,
    ) -> CryptoResult<String> {
        let (iv, ciphertext) = split_blob(token)?;
        self.decrypt_parts(&iv, &ciphertext, strategy)
    }

    fn decrypt_parts(
        &self,
        iv: &[u8],
        ciphertext: &[u8],
        strategy: PaddingStrategy,
    ) -> CryptoResult<String> {
        let decryptor = Aes128CbcDec::new_from_slices(self.key.as_bytes(), iv)
            .map_err(|_| CryptoError::InvalidKeyLength)?;

        let plaintext = match strategy {
            PaddingStrategy::Native => decryptor
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| CryptoError::Unpad)?,
            PaddingStrategy::Manual => {
                let raw = decryptor
                    .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
                    .map_err(|_| CryptoError::NotBlockAligned { len: ciphertext.len() })?;
                strip_pkcs7(&raw)?.to_vec()
            }
        };

        Ok(String::from_utf8(plaintext)?)
    }

    fn generate_iv() -> [u8; IV_LEN] {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);
        iv
    }
}

fn split_blob(token: &str) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
    let mut blob = hex::decode(token)?;
    if blob.len() < IV_LEN + BLOCK_SIZE {
        return Err(CryptoError::TooShort { len: blob.len() });
    }
    let ciphertext = blob.split_off(IV_LEN);
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::NotBlockAligned { len: ciphertext.len() });
    }
    Ok((blob, ciphertext))
}

/// Remove PKCS#7 padding from a decrypted buffer.
///
/// A buffer whose length is not a multiple of [`BLOCK_SIZE`] has already
/// been unpadded and is returned unchanged. Otherwise the last byte `n`
/// must lie in `1..=16` and all of the final `n` bytes must equal `n`. The
/// comparison visits every padding byte before deciding.
pub fn strip_pkcs7(buf: &[u8]) -> CryptoResult<&[u8]> {
    if buf.len() % BLOCK_SIZE != 0 {
        return Ok(buf);
    }

    let pad = match buf.last() {
        Some(&byte) => byte,
        None => return Err(CryptoError::BadPaddingLength(0)),
    };
    let n = usize::from(pad);
    if !(1..=BLOCK_SIZE).contains(&n) {
        return Err(CryptoError::BadPaddingLength(pad));
    }

    let start = buf.len() - n;
    let mismatches = buf[start..].iter().fold(0usize, |acc, &byte| acc + usize::from(byte != pad));
    if mismatches != 0 {
        return Err(CryptoError::PaddingMismatch);
    }

    Ok(&buf[..start])
}

/// Encrypt `plaintext` for `api_key`, returning the hex token.
pub fn encrypt_token_string(api_key: &str, plaintext: &str) -> CryptoResult<String> {
    TokenCipher::new(api_key)?.encrypt_to_hex(plaintext)
}

/// Decrypt the hex `token` with the key derived from `api_key`.
pub fn decrypt_token_string(api_key: &str, token: &str) -> CryptoResult<String> {
    TokenCipher::new(api_key)?.decrypt_from_hex(token)
}

#[cfg(test)]
mod tests {
    //! Unit tests for crypto::encryption.
    use super::*;

    /// Validates the hex blob layout produced by `encrypt_to_hex`.
    ///
    /// Assertions:
    /// - The blob holds an IV plus whole cipher blocks.
    /// - A 5 byte plaintext pads to exactly one block.
    #[test]
    fn encrypt_produces_iv_and_whole_blocks() {
        let cipher = TokenCipher::new("k").unwrap();
        let token = cipher.encrypt_to_hex("hello").unwrap();
        let blob = hex::decode(&token).unwrap();

        assert_eq!(blob.len(), IV_LEN + BLOCK_SIZE);
        assert_eq!(cipher.decrypt_from_hex(&token).unwrap(), "hello");
    }

    /// Validates that two encryptions of the same plaintext differ.
    ///
    /// Assertions:
    /// - The tokens are different (fresh IV per call).
    /// - Both decrypt to the original plaintext.
    #[test]
    fn encryption_uses_fresh_iv() {
        let cipher = TokenCipher::new("k").unwrap();
        let a = cipher.encrypt_to_hex("same").unwrap();
        let b = cipher.encrypt_to_hex("same").unwrap();

        assert_ne!(a, b);
        assert_ne!(&a[..IV_LEN * 2], &b[..IV_LEN * 2]);
        assert_eq!(cipher.decrypt_from_hex(&a).unwrap(), "same");
        assert_eq!(cipher.decrypt_from_hex(&b).unwrap(), "same");
    }

    /// Validates both strategies agree on a block-aligned plaintext.
    #[test]
    fn block_aligned_plaintext_round_trips_with_both_strategies() {
        let cipher = TokenCipher::new("k").unwrap();
        let plaintext = "0123456789abcdef0123456789abcdef";
        let token = cipher.encrypt_to_hex(plaintext).unwrap();

        assert_eq!(hex::decode(&token).unwrap().len(), IV_LEN + 3 * BLOCK_SIZE);
        for strategy in [PaddingStrategy::Native, PaddingStrategy::Manual] {
            assert_eq!(cipher.decrypt_with_strategy(&token, strategy).unwrap(), plaintext);
        }
    }

    /// Validates that the first strategy's error surfaces when both fail.
    ///
    /// Assertions:
    /// - A ciphertext whose final padding byte is out of range yields
    ///   `CryptoError::Unpad` from the native strategy, not the manual
    ///   strategy's `BadPaddingLength`.
    #[test]
    fn native_error_wins_when_both_strategies_fail() {
        let key = derive_key("k").unwrap();
        let iv = [7u8; IV_LEN];
        let mut block = [0x41u8; BLOCK_SIZE];
        block[BLOCK_SIZE - 1] = 0x00;
        let ciphertext = Aes128CbcEnc::new_from_slices(key.as_bytes(), &iv)
            .unwrap()
            .encrypt_padded_vec_mut::<NoPadding>(&block);
        let token = hex::encode([iv.as_slice(), ciphertext.as_slice()].concat());

        let cipher = TokenCipher::from_key(key);
        assert!(matches!(
            cipher.decrypt_with_strategy(&token, PaddingStrategy::Manual),
            Err(CryptoError::BadPaddingLength(0))
        ));
        assert!(matches!(cipher.decrypt_from_hex(&token), Err(CryptoError::Unpad)));
    }

    #[test]
    fn wrong_key_fails_closed() {
        let token = encrypt_token_string("right", r#"{"workspaceId":"ws1"}"#).unwrap();
        if let Ok(text) = decrypt_token_string("wrong", &token) {
            assert_ne!(text, r#"{"workspaceId":"ws1"}"#);
        }
    }

    #[test]
    fn rejects_malformed_blobs() {
        let cipher = TokenCipher::new("k").unwrap();
        assert!(matches!(cipher.decrypt_from_hex("zz"), Err(CryptoError::InvalidHex(_))));
        assert!(matches!(
            cipher.decrypt_from_hex(&"00".repeat(IV_LEN)),
            Err(CryptoError::TooShort { len: 16 })
        ));
        assert!(matches!(
            cipher.decrypt_from_hex(&"00".repeat(IV_LEN + BLOCK_SIZE + 3)),
            Err(CryptoError::NotBlockAligned { len: 19 })
        ));
    }

    #[test]
    fn strip_pkcs7_removes_valid_padding() {
        let mut buf = b"abcdefghijkl".to_vec();
        buf.extend_from_slice(&[4, 4, 4, 4]);
        assert_eq!(strip_pkcs7(&buf).unwrap(), b"abcdefghijkl");

        let full = [16u8; BLOCK_SIZE];
        assert_eq!(strip_pkcs7(&full).unwrap(), b"");
    }

    #[test]
    fn strip_pkcs7_rejects_bad_padding() {
        let mut zero = [1u8; BLOCK_SIZE];
        zero[BLOCK_SIZE - 1] = 0;
        assert!(matches!(strip_pkcs7(&zero), Err(CryptoError::BadPaddingLength(0))));

        let mut too_big = [1u8; BLOCK_SIZE];
        too_big[BLOCK_SIZE - 1] = 17;
        assert!(matches!(strip_pkcs7(&too_big), Err(CryptoError::BadPaddingLength(17))));

        let mut mismatch = [3u8; BLOCK_SIZE];
        mismatch[BLOCK_SIZE - 2] = 9;
        assert!(matches!(strip_pkcs7(&mismatch), Err(CryptoError::PaddingMismatch)));

        assert!(matches!(strip_pkcs7(&[]), Err(CryptoError::BadPaddingLength(0))));
    }

    #[test]
    fn strip_pkcs7_passes_through_unaligned_buffers() {
        let buf = b"already stripped";
        assert_eq!(buf.len(), 16);
        let short = &buf[..10];
        assert_eq!(strip_pkcs7(short).unwrap(), short);
    }

    #[test]
    fn debug_output_is_redacted() {
        let cipher = TokenCipher::new("k1").unwrap();
        assert!(!format!("{cipher:?}").contains("e6f06a89"));
    }
}
