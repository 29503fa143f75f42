//! Token cryptography: API-key based key derivation and the AES-128-CBC
//! token cipher.

pub mod encryption;
pub mod error;
pub mod kdf;

pub use encryption::{
    decrypt_token_string, encrypt_token_string, strip_pkcs7, PaddingStrategy, TokenCipher,
    BLOCK_SIZE, IV_LEN,
};
pub use error::{CryptoError, CryptoResult};
pub use kdf::{derive_key, DerivedKey, KEY_LEN};
