use thiserror::Error;

/// Result alias for cipher operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Failures raised while deriving keys or running the token cipher.
///
/// Messages never include key material or plaintext.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("token is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("token is too short: {len} bytes, need an IV and at least one cipher block")]
    TooShort { len: usize },

    #[error("ciphertext length {len} is not a multiple of the cipher block size")]
    NotBlockAligned { len: usize },

    #[error("invalid key or IV length")]
    InvalidKeyLength,

    #[error("cipher failed to remove PKCS#7 padding")]
    Unpad,

    #[error("invalid PKCS#7 padding length {0}")]
    BadPaddingLength(u8),

    #[error("PKCS#7 padding bytes do not match the padding length")]
    PaddingMismatch,

    #[error("decrypted plaintext is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
