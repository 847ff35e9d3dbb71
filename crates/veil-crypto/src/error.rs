//! Error type shared by the crypto primitives.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key bytes")]
    InvalidKeyBytes,
    #[error("invalid wire encoding")]
    InvalidEncoding,
    #[error("encryption failed")]
    EncryptFailed,
    #[error("decryption failed")]
    DecryptFailed,
    #[error("random source unavailable")]
    RngUnavailable,
}
