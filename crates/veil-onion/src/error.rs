//! Protocol error taxonomy.

use thiserror::Error;
use veil_crypto::CryptoError;

#[derive(Debug, Error)]
pub enum OnionError {
    #[error("fewer than 3 relay nodes available")]
    InsufficientNodes,
    #[error("envelope does not split into two non-empty parts")]
    MalformedEnvelope,
    #[error("decrypted layer shorter than the address field")]
    MalformedLayer,
    #[error("address exceeds 10 decimal digits")]
    AddressOverflow,
    #[error("cryptographic operation failed: {0}")]
    Crypto(#[from] CryptoError),
}
