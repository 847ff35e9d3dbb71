//! Identity module for per-node keypair management.
//!
//! Each overlay actor owns an X25519 key-exchange keypair. The public key is
//! published to the directory as base64 text; the private key opens sealed
//! boxes addressed to this node. Key material is zeroized on drop.

use rand_core::OsRng;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::b64;
use crate::error::CryptoError;

/// A node's key-exchange identity.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Identity {
    /// X25519 key exchange private key
    #[zeroize(skip)] // StaticSecret implements Zeroize internally
    kex_key: StaticSecret,
}

impl Identity {
    /// Generate a new random identity using a secure random source.
    pub fn generate() -> Self {
        let kex_key = StaticSecret::random_from_rng(OsRng);
        Self { kex_key }
    }

    /// Create an identity from an existing 32-byte X25519 private key.
    pub fn from_bytes(kex_key_bytes: &[u8; 32]) -> Self {
        Self {
            kex_key: StaticSecret::from(*kex_key_bytes),
        }
    }

    /// Get the X25519 public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        *X25519PublicKey::from(&self.kex_key).as_bytes()
    }

    /// Public key in the base64 form published to the directory.
    pub fn public_key_b64(&self) -> String {
        b64::encode(&self.public_key())
    }

    /// Get a reference to the private key for sealed-box opening.
    pub fn kex_secret(&self) -> &StaticSecret {
        &self.kex_key
    }
}

/// Parse a directory-published base64 public key into X25519 key bytes.
pub fn public_key_from_b64(text: &str) -> Result<[u8; 32], CryptoError> {
    let bytes = b64::decode(text)?;
    bytes.try_into().map_err(|_| CryptoError::InvalidKeyBytes)
}
