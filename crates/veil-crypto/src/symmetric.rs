//! Per-layer symmetric AEAD scheme.
//!
//! A fresh ChaCha20Poly1305 key is generated for every envelope layer.
//! Ciphertexts carry their random 12-byte nonce as a prefix. The key exports
//! as base64 text, which is what gets sealed to the owning hop; the hop
//! imports the same text to reconstruct the key.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::b64;
use crate::error::CryptoError;

const NONCE_SIZE: usize = 12;

/// A single-use symmetric layer key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: [u8; 32],
}

impl SymmetricKey {
    /// Generate a fresh random key.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut key = [0u8; 32];
        getrandom::getrandom(&mut key).map_err(|_| CryptoError::RngUnavailable)?;
        Ok(Self { key })
    }

    /// The base64 exported representation sealed to the owning hop.
    pub fn export_b64(&self) -> String {
        b64::encode(&self.key)
    }

    /// Import a key from its base64 exported representation.
    pub fn import_b64(text: &str) -> Result<Self, CryptoError> {
        let bytes = b64::decode(text)?;
        let key: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyBytes)?;
        Ok(Self { key })
    }

    /// Encrypt arbitrary-length input. Returns `nonce || ciphertext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut nonce = [0u8; NONCE_SIZE];
        getrandom::getrandom(&mut nonce).map_err(|_| CryptoError::RngUnavailable)?;

        let cipher = ChaCha20Poly1305::new(Key::from_slice(&self.key));
        let ct = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| CryptoError::EncryptFailed)?;

        let mut out = Vec::with_capacity(NONCE_SIZE + ct.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ct);
        Ok(out)
    }

    /// Decrypt a nonce-prefixed ciphertext produced by [`Self::encrypt`].
    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if sealed.len() < NONCE_SIZE {
            return Err(CryptoError::DecryptFailed);
        }
        let (nonce, ct) = sealed.split_at(NONCE_SIZE);
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&self.key));
        cipher
            .decrypt(Nonce::from_slice(nonce), ct)
            .map_err(|_| CryptoError::DecryptFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = SymmetricKey::generate().unwrap();
        let plaintext = b"0000005002hello";

        let ct = key.encrypt(plaintext).unwrap();
        assert_eq!(key.decrypt(&ct).unwrap(), plaintext);
    }

    #[test]
    fn test_export_import_round_trip() {
        let key = SymmetricKey::generate().unwrap();
        let imported = SymmetricKey::import_b64(&key.export_b64()).unwrap();

        let ct = key.encrypt(b"payload").unwrap();
        assert_eq!(imported.decrypt(&ct).unwrap(), b"payload");
    }

    #[test]
    fn test_wrong_key_fails() {
        let key = SymmetricKey::generate().unwrap();
        let other = SymmetricKey::generate().unwrap();

        let ct = key.encrypt(b"payload").unwrap();
        assert!(other.decrypt(&ct).is_err());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = SymmetricKey::generate().unwrap();
        let mut ct = key.encrypt(b"payload").unwrap();
        let last = ct.len() - 1;
        ct[last] ^= 0x01;
        assert!(key.decrypt(&ct).is_err());
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let key = SymmetricKey::generate().unwrap();
        assert!(key.decrypt(&[0u8; 4]).is_err());
    }

    #[test]
    fn test_import_wrong_length_rejected() {
        assert!(SymmetricKey::import_b64(&b64::encode(b"too short")).is_err());
    }
}
