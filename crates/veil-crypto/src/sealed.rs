//! Sealed-box asymmetric encryption.
//!
//! HPKE-style sealing using ephemeral X25519 + HKDF-SHA256 + ChaCha20Poly1305.
//! The 32-byte ephemeral public key is prepended to the ciphertext so the
//! recipient can derive the shared secret without any prior state. Used to
//! carry one short secret per envelope layer: the exported symmetric key.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use hkdf::Hkdf;
use rand_core::OsRng;
use sha2::Sha256;
use x25519_dalek::{EphemeralSecret, PublicKey as X25519PublicKey, StaticSecret};

use crate::error::CryptoError;

const EPHEMERAL_PK_SIZE: usize = 32;

fn kdf_key_nonce(shared_secret: &[u8; 32], salt: &[u8]) -> ([u8; 32], [u8; 12]) {
    // HKDF-SHA256(salt, shared_secret)
    let hk = Hkdf::<Sha256>::new(Some(salt), shared_secret);

    let mut key = [0u8; 32];
    hk.expand(b"veil_sealed_v1_key", &mut key).unwrap(); // Output size matches digest size, infallible

    let mut nonce = [0u8; 12];
    hk.expand(b"veil_sealed_v1_nonce", &mut nonce)
        .unwrap(); // Output size < digest size, infallible

    (key, nonce)
}

/// Seal `plaintext` to `recipient_pub`.
///
/// Returns `ephemeral_pk || ciphertext`. The ephemeral public key doubles as
/// the HKDF salt, binding the derived key and nonce to this box.
pub fn seal(recipient_pub: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let recip_pub = X25519PublicKey::from(*recipient_pub);

    let eph = EphemeralSecret::random_from_rng(OsRng);
    let eph_pub = X25519PublicKey::from(&eph);

    let shared = eph.diffie_hellman(&recip_pub);
    let (key32, nonce12) = kdf_key_nonce(shared.as_bytes(), eph_pub.as_bytes());

    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key32));
    let ct = cipher
        .encrypt(Nonce::from_slice(&nonce12), plaintext)
        .map_err(|_| CryptoError::EncryptFailed)?;

    let mut out = Vec::with_capacity(EPHEMERAL_PK_SIZE + ct.len());
    out.extend_from_slice(eph_pub.as_bytes());
    out.extend_from_slice(&ct);
    Ok(out)
}

/// Open a sealed box with the recipient's private key.
pub fn open(recipient_secret: &StaticSecret, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < EPHEMERAL_PK_SIZE {
        return Err(CryptoError::InvalidKeyBytes);
    }
    let (eph_bytes, ct) = sealed.split_at(EPHEMERAL_PK_SIZE);
    let eph_arr: [u8; 32] = eph_bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyBytes)?;
    let eph_pub = X25519PublicKey::from(eph_arr);

    let shared = recipient_secret.diffie_hellman(&eph_pub);
    let (key32, nonce12) = kdf_key_nonce(shared.as_bytes(), eph_pub.as_bytes());

    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key32));
    cipher
        .decrypt(Nonce::from_slice(&nonce12), ct)
        .map_err(|_| CryptoError::DecryptFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;

    #[test]
    fn test_seal_open_round_trip() {
        let recipient = Identity::generate();
        let plaintext = b"exported layer key";

        let boxed = seal(&recipient.public_key(), plaintext).unwrap();
        let opened = open(recipient.kex_secret(), &boxed).unwrap();

        assert_eq!(opened, plaintext);
    }

    #[test]
    fn test_open_with_wrong_key_fails() {
        let recipient = Identity::generate();
        let other = Identity::generate();

        let boxed = seal(&recipient.public_key(), b"secret").unwrap();
        assert!(open(other.kex_secret(), &boxed).is_err());
    }

    #[test]
    fn test_open_tampered_ciphertext_fails() {
        let recipient = Identity::generate();
        let mut boxed = seal(&recipient.public_key(), b"secret").unwrap();
        let last = boxed.len() - 1;
        boxed[last] ^= 0xFF;
        assert!(open(recipient.kex_secret(), &boxed).is_err());
    }

    #[test]
    fn test_open_truncated_input_fails() {
        let recipient = Identity::generate();
        assert!(open(recipient.kex_secret(), &[0u8; 16]).is_err());
    }

    #[test]
    fn test_sealed_boxes_are_randomized() {
        let recipient = Identity::generate();
        let a = seal(&recipient.public_key(), b"same plaintext").unwrap();
        let b = seal(&recipient.public_key(), b"same plaintext").unwrap();
        // Fresh ephemeral key per box
        assert_ne!(a, b);
    }
}
