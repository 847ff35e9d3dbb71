//! Base64 helpers for ciphertext wire text.
//!
//! Everything that crosses the wire is standard base64: sealed key blobs,
//! encrypted layers, and published public keys.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CryptoError;

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD.decode(text).map_err(|_| CryptoError::InvalidEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let data = b"layered like an onion";
        assert_eq!(decode(&encode(data)).unwrap(), data);
    }

    #[test]
    fn test_invalid_text_rejected() {
        assert!(decode("not base64 at all!").is_err());
    }

    #[test]
    fn test_empty_round_trip() {
        assert_eq!(decode(&encode(b"")).unwrap(), Vec::<u8>::new());
    }
}
