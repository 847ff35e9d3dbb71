//! Envelope wire codec.
//!
//! Wire unit between hops: `base64(sealed key) || base64(encrypted layer)`,
//! with `||` the reserved two-character delimiter (never present in base64
//! text). The decrypted layer starts with an exactly 10-character
//! zero-padded decimal address, which is what makes the remainder
//! splittable without a length prefix. No crypto lives here.

use crate::addr::ADDRESS_WIDTH;
use crate::error::OnionError;

/// Field delimiter between the key and layer ciphertexts.
pub const DELIMITER: &str = "||";

/// First value that no longer fits the fixed-width address field.
const ADDRESS_LIMIT: u64 = 10_000_000_000;

/// Join the two ciphertext fields into a wire string.
pub fn encode(encrypted_key: &str, encrypted_layer: &str) -> String {
    format!("{encrypted_key}{DELIMITER}{encrypted_layer}")
}

/// Split a wire string into `(encrypted_key, encrypted_layer)`.
///
/// Rejects anything that does not split into exactly two non-empty parts.
pub fn decode(wire: &str) -> Result<(&str, &str), OnionError> {
    let mut parts = wire.split(DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(layer), None) if !key.is_empty() && !layer.is_empty() => {
            Ok((key, layer))
        }
        _ => Err(OnionError::MalformedEnvelope),
    }
}

/// Zero-pad an address to exactly [`ADDRESS_WIDTH`] decimal digits.
pub fn encode_address(address: u64) -> Result<String, OnionError> {
    if address >= ADDRESS_LIMIT {
        return Err(OnionError::AddressOverflow);
    }
    Ok(format!("{:0width$}", address, width = ADDRESS_WIDTH))
}

/// Parse the leading fixed-width address field of a decrypted layer.
pub fn decode_address(layer: &str) -> Result<u64, OnionError> {
    let field = layer.get(..ADDRESS_WIDTH).ok_or(OnionError::MalformedLayer)?;
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OnionError::MalformedLayer);
    }
    field.parse().map_err(|_| OnionError::MalformedLayer)
}
