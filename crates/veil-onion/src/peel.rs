//! Relay-side single-layer peel.
//!
//! A peel removes exactly one encryption layer: open the sealed key blob
//! with this relay's identity, decrypt the layer with the recovered
//! symmetric key, split off the fixed-width next-hop address. The layer
//! itself never says whether it was the last one; the exit hop is
//! distinguished only by its next-hop address falling in the user range.

use veil_crypto::identity::Identity;
use veil_crypto::symmetric::SymmetricKey;
use veil_crypto::{b64, sealed, CryptoError};

use crate::addr::{self, Role, ADDRESS_WIDTH};
use crate::codec;
use crate::error::OnionError;

/// One peeled layer: the decoded next-hop address and whatever remained
/// under this layer. The remainder is either another wire-format envelope
/// or final plaintext; the engine cannot tell and does not try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeeledLayer {
    pub next: u64,
    pub remainder: String,
}

/// A peeled layer classified by the role of its next-hop address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeelResult {
    /// The next address is another relay: submit the remainder there.
    Forward { next: u64, remainder: String },
    /// The next address is a user endpoint: the remainder is final plaintext.
    Deliver { destination: u64, plaintext: String },
}

impl PeeledLayer {
    /// Reconstruct the full decrypted layer (address field + remainder).
    pub fn plain_layer(&self) -> String {
        format!(
            "{:0width$}{}",
            self.next,
            self.remainder,
            width = ADDRESS_WIDTH
        )
    }

    /// Classify by the role encoded in the next-hop address.
    pub fn classify(self) -> PeelResult {
        match addr::role_of(self.next) {
            Role::Relay => PeelResult::Forward {
                next: self.next,
                remainder: self.remainder,
            },
            Role::User => PeelResult::Deliver {
                destination: self.next,
                plaintext: self.remainder,
            },
        }
    }
}

/// Remove exactly one encryption layer from `wire` with this relay's identity.
pub fn peel(wire: &str, identity: &Identity) -> Result<PeeledLayer, OnionError> {
    let (key_field, layer_field) = codec::decode(wire)?;

    let sealed_key = b64::decode(key_field)?;
    let exported = sealed::open(identity.kex_secret(), &sealed_key)?;
    let exported = String::from_utf8(exported)
        .map_err(|_| OnionError::Crypto(CryptoError::InvalidKeyBytes))?;
    let layer_key = SymmetricKey::import_b64(&exported)?;

    let encrypted_layer = b64::decode(layer_field)?;
    let plain_layer = layer_key.decrypt(&encrypted_layer)?;
    let plain_layer = String::from_utf8(plain_layer).map_err(|_| OnionError::MalformedLayer)?;

    let next = codec::decode_address(&plain_layer)?;
    let remainder = plain_layer[ADDRESS_WIDTH..].to_string();

    Ok(PeeledLayer { next, remainder })
}
