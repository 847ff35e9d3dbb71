//! Sender-side circuit selection and envelope construction.
//!
//! A circuit is an ordered pick of exactly three distinct relays, chosen
//! fresh for every outgoing message and discarded afterwards. The envelope
//! is built from the exit hop inward because each outer layer encrypts the
//! previous layer's full wire text.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use veil_crypto::identity::public_key_from_b64;
use veil_crypto::symmetric::SymmetricKey;
use veil_crypto::{b64, sealed};

use crate::addr;
use crate::codec;
use crate::error::OnionError;

/// Number of relays in every circuit.
pub const CIRCUIT_LEN: usize = 3;

/// A directory entry: relay id and its published public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub node_id: u32,
    pub public_key: String,
}

/// A fully layered envelope ready for submission to the entry hop.
#[derive(Debug, Clone)]
pub struct BuiltEnvelope {
    /// Wire string handed to the entry relay.
    pub wire: String,
    /// Overlay address of the entry relay.
    pub entry_address: u64,
    /// Node ids of the chosen circuit, entry hop first.
    pub circuit: Vec<u32>,
}

/// Select a circuit from the directory snapshot and layer `message` for it.
///
/// Selection shuffles the candidate set with a uniform random permutation
/// (Fisher-Yates) and takes the first [`CIRCUIT_LEN`] entries, so hops are
/// distinct by construction.
pub fn build(nodes: &[Node], message: &[u8], destination: u64) -> Result<BuiltEnvelope, OnionError> {
    let circuit = select_circuit(nodes)?;
    let wire = wrap(&circuit, message, destination)?;
    Ok(BuiltEnvelope {
        wire,
        entry_address: addr::relay_address(circuit[0].node_id),
        circuit: circuit.iter().map(|n| n.node_id).collect(),
    })
}

fn select_circuit(nodes: &[Node]) -> Result<Vec<Node>, OnionError> {
    if nodes.len() < CIRCUIT_LEN {
        return Err(OnionError::InsufficientNodes);
    }
    let mut shuffled = nodes.to_vec();
    shuffled.shuffle(&mut rand::thread_rng());
    shuffled.truncate(CIRCUIT_LEN);
    Ok(shuffled)
}

/// Layer `message` for an explicit circuit, entry hop first.
///
/// For the exit hop the embedded next-hop address is the destination; for
/// every other hop it is the following relay's address. Construction is
/// inherently sequential: the Nth layer's plaintext is the (N+1)th layer's
/// completed wire text.
pub fn wrap(circuit: &[Node], message: &[u8], destination: u64) -> Result<String, OnionError> {
    if circuit.is_empty() {
        return Err(OnionError::InsufficientNodes);
    }

    let mut payload = message.to_vec();
    let mut wire = String::new();

    for (i, hop) in circuit.iter().enumerate().rev() {
        let next_hop = if i == circuit.len() - 1 {
            destination
        } else {
            addr::relay_address(circuit[i + 1].node_id)
        };

        let mut plain_layer = codec::encode_address(next_hop)?.into_bytes();
        plain_layer.extend_from_slice(&payload);

        let layer_key = SymmetricKey::generate()?;
        let encrypted_layer = layer_key.encrypt(&plain_layer)?;

        let hop_pub = public_key_from_b64(&hop.public_key)?;
        let encrypted_key = sealed::seal(&hop_pub, layer_key.export_b64().as_bytes())?;

        wire = codec::encode(&b64::encode(&encrypted_key), &b64::encode(&encrypted_layer));
        payload = wire.clone().into_bytes();
    }

    Ok(wire)
}
