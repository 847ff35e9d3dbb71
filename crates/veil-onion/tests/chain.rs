//! End-to-end envelope chain: construct at the sender, peel hop by hop.

use std::collections::HashMap;

use veil_crypto::identity::Identity;
use veil_onion::addr::{self, Role};
use veil_onion::circuit::{self, Node};
use veil_onion::codec;
use veil_onion::peel::{peel, PeelResult};
use veil_onion::OnionError;

fn relay_set(ids: &[u32]) -> (HashMap<u32, Identity>, Vec<Node>) {
    let identities: HashMap<u32, Identity> = ids
        .iter()
        .map(|&id| (id, Identity::generate()))
        .collect();
    let mut nodes: Vec<Node> = identities
        .iter()
        .map(|(&id, identity)| Node {
            node_id: id,
            public_key: identity.public_key_b64(),
        })
        .collect();
    nodes.sort_by_key(|n| n.node_id);
    (identities, nodes)
}

#[test]
fn hello_round_trip_through_fixed_circuit() {
    // Directory has relays {1, 2, 3}; user 1 sends "hello" to user 2
    // through the circuit [1, 2, 3].
    let (identities, nodes) = relay_set(&[1, 2, 3]);
    let destination = addr::user_address(2);

    let wire = circuit::wrap(&nodes, b"hello", destination).unwrap();

    // Entry hop learns only the middle relay's address.
    let layer1 = peel(&wire, &identities[&1]).unwrap();
    assert_eq!(layer1.next, addr::relay_address(2));
    assert_eq!(addr::role_of(layer1.next), Role::Relay);
    // The remainder is still a well-formed envelope, not plaintext.
    assert!(codec::decode(&layer1.remainder).is_ok());

    let layer2 = peel(&layer1.remainder, &identities[&2]).unwrap();
    assert_eq!(layer2.next, addr::relay_address(3));

    // Exit hop recovers the destination and the original plaintext.
    let layer3 = peel(&layer2.remainder, &identities[&3]).unwrap();
    assert_eq!(layer3.next, destination);
    assert_eq!(layer3.remainder, "hello");
    assert!(codec::decode(&layer3.remainder).is_err());

    match layer3.classify() {
        PeelResult::Deliver {
            destination: d,
            plaintext,
        } => {
            assert_eq!(d, destination);
            assert_eq!(plaintext, "hello");
        }
        other => panic!("exit layer should deliver, got {other:?}"),
    }
}

#[test]
fn layer_isolation_matches_construction_order() {
    let (identities, nodes) = relay_set(&[4, 5, 6]);
    let destination = addr::user_address(9);

    // Circuit order is the slice order handed to wrap().
    let circuit: Vec<Node> = [4u32, 5, 6]
        .iter()
        .map(|id| nodes.iter().find(|n| n.node_id == *id).unwrap().clone())
        .collect();
    let wire = circuit::wrap(&circuit, b"payload", destination).unwrap();

    let first = peel(&wire, &identities[&4]).unwrap();
    assert_eq!(first.next, addr::relay_address(5));
    let second = peel(&first.remainder, &identities[&5]).unwrap();
    assert_eq!(second.next, addr::relay_address(6));
}

#[test]
fn built_circuit_peels_in_selection_order() {
    // Five candidates; build() picks three. Follow the chain by mapping
    // each decoded relay address back to the owning identity.
    let (identities, nodes) = relay_set(&[1, 2, 3, 4, 5]);
    let destination = addr::user_address(7);
    let message = "onions all the way down";

    let envelope = circuit::build(&nodes, message.as_bytes(), destination).unwrap();
    assert_eq!(envelope.circuit.len(), 3);

    let mut wire = envelope.wire.clone();
    let mut address = envelope.entry_address;
    for &expected_id in &envelope.circuit {
        assert_eq!(address, addr::relay_address(expected_id));
        let layer = peel(&wire, &identities[&expected_id]).unwrap();
        wire = layer.remainder;
        address = layer.next;
    }

    assert_eq!(address, destination);
    assert_eq!(wire, message);
}

#[test]
fn two_node_directory_fails_before_submission() {
    let (_, nodes) = relay_set(&[1, 2]);
    let err = circuit::build(&nodes, b"hi", addr::user_address(1)).unwrap_err();
    assert!(matches!(err, OnionError::InsufficientNodes));
}

#[test]
fn peel_at_wrong_hop_fails() {
    let (identities, nodes) = relay_set(&[1, 2, 3]);
    let wire = circuit::wrap(&nodes, b"hello", addr::user_address(2)).unwrap();

    // The middle relay cannot open the entry layer.
    assert!(matches!(
        peel(&wire, &identities[&2]),
        Err(OnionError::Crypto(_))
    ));
}

#[test]
fn tampered_envelope_fails_decryption() {
    let (identities, nodes) = relay_set(&[1, 2, 3]);
    let wire = circuit::wrap(&nodes, b"hello", addr::user_address(2)).unwrap();

    // Flip one character inside the encrypted layer field.
    let delim = wire.find("||").unwrap();
    let mut tampered: Vec<char> = wire.chars().collect();
    let target = delim + 2 + (tampered.len() - delim - 2) / 2;
    tampered[target] = if tampered[target] == 'A' { 'B' } else { 'A' };
    let tampered: String = tampered.into_iter().collect();

    assert!(peel(&tampered, &identities[&1]).is_err());
}
