//! Overlay address space.
//!
//! Relay and user identities map to disjoint numeric ranges: a fixed
//! per-role base added to a small id. A decoded 10-digit address therefore
//! resolves to a role without any flag inside the envelope. On the loopback
//! overlay the address doubles as the actor's HTTP port.

/// Width of the zero-padded decimal address field.
pub const ADDRESS_WIDTH: usize = 10;

/// Base of the relay address range.
pub const RELAY_ADDR_BASE: u64 = 4000;

/// Base of the user address range. Every address at or above it is a user.
pub const USER_ADDR_BASE: u64 = 5000;

/// The role an address resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Relay,
    User,
}

/// Overlay address of a relay node.
pub fn relay_address(node_id: u32) -> u64 {
    RELAY_ADDR_BASE + node_id as u64
}

/// Overlay address of a user endpoint.
pub fn user_address(user_id: u32) -> u64 {
    USER_ADDR_BASE + user_id as u64
}

/// Resolve the role encoded in an address.
pub fn role_of(address: u64) -> Role {
    if address >= USER_ADDR_BASE {
        Role::User
    } else {
        Role::Relay
    }
}
