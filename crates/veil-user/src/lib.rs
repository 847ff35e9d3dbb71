//! veil-user: user endpoint for the veil overlay
//!
//! Owns the sender side of the protocol: directory lookup, circuit
//! selection, envelope construction and submission to the entry relay.
//! Also the terminus of a circuit: accepts final plaintext deliveries.

pub mod api;
pub mod config;
pub mod server;
pub mod state;

pub use config::UserConfig;
pub use server::UserServer;
