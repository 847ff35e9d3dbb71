#![forbid(unsafe_code)]

//! veil-net: HTTP collaborators of the onion core.
//!
//! The directory and the hop-to-hop submission path are remote services
//! from the core's point of view; these clients are the only place the
//! overlay performs network IO.

pub mod client;
pub mod proto;

pub use client::{DirectoryClient, HopClient, NetError};
