//! veil-dirnode: directory service for the veil overlay
//!
//! Publishes relay identities and public keys as a flat upsertable list,
//! queried by senders before circuit construction.

pub mod api;
pub mod config;
pub mod server;
pub mod store;

pub use config::ServerConfig;
pub use server::DirNodeServer;
