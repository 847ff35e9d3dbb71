//! JSON bodies shared across the overlay's HTTP surfaces.

use serde::{Deserialize, Serialize};

use veil_onion::Node;

/// `POST /v1/nodes`: idempotent upsert by node id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterNodeRequest {
    pub node_id: u32,
    pub public_key: String,
}

/// `GET /v1/nodes` response: the current directory snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeListResponse {
    pub nodes: Vec<Node>,
}

/// `POST /v1/message`: one wire-format envelope, or final plaintext when
/// the target is a user endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// `POST /v1/send` on a user endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest {
    pub message: String,
    pub destination_user_id: u32,
}
