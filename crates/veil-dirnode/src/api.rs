//! HTTP API endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, Router},
    Json,
};
use serde_json::json;
use tracing::{info, warn};

use veil_net::proto::{NodeListResponse, RegisterNodeRequest};

use crate::store::{NodeStore, StoreError};

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<NodeStore>,
}

/// Create API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/v1/nodes", post(register_node).get(list_nodes))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// POST /v1/nodes - Upsert a relay's public key by node id
async fn register_node(
    State(state): State<ApiState>,
    Json(request): Json<RegisterNodeRequest>,
) -> Response {
    // The typed extractor already rejected missing or mistyped fields;
    // the key must additionally be a plausible published key.
    if veil_crypto::identity::public_key_from_b64(&request.public_key).is_err() {
        warn!(node_id = request.node_id, "Rejected registration with invalid public key");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "public_key must be a base64 X25519 key"})),
        )
            .into_response();
    }

    match state.store.upsert(request.node_id, request.public_key) {
        Ok(()) => {
            info!(node_id = request.node_id, "Registered node");
            (StatusCode::CREATED, Json(json!({"result": "registered"}))).into_response()
        }
        Err(StoreError::Full) => {
            warn!(node_id = request.node_id, "Registry full, registration rejected");
            (
                StatusCode::INSUFFICIENT_STORAGE,
                Json(json!({"error": "registry full"})),
            )
                .into_response()
        }
    }
}

/// GET /v1/nodes - Current node snapshot
async fn list_nodes(State(state): State<ApiState>) -> Json<NodeListResponse> {
    Json(NodeListResponse {
        nodes: state.store.snapshot(),
    })
}

/// GET /health - Health check
async fn health_handler() -> StatusCode {
    StatusCode::OK
}
