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
use tracing::{error, info, warn};

use veil_net::proto::{MessageRequest, SendRequest};
use veil_net::{DirectoryClient, HopClient};
use veil_onion::{addr, circuit, OnionError};

use crate::state::{DebugSnapshot, UserState};

#[derive(Clone)]
pub struct ApiState {
    pub user: Arc<UserState>,
    pub directory: DirectoryClient,
    pub hops: HopClient,
}

/// Create API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/v1/message", post(receive_message))
        .route("/v1/send", post(send_message))
        .route("/v1/debug", get(get_debug))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// POST /v1/message - Final delivery from the exit relay
async fn receive_message(
    State(state): State<ApiState>,
    Json(request): Json<MessageRequest>,
) -> Response {
    state.user.record_received(&request.message);
    info!("Received message");
    (StatusCode::OK, Json(json!({"result": "received"}))).into_response()
}

/// POST /v1/send - Build a circuit and fire the envelope into the chain
///
/// A success only means the entry relay accepted the envelope; failures
/// deeper in the circuit are invisible to the sender.
async fn send_message(
    State(state): State<ApiState>,
    Json(request): Json<SendRequest>,
) -> Response {
    state.user.record_sent(&request.message);

    let nodes = match state.directory.snapshot().await {
        Ok(nodes) => nodes,
        Err(e) => {
            error!("Directory lookup failed: {e}");
            return (StatusCode::BAD_GATEWAY, Json(json!({"error": e.to_string()})))
                .into_response();
        }
    };

    let destination = addr::user_address(request.destination_user_id);
    let envelope = match circuit::build(&nodes, request.message.as_bytes(), destination) {
        Ok(envelope) => envelope,
        Err(OnionError::InsufficientNodes) => {
            warn!(available = nodes.len(), "Not enough relay nodes for a circuit");
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": "insufficient relay nodes"})),
            )
                .into_response();
        }
        Err(e) => {
            error!("Envelope construction failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response();
        }
    };

    state.user.record_circuit(&envelope.circuit);

    match state.hops.submit(envelope.entry_address, &envelope.wire).await {
        Ok(()) => {
            info!(entry = envelope.entry_address, "Submitted envelope to entry relay");
            (StatusCode::OK, Json(json!({"result": "sent"}))).into_response()
        }
        Err(e) => {
            error!(entry = envelope.entry_address, "Submission to entry relay failed: {e}");
            (StatusCode::BAD_GATEWAY, Json(json!({"error": e.to_string()}))).into_response()
        }
    }
}

/// GET /v1/debug - Read the per-instance observability slots
async fn get_debug(State(state): State<ApiState>) -> Json<DebugSnapshot> {
    Json(state.user.debug_snapshot())
}

/// GET /health - Health check
async fn health_handler() -> StatusCode {
    StatusCode::OK
}
