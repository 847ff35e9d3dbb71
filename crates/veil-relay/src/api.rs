//! HTTP message endpoint

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, Router},
    Json,
};
use serde_json::json;
use tracing::{debug, error, info, warn};

use veil_net::proto::MessageRequest;
use veil_net::HopClient;
use veil_onion::peel::{peel, PeelResult};
use veil_onion::OnionError;

use crate::state::{DebugSnapshot, RelayState};

#[derive(Clone)]
pub struct ApiState {
    pub relay: Arc<RelayState>,
    pub hops: HopClient,
}

/// Create API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/v1/message", post(handle_message))
        .route("/v1/debug", get(get_debug))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// POST /v1/message - Peel one encryption layer and forward the remainder
async fn handle_message(
    State(state): State<ApiState>,
    Json(request): Json<MessageRequest>,
) -> Response {
    state.relay.record_received(&request.message);

    let layer = match peel(&request.message, state.relay.identity()) {
        Ok(layer) => layer,
        Err(e @ (OnionError::MalformedEnvelope | OnionError::MalformedLayer)) => {
            warn!("Rejected malformed envelope: {e}");
            return (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()})))
                .into_response();
        }
        Err(e) => {
            warn!("Failed to peel envelope: {e}");
            return (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()})))
                .into_response();
        }
    };

    state.relay.record_peeled(&layer.plain_layer(), layer.next);

    // Relay and user targets take the same submission; the role only
    // changes what we call the payload.
    let (target, body, done_msg) = match layer.classify() {
        PeelResult::Forward { next, remainder } => {
            (next, remainder, "Forwarded peeled envelope to next relay")
        }
        PeelResult::Deliver {
            destination,
            plaintext,
        } => (destination, plaintext, "Delivered plaintext to user endpoint"),
    };

    if body.is_empty() {
        debug!(address = target, "Peeled layer had empty remainder, nothing to forward");
        return (StatusCode::OK, Json(json!({"result": "processed"}))).into_response();
    }

    match state.hops.submit(target, &body).await {
        Ok(()) => {
            info!(address = target, "{done_msg}");
            (StatusCode::OK, Json(json!({"result": "processed"}))).into_response()
        }
        Err(e) => {
            error!(address = target, "Downstream submission failed: {e}");
            (StatusCode::BAD_GATEWAY, Json(json!({"error": e.to_string()}))).into_response()
        }
    }
}

/// GET /v1/debug - Read the per-instance observability slots
async fn get_debug(State(state): State<ApiState>) -> Json<DebugSnapshot> {
    Json(state.relay.debug_snapshot())
}

/// GET /health - Health check
async fn health_handler() -> StatusCode {
    StatusCode::OK
}
