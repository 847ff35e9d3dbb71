//! Relay node server

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use veil_crypto::identity::Identity;
use veil_net::{DirectoryClient, HopClient};

use crate::api::{create_router, ApiState};
use crate::config::RelayConfig;
use crate::state::RelayState;

/// Relay node server
pub struct RelayServer {
    config: RelayConfig,
    relay: Arc<RelayState>,
}

impl RelayServer {
    /// Create a relay with a fresh identity.
    pub fn new(config: RelayConfig) -> Self {
        let identity = Identity::generate();
        Self {
            config,
            relay: Arc::new(RelayState::new(identity)),
        }
    }

    /// Register with the directory, then serve the message endpoint.
    pub async fn run(&self) -> Result<()> {
        let listen_addr = self.config.listen_addr()?;
        info!(node_id = self.config.node_id, "Starting relay node on {listen_addr}");

        // Boot registration. A failure is logged, not fatal: an unregistered
        // relay is never selected for new circuits but keeps serving
        // envelopes already in flight.
        match DirectoryClient::new(&self.config.directory_url) {
            Ok(directory) => {
                match directory
                    .register(self.config.node_id, &self.relay.identity().public_key_b64())
                    .await
                {
                    Ok(()) => {
                        info!(node_id = self.config.node_id, "Registered with directory")
                    }
                    Err(e) => warn!("Directory registration failed: {e}"),
                }
            }
            Err(e) => warn!("Could not build directory client: {e}"),
        }

        let hops = HopClient::new(
            self.config.overlay_host.clone(),
            Duration::from_secs(self.config.forward_timeout_secs),
        )?;

        let app = create_router(ApiState {
            relay: self.relay.clone(),
            hops,
        })
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        let listener = tokio::net::TcpListener::bind(listen_addr).await?;
        info!("HTTP server listening on {listen_addr}");

        axum::serve(listener, app).await?;

        Ok(())
    }
}
