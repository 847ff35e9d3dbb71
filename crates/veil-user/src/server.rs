//! User endpoint server

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use veil_net::{DirectoryClient, HopClient};

use crate::api::{create_router, ApiState};
use crate::config::UserConfig;
use crate::state::UserState;

/// User endpoint server
pub struct UserServer {
    config: UserConfig,
    user: Arc<UserState>,
}

impl UserServer {
    /// Create new user endpoint server
    pub fn new(config: UserConfig) -> Self {
        Self {
            config,
            user: Arc::new(UserState::new()),
        }
    }

    /// Run the user endpoint server
    pub async fn run(&self) -> Result<()> {
        let listen_addr = self.config.listen_addr()?;
        info!(user_id = self.config.user_id, "Starting user endpoint on {listen_addr}");

        let directory = DirectoryClient::new(&self.config.directory_url)?;
        let hops = HopClient::new(
            self.config.overlay_host.clone(),
            Duration::from_secs(self.config.submit_timeout_secs),
        )?;

        let app = create_router(ApiState {
            user: self.user.clone(),
            directory,
            hops,
        })
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        let listener = tokio::net::TcpListener::bind(listen_addr).await?;
        info!("HTTP server listening on {listen_addr}");

        axum::serve(listener, app).await?;

        Ok(())
    }
}
