//! Directory node server

use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, ApiState};
use crate::config::ServerConfig;
use crate::store::NodeStore;

/// Directory node server
pub struct DirNodeServer {
    config: ServerConfig,
    store: Arc<NodeStore>,
}

impl DirNodeServer {
    /// Create new directory node server
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(NodeStore::new(config.max_nodes));
        Self { config, store }
    }

    /// Run the directory node server
    pub async fn run(&self) -> Result<()> {
        info!("Starting directory node on {}", self.config.listen_addr);

        let app = create_router(ApiState {
            store: self.store.clone(),
        })
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        let listener = tokio::net::TcpListener::bind(&self.config.listen_addr).await?;
        info!("HTTP server listening on {}", self.config.listen_addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
