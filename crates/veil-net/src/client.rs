//! Directory and hop-submission clients.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use veil_onion::Node;

use crate::proto::{MessageRequest, NodeListResponse, RegisterNodeRequest};

#[derive(Debug, Error)]
pub enum NetError {
    #[error("http error: {0}")]
    Http(String),
    #[error("bad response: {0}")]
    BadResponse(String),
}

/// Client for the directory service.
#[derive(Clone)]
pub struct DirectoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, NetError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| NetError::Http(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Upsert this node's public key under its id.
    pub async fn register(&self, node_id: u32, public_key: &str) -> Result<(), NetError> {
        let url = format!("{}/v1/nodes", self.base_url);
        let resp = self
            .client
            .post(url)
            .json(&RegisterNodeRequest {
                node_id,
                public_key: public_key.to_string(),
            })
            .send()
            .await
            .map_err(|e| NetError::Http(e.to_string()))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(NetError::BadResponse(format!(
                "status={} body={:?}",
                resp.status(),
                resp.text().await.ok()
            )))
        }
    }

    /// Fetch the current node snapshot.
    pub async fn snapshot(&self) -> Result<Vec<Node>, NetError> {
        let url = format!("{}/v1/nodes", self.base_url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NetError::Http(e.to_string()))?;

        if resp.status() != StatusCode::OK {
            return Err(NetError::BadResponse(format!("status={}", resp.status())));
        }
        let body: NodeListResponse = resp
            .json()
            .await
            .map_err(|e| NetError::BadResponse(e.to_string()))?;
        Ok(body.nodes)
    }
}

/// Client for submitting wire strings to overlay addresses.
///
/// The decoded 10-digit address doubles as the target's HTTP port on the
/// loopback overlay. Every submission carries a per-hop timeout so a
/// stalled downstream hop cannot block its caller indefinitely.
#[derive(Clone)]
pub struct HopClient {
    host: String,
    client: reqwest::Client,
}

impl HopClient {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self, NetError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| NetError::Http(e.to_string()))?;
        Ok(Self {
            host: host.into(),
            client,
        })
    }

    /// POST the message body to the actor listening at `address`.
    pub async fn submit(&self, address: u64, message: &str) -> Result<(), NetError> {
        let url = format!("http://{}:{}/v1/message", self.host, address);
        let resp = self
            .client
            .post(url)
            .json(&MessageRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| NetError::Http(e.to_string()))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(NetError::BadResponse(format!(
                "status={} body={:?}",
                resp.status(),
                resp.text().await.ok()
            )))
        }
    }
}
