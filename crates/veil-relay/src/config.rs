//! Configuration management

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use veil_onion::addr;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Small id registered with the directory; the listen port is the
    /// relay address derived from it.
    pub node_id: u32,
    pub directory_url: String,
    /// Host every overlay actor is reachable on.
    pub overlay_host: String,
    /// Per-hop timeout applied to the downstream forward call.
    pub forward_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            node_id: 1,
            directory_url: "http://127.0.0.1:8080".to_string(),
            overlay_host: "127.0.0.1".to_string(),
            forward_timeout_secs: 10,
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables and TOML file
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(id) = std::env::var("VEIL_RELAY_NODE_ID") {
            config.node_id = id
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("Invalid node_id: {}", e)))?;
        }

        if let Ok(url) = std::env::var("VEIL_RELAY_DIRECTORY_URL") {
            config.directory_url = url;
        }

        if let Ok(host) = std::env::var("VEIL_RELAY_OVERLAY_HOST") {
            config.overlay_host = host;
        }

        if let Ok(secs) = std::env::var("VEIL_RELAY_FORWARD_TIMEOUT_SECS") {
            config.forward_timeout_secs = secs
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("Invalid forward_timeout_secs: {}", e)))?;
        }

        if let Ok(config_path) = std::env::var("VEIL_RELAY_CONFIG") {
            config.load_from_toml(&config_path)?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load from TOML config file
    fn load_from_toml(&mut self, path: &str) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let toml_config: toml::Value = toml::from_str(&content)?;

        if let Some(id) = toml_config.get("node_id").and_then(|v| v.as_integer()) {
            self.node_id = id as u32;
        }

        if let Some(url) = toml_config.get("directory_url").and_then(|v| v.as_str()) {
            self.directory_url = url.to_string();
        }

        if let Some(host) = toml_config.get("overlay_host").and_then(|v| v.as_str()) {
            self.overlay_host = host.to_string();
        }

        if let Some(secs) = toml_config
            .get("forward_timeout_secs")
            .and_then(|v| v.as_integer())
        {
            self.forward_timeout_secs = secs as u64;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The relay address range must stay below the user range.
        if addr::relay_address(self.node_id) >= addr::USER_ADDR_BASE {
            return Err(ConfigError::Invalid(format!(
                "node_id {} pushes the relay address into the user range",
                self.node_id
            )));
        }
        if self.forward_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "forward_timeout_secs must be > 0".to_string(),
            ));
        }
        self.listen_addr()?;
        Ok(())
    }

    /// The socket this relay listens on: its overlay address as a port.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = addr::relay_address(self.node_id);
        format!("{}:{}", self.overlay_host, address)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("Invalid listen address: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RelayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr().unwrap().port(), 4001);
    }

    #[test]
    fn test_node_id_outside_relay_range_rejected() {
        let config = RelayConfig {
            node_id: 1000,
            ..RelayConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = RelayConfig {
            forward_timeout_secs: 0,
            ..RelayConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
