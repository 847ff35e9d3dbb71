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

/// User endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Small id of this user; the listen port is the user address derived
    /// from it.
    pub user_id: u32,
    pub directory_url: String,
    /// Host every overlay actor is reachable on.
    pub overlay_host: String,
    /// Timeout applied to the submission to the entry relay.
    pub submit_timeout_secs: u64,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            user_id: 1,
            directory_url: "http://127.0.0.1:8080".to_string(),
            overlay_host: "127.0.0.1".to_string(),
            submit_timeout_secs: 10,
        }
    }
}

impl UserConfig {
    /// Load configuration from environment variables and TOML file
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(id) = std::env::var("VEIL_USER_ID") {
            config.user_id = id
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("Invalid user_id: {}", e)))?;
        }

        if let Ok(url) = std::env::var("VEIL_USER_DIRECTORY_URL") {
            config.directory_url = url;
        }

        if let Ok(host) = std::env::var("VEIL_USER_OVERLAY_HOST") {
            config.overlay_host = host;
        }

        if let Ok(secs) = std::env::var("VEIL_USER_SUBMIT_TIMEOUT_SECS") {
            config.submit_timeout_secs = secs
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("Invalid submit_timeout_secs: {}", e)))?;
        }

        if let Ok(config_path) = std::env::var("VEIL_USER_CONFIG") {
            config.load_from_toml(&config_path)?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load from TOML config file
    fn load_from_toml(&mut self, path: &str) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let toml_config: toml::Value = toml::from_str(&content)?;

        if let Some(id) = toml_config.get("user_id").and_then(|v| v.as_integer()) {
            self.user_id = id as u32;
        }

        if let Some(url) = toml_config.get("directory_url").and_then(|v| v.as_str()) {
            self.directory_url = url.to_string();
        }

        if let Some(host) = toml_config.get("overlay_host").and_then(|v| v.as_str()) {
            self.overlay_host = host.to_string();
        }

        if let Some(secs) = toml_config
            .get("submit_timeout_secs")
            .and_then(|v| v.as_integer())
        {
            self.submit_timeout_secs = secs as u64;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The user address doubles as a port and must fit one.
        if addr::user_address(self.user_id) > u16::MAX as u64 {
            return Err(ConfigError::Invalid(format!(
                "user_id {} pushes the user address past the port range",
                self.user_id
            )));
        }
        if self.submit_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "submit_timeout_secs must be > 0".to_string(),
            ));
        }
        self.listen_addr()?;
        Ok(())
    }

    /// The socket this user endpoint listens on: its overlay address as a port.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = addr::user_address(self.user_id);
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
        let config = UserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr().unwrap().port(), 5001);
    }

    #[test]
    fn test_user_id_past_port_range_rejected() {
        let config = UserConfig {
            user_id: 61_000,
            ..UserConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
