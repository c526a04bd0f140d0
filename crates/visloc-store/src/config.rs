//! Connection settings for the external store

use crate::errors::{config_error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 6379;

/// Host and port of the Redis server
///
/// No other connection parameters (auth, TLS, timeouts) are supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
}

impl StoreConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Reject settings that can never produce a connection
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty host or port 0.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(config_error("store host cannot be empty"));
        }
        if self.port == 0 {
            return Err(config_error("store port must be non-zero"));
        }
        Ok(())
    }

    /// Connection URL in the form the redis client accepts
    pub fn redis_url(&self) -> String {
        // IPv6 literals need brackets inside a URL authority.
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("redis://[{}]:{}/", self.host, self.port)
        } else {
            format!("redis://{}:{}/", self.host, self.port)
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
