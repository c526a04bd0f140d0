//! visloc.toml loading
//!
//! ```toml
//! log = "production"
//!
//! [store]
//! host = "10.0.0.2"
//! port = 6379
//!
//! [keys]
//! commands = "vision_commands"
//! location = "vision_location"
//! ```
//!
//! Every field is optional; missing ones take their defaults.

use serde::Deserialize;
use std::path::Path;
use visloc_core::errors::{ExError, ExErrorKind, Result};
use visloc_core::logging_facility::Profile;
use visloc_core::model::QueueKeys;
use visloc_store::StoreConfig;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "visloc.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub log: Profile,
    pub store: StoreConfig,
    pub keys: QueueKeys,
}

impl CliConfig {
    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::InvalidConfig)
                .with_op("config_parse")
                .with_message(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `visloc.toml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };

        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("config_read")
                .with_message(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        log: Option<Profile>,
    ) -> Result<Self> {
        if let Some(host) = host {
            self.store.host = host;
        }
        if let Some(port) = port {
            self.store.port = port;
        }
        if let Some(log) = log {
            self.log = log;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        self.store.validate()?;
        self.keys.validate()
    }
}
