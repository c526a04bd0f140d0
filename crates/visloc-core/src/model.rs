//! Wire model shared between the requester and its counterpart process
//!
//! Both directions are JSON text: commands are pushed as `{"locate": thing}`
//! and the counterpart publishes `{"azimuth": .., "altitude": ..}` under the
//! location key.

use crate::errors::{ExError, Result, VisionError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default name of the list holding pending commands
pub const DEFAULT_COMMAND_KEY: &str = "vision_commands";

/// Default name of the key holding the last reported location
pub const DEFAULT_LOCATION_KEY: &str = "vision_location";

/// A request for the counterpart to locate something
///
/// `locate` is passed through untouched; which names are meaningful is a
/// convention between the two processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub locate: String,
}

impl Command {
    pub fn locate(thing: impl Into<String>) -> Self {
        Self {
            locate: thing.into(),
        }
    }

    /// Encode as the JSON text pushed onto the command queue
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the command cannot be encoded.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| encode_error("command", e.to_string()))
    }
}

/// Last position reported for the requested thing
///
/// Fields other than `azimuth` and `altitude` written by the counterpart are
/// kept in `extra` so a read does not drop them. `extra` never holds either
/// coordinate name; `encode` refuses a location where it does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub azimuth: f64,
    pub altitude: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Location {
    pub fn new(azimuth: f64, altitude: f64) -> Self {
        Self {
            azimuth,
            altitude,
            extra: Map::new(),
        }
    }

    /// Attach an extra field
    ///
    /// A name that collides with a coordinate makes the location unencodable.
    pub fn with_extra(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Decode the text stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `Serialization` (carrying `key`) if the text is not a location object.
    pub fn decode(key: &str, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            VisionError::MalformedLocation {
                key: key.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Encode in the same text form the counterpart writes
    ///
    /// Only locations that `decode` gives back unchanged are encoded.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if a coordinate is NaN or infinite (JSON would
    /// carry it as `null`), if `extra` shadows a coordinate, or if encoding
    /// fails.
    pub fn encode(&self) -> Result<String> {
        let coordinates = [(FIELD_AZIMUTH, self.azimuth), (FIELD_ALTITUDE, self.altitude)];
        for (name, value) in coordinates {
            if !value.is_finite() {
                return Err(encode_error(
                    "location",
                    format!("{name} is not finite: {value}"),
                ));
            }
            if self.extra.contains_key(name) {
                return Err(encode_error(
                    "location",
                    format!("extra field '{name}' shadows the coordinate"),
                ));
            }
        }
        serde_json::to_string(self).map_err(|e| encode_error("location", e.to_string()))
    }
}

const FIELD_AZIMUTH: &str = "azimuth";
const FIELD_ALTITUDE: &str = "altitude";

fn encode_error(what: &'static str, reason: String) -> ExError {
    VisionError::Encode { what, reason }.into()
}

/// The pair of well-known key names the convention relies on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueKeys {
    /// List that receives encoded commands
    pub commands: String,
    /// Key holding the encoded location
    pub location: String,
}

impl QueueKeys {
    /// Build a validated key pair
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either name is empty or both names are equal.
    pub fn new(commands: impl Into<String>, location: impl Into<String>) -> Result<Self> {
        let keys = Self {
            commands: commands.into(),
            location: location.into(),
        };
        keys.validate()?;
        Ok(keys)
    }

    /// Check the invariants `new` enforces; used after deserializing
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` on an empty or shared key name.
    pub fn validate(&self) -> Result<()> {
        if self.commands.trim().is_empty() {
            return Err(VisionError::InvalidKey {
                reason: "command queue key cannot be empty".to_string(),
            }
            .into());
        }
        if self.location.trim().is_empty() {
            return Err(VisionError::InvalidKey {
                reason: "location key cannot be empty".to_string(),
            }
            .into());
        }
        // One key cannot be both a list and a plain value.
        if self.commands == self.location {
            return Err(VisionError::InvalidKey {
                reason: format!(
                    "command queue and location share the key '{}'",
                    self.commands
                ),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for QueueKeys {
    fn default() -> Self {
        Self {
            commands: DEFAULT_COMMAND_KEY.to_string(),
            location: DEFAULT_LOCATION_KEY.to_string(),
        }
    }
}
