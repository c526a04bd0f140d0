//! Error handling for visloc-store
//!
//! Maps redis client failures onto visloc-core ExError kinds

use redis::{ErrorKind, RedisError};
use visloc_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("store_config")
        .with_message(reason)
}

/// Classify a redis error
///
/// Timeouts, refused/dropped connections and other I/O failures are
/// transport errors; a `WRONGTYPE` reply becomes `WrongType` on `key`.
pub fn from_redis(op: &str, key: Option<&str>, err: RedisError) -> ExError {
    let kind = if err.is_timeout() {
        ExErrorKind::Timeout
    } else if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        ExErrorKind::Connection
    } else if err.code() == Some("WRONGTYPE") {
        ExErrorKind::WrongType
    } else {
        match err.kind() {
            ErrorKind::InvalidClientConfig => ExErrorKind::InvalidConfig,
            ErrorKind::TypeError => ExErrorKind::Serialization,
            _ => ExErrorKind::ExternalService,
        }
    };

    let mut ex = ExError::new(kind)
        .with_op(op.to_string())
        .with_message(err.to_string());
    if let Some(key) = key {
        ex = ex.with_key(key);
    }
    ex
}
