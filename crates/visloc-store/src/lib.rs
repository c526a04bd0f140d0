//! visloc store - Redis adapter for the locate convention
//!
//! Provides:
//! - `RedisStore`, the `CommandStore` implementation over a Redis connection
//! - `StoreConfig`, host/port connection settings
//! - Error helpers mapping redis failures onto `ExError`

pub mod config;
pub mod errors;
pub mod redis_store;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use redis_store::RedisStore;
