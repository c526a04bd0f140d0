//! Redis-backed command store
//!
//! Each `CommandStore` primitive is exactly one Redis command, so atomicity
//! between concurrent requesters is whatever Redis gives that command.

use crate::config::StoreConfig;
use crate::errors::{from_redis, Result};
use redis::{Client, Commands, Connection};
use visloc_core::ops::CommandStore;

/// A single owned connection to a Redis server
pub struct RedisStore {
    conn: Connection,
    url: String,
}

impl RedisStore {
    /// Open a connection to the server described by `config`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for unusable settings, or `Connection`/`Timeout`
    /// if the server cannot be reached.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        Self::connect_url(&config.redis_url())
    }

    /// Open a connection from a full `redis://` URL
    ///
    /// # Errors
    ///
    /// Same as [`RedisStore::connect`].
    pub fn connect_url(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| from_redis("connect", None, e))?;
        let conn = client
            .get_connection()
            .map_err(|e| from_redis("connect", None, e))?;
        tracing::debug!(url = url, "connected to store");
        Ok(Self {
            conn,
            url: url.to_string(),
        })
    }

    /// URL this store is connected to
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").field("url", &self.url).finish()
    }
}

impl CommandStore for RedisStore {
    fn push_command(&mut self, key: &str, payload: &str) -> Result<u64> {
        let len: u64 = self
            .conn
            .rpush(key, payload)
            .map_err(|e| from_redis("rpush", Some(key), e))?;
        tracing::debug!(key = key, queue_len = len, "rpush");
        Ok(len)
    }

    fn delete_key(&mut self, key: &str) -> Result<u64> {
        let removed: u64 = self
            .conn
            .del(key)
            .map_err(|e| from_redis("del", Some(key), e))?;
        tracing::debug!(key = key, removed = removed, "del");
        Ok(removed)
    }

    fn get_value(&mut self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .conn
            .get(key)
            .map_err(|e| from_redis("get", Some(key), e))?;
        tracing::debug!(key = key, present = value.is_some(), "get");
        Ok(value)
    }

    fn list_len(&mut self, key: &str) -> Result<u64> {
        let len: u64 = self
            .conn
            .llen(key)
            .map_err(|e| from_redis("llen", Some(key), e))?;
        tracing::debug!(key = key, queue_len = len, "llen");
        Ok(len)
    }
}
