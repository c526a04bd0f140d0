use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::{Result, VisionError};
use crate::ops::store::CommandStore;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Value(String),
    List(Vec<String>),
}

/// In-memory stand-in for the external store
///
/// Clones share the same keyspace, so several requesters can be pointed at
/// one emulated store. Every primitive runs under a single lock, matching the
/// per-command atomicity of the real store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| VisionError::StorePoisoned.into())
    }

    /// Write a plain value, replacing whatever `key` held
    ///
    /// This is the counterpart's side of the convention; tests use it to
    /// publish a location.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the store lock is poisoned.
    pub fn set_value(&self, key: &str, value: impl Into<String>) -> Result<()> {
        self.lock()?
            .insert(key.to_string(), Entry::Value(value.into()));
        Ok(())
    }

    /// Snapshot of the list at `key`, head first
    ///
    /// # Errors
    ///
    /// Returns `WrongType` if `key` holds a plain value.
    pub fn list(&self, key: &str) -> Result<Vec<String>> {
        match self.lock()?.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::List(items)) => Ok(items.clone()),
            Some(Entry::Value(_)) => Err(wrong_type(key, "list")),
        }
    }

    /// Whether `key` exists in any form
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the store lock is poisoned.
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.contains_key(key))
    }
}

fn wrong_type(key: &str, expected: &'static str) -> crate::errors::ExError {
    VisionError::WrongType {
        key: key.to_string(),
        expected,
    }
    .into()
}

impl CommandStore for MemoryStore {
    fn push_command(&mut self, key: &str, payload: &str) -> Result<u64> {
        let mut entries = self.lock()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()));
        match entry {
            Entry::List(items) => {
                items.push(payload.to_string());
                Ok(items.len() as u64)
            }
            Entry::Value(_) => Err(wrong_type(key, "list")),
        }
    }

    fn delete_key(&mut self, key: &str) -> Result<u64> {
        Ok(self.lock()?.remove(key).map_or(0, |_| 1))
    }

    fn get_value(&mut self, key: &str) -> Result<Option<String>> {
        match self.lock()?.get(key) {
            None => Ok(None),
            Some(Entry::Value(value)) => Ok(Some(value.clone())),
            Some(Entry::List(_)) => Err(wrong_type(key, "plain value")),
        }
    }

    fn list_len(&mut self, key: &str) -> Result<u64> {
        match self.lock()?.get(key) {
            None => Ok(0),
            Some(Entry::List(items)) => Ok(items.len() as u64),
            Some(Entry::Value(_)) => Err(wrong_type(key, "list")),
        }
    }
}
