use crate::errors::Result;

/// The external key-value/list store as seen by the requester
///
/// Each method is one atomic primitive of the backing store. Implementations
/// must not add retries or buffering; a failure is returned as-is.
pub trait CommandStore {
    /// Append `payload` to the tail of the list at `key`, creating it if needed
    ///
    /// Returns the list length after the push.
    ///
    /// # Errors
    ///
    /// Returns `WrongType` if `key` holds a non-list value, or a transport
    /// error kind if the store cannot be reached.
    fn push_command(&mut self, key: &str, payload: &str) -> Result<u64>;

    /// Delete `key` whatever it holds
    ///
    /// Returns the number of keys removed (0 when it did not exist).
    ///
    /// # Errors
    ///
    /// Returns a transport error kind if the store cannot be reached.
    fn delete_key(&mut self, key: &str) -> Result<u64>;

    /// Read the plain value at `key`, `None` when absent
    ///
    /// # Errors
    ///
    /// Returns `WrongType` if `key` holds a list, or a transport error kind.
    fn get_value(&mut self, key: &str) -> Result<Option<String>>;

    /// Length of the list at `key`, 0 when absent
    ///
    /// # Errors
    ///
    /// Returns `WrongType` if `key` holds a non-list value, or a transport
    /// error kind.
    fn list_len(&mut self, key: &str) -> Result<u64>;
}

impl<S: CommandStore + ?Sized> CommandStore for &mut S {
    fn push_command(&mut self, key: &str, payload: &str) -> Result<u64> {
        (**self).push_command(key, payload)
    }

    fn delete_key(&mut self, key: &str) -> Result<u64> {
        (**self).delete_key(key)
    }

    fn get_value(&mut self, key: &str) -> Result<Option<String>> {
        (**self).get_value(key)
    }

    fn list_len(&mut self, key: &str) -> Result<u64> {
        (**self).list_len(key)
    }
}

impl<S: CommandStore + ?Sized> CommandStore for Box<S> {
    fn push_command(&mut self, key: &str, payload: &str) -> Result<u64> {
        (**self).push_command(key, payload)
    }

    fn delete_key(&mut self, key: &str) -> Result<u64> {
        (**self).delete_key(key)
    }

    fn get_value(&mut self, key: &str) -> Result<Option<String>> {
        (**self).get_value(key)
    }

    fn list_len(&mut self, key: &str) -> Result<u64> {
        (**self).list_len(key)
    }
}
