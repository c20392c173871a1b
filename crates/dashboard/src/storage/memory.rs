//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{StorageError, StoragePort, validate_key};

/// Process-local storage. Contents vanish when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if a writer panicked.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.entries.read().map_err(|_| StorageError::Poisoned)?.len())
    }

    /// Whether no keys are stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("products").unwrap(), None);

        storage.set("products", "[]").unwrap();
        assert_eq!(storage.get("products").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.len().unwrap(), 1);

        storage.remove("products").unwrap();
        storage.remove("products").unwrap();
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn test_rejects_bad_key() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.set("a/b", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
