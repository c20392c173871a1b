//! Key/value storage port.
//!
//! Everything the dashboard persists goes through [`StoragePort`]: a flat
//! map of string keys to string values, the same shape as browser local
//! storage. Collections are stored as whole JSON documents under fixed keys
//! (see [`keys`]).
//!
//! Two implementations are provided:
//! - [`MemoryStorage`] - process-local map, used by tests and `MSME_STORAGE=memory`
//! - [`FileStorage`] - one file per key in a data directory, shared by the
//!   server and the CLI

mod file;
mod memory;

use std::sync::Arc;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Fixed storage keys.
pub mod keys {
    pub const PRODUCTS: &str = "products";
    pub const ORDERS: &str = "orders";
    pub const CUSTOMERS: &str = "customers";
    pub const SEQUENCES: &str = "sequences";
    pub const PAYMENT_METHODS: &str = "payment_methods";
    pub const MICROLOANS: &str = "microloans";
    pub const AUTH_TOKEN: &str = "finai_auth_token";
    pub const AUTH_USER: &str = "finai_auth_user";

    /// Every key the dashboard writes, used by `reset`.
    pub const ALL: [&str; 8] = [
        PRODUCTS,
        ORDERS,
        CUSTOMERS,
        SEQUENCES,
        PAYMENT_METHODS,
        MICROLOANS,
        AUTH_TOKEN,
        AUTH_USER,
    ];
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters the backend cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key/value store.
///
/// Implementations must make `set` atomic per key: a reader sees either the
/// previous value or the new one, never a partial write.
pub trait StoragePort: Send + Sync {
    /// Read a value, or `None` if the key was never written (or was removed).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn StoragePort>;

/// Keys are restricted to `[A-Za-z0-9_-]` so every backend can map them 1:1.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
