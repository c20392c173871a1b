//! CLI command implementations.
//!
//! Every command works on the same file-backed store the server reads, with
//! simulated latency turned off.

pub mod customers;
pub mod data;
pub mod orders;
pub mod products;

use std::path::PathBuf;
use std::sync::Arc;

use msme_dashboard::config::DEFAULT_DATA_DIR;
use msme_dashboard::db::{Latency, Store};
use msme_dashboard::storage::{FileStorage, StorageError};

/// Open the store in `data_dir`, falling back to `MSME_DATA_DIR` and then
/// the default directory.
///
/// # Errors
///
/// Returns `StorageError::Io` if the directory cannot be created.
pub fn open_store(data_dir: Option<PathBuf>) -> Result<Store, StorageError> {
    dotenvy::dotenv().ok();

    let dir = data_dir
        .or_else(|| std::env::var_os("MSME_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    tracing::debug!(dir = %dir.display(), "Opening data directory");

    let storage = FileStorage::open(dir)?;
    Ok(Store::new(Arc::new(storage), Latency::none()))
}
