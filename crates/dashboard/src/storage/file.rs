//! File-backed storage backend.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a uniquely named
//! temporary file in the same directory and are renamed into place, so a
//! crash mid-write leaves the previous value intact and concurrent writers
//! (the server and the CLI) never share a temporary file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{StorageError, StoragePort, validate_key};

/// Storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a data directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StoragePort for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_err = |source: std::io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(value.as_bytes()).map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("orders", r#"[{"id":"ORD-001"}]"#).unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("orders").unwrap().as_deref(),
            Some(r#"[{"id":"ORD-001"}]"#)
        );
        assert!(dir.path().join("orders.json").exists());
    }

    #[test]
    fn test_missing_key_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nested")).unwrap();
        assert_eq!(storage.get("customers").unwrap(), None);
        storage.remove("customers").unwrap();

        storage.set("customers", "[]").unwrap();
        storage.remove("customers").unwrap();
        assert_eq!(storage.get("customers").unwrap(), None);
    }

    #[test]
    fn test_concurrent_writers_leave_one_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let storage = std::sync::Arc::new(FileStorage::open(dir.path()).unwrap());
        let values: Vec<String> = (0..8).map(|i| format!(r#"[{{"writer":{i}}}]"#)).collect();

        let handles: Vec<_> = values
            .iter()
            .cloned()
            .map(|value| {
                let storage = std::sync::Arc::clone(&storage);
                std::thread::spawn(move || {
                    for _ in 0..20 {
                        storage.set("orders", &value).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stored = storage.get("orders").unwrap().unwrap();
        assert!(values.contains(&stored));
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1, "temporary files are renamed away");
    }

    #[test]
    fn test_rejects_traversal_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.get("../secrets"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
