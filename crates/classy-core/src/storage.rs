//! Durable key-value storage scoped to this client.
//!
//! A small string map persisted as JSON in the config directory. The UI keeps
//! the last searched location under [`LOCATION_KEY`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Key holding the last search query.
pub const LOCATION_KEY: &str = "location";

const STORAGE_FILE_NAME: &str = "local_storage.json";

#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Open the storage file inside `config_dir`. A missing or unreadable file
    /// starts out empty; the first write recreates it.
    pub fn open(config_dir: &Path) -> Self {
        let path = config_dir.join(STORAGE_FILE_NAME);
        let items = match Self::read_items(&path) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Ignoring unreadable local storage at {:?}: {}", path, e);
                BTreeMap::new()
            }
        };

        Self { path, items }
    }

    fn read_items(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = fs::read_to_string(path).map_err(|e| StorageError::Read(e.to_string()))?;
        serde_json::from_str(&json).map_err(|e| StorageError::Read(e.to_string()))
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Store `value` under `key` and flush to disk.
    pub fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.get_item(key) == Some(value) {
            return Ok(());
        }
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    pub fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let write_error = |e: &dyn std::fmt::Display| {
            StorageError::Write(format!("{}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(&e))?;
        }

        let json = serde_json::to_string_pretty(&self.items).map_err(|e| write_error(&e))?;
        fs::write(&self.path, json).map_err(|e| write_error(&e))?;

        tracing::debug!("Flushed local storage to {:?}", self.path);
        Ok(())
    }
}
