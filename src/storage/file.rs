use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::Storage;
use crate::error::StorageError;

/// File-backed storage: the whole namespace is one JSON object on disk,
/// loaded eagerly and rewritten on every set. Matches the small-record,
/// low-write-rate profile of the features using it.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open (or create) the store at the default location under the
    /// platform data directory.
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir().context("Failed to get data directory")?;
        Self::open(data_dir.join("rookery").join("storage.json"))
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).context("Failed to read storage file")?;
            match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(e) => {
                    // A corrupt store starts over empty rather than blocking startup.
                    warn!("Storage file at {:?} is corrupt, starting empty: {}", path, e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        debug!("Opened storage at {:?}", path);
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries).map_err(|e| {
            StorageError::Corrupt {
                key: self.path.display().to_string(),
                source: e,
            }
        })?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            if let Err(e) = self.flush(&entries) {
                warn!("Failed to flush storage after remove: {}", e);
            }
        }
    }
}
