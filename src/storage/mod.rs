mod file;
mod keys;
mod memory;

pub use file::FileStorage;
pub use keys::StorageKey;
pub use memory::MemoryStorage;

use crate::error::StorageError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// String-keyed, string-valued persistent storage, scoped to the installation.
/// Always injected, never reached through a global: every service takes its
/// backend explicitly so tests can substitute doubles and features sharing the
/// namespace stay decoupled.
///
/// `get` treats a missing key and an unreadable backend the same way (absent);
/// `set` reports failures but callers on the playback path treat them as
/// best-effort.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// Typed read: absent key, parse failure, and backend failure all collapse to
/// `None`. Parse failures are logged; a corrupt record is not worth crashing
/// playback over.
pub fn read_json<T: DeserializeOwned>(storage: &dyn Storage, key: &StorageKey) -> Option<T> {
    let raw = storage.get(&key.to_key())?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding corrupt record at {}: {}", key, e);
            None
        }
    }
}

/// Typed overwrite of the record at `key`. Last write wins.
pub fn write_json<T: Serialize>(
    storage: &dyn Storage,
    key: &StorageKey,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Corrupt {
        key: key.to_key(),
        source: e,
    })?;
    storage.set(&key.to_key(), &raw)
}
