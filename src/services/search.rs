use std::sync::Arc;

use crate::constants::DEFAULT_SEARCH_HISTORY_CAP;
use crate::error::StorageError;
use crate::storage::{Storage, StorageKey, read_json, write_json};

/// Recent search terms, newest first, unique, capped.
#[derive(Clone)]
pub struct SearchHistoryService {
    storage: Arc<dyn Storage>,
    cap: usize,
}

impl SearchHistoryService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            cap: DEFAULT_SEARCH_HISTORY_CAP,
        }
    }

    /// Record a submitted search. Blank terms are ignored; repeats move to
    /// the front.
    pub fn record(&self, term: &str) -> Result<(), StorageError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }
        let mut terms = self.recent();
        terms.retain(|t| t != term);
        terms.insert(0, term.to_string());
        terms.truncate(self.cap);
        write_json(self.storage.as_ref(), &StorageKey::SearchHistory, &terms)
    }

    pub fn recent(&self) -> Vec<String> {
        read_json(self.storage.as_ref(), &StorageKey::SearchHistory).unwrap_or_default()
    }

    pub fn remove(&self, term: &str) -> Result<(), StorageError> {
        let mut terms = self.recent();
        terms.retain(|t| t != term);
        write_json(self.storage.as_ref(), &StorageKey::SearchHistory, &terms)
    }

    pub fn clear(&self) {
        self.storage.remove(&StorageKey::SearchHistory.to_key());
    }
}
