use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::constants::DEFAULT_HISTORY_CAP;
use crate::models::{HistoryEntry, Title, TitleId};
use crate::storage::{Storage, StorageKey, read_json, write_json};

/// Watch history: newest first, unique per (title, ordinal), capped. Recording
/// is best-effort like progress writes; it happens on the playback path.
#[derive(Clone)]
pub struct HistoryService {
    storage: Arc<dyn Storage>,
    cap: usize,
}

impl HistoryService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            cap: DEFAULT_HISTORY_CAP,
        }
    }

    pub fn with_cap(storage: Arc<dyn Storage>, cap: usize) -> Self {
        Self { storage, cap }
    }

    /// Record a play of (title, ordinal). An existing entry for the same pair
    /// moves to the front with a fresh timestamp instead of duplicating.
    pub fn record(&self, title: &Title, ordinal: u32) {
        let mut entries = self.recent();
        entries.retain(|e| !(e.title_id == title.id && e.ordinal == ordinal));
        entries.insert(
            0,
            HistoryEntry {
                title_id: title.id.clone(),
                title_name: title.name.clone(),
                ordinal,
                timestamp: Utc::now(),
                poster: title.poster.clone(),
            },
        );
        entries.truncate(self.cap);
        self.write(&entries);
    }

    /// Newest first. Absent or corrupt history reads as empty.
    pub fn recent(&self) -> Vec<HistoryEntry> {
        read_json(self.storage.as_ref(), &StorageKey::History).unwrap_or_default()
    }

    pub fn remove(&self, title_id: &TitleId, ordinal: u32) {
        let mut entries = self.recent();
        entries.retain(|e| !(e.title_id == *title_id && e.ordinal == ordinal));
        self.write(&entries);
    }

    pub fn clear(&self) {
        self.storage.remove(&StorageKey::History.to_key());
    }

    fn write(&self, entries: &[HistoryEntry]) {
        if let Err(e) = write_json(self.storage.as_ref(), &StorageKey::History, &entries) {
            warn!("Failed to write history: {}", e);
        }
    }
}
