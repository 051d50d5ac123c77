use std::sync::Arc;

use chrono::Utc;
use tracing::{trace, warn};

use crate::models::{ProgressRecord, TitleId};
use crate::storage::{Storage, StorageKey, read_json, write_json};

/// Playback-position store. One record per (title, episode), last write wins,
/// no expiry. Writes are best-effort: losing a position is never worth
/// interrupting playback.
#[derive(Clone)]
pub struct ProgressService {
    storage: Arc<dyn Storage>,
}

impl ProgressService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn save(&self, title_id: &TitleId, ordinal: u32, position_secs: f64) {
        let record = ProgressRecord {
            title_id: title_id.clone(),
            ordinal,
            position_secs,
            written_at: Utc::now(),
        };
        let key = StorageKey::Progress(title_id.clone(), ordinal);
        trace!("Saving progress {} = {:.1}s", key, position_secs);
        if let Err(e) = write_json(self.storage.as_ref(), &key, &record) {
            warn!("Failed to save progress at {}: {}", key, e);
        }
    }

    pub fn load(&self, title_id: &TitleId, ordinal: u32) -> Option<f64> {
        let key = StorageKey::Progress(title_id.clone(), ordinal);
        let record: ProgressRecord = read_json(self.storage.as_ref(), &key)?;
        Some(record.position_secs)
    }

    pub fn clear(&self, title_id: &TitleId, ordinal: u32) {
        self.storage
            .remove(&StorageKey::Progress(title_id.clone(), ordinal).to_key());
    }
}
