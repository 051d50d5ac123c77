use std::sync::Arc;

use crate::error::StorageError;
use crate::models::TitleId;
use crate::storage::{Storage, StorageKey, read_json, write_json};

/// Favorite titles, stored as an ordered list of ids (insertion order).
#[derive(Clone)]
pub struct FavoritesService {
    storage: Arc<dyn Storage>,
}

impl FavoritesService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Flip membership; returns the new state (true = now a favorite).
    pub fn toggle(&self, title_id: &TitleId) -> Result<bool, StorageError> {
        let mut ids = self.all();
        let now_favorite = if ids.contains(title_id) {
            ids.retain(|id| id != title_id);
            false
        } else {
            ids.push(title_id.clone());
            true
        };
        write_json(self.storage.as_ref(), &StorageKey::Favorites, &ids)?;
        Ok(now_favorite)
    }

    pub fn contains(&self, title_id: &TitleId) -> bool {
        self.all().contains(title_id)
    }

    pub fn all(&self) -> Vec<TitleId> {
        read_json(self.storage.as_ref(), &StorageKey::Favorites).unwrap_or_default()
    }

    pub fn clear(&self) {
        self.storage.remove(&StorageKey::Favorites.to_key());
    }
}
