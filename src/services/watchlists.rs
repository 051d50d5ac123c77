use std::sync::Arc;

use chrono::Utc;

use crate::error::StorageError;
use crate::models::{Title, TitleId, Watchlist, WatchlistEntry, WatchlistId};
use crate::storage::{Storage, StorageKey, read_json, write_json};

/// Named watchlists. The first read seeds three default lists so the feature
/// is usable without a setup step.
#[derive(Clone)]
pub struct WatchlistService {
    storage: Arc<dyn Storage>,
}

impl WatchlistService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All lists, seeding the defaults when none exist yet.
    pub fn all(&self) -> Result<Vec<Watchlist>, StorageError> {
        let existing: Option<Vec<Watchlist>> =
            read_json(self.storage.as_ref(), &StorageKey::Watchlists);
        match existing {
            Some(lists) if !lists.is_empty() => Ok(lists),
            _ => {
                let defaults = default_lists();
                self.write(&defaults)?;
                Ok(defaults)
            }
        }
    }

    /// Add or remove `title` from the given list; returns true when the title
    /// is in the list afterwards. Unknown list ids are a no-op (false).
    pub fn toggle(&self, list_id: &WatchlistId, title: &Title) -> Result<bool, StorageError> {
        let mut lists = self.all()?;
        let Some(list) = lists.iter_mut().find(|l| l.id == *list_id) else {
            return Ok(false);
        };

        let now_member = if list.entries.iter().any(|e| e.title_id == title.id) {
            list.entries.retain(|e| e.title_id != title.id);
            false
        } else {
            list.entries.push(WatchlistEntry {
                title_id: title.id.clone(),
                title_name: title.name.clone(),
                poster: title.poster.clone(),
                added_at: Utc::now(),
            });
            true
        };

        self.write(&lists)?;
        Ok(now_member)
    }

    /// Ids of every list that contains `title_id`.
    pub fn lists_containing(&self, title_id: &TitleId) -> Result<Vec<WatchlistId>, StorageError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|l| l.entries.iter().any(|e| e.title_id == *title_id))
            .map(|l| l.id)
            .collect())
    }

    pub fn create(&self, name: &str) -> Result<Watchlist, StorageError> {
        let list = Watchlist {
            id: WatchlistId::new(format!("custom-{}", uuid::Uuid::new_v4().simple())),
            name: name.trim().to_string(),
            entries: Vec::new(),
        };
        let mut lists = self.all()?;
        lists.push(list.clone());
        self.write(&lists)?;
        Ok(list)
    }

    fn write(&self, lists: &[Watchlist]) -> Result<(), StorageError> {
        write_json(self.storage.as_ref(), &StorageKey::Watchlists, &lists)
    }
}

fn default_lists() -> Vec<Watchlist> {
    ["watch-later", "favorites", "watching"]
        .into_iter()
        .zip(["Watch Later", "Favorites", "Watching"])
        .map(|(id, name)| Watchlist {
            id: WatchlistId::new(id),
            name: name.to_string(),
            entries: Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_utils::title_with_episodes;

    fn service() -> WatchlistService {
        WatchlistService::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn first_read_seeds_three_defaults() {
        let lists = service().all().unwrap();
        let ids: Vec<_> = lists.iter().map(|l| l.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["watch-later", "favorites", "watching"]);
        assert!(lists.iter().all(|l| l.entries.is_empty()));
    }

    #[test]
    fn toggle_adds_then_removes_membership() {
        let service = service();
        let title = title_with_episodes("march", 2);
        let list_id = WatchlistId::new("watch-later");

        assert!(service.toggle(&list_id, &title).unwrap());
        assert_eq!(
            service.lists_containing(&title.id).unwrap(),
            vec![list_id.clone()]
        );

        assert!(!service.toggle(&list_id, &title).unwrap());
        assert!(service.lists_containing(&title.id).unwrap().is_empty());
    }

    #[test]
    fn toggle_on_unknown_list_is_a_noop() {
        let service = service();
        let title = title_with_episodes("march", 2);
        assert!(!service
            .toggle(&WatchlistId::new("nope"), &title)
            .unwrap());
    }

    #[test]
    fn created_lists_persist() {
        let service = service();
        let list = service.create("Documentaries ").unwrap();
        assert_eq!(list.name, "Documentaries");

        let lists = service.all().unwrap();
        assert_eq!(lists.len(), 4);
        assert!(lists.iter().any(|l| l.id == list.id));
    }
}
