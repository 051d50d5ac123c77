use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::models::{HistoryEntry, Title, TitleId};
use crate::services::{FavoritesService, HistoryService};

const RECOMMENDATION_COUNT: usize = 6;

/// Personalized picks computed from local history and favorites. Scoring is
/// fully deterministic; ties break on title id so the result is stable across
/// reloads.
pub struct RecommendationService<'a> {
    catalog: &'a Catalog,
    history: &'a HistoryService,
    favorites: &'a FavoritesService,
}

impl<'a> RecommendationService<'a> {
    pub fn new(
        catalog: &'a Catalog,
        history: &'a HistoryService,
        favorites: &'a FavoritesService,
    ) -> Self {
        Self {
            catalog,
            history,
            favorites,
        }
    }

    /// Top picks the user has not watched, excluding `current` (the title
    /// whose page the recommendations appear on, when any).
    pub fn picks(&self, current: Option<&TitleId>) -> Vec<Title> {
        let entries = self.history.recent();
        let watched: Vec<&TitleId> = entries.iter().map(|e| &e.title_id).collect();
        let genre_prefs = self.genre_preferences(&entries);
        let favorite_ids = self.favorites.all();

        let mut scored: Vec<(i64, &Title)> = self
            .catalog
            .titles()
            .iter()
            .filter(|t| !watched.contains(&&t.id) && Some(&t.id) != current)
            .map(|t| (score(t, &genre_prefs, &favorite_ids), t))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));

        scored
            .into_iter()
            .take(RECOMMENDATION_COUNT)
            .map(|(_, t)| t.clone())
            .collect()
    }

    /// "Because you watched X": unwatched titles sharing a genre with the most
    /// recent history entry, newest-first by year. Empty history yields none.
    pub fn because_you_watched(&self) -> Option<(Title, Vec<Title>)> {
        let entries = self.history.recent();
        let latest = self.catalog.title(&entries.first()?.title_id)?;
        let watched: Vec<&TitleId> = entries.iter().map(|e| &e.title_id).collect();

        let mut related: Vec<Title> = self
            .catalog
            .titles()
            .iter()
            .filter(|t| {
                t.id != latest.id
                    && !watched.contains(&&t.id)
                    && t.genres.iter().any(|g| latest.genres.contains(g))
            })
            .cloned()
            .collect();
        related.sort_by(|a, b| {
            b.release_year
                .cmp(&a.release_year)
                .then_with(|| a.id.cmp(&b.id))
        });
        related.truncate(RECOMMENDATION_COUNT);

        Some((latest.clone(), related))
    }

    /// How often each genre appears across the watch history.
    fn genre_preferences(&self, entries: &[HistoryEntry]) -> HashMap<String, i64> {
        let mut counts = HashMap::new();
        for entry in entries {
            if let Some(title) = self.catalog.title(&entry.title_id) {
                for genre in &title.genres {
                    *counts.entry(genre.clone()).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

fn score(title: &Title, genre_prefs: &HashMap<String, i64>, favorites: &[TitleId]) -> i64 {
    let mut score: i64 = title
        .genres
        .iter()
        .map(|g| genre_prefs.get(g).copied().unwrap_or(0))
        .sum();

    if title.release_year > 2020 {
        score += 5;
    }
    if title.release_year > 2018 {
        score += 2;
    }

    let episodes = title.episode_count();
    if episodes > 10 {
        score += 3;
    }
    if episodes < 5 {
        score += 1;
    }

    if favorites.contains(&title.id) {
        score += 4;
    }

    score
}
