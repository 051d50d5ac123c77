use std::collections::HashSet;

use crate::models::{HistoryEntry, Title, TitleId};

const SECTION_SIZE: usize = 6;

/// The curated rows shown when the catalog is browsed without a filter.
/// Built from the catalog plus the viewer's local history; pure data, no
/// storage access.
#[derive(Debug, Clone)]
pub struct HomeSections<'a> {
    pub recently_added: Vec<&'a Title>,
    pub trending: Vec<&'a Title>,
    pub continue_watching: Vec<&'a Title>,
    pub suggestions: Vec<&'a Title>,
}

pub fn build_home_sections<'a>(
    titles: &'a [Title],
    history: &[HistoryEntry],
) -> HomeSections<'a> {
    let watched: HashSet<&TitleId> = history.iter().map(|h| &h.title_id).collect();

    let mut recently_added: Vec<&Title> = titles.iter().collect();
    recently_added.sort_by(|a, b| b.release_year.cmp(&a.release_year));
    recently_added.truncate(SECTION_SIZE);

    let mut trending: Vec<&Title> = titles.iter().collect();
    trending.sort_by(|a, b| trending_score(b).cmp(&trending_score(a)));
    trending.truncate(SECTION_SIZE);

    // History is newest-first already; keep that order, one row per title.
    let mut continue_watching = Vec::new();
    let mut seen = HashSet::new();
    for entry in history {
        if seen.insert(&entry.title_id) {
            if let Some(title) = titles.iter().find(|t| t.id == entry.title_id) {
                continue_watching.push(title);
            }
        }
        if continue_watching.len() == SECTION_SIZE {
            break;
        }
    }

    let suggestions: Vec<&Title> = titles
        .iter()
        .filter(|t| !watched.contains(&t.id))
        .take(SECTION_SIZE)
        .collect();

    HomeSections {
        recently_added,
        trending,
        continue_watching,
        suggestions,
    }
}

/// Deterministic stand-in for engagement data the client does not have:
/// longer-running and newer titles rank higher.
fn trending_score(title: &Title) -> i64 {
    title.episodes.len() as i64 * 2 + (title.release_year as i64 - 2015).max(0)
}
