mod identifiers;

pub use identifiers::{CommentId, PartyCode, TitleId, UserId, WatchlistId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One catalog entry (a show or a standalone film). Read-only: sourced from
/// the static catalog, never mutated by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,
    pub name: String,
    pub release_year: u32,
    pub status: TitleStatus,
    pub genres: Vec<String>,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub poster: Option<String>,
    pub episodes: Vec<Episode>,
}

impl Title {
    pub fn episode_count(&self) -> u32 {
        self.episodes.len() as u32
    }
}

/// One playable unit within a title, addressed by a 1-based ordinal.
/// Ordinal uniqueness and contiguity are invariants of the catalog data,
/// not enforced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub ordinal: u32,
    pub media: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleStatus {
    Airing,
    Completed,
    Feature,
}

/// Last known playback position for a (title, episode) pair. Keyed by that
/// pair in storage; last write wins, no history retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub title_id: TitleId,
    pub ordinal: u32,
    pub position_secs: f64,
    pub written_at: DateTime<Utc>,
}

/// One watch-history entry. The history list is newest-first, unique per
/// (title, ordinal), capped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title_id: TitleId,
    pub title_name: String,
    pub ordinal: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub poster: Option<String>,
}

/// "Login" writes this record locally; there is no backend account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUser {
    pub email: String,
    pub name: String,
    pub login_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub user: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// Per-title star-rating state. The average is a running client-side value,
/// not a server aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    pub user_rating: Option<u8>,
    pub average: f64,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub user_vote: Option<Vote>,
    pub likes: u32,
    pub dislikes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Watchlist {
    pub id: WatchlistId,
    pub name: String,
    #[serde(default)]
    pub entries: Vec<WatchlistEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub title_id: TitleId,
    pub title_name: String,
    #[serde(default)]
    pub poster: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Watch parties are a local stub: a record keyed by code, no synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchParty {
    pub code: PartyCode,
    pub title_id: TitleId,
    pub ordinal: u32,
    pub host: String,
    pub created_at: DateTime<Utc>,
    pub members: Vec<String>,
}
