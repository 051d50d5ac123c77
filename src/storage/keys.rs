use crate::constants::STORAGE_PREFIX;
use crate::models::{PartyCode, TitleId};

/// Type-safe storage key system to replace string-based key construction.
/// Every feature sharing the key-value namespace goes through this enum, so
/// the full key surface is visible in one place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Playback position for a (title, episode) pair
    Progress(TitleId, u32),

    /// Watch history list (capped, newest first)
    History,

    /// Favorite title ids
    Favorites,

    /// Recent search terms (capped)
    SearchHistory,

    /// All named watchlists
    Watchlists,

    /// Star-rating summary for a title
    Ratings(TitleId),

    /// Thumb-vote tally for a title
    Votes(TitleId),

    /// Threaded comments for a (title, episode) pair
    Comments(TitleId, u32),

    /// The locally "logged in" user record
    User,

    /// A watch-party record by its join code
    Party(PartyCode),
}

impl StorageKey {
    pub fn to_key(&self) -> String {
        match self {
            StorageKey::Progress(title, ordinal) => {
                format!("{STORAGE_PREFIX}-progress-{title}-{ordinal}")
            }
            StorageKey::History => format!("{STORAGE_PREFIX}-history"),
            StorageKey::Favorites => format!("{STORAGE_PREFIX}-favorites"),
            StorageKey::SearchHistory => format!("{STORAGE_PREFIX}-search-history"),
            StorageKey::Watchlists => format!("{STORAGE_PREFIX}-watchlists"),
            StorageKey::Ratings(title) => format!("{STORAGE_PREFIX}-ratings-{title}"),
            StorageKey::Votes(title) => format!("{STORAGE_PREFIX}-votes-{title}"),
            StorageKey::Comments(title, ordinal) => {
                format!("{STORAGE_PREFIX}-comments-{title}-{ordinal}")
            }
            StorageKey::User => format!("{STORAGE_PREFIX}-user"),
            StorageKey::Party(code) => format!("{STORAGE_PREFIX}-party-{code}"),
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_key())
    }
}
