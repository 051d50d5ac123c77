mod account;
mod comments;
mod favorites;
mod history;
mod progress;
mod ratings;
mod recommend;
mod search;
mod watch_party;
mod watchlists;

pub use account::AccountService;
pub use comments::CommentsService;
pub use favorites::FavoritesService;
pub use history::HistoryService;
pub use progress::ProgressService;
pub use ratings::RatingsService;
pub use recommend::RecommendationService;
pub use search::SearchHistoryService;
pub use watch_party::WatchPartyService;
pub use watchlists::WatchlistService;
