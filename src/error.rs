use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Title not found: {0}")]
    TitleNotFound(String),

    #[error("Episode {ordinal} not found for title {title}")]
    EpisodeNotFound { title: String, ordinal: u32 },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures from the persistent key-value backend. Writes are best-effort
/// for callers on the playback path; they log and keep going.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt value for key {key}: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
