//! Error types.
//!
//! Only catalog loading and configuration can fail. Assignment never fails
//! the caller, and observer failures are isolated and reported through
//! [`DispatchReport`](crate::events::DispatchReport) rather than returned.

use std::path::PathBuf;

use crate::cards::CardId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Album catalog could not be loaded or is malformed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Tracker configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("album {album_id} has no cards")]
    EmptyAlbum { album_id: u64 },

    #[error("card {card} listed as both {first:?} and {second:?}")]
    ConflictingCard {
        card: CardId,
        first: String,
        second: String,
    },

    #[error("unsupported catalog format for {0}")]
    UnsupportedFormat(PathBuf),

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed binary catalog: {0}")]
    Bincode(#[from] bincode::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("shard amount must be a power of two greater than 1, got {0}")]
    InvalidShardAmount(usize),

    #[error("malformed tracker config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure raised by one observer while handling one event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObserverError {
    /// The observer reported its own failure.
    #[error("observer failed: {0}")]
    Failed(String),

    /// The observer panicked; the payload message is kept when it is a string.
    #[error("observer panicked: {0}")]
    Panicked(String),

    /// Channel-backed observer whose receiver has been dropped.
    #[error("subscription channel disconnected")]
    Disconnected,
}

impl ObserverError {
    /// Convenience constructor for observer implementations.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}
