//! # album-tracker
//!
//! Concurrent album completion tracking for large user populations.
//!
//! Every user collects cards from one fixed album. The tracker records each
//! assignment and publishes an `AlbumFinished` event exactly once per user,
//! at the assignment that first makes their collection equal to the album.
//!
//! ## Design Principles
//!
//! 1. **Per-User Serialization**: Each user has their own lock. Unrelated
//!    users never contend, so tens of thousands of users can be fed from
//!    many threads at once.
//!
//! 2. **Exactly Once**: Duplicate detection and the incomplete-to-complete
//!    transition are one critical section. Only the caller that takes the
//!    transition dispatches, so no event is lost or repeated.
//!
//! 3. **No Ambient State**: A tracker owns its user map and subscribers.
//!    Several trackers (one per album) coexist independently.
//!
//! ## Modules
//!
//! - `core`: User IDs and tracker configuration
//! - `cards`: Cards, albums, and album catalog providers
//! - `events`: Events, observers, and dispatch
//! - `tracker`: The completion tracker

pub mod cards;
pub mod core;
pub mod errors;
pub mod events;
pub mod tracker;

// Re-export commonly used types
pub use crate::core::{TrackerConfig, UserId};

pub use crate::cards::{
    Album, AlbumDefinition, AlbumId, AlbumProvider, Card, CardId, CatalogFormat, FileAlbumProvider,
    StaticAlbumProvider,
};

pub use crate::errors::{CatalogError, ConfigError, Error, ObserverError, Result};

pub use crate::events::{
    ChannelObserver, DispatchReport, Event, EventKind, Observer, ObserverFailure,
    SubscriberRegistry, SubscriptionId,
};

pub use crate::tracker::{
    AssignOutcome, CollectionSnapshot, CollectionStatus, CompletionTracker, IgnoreReason,
    TrackerStats,
};
