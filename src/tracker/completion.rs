//! The completion tracker.

use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam::channel::{unbounded, Receiver};
use dashmap::DashMap;
use parking_lot::Mutex;
use rustc_hash::FxHasher;
use serde::Serialize;
use tracing::{debug, info};

use super::state::{CollectionSnapshot, IgnoreReason, Transition, UserCollectionState};
use crate::cards::{Album, AlbumProvider, CardId};
use crate::core::{TrackerConfig, UserId};
use crate::errors::Result;
use crate::events::{ChannelObserver, DispatchReport, Event, Observer, SubscriberRegistry, SubscriptionId};

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// What a single `assign_card` call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The card was added; the album is still incomplete.
    Added,
    /// The card completed the album and the event was dispatched.
    Completed(DispatchReport),
}

impl AssignOutcome {
    #[must_use]
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Counters describing a tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrackerStats {
    /// Users with at least one recorded card.
    pub users: usize,
    /// Users that finished the album.
    pub completed: usize,
    pub subscribers: usize,
    pub observer_failures: u64,
}

/// Tracks album completion for many users concurrently.
///
/// Every user has its own lock; the user map is a sharded `DashMap`, so
/// assignments for unrelated users never wait on each other. The
/// incomplete-to-complete transition happens under the user's lock and is
/// observed by exactly one caller, which then dispatches the
/// `AlbumFinished` event outside the lock.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use album_tracker::cards::{Album, AlbumId, Card, CardId};
/// use album_tracker::core::UserId;
/// use album_tracker::events::Event;
/// use album_tracker::tracker::CompletionTracker;
///
/// let album = Album::new(AlbumId::new(1), "Birds", vec![
///     Card::new(CardId::new(1), "Eagle"),
///     Card::new(CardId::new(2), "Raven"),
/// ]).unwrap();
/// let tracker = CompletionTracker::new(album);
///
/// let finished = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&finished);
/// tracker.subscribe(move |_: &Event| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let user = UserId::new(7);
/// tracker.assign_card(user, CardId::new(1));
/// tracker.assign_card(user, CardId::new(1));
/// tracker.assign_card(user, CardId::new(2));
///
/// assert_eq!(finished.load(Ordering::SeqCst), 1);
/// assert!(tracker.is_complete(user));
/// ```
pub struct CompletionTracker {
    album: Arc<Album>,
    users: DashMap<UserId, Arc<Mutex<UserCollectionState>>, FxBuildHasher>,
    subscribers: SubscriberRegistry,
    completed: AtomicUsize,
}

impl CompletionTracker {
    /// Create a tracker with the default configuration.
    pub fn new(album: impl Into<Arc<Album>>) -> Self {
        Self::build(album.into(), &TrackerConfig::default())
    }

    /// Create a tracker with a validated configuration.
    pub fn with_config(album: impl Into<Arc<Album>>, config: &TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(album.into(), config))
    }

    /// Load the album from `provider` and create a tracker for it.
    pub fn from_provider(provider: &dyn AlbumProvider, config: &TrackerConfig) -> Result<Self> {
        let album = provider.album()?;
        Self::with_config(album, config)
    }

    fn build(album: Arc<Album>, config: &TrackerConfig) -> Self {
        let users = match config.shard_amount {
            Some(shards) => DashMap::with_capacity_and_hasher_and_shard_amount(
                config.user_capacity,
                FxBuildHasher::default(),
                shards,
            ),
            None => DashMap::with_capacity_and_hasher(config.user_capacity, FxBuildHasher::default()),
        };

        info!(album = %album.id(), name = album.name(), cards = album.len(), "Completion tracker created");

        Self {
            album,
            users,
            subscribers: SubscriberRegistry::new(),
            completed: AtomicUsize::new(0),
        }
    }

    /// The album this tracker completes against.
    #[must_use]
    pub fn album(&self) -> &Album {
        &self.album
    }

    /// Record that `user` received `card`.
    ///
    /// Unknown cards, cards the user already owns, and any card for a user
    /// who already finished are ignored. The call that adds the last
    /// missing card dispatches `AlbumFinished` to every current subscriber
    /// before returning; no other call for that user ever does.
    pub fn assign_card(&self, user: UserId, card: CardId) -> AssignOutcome {
        let Some(slot) = self.album.slot_of(card) else {
            return AssignOutcome::Ignored(IgnoreReason::UnknownCard);
        };

        let record = self.record_for(user);
        let transition = record.lock().record(slot, self.album.len());

        match transition {
            Transition::Ignored(reason) => AssignOutcome::Ignored(reason),
            Transition::Added => AssignOutcome::Added,
            Transition::Completed => {
                self.completed.fetch_add(1, Ordering::Relaxed);
                debug!(%user, album = %self.album.id(), "Album finished");
                AssignOutcome::Completed(self.subscribers.dispatch(&Event::album_finished(user)))
            }
        }
    }

    /// Register an observer for all future events.
    pub fn subscribe(&self, observer: impl Observer + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Arc::new(observer))
    }

    /// Register a channel-backed subscription.
    ///
    /// Dropping the receiver turns the subscription into a permanently
    /// failing observer; failures are counted but otherwise harmless.
    pub fn subscribe_channel(&self) -> (SubscriptionId, Receiver<Event>) {
        let (tx, rx) = unbounded();
        (self.subscribe(ChannelObserver::new(tx)), rx)
    }

    /// Snapshot of `user`'s collection, or `None` if nothing was ever
    /// recorded for them.
    #[must_use]
    pub fn collection(&self, user: UserId) -> Option<CollectionSnapshot> {
        let record = self.users.get(&user).map(|r| Arc::clone(r.value()))?;
        let state = record.lock();
        Some(state.snapshot(user, &self.album))
    }

    #[must_use]
    pub fn is_complete(&self, user: UserId) -> bool {
        self.users
            .get(&user)
            .map(|r| Arc::clone(r.value()))
            .is_some_and(|record| record.lock().is_complete())
    }

    #[must_use]
    pub fn stats(&self) -> TrackerStats {
        TrackerStats {
            users: self.users.len(),
            completed: self.completed.load(Ordering::Relaxed),
            subscribers: self.subscribers.len(),
            observer_failures: self.subscribers.failure_count(),
        }
    }

    /// Fetch the user's record, creating it on first sight. Concurrent
    /// first-touch callers all receive the same record.
    fn record_for(&self, user: UserId) -> Arc<Mutex<UserCollectionState>> {
        if let Some(record) = self.users.get(&user) {
            return Arc::clone(record.value());
        }

        let record = self
            .users
            .entry(user)
            .or_insert_with(|| Arc::new(Mutex::new(UserCollectionState::new(self.album.len()))));
        Arc::clone(record.value())
    }
}

impl std::fmt::Debug for CompletionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionTracker")
            .field("album", &self.album.id())
            .field("stats", &self.stats())
            .finish()
    }
}
