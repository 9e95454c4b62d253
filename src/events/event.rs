//! Tracker events.
//!
//! Events are immutable values describing a state transition the tracker
//! has observed. `EventKind` is non-exhaustive so that new kinds can be
//! added without breaking observers that match on it.

use serde::{Deserialize, Serialize};

use crate::core::UserId;

/// Kind of tracker event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EventKind {
    /// The user's owned-card set became equal to the full album.
    AlbumFinished,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlbumFinished => f.write_str("album finished"),
        }
    }
}

/// An event delivered to observers. Compared by (user, kind).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// The user the event is about.
    pub user: UserId,

    /// What happened.
    pub kind: EventKind,
}

impl Event {
    #[must_use]
    pub const fn new(user: UserId, kind: EventKind) -> Self {
        Self { user, kind }
    }

    /// Create an album-finished event.
    #[must_use]
    pub const fn album_finished(user: UserId) -> Self {
        Self::new(user, EventKind::AlbumFinished)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.user, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_equality() {
        let a = Event::album_finished(UserId::new(1));
        let b = Event::new(UserId::new(1), EventKind::AlbumFinished);
        let c = Event::album_finished(UserId::new(2));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_event_display() {
        let event = Event::album_finished(UserId::new(42));
        assert_eq!(event.to_string(), "User(42): album finished");
    }
}
