//! User identification.

use serde::{Deserialize, Serialize};

/// Identifier of a collecting user.
///
/// Users need not be registered anywhere: the tracker creates their
/// collection lazily on the first assignment it sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Create a new user ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Iterate over `count` consecutive user IDs starting at 0.
    ///
    /// ```
    /// use album_tracker::core::UserId;
    ///
    /// let users: Vec<_> = UserId::range(3).collect();
    /// assert_eq!(users, vec![UserId::new(0), UserId::new(1), UserId::new(2)]);
    /// ```
    pub fn range(count: u64) -> impl Iterator<Item = UserId> {
        (0..count).map(UserId)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User({})", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
