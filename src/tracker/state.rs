//! Per-user collection state.
//!
//! Ownership is a bitset indexed by album slot. Albums of up to 128 cards
//! fit inline without a heap allocation.

use serde::Serialize;
use smallvec::{smallvec, SmallVec};

use crate::cards::{Album, CardId};
use crate::core::UserId;

const WORD_BITS: usize = u64::BITS as usize;

/// Why an assignment changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IgnoreReason {
    /// The card is not part of the album.
    UnknownCard,
    /// The user already owns the card.
    AlreadyOwned,
    /// The user already finished the album.
    AlreadyComplete,
}

/// Coarse progress of one user's collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CollectionStatus {
    Empty,
    Partial,
    Complete,
}

/// Result of applying one card to a user's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    Ignored(IgnoreReason),
    Added,
    /// This call moved the user to `Complete`. Happens at most once per user.
    Completed,
}

#[derive(Clone, Debug)]
pub(crate) struct UserCollectionState {
    owned: SmallVec<[u64; 2]>,
    owned_count: usize,
    completed: bool,
}

impl UserCollectionState {
    pub(crate) fn new(album_len: usize) -> Self {
        Self {
            owned: smallvec![0; album_len.div_ceil(WORD_BITS)],
            owned_count: 0,
            completed: false,
        }
    }

    /// Add the card at `slot`. `total` is the album size.
    pub(crate) fn record(&mut self, slot: usize, total: usize) -> Transition {
        if self.completed {
            return Transition::Ignored(IgnoreReason::AlreadyComplete);
        }

        let (word, mask) = locate(slot);
        if self.owned[word] & mask != 0 {
            return Transition::Ignored(IgnoreReason::AlreadyOwned);
        }

        self.owned[word] |= mask;
        self.owned_count += 1;

        if self.owned_count == total {
            self.completed = true;
            Transition::Completed
        } else {
            Transition::Added
        }
    }

    pub(crate) fn owns(&self, slot: usize) -> bool {
        let (word, mask) = locate(slot);
        self.owned.get(word).is_some_and(|w| w & mask != 0)
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.completed
    }

    pub(crate) fn status(&self) -> CollectionStatus {
        if self.completed {
            CollectionStatus::Complete
        } else if self.owned_count == 0 {
            CollectionStatus::Empty
        } else {
            CollectionStatus::Partial
        }
    }

    pub(crate) fn snapshot(&self, user: UserId, album: &Album) -> CollectionSnapshot {
        let owned = (0..album.len())
            .filter(|&slot| self.owns(slot))
            .map(|slot| album.card_at(slot))
            .collect();

        CollectionSnapshot {
            user,
            owned,
            total: album.len(),
            status: self.status(),
        }
    }
}

fn locate(slot: usize) -> (usize, u64) {
    (slot / WORD_BITS, 1u64 << (slot % WORD_BITS))
}

/// Point-in-time copy of one user's collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CollectionSnapshot {
    pub user: UserId,
    /// Owned card ids in ascending order.
    pub owned: Vec<CardId>,
    /// Cards in the album.
    pub total: usize,
    pub status: CollectionStatus,
}

impl CollectionSnapshot {
    /// Cards still missing.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total - self.owned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progression() {
        let mut state = UserCollectionState::new(3);
        assert_eq!(state.status(), CollectionStatus::Empty);

        assert_eq!(state.record(0, 3), Transition::Added);
        assert_eq!(state.status(), CollectionStatus::Partial);
        assert_eq!(state.record(2, 3), Transition::Added);
        assert_eq!(state.record(1, 3), Transition::Completed);
        assert_eq!(state.status(), CollectionStatus::Complete);
        assert!(state.is_complete());
    }

    #[test]
    fn test_duplicate_does_not_count_twice() {
        let mut state = UserCollectionState::new(2);

        assert_eq!(state.record(1, 2), Transition::Added);
        assert_eq!(state.record(1, 2), Transition::Ignored(IgnoreReason::AlreadyOwned));
        assert_eq!(state.owned_count, 1);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut state = UserCollectionState::new(1);

        assert_eq!(state.record(0, 1), Transition::Completed);
        assert_eq!(state.record(0, 1), Transition::Ignored(IgnoreReason::AlreadyComplete));
        assert_eq!(state.status(), CollectionStatus::Complete);
    }

    #[test]
    fn test_bitset_spans_words() {
        let total = 130;
        let mut state = UserCollectionState::new(total);
        assert_eq!(state.owned.len(), 3);

        for slot in (0..total).rev() {
            let expected = if slot == 0 { Transition::Completed } else { Transition::Added };
            assert_eq!(state.record(slot, total), expected);
        }
        assert!(state.owns(64));
        assert!(state.owns(129));
        assert!(!state.owns(130));
    }
}
