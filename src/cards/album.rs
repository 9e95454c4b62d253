//! Album definitions.
//!
//! An `Album` is the fixed set of cards that together count as "complete".
//! Each card gets a dense slot index at construction so that per-user
//! ownership can be stored as a bitset instead of a hash set.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId};
use crate::errors::CatalogError;

/// Unique identifier for an album.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(pub u64);

impl AlbumId {
    /// Create a new album ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AlbumId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Album({})", self.0)
    }
}

/// Serialized shape of an album, as stored in catalog files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDefinition {
    pub id: AlbumId,
    pub name: String,
    pub cards: Vec<Card>,
}

/// Immutable album definition.
///
/// Invariants: at least one card, and every card id maps to exactly one
/// name. Listing the same card twice is harmless and collapses to one entry.
///
/// ## Example
///
/// ```
/// use album_tracker::cards::{Album, AlbumId, Card, CardId};
///
/// let album = Album::new(AlbumId::new(1), "Birds", vec![
///     Card::new(CardId::new(1), "Eagle"),
///     Card::new(CardId::new(2), "Raven"),
/// ]).unwrap();
///
/// assert_eq!(album.len(), 2);
/// assert!(album.contains(CardId::new(2)));
/// assert!(!album.contains(CardId::new(3)));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "AlbumDefinition", into = "AlbumDefinition")]
pub struct Album {
    id: AlbumId,
    name: String,
    /// Sorted by id; position is the card's slot.
    cards: Vec<Card>,
    slots: FxHashMap<CardId, usize>,
}

impl Album {
    /// Build and validate an album.
    pub fn new(
        id: AlbumId,
        name: impl Into<String>,
        cards: impl IntoIterator<Item = Card>,
    ) -> Result<Self, CatalogError> {
        let mut cards: Vec<Card> = cards.into_iter().collect();
        cards.sort_by_key(|c| c.id);

        let mut unique: Vec<Card> = Vec::with_capacity(cards.len());
        for card in cards {
            match unique.last() {
                Some(prev) if prev.id == card.id => {
                    if prev.name != card.name {
                        return Err(CatalogError::ConflictingCard {
                            card: card.id,
                            first: prev.name.clone(),
                            second: card.name,
                        });
                    }
                }
                _ => unique.push(card),
            }
        }

        if unique.is_empty() {
            return Err(CatalogError::EmptyAlbum { album_id: id.raw() });
        }

        let slots = unique
            .iter()
            .enumerate()
            .map(|(slot, card)| (card.id, slot))
            .collect();

        Ok(Self {
            id,
            name: name.into(),
            cards: unique,
            slots,
        })
    }

    #[must_use]
    pub fn id(&self) -> AlbumId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct cards needed to complete the album.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a validated album; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if a card belongs to this album.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.slot_of(id).map(|slot| &self.cards[slot])
    }

    /// Iterate over the cards in id order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Iterate over the card ids in id order.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }

    pub(crate) fn slot_of(&self, id: CardId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub(crate) fn card_at(&self, slot: usize) -> CardId {
        self.cards[slot].id
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.cards == other.cards
    }
}

impl Eq for Album {}

impl TryFrom<AlbumDefinition> for Album {
    type Error = CatalogError;

    fn try_from(def: AlbumDefinition) -> Result<Self, Self::Error> {
        Album::new(def.id, def.name, def.cards)
    }
}

impl From<Album> for AlbumDefinition {
    fn from(album: Album) -> Self {
        Self {
            id: album.id,
            name: album.name,
            cards: album.cards,
        }
    }
}
