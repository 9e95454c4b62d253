//! Card definitions - static card data.
//!
//! A `Card` is the immutable catalog entry for one collectible. Which users
//! own it is tracked separately by the
//! [`CompletionTracker`](crate::tracker::CompletionTracker).

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within an album.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u64);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card definition.
///
/// Two cards are equal iff both id and name match. Within one album a
/// given id always carries the same name; [`Album`](super::Album)
/// construction rejects catalogs that break this.
///
/// ## Example
///
/// ```
/// use album_tracker::cards::{Card, CardId};
///
/// let eagle = Card::new(CardId::new(1), "Eagle");
/// assert_eq!(eagle.id, CardId::new(1));
/// assert_eq!(eagle.name, "Eagle");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,
}

impl Card {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_card_equality_uses_id_and_name() {
        let a = Card::new(CardId::new(1), "Eagle");
        let b = Card::new(CardId::new(1), "Eagle");
        let renamed = Card::new(CardId::new(1), "Hawk");
        let other = Card::new(CardId::new(2), "Eagle");

        assert_eq!(a, b);
        assert_ne!(a, renamed);
        assert_ne!(a, other);
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(CardId::new(7), "Bream");

        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"{"id":7,"name":"Bream"}"#);

        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
