//! Card catalogue.
//!
//! The `CardRegistry` stores every card a session can draw, in configuration
//! order. Story mixing registers embedded cards into it at runtime, so lookups
//! and registration are both keyed by `CardId`.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId};

/// Ordered catalogue of cards, unique by id.
///
/// ## Example
///
/// ```
/// use choice_core::cards::{Card, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// assert!(registry.register(Card::new("rain", "It is raining.")));
/// assert!(!registry.register(Card::new("rain", "A duplicate is ignored.")));
///
/// let found = registry.get(&CardId::new("rain")).unwrap();
/// assert_eq!(found.description, "It is raining.");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card unless its id is already present.
    ///
    /// Returns `true` if the card was added.
    pub fn register(&mut self, card: Card) -> bool {
        if self.index.contains_key(&card.id) {
            return false;
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(card);
        true
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Iterate over all ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter().map(|c| &c.id)
    }
}

impl FromIterator<Card> for CardRegistry {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut registry = Self::new();
        for card in iter {
            registry.register(card);
        }
        registry
    }
}
