//! Pending draw order.
//!
//! The `DeckManager` holds the ids still waiting to be drawn, front first.
//! When it runs dry it refills from the whole catalogue and reshuffles, so the
//! deck is logically cyclical. Stories and follow-ups splice ids into it:
//! - `push_front`: the very next draw
//! - `inject_front`: a block at the front, first id frontmost
//! - `inject_windowed`: random positions near the front
//! - `inject_probabilistic`: one id, only if a roll succeeds

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::cards::{Card, CardId, CardRegistry};
use crate::core::error::{EngineError, Result};
use crate::core::rng::GameRng;

/// Ordered sequence of pending card ids.
///
/// ## Usage
///
/// ```
/// use choice_core::cards::{Card, CardRegistry};
/// use choice_core::core::GameRng;
/// use choice_core::deck::DeckManager;
///
/// let catalogue: CardRegistry = ["a", "b", "c"].into_iter().map(|id| Card::new(id, "")).collect();
/// let mut rng = GameRng::new(42);
///
/// let mut deck = DeckManager::from_ids(catalogue.ids().cloned());
/// deck.shuffle(&mut rng);
///
/// let card = deck.draw(&catalogue, &mut rng).unwrap();
/// assert!(catalogue.contains(&card.id));
/// assert_eq!(deck.cards_drawn(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeckManager {
    pending: VecDeque<CardId>,
    drawn: u64,
}

impl DeckManager {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck holding the given ids in order.
    pub fn from_ids(ids: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            pending: ids.into_iter().collect(),
            drawn: 0,
        }
    }

    /// Uniformly permute the pending ids.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.pending.make_contiguous());
    }

    /// Remove and return the front id, refilling from the catalogue when empty.
    ///
    /// Increments the draw counter. Fails only when the catalogue itself is
    /// empty.
    pub fn draw_id(&mut self, catalogue: &CardRegistry, rng: &mut GameRng) -> Result<CardId> {
        if self.pending.is_empty() {
            self.pending.extend(catalogue.ids().cloned());
            self.shuffle(rng);
            debug!(cards = self.pending.len(), "deck refilled from catalogue");
        }
        let id = self.pending.pop_front().ok_or(EngineError::EmptyCatalogue)?;
        self.drawn += 1;
        Ok(id)
    }

    /// Draw the next card and resolve it against the catalogue.
    ///
    /// Ids without a catalogue entry are skipped.
    pub fn draw(&mut self, catalogue: &CardRegistry, rng: &mut GameRng) -> Result<Card> {
        loop {
            let id = self.draw_id(catalogue, rng)?;
            match catalogue.get(&id) {
                Some(card) => return Ok(card.clone()),
                None => warn!(card = %id, "skipping card id missing from catalogue"),
            }
        }
    }

    /// Put a card at the very front.
    pub fn push_front(&mut self, id: CardId) {
        self.pending.push_front(id);
    }

    /// Put a block of cards at the front, keeping their order.
    ///
    /// The first id in `ids` ends up frontmost.
    pub fn inject_front(&mut self, ids: &[CardId]) {
        for id in ids.iter().rev() {
            self.pending.push_front(id.clone());
        }
    }

    /// Insert each id at a random index in `[0, min(window, len)]`.
    ///
    /// Ids are processed last to first and the bound is resampled after every
    /// insertion, which biases earlier ids toward the front.
    pub fn inject_windowed(&mut self, ids: &[CardId], window: usize, rng: &mut GameRng) {
        for id in ids.iter().rev() {
            let max = window.min(self.pending.len());
            let idx = rng.gen_index(max);
            self.pending.insert(idx, id.clone());
        }
    }

    /// Roll once; on success insert `id` at a random index in
    /// `[0, min(range, len)]`.
    ///
    /// Returns whether the card was injected. A probability of zero never
    /// injects.
    pub fn inject_probabilistic(&mut self, id: &CardId, probability: f64, range: usize, rng: &mut GameRng) -> bool {
        let roll = rng.gen_unit();
        if probability <= 0.0 || roll > probability {
            debug!(card = %id, probability, roll, "probabilistic injection skipped");
            return false;
        }
        let max = range.min(self.pending.len());
        let idx = rng.gen_index(max);
        self.pending.insert(idx, id.clone());
        debug!(card = %id, probability, roll, position = idx, "probabilistic injection");
        true
    }

    /// Pending ids, front first.
    pub fn pending(&self) -> impl Iterator<Item = &CardId> {
        self.pending.iter()
    }

    /// Position of an id in the pending order.
    #[must_use]
    pub fn position(&self, id: &CardId) -> Option<usize> {
        self.pending.iter().position(|p| p == id)
    }

    /// Total number of draws so far.
    #[must_use]
    pub fn cards_drawn(&self) -> u64 {
        self.drawn
    }

    /// Number of pending ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<CardId> {
        raw.iter().map(|&s| CardId::new(s)).collect()
    }

    fn catalogue(raw: &[&str]) -> CardRegistry {
        raw.iter().map(|&id| Card::new(id, "")).collect()
    }

    fn pending(deck: &DeckManager) -> Vec<&str> {
        deck.pending().map(CardId::as_str).collect()
    }

    #[test]
    fn test_draw_in_order() {
        let cat = catalogue(&["a", "b"]);
        let mut rng = GameRng::new(1);
        let mut deck = DeckManager::from_ids(ids(&["b", "a"]));

        assert_eq!(deck.draw(&cat, &mut rng).unwrap().id.as_str(), "b");
        assert_eq!(deck.draw(&cat, &mut rng).unwrap().id.as_str(), "a");
        assert_eq!(deck.cards_drawn(), 2);
    }

    #[test]
    fn test_draw_refills_when_empty() {
        let cat = catalogue(&["a", "b", "c"]);
        let mut rng = GameRng::new(1);
        let mut deck = DeckManager::new();

        let card = deck.draw(&cat, &mut rng).unwrap();
        assert!(cat.contains(&card.id));
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_draw_empty_catalogue_fails() {
        let cat = CardRegistry::new();
        let mut rng = GameRng::new(1);
        let mut deck = DeckManager::new();

        assert!(matches!(deck.draw(&cat, &mut rng), Err(EngineError::EmptyCatalogue)));
        assert_eq!(deck.cards_drawn(), 0);
    }

    #[test]
    fn test_draw_skips_unknown_ids() {
        let cat = catalogue(&["a"]);
        let mut rng = GameRng::new(1);
        let mut deck = DeckManager::from_ids(ids(&["ghost", "a"]));

        assert_eq!(deck.draw(&cat, &mut rng).unwrap().id.as_str(), "a");
    }

    #[test]
    fn test_push_front() {
        let mut deck = DeckManager::from_ids(ids(&["a", "b"]));
        deck.push_front(CardId::new("f"));
        assert_eq!(pending(&deck), vec!["f", "a", "b"]);
    }

    #[test]
    fn test_inject_front_keeps_order() {
        let mut deck = DeckManager::from_ids(ids(&["x", "y"]));
        deck.inject_front(&ids(&["s1", "s2", "s3"]));
        assert_eq!(pending(&deck), vec!["s1", "s2", "s3", "x", "y"]);
    }

    #[test]
    fn test_inject_windowed_within_window() {
        let mut rng = GameRng::new(9);
        for _ in 0..200 {
            let mut deck = DeckManager::from_ids(ids(&["x", "y", "z", "w", "v", "u"]));
            deck.inject_windowed(&ids(&["a", "b"]), 2, &mut rng);

            assert_eq!(deck.len(), 8);
            // B is inserted first into [0, 2]; A then into [0, 2] and may push B to 3.
            assert!(deck.position(&CardId::new("a")).unwrap() <= 2);
            assert!(deck.position(&CardId::new("b")).unwrap() <= 3);
        }
    }

    #[test]
    fn test_inject_windowed_into_empty_deck() {
        let mut rng = GameRng::new(9);
        let mut deck = DeckManager::new();
        deck.inject_windowed(&ids(&["a", "b"]), 5, &mut rng);

        // b lands at 0, a then lands at 0 or 1.
        assert_eq!(deck.len(), 2);
        assert!(deck.position(&CardId::new("a")).is_some());
    }

    #[test]
    fn test_inject_probabilistic_certain_and_never() {
        let mut rng = GameRng::new(5);
        let mut deck = DeckManager::from_ids(ids(&["x", "y", "z"]));

        for _ in 0..50 {
            assert!(!deck.inject_probabilistic(&CardId::new("never"), 0.0, 15, &mut rng));
        }
        assert_eq!(deck.len(), 3);

        assert!(deck.inject_probabilistic(&CardId::new("always"), 1.0, 1, &mut rng));
        assert!(deck.position(&CardId::new("always")).unwrap() <= 1);
    }

    #[test]
    fn test_shuffle_preserves_contents() {
        let mut rng = GameRng::new(42);
        let raw: Vec<String> = (0..20).map(|i| format!("c{i}")).collect();
        let mut deck = DeckManager::from_ids(raw.iter().map(CardId::new));

        deck.shuffle(&mut rng);

        let mut after: Vec<_> = deck.pending().map(|c| c.as_str().to_string()).collect();
        assert_ne!(after, raw);
        after.sort();
        let mut expected = raw.clone();
        expected.sort();
        assert_eq!(after, expected);
    }
}
